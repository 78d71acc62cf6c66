//! Locally kept registration records (`pendingUser` / `confirmedUser`).
//!
//! A registration is written as pending with its confirmation token, then
//! promoted to the confirmed slot when the matching token is presented. Only
//! one record of each kind is kept; a newer registration replaces the older.

#[cfg(test)]
#[path = "registration_test.rs"]
mod registration_test;

use std::sync::Arc;

use crate::net::types::PendingRegistration;
use crate::util::storage::{
    CONFIRMED_USER_KEY, KeyValueStore, PENDING_USER_KEY, StorageError, load_json, save_json,
};

#[derive(Clone)]
pub struct RegistrationLedger {
    storage: Arc<dyn KeyValueStore>,
}

impl RegistrationLedger {
    #[must_use]
    pub fn new(storage: Arc<dyn KeyValueStore>) -> Self {
        Self { storage }
    }

    #[must_use]
    pub fn pending(&self) -> Option<PendingRegistration> {
        load_json(self.storage.as_ref(), PENDING_USER_KEY)
    }

    #[must_use]
    pub fn confirmed(&self) -> Option<PendingRegistration> {
        load_json(self.storage.as_ref(), CONFIRMED_USER_KEY)
    }

    /// Pending record registered under `email`, if any.
    #[must_use]
    pub fn pending_for(&self, email: &str) -> Option<PendingRegistration> {
        self.pending().filter(|p| p.email == email)
    }

    /// Confirmed record for `email`, if that address finished confirmation.
    #[must_use]
    pub fn confirmed_for(&self, email: &str) -> Option<PendingRegistration> {
        self.confirmed().filter(|c| c.email == email && c.email_confirmed)
    }

    /// Whether `token` matches the pending record's confirmation token.
    #[must_use]
    pub fn token_matches(&self, token: &str) -> bool {
        self.pending().is_some_and(|p| !token.is_empty() && p.confirmation_token == token)
    }

    /// Store `record` as the pending registration.
    ///
    /// # Errors
    ///
    /// Returns a [`StorageError`] if the record cannot be written.
    pub fn record_pending(&self, record: &PendingRegistration) -> Result<(), StorageError> {
        save_json(self.storage.as_ref(), PENDING_USER_KEY, record)
    }

    /// Promote the pending record to confirmed if `token` matches it.
    ///
    /// Returns the confirmed record, or `None` (leaving storage untouched) when
    /// there is no pending record or the token differs.
    ///
    /// # Errors
    ///
    /// Returns a [`StorageError`] if the confirmed record cannot be written.
    pub fn promote(&self, token: &str) -> Result<Option<PendingRegistration>, StorageError> {
        let Some(mut record) = self.pending().filter(|p| !token.is_empty() && p.confirmation_token == token) else {
            return Ok(None);
        };
        record.email_confirmed = true;
        save_json(self.storage.as_ref(), CONFIRMED_USER_KEY, &record)?;
        self.storage.remove(PENDING_USER_KEY);
        Ok(Some(record))
    }
}
