//! Storage-backed development backend.
//!
//! Lets the app run end to end without the REST API: registrations live in
//! the [`RegistrationLedger`], confirmation emails are written to the console
//! log, and profiles are cached under `profile_<id>`. Passwords are accepted
//! without checking; this backend only exists for offline development.

#[cfg(test)]
#[path = "dev_backend_test.rs"]
mod dev_backend_test;

use std::sync::Arc;

use super::backend::{AuthBackend, BackendError};
use super::types::{
    FitnessLevel, Preferences, ProfileStats, RegistrationDetails, RegistrationReceipt, Session, UserProfile,
};
use crate::state::registration::RegistrationLedger;
use crate::util::storage::{KeyValueStore, load_json, profile_key, save_json};
use crate::util::time::now_rfc3339;

const TOKEN_LEN: usize = 13;

/// Short random token in the shape the mock API hands out.
#[must_use]
pub fn random_token() -> String {
    let mut token = uuid::Uuid::new_v4().simple().to_string();
    token.truncate(TOKEN_LEN);
    token
}

/// Deterministic stand-in profile for a user with no stored profile.
#[must_use]
pub fn placeholder_profile(user_id: &str, email: Option<&str>) -> UserProfile {
    let now = now_rfc3339();
    UserProfile {
        id: user_id.to_owned(),
        first_name: "John".to_owned(),
        last_name: "Doe".to_owned(),
        email: email.unwrap_or("user@example.com").to_owned(),
        date_of_birth: "1990-01-01".to_owned(),
        fitness_level: FitnessLevel::Intermediate,
        goals: vec!["weight_loss".to_owned(), "strength_building".to_owned()],
        preferences: Preferences { workout_duration: 30, workout_frequency: 3, accessibility_needs: Vec::new() },
        stats: ProfileStats { workouts_completed: 12, total_minutes: 480, streak_days: 5, goals_achieved: 3 },
        created_at: now.clone(),
        updated_at: now,
    }
}

pub struct DevMockBackend {
    storage: Arc<dyn KeyValueStore>,
    ledger: RegistrationLedger,
}

impl DevMockBackend {
    #[must_use]
    pub fn new(storage: Arc<dyn KeyValueStore>) -> Self {
        let ledger = RegistrationLedger::new(storage.clone());
        Self { storage, ledger }
    }
}

#[async_trait::async_trait(?Send)]
impl AuthBackend for DevMockBackend {
    async fn register(
        &self,
        email: &str,
        _password: &str,
        _details: &RegistrationDetails,
    ) -> Result<RegistrationReceipt, BackendError> {
        log::debug!("dev backend: registering {email}");
        Ok(RegistrationReceipt { id: uuid::Uuid::new_v4().to_string(), confirmation_token: random_token() })
    }

    async fn send_confirmation(&self, email: &str, token: &str, confirmation_url: &str) -> Result<(), BackendError> {
        log::info!("mock email sent to {email} with token {token}: {confirmation_url}");
        Ok(())
    }

    async fn confirm_email(&self, token: &str) -> Result<(), BackendError> {
        if self.ledger.token_matches(token) {
            Ok(())
        } else {
            Err(BackendError::Rejected("Invalid confirmation token".to_owned()))
        }
    }

    async fn login(&self, email: &str, _password: &str) -> Result<Session, BackendError> {
        let confirmed = self
            .ledger
            .confirmed_for(email)
            .ok_or_else(|| BackendError::Rejected("No confirmed account for this email".to_owned()))?;
        Ok(Session { id: confirmed.id, token: random_token(), email: Some(confirmed.email) })
    }

    async fn fetch_profile(&self, session: &Session) -> Result<UserProfile, BackendError> {
        let key = profile_key(&session.id);
        if let Some(profile) = load_json::<UserProfile>(self.storage.as_ref(), &key) {
            return Ok(profile);
        }
        let profile = placeholder_profile(&session.id, session.email.as_deref());
        save_json(self.storage.as_ref(), &key, &profile)?;
        Ok(profile)
    }

    async fn update_profile(&self, session: &Session, profile: &UserProfile) -> Result<UserProfile, BackendError> {
        save_json(self.storage.as_ref(), &profile_key(&session.id), profile)?;
        Ok(profile.clone())
    }
}
