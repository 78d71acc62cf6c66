//! Session store: registration, email confirmation, login/logout and profile
//! edits for the current browser user.
//!
//! DESIGN
//! ======
//! One `SessionStore` is built at startup and handed to pages through Leptos
//! context. It owns the [`AuthState`] and pushes every change to an optional
//! observer (the app wires that to an `RwSignal`). Remote work goes through the
//! [`AuthBackend`] port; the session mirror (`authToken` / `userId`) and the
//! registration ledger go through the [`KeyValueStore`] port.
//!
//! CONCURRENCY
//! ===========
//! Operations run on the browser's single thread via `spawn_local`. The state
//! lock is never held across an `.await`. The loading flag is backed by an
//! in-flight counter so overlapping operations keep it raised until the last
//! one finishes. Nothing is cancellable and nothing times out.

#[cfg(test)]
#[path = "session_test.rs"]
mod session_test;

use std::sync::{Arc, Mutex, PoisonError};

use super::auth::AuthState;
use super::registration::RegistrationLedger;
use crate::config::ClientConfig;
use crate::net::backend::{AuthBackend, BackendError, select_backend};
use crate::net::types::{PendingRegistration, ProfilePatch, RegistrationDetails, Session, UserProfile};
use crate::util::storage::{AUTH_TOKEN_KEY, KeyValueStore, StorageError, USER_ID_KEY};
use crate::util::time::now_rfc3339;

pub const REGISTER_MESSAGE: &str = "Registration successful! Please check your email to confirm your account.";
pub const CONFIRM_MESSAGE: &str = "Email confirmed successfully! You can now log in.";
pub const RESEND_MESSAGE: &str = "Confirmation email resent successfully";

#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("Invalid confirmation token")]
    InvalidToken,
    #[error("No pending registration found for this email")]
    NoPendingRegistration,
    #[error("You need to log in first")]
    NotAuthenticated,
    /// The backend refused the request (bad credentials, duplicate account).
    #[error("{0}")]
    Rejected(String),
    #[error(transparent)]
    Backend(BackendError),
    #[error(transparent)]
    Storage(#[from] StorageError),
}

impl From<BackendError> for AuthError {
    fn from(err: BackendError) -> Self {
        match err {
            BackendError::Rejected(message) => Self::Rejected(message),
            BackendError::Storage(e) => Self::Storage(e),
            other @ BackendError::Api(_) => Self::Backend(other),
        }
    }
}

impl AuthError {
    /// Stable machine-readable code for logs.
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            Self::InvalidToken => "E_INVALID_TOKEN",
            Self::NoPendingRegistration => "E_NO_PENDING_REGISTRATION",
            Self::NotAuthenticated => "E_NOT_AUTHENTICATED",
            Self::Rejected(_) => "E_REJECTED",
            Self::Backend(_) => "E_BACKEND",
            Self::Storage(_) => "E_STORAGE",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RegisterOutcome {
    pub message: String,
    pub requires_email_confirmation: bool,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ConfirmOutcome {
    pub message: String,
}

/// Link mailed to a new account: `<origin>/confirm-email/<token>`.
#[must_use]
pub fn confirmation_url(app_origin: &str, token: &str) -> String {
    format!("{}/confirm-email/{token}", app_origin.trim_end_matches('/'))
}

type Observer = Arc<dyn Fn(&AuthState) + Send + Sync>;

struct Inner {
    state: AuthState,
    in_flight: usize,
    started: bool,
}

#[derive(Clone)]
pub struct SessionStore {
    backend: Arc<dyn AuthBackend>,
    storage: Arc<dyn KeyValueStore>,
    ledger: RegistrationLedger,
    app_origin: Arc<str>,
    inner: Arc<Mutex<Inner>>,
    observer: Option<Observer>,
}

/// Keeps the loading flag raised until dropped.
struct LoadingGuard<'a> {
    store: &'a SessionStore,
}

impl<'a> LoadingGuard<'a> {
    fn enter(store: &'a SessionStore) -> Self {
        store.mutate(|inner| {
            inner.in_flight += 1;
            inner.state.loading = true;
        });
        Self { store }
    }
}

impl Drop for LoadingGuard<'_> {
    fn drop(&mut self) {
        self.store.mutate(|inner| {
            inner.in_flight = inner.in_flight.saturating_sub(1);
            inner.state.loading = inner.in_flight > 0;
        });
    }
}

impl SessionStore {
    /// Build a store in the initializing state (loading until
    /// [`SessionStore::initialize`] has run).
    #[must_use]
    pub fn new(backend: Arc<dyn AuthBackend>, storage: Arc<dyn KeyValueStore>, app_origin: impl Into<String>) -> Self {
        let ledger = RegistrationLedger::new(storage.clone());
        let origin: String = app_origin.into();
        Self {
            backend,
            storage,
            ledger,
            app_origin: Arc::from(origin),
            inner: Arc::new(Mutex::new(Inner { state: AuthState::initializing(), in_flight: 1, started: false })),
            observer: None,
        }
    }

    /// Build a store with the backend selected by `config`.
    #[must_use]
    pub fn from_config(config: &ClientConfig, storage: Arc<dyn KeyValueStore>) -> Self {
        let backend = select_backend(config, storage.clone());
        Self::new(backend, storage, config.app_origin.clone())
    }

    /// Call `observer` with the new state after every change.
    #[must_use]
    pub fn with_observer(mut self, observer: impl Fn(&AuthState) + Send + Sync + 'static) -> Self {
        self.observer = Some(Arc::new(observer));
        self
    }

    /// Copy of the current state.
    #[must_use]
    pub fn snapshot(&self) -> AuthState {
        self.lock().state.clone()
    }

    #[must_use]
    pub fn ledger(&self) -> &RegistrationLedger {
        &self.ledger
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Apply `f` under the lock, then notify the observer with the lock released.
    fn mutate(&self, f: impl FnOnce(&mut Inner)) {
        let state = {
            let mut inner = self.lock();
            f(&mut inner);
            inner.state.clone()
        };
        if let Some(observer) = &self.observer {
            observer(&state);
        }
    }

    fn update(&self, f: impl FnOnce(&mut AuthState)) {
        self.mutate(|inner| f(&mut inner.state));
    }

    /// Restore a stored session on startup.
    ///
    /// Reads `authToken` / `userId`; when both exist the profile is loaded and
    /// the session published, otherwise (or if the profile cannot be loaded)
    /// both keys are cleared. Runs once; later calls return immediately.
    pub async fn initialize(&self) {
        let first_run = {
            let mut inner = self.lock();
            !std::mem::replace(&mut inner.started, true)
        };
        if !first_run {
            return;
        }
        // Adopts the in-flight slot reserved by `new`.
        let _loading = LoadingGuard { store: self };

        let token = self.storage.get(AUTH_TOKEN_KEY);
        let user_id = self.storage.get(USER_ID_KEY);
        let (Some(token), Some(user_id)) = (token, user_id) else {
            return;
        };

        let session = Session { id: user_id, token, email: None };
        match self.backend.fetch_profile(&session).await {
            Ok(profile) => {
                log::info!("restored session for user {}", session.id);
                let session = Session { email: Some(profile.email.clone()).filter(|e| !e.is_empty()), ..session };
                self.update(|s| {
                    s.session = Some(session);
                    s.profile = Some(profile);
                });
            }
            Err(e) => {
                log::warn!("stored session rejected, clearing it: {e}");
                self.clear_session_keys();
            }
        }
    }

    /// Register a new account and send its confirmation email.
    ///
    /// A pending registration with the confirmation token is recorded in
    /// storage. A failure to deliver the email is logged, not returned.
    ///
    /// # Errors
    ///
    /// Returns an [`AuthError`] if the backend refuses the registration or the
    /// pending record cannot be stored.
    pub async fn register(
        &self,
        email: &str,
        password: &str,
        details: Option<RegistrationDetails>,
    ) -> Result<RegisterOutcome, AuthError> {
        let _loading = LoadingGuard::enter(self);
        let details = details.unwrap_or_default();
        let email = email.trim();

        let receipt = self.backend.register(email, password, &details).await?;
        if receipt.confirmation_token.is_empty() {
            return Err(AuthError::Rejected("Registration returned no confirmation token".to_owned()));
        }
        let record = PendingRegistration {
            id: receipt.id,
            email: email.to_owned(),
            confirmation_token: receipt.confirmation_token,
            email_confirmed: false,
        };
        self.ledger.record_pending(&record)?;

        let url = confirmation_url(&self.app_origin, &record.confirmation_token);
        if let Err(e) = self.backend.send_confirmation(&record.email, &record.confirmation_token, &url).await {
            log::warn!("confirmation email for {} not sent: {e}", record.email);
        }
        self.update(|s| s.email_verification_sent = true);
        log::info!("registered {}; awaiting email confirmation", record.email);

        Ok(RegisterOutcome { message: REGISTER_MESSAGE.to_owned(), requires_email_confirmation: true })
    }

    /// Confirm a registration by its emailed token.
    ///
    /// On success a matching pending record is promoted to confirmed.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::InvalidToken`] if the token is empty or refused
    /// (the pending record is left untouched), or another [`AuthError`] if the
    /// backend cannot be reached.
    pub async fn confirm_email(&self, token: &str) -> Result<ConfirmOutcome, AuthError> {
        let token = token.trim();
        if token.is_empty() {
            return Err(AuthError::InvalidToken);
        }
        let _loading = LoadingGuard::enter(self);

        match self.backend.confirm_email(token).await {
            Ok(()) => {
                if let Some(record) = self.ledger.promote(token)? {
                    log::info!("email confirmed for {}", record.email);
                }
                Ok(ConfirmOutcome { message: CONFIRM_MESSAGE.to_owned() })
            }
            Err(BackendError::Rejected(_)) => Err(AuthError::InvalidToken),
            Err(e) => Err(e.into()),
        }
    }

    /// Log in and load the user's profile.
    ///
    /// The session and profile are published together, and `authToken` /
    /// `userId` written, only once both have been obtained.
    ///
    /// # Errors
    ///
    /// Returns an [`AuthError`] if the credentials are refused or the profile
    /// cannot be loaded; the state is left logged out in either case.
    pub async fn login(&self, email: &str, password: &str) -> Result<Session, AuthError> {
        let _loading = LoadingGuard::enter(self);
        let email = email.trim();

        let session = self.backend.login(email, password).await?;
        let profile = match self.backend.fetch_profile(&session).await {
            Ok(profile) => profile,
            Err(e) => {
                log::warn!("login for {email} succeeded but profile load failed: {e}");
                return Err(e.into());
            }
        };

        self.mirror_session(&session);
        self.update(|s| {
            s.session = Some(session.clone());
            s.profile = Some(profile);
        });
        log::info!("logged in user {}", session.id);
        Ok(session)
    }

    /// Drop the session locally. No network call is made.
    pub fn logout(&self) {
        self.clear_session_keys();
        self.update(|s| {
            s.session = None;
            s.profile = None;
            s.email_verification_sent = false;
        });
        log::info!("logged out");
    }

    /// Fetch the profile for `user_id` authenticated by `token`.
    ///
    /// Does not publish the result; callers decide what to do with it.
    ///
    /// # Errors
    ///
    /// Returns an [`AuthError`] if the backend cannot provide the profile.
    pub async fn load_user_profile(&self, user_id: &str, token: &str) -> Result<UserProfile, AuthError> {
        let _loading = LoadingGuard::enter(self);
        let session = Session { id: user_id.to_owned(), token: token.to_owned(), email: None };
        Ok(self.backend.fetch_profile(&session).await?)
    }

    /// Merge `patch` into the current profile, refresh `updatedAt`, and save.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::NotAuthenticated`] without a session and profile,
    /// or another [`AuthError`] if the backend rejects the update.
    pub async fn update_profile(&self, patch: &ProfilePatch) -> Result<UserProfile, AuthError> {
        let AuthState { session: Some(session), profile: Some(mut profile), .. } = self.snapshot() else {
            return Err(AuthError::NotAuthenticated);
        };
        let _loading = LoadingGuard::enter(self);

        patch.apply_to(&mut profile);
        profile.updated_at = now_rfc3339();
        let stored = self.backend.update_profile(&session, &profile).await?;

        // A logout while the request was in flight wins over the late reply.
        self.update(|s| {
            if s.session.as_ref().is_some_and(|current| current.id == session.id) {
                s.profile = Some(stored.clone());
            }
        });
        Ok(stored)
    }

    /// Send the confirmation email again for a pending registration.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::NoPendingRegistration`] if `email` has no pending
    /// record, or another [`AuthError`] if delivery fails.
    pub async fn resend_confirmation_email(&self, email: &str) -> Result<String, AuthError> {
        let record = self.ledger.pending_for(email.trim()).ok_or(AuthError::NoPendingRegistration)?;
        let _loading = LoadingGuard::enter(self);

        let url = confirmation_url(&self.app_origin, &record.confirmation_token);
        self.backend
            .send_confirmation(&record.email, &record.confirmation_token, &url)
            .await?;
        Ok(RESEND_MESSAGE.to_owned())
    }

    fn mirror_session(&self, session: &Session) {
        let written = self
            .storage
            .set(AUTH_TOKEN_KEY, &session.token)
            .and_then(|()| self.storage.set(USER_ID_KEY, &session.id));
        if let Err(e) = written {
            log::warn!("session not persisted; it will not survive a reload: {e}");
        }
    }

    fn clear_session_keys(&self) {
        self.storage.remove(AUTH_TOKEN_KEY);
        self.storage.remove(USER_ID_KEY);
    }
}
