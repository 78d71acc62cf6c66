//! Auth backend port and its REST implementation.
//!
//! DESIGN
//! ======
//! The session store only talks to [`AuthBackend`]. Which implementation sits
//! behind it is decided once at startup from [`BackendMode`]: the REST API in
//! [`RemoteBackend`], or the storage-backed [`DevMockBackend`] for offline
//! development. Failures from the selected backend reach the caller as errors;
//! nothing silently swaps one backend for the other.

use std::sync::Arc;

use super::api::{self, ApiError};
use super::types::{RegisterResponse, RegistrationDetails, RegistrationReceipt, Session, UserProfile};
use crate::config::{BackendMode, ClientConfig};
use crate::util::storage::{KeyValueStore, StorageError};

pub use super::dev_backend::DevMockBackend;

#[derive(Debug, thiserror::Error)]
pub enum BackendError {
    #[error(transparent)]
    Api(#[from] ApiError),
    /// The backend understood the request and refused it.
    #[error("{0}")]
    Rejected(String),
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Remote operations behind the session store. Futures are `?Send` since the
/// browser implementation awaits `fetch` promises.
#[async_trait::async_trait(?Send)]
pub trait AuthBackend: Send + Sync {
    /// Create an account awaiting email confirmation.
    ///
    /// # Errors
    ///
    /// Returns a [`BackendError`] if the account cannot be created.
    async fn register(
        &self,
        email: &str,
        password: &str,
        details: &RegistrationDetails,
    ) -> Result<RegistrationReceipt, BackendError>;

    /// Deliver the confirmation link for a registration.
    ///
    /// # Errors
    ///
    /// Returns a [`BackendError`] if delivery fails.
    async fn send_confirmation(&self, email: &str, token: &str, confirmation_url: &str) -> Result<(), BackendError>;

    /// Confirm the registration identified by `token`.
    ///
    /// # Errors
    ///
    /// Returns [`BackendError::Rejected`] for an unknown token, or another
    /// [`BackendError`] if the backend cannot be reached.
    async fn confirm_email(&self, token: &str) -> Result<(), BackendError>;

    /// Authenticate and open a session.
    ///
    /// # Errors
    ///
    /// Returns a [`BackendError`] if the credentials are refused or the backend
    /// cannot be reached.
    async fn login(&self, email: &str, password: &str) -> Result<Session, BackendError>;

    /// Fetch the profile belonging to `session`.
    ///
    /// # Errors
    ///
    /// Returns a [`BackendError`] if the profile cannot be loaded.
    async fn fetch_profile(&self, session: &Session) -> Result<UserProfile, BackendError>;

    /// Store `profile` as the user's full profile and return what was stored.
    ///
    /// # Errors
    ///
    /// Returns a [`BackendError`] if the profile cannot be saved.
    async fn update_profile(&self, session: &Session, profile: &UserProfile) -> Result<UserProfile, BackendError>;
}

/// Pick the backend named by `config`.
#[must_use]
pub fn select_backend(config: &ClientConfig, storage: Arc<dyn KeyValueStore>) -> Arc<dyn AuthBackend> {
    match config.backend {
        BackendMode::Remote => {
            log::info!("auth backend: remote ({})", config.api_base_url);
            Arc::new(RemoteBackend::new(config.api_base_url.clone()))
        }
        BackendMode::DevMock => {
            log::info!("auth backend: development mock (local storage)");
            Arc::new(DevMockBackend::new(storage))
        }
    }
}

/// [`AuthBackend`] over the REST API.
#[derive(Clone, Debug)]
pub struct RemoteBackend {
    base_url: String,
}

impl RemoteBackend {
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self { base_url: base_url.into() }
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

#[async_trait::async_trait(?Send)]
impl AuthBackend for RemoteBackend {
    async fn register(
        &self,
        email: &str,
        password: &str,
        details: &RegistrationDetails,
    ) -> Result<RegistrationReceipt, BackendError> {
        let resp = api::register(&self.base_url, email, password, details).await?;
        Ok(receipt_from(resp)?)
    }

    async fn send_confirmation(&self, email: &str, token: &str, confirmation_url: &str) -> Result<(), BackendError> {
        api::send_confirmation(&self.base_url, email, token, confirmation_url).await?;
        Ok(())
    }

    async fn confirm_email(&self, token: &str) -> Result<(), BackendError> {
        match api::confirm_email(&self.base_url, token).await {
            Ok(()) => Ok(()),
            Err(ApiError::Status { status: 400..=499, message }) => {
                Err(BackendError::Rejected(message.unwrap_or_else(|| "Invalid confirmation token".to_owned())))
            }
            Err(e) => Err(e.into()),
        }
    }

    async fn login(&self, email: &str, password: &str) -> Result<Session, BackendError> {
        match api::login(&self.base_url, email, password).await {
            Ok(resp) => Ok(resp.into_session()),
            Err(ApiError::Status { status: 400..=499, message }) => {
                Err(BackendError::Rejected(message.unwrap_or_else(|| "Login failed".to_owned())))
            }
            Err(e) => Err(e.into()),
        }
    }

    async fn fetch_profile(&self, session: &Session) -> Result<UserProfile, BackendError> {
        Ok(api::fetch_profile(&self.base_url, &session.id, &session.token).await?)
    }

    async fn update_profile(&self, session: &Session, profile: &UserProfile) -> Result<UserProfile, BackendError> {
        Ok(api::update_profile(&self.base_url, &session.id, &session.token, profile).await?)
    }
}

/// The user id may come back at the top level or under `user`.
fn receipt_from(resp: RegisterResponse) -> Result<RegistrationReceipt, ApiError> {
    let id = resp
        .id
        .or(resp.user.map(|u| u.id))
        .ok_or_else(|| ApiError::Decode("registration response carried no user id".to_owned()))?;
    Ok(RegistrationReceipt { id, confirmation_token: resp.confirmation_token })
}
