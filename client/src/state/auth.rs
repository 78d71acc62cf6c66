//! Auth-session state for the current browser user.
//!
//! SYSTEM CONTEXT
//! ==============
//! Published by the session store into an `RwSignal<AuthState>` context and
//! read by route guards and user-aware pages to coordinate login redirects and
//! identity-dependent rendering.

#[cfg(test)]
#[path = "auth_test.rs"]
mod auth_test;

use crate::net::types::{Session, UserProfile};

/// Authentication state tracking the current session, its profile and
/// loading status.
///
/// `session` and `profile` are published together: pages never see a session
/// without its profile.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct AuthState {
    pub session: Option<Session>,
    pub profile: Option<UserProfile>,
    pub loading: bool,
    pub email_verification_sent: bool,
}

impl AuthState {
    /// State before the stored session has been checked.
    #[must_use]
    pub fn initializing() -> Self {
        Self { loading: true, ..Self::default() }
    }

    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.session.is_some()
    }

    /// First name for greetings, `"User"` when unknown.
    #[must_use]
    pub fn display_name(&self) -> String {
        self.profile
            .as_ref()
            .map(|p| p.first_name.trim())
            .filter(|name| !name.is_empty())
            .unwrap_or("User")
            .to_owned()
    }
}
