//! Shared auth UI helpers.
//!
//! SYSTEM CONTEXT
//! ==============
//! Guarded routes must apply identical loading and unauthenticated-redirect
//! behavior, so the decision lives here as a pure function of [`AuthState`].

#[cfg(test)]
#[path = "auth_test.rs"]
mod auth_test;

use crate::state::auth::AuthState;

pub const LOGIN_PATH: &str = "/login";

/// What a guarded route should render for the current auth state.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GuardDecision {
    /// Session state not settled yet; show a placeholder.
    Loading,
    /// A session exists; render the protected page.
    Allow,
    /// No session; send the visitor to this path.
    Redirect(&'static str),
}

/// Decide how a guarded route renders. Loading wins over everything else.
#[must_use]
pub fn guard_decision(state: &AuthState) -> GuardDecision {
    if state.loading {
        GuardDecision::Loading
    } else if state.session.is_some() {
        GuardDecision::Allow
    } else {
        GuardDecision::Redirect(LOGIN_PATH)
    }
}
