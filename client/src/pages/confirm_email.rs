//! Landing page for the emailed confirmation link `/confirm-email/:token`.
//!
//! The token is confirmed once on mount. On success the visitor is sent to
//! `/login` after [`REDIRECT_DELAY_MS`].

#[cfg(test)]
#[path = "confirm_email_test.rs"]
mod confirm_email_test;

use leptos::prelude::*;
use leptos_router::components::A;
use leptos_router::hooks::use_params_map;
#[cfg(feature = "hydrate")]
use leptos_router::{NavigateOptions, hooks::use_navigate};

use crate::state::session::SessionStore;

pub const REDIRECT_DELAY_MS: u32 = 3_000;
pub const INVALID_LINK: &str = "Invalid confirmation link";

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ConfirmStatus {
    Confirming,
    Success(String),
    Failed(String),
}

/// Status before any request: a link without a token fails immediately.
pub fn initial_status(token: Option<&str>) -> ConfirmStatus {
    match token.map(str::trim) {
        Some(token) if !token.is_empty() => ConfirmStatus::Confirming,
        _ => ConfirmStatus::Failed(INVALID_LINK.to_owned()),
    }
}

#[component]
pub fn ConfirmEmailPage() -> impl IntoView {
    let store = expect_context::<SessionStore>();
    let params = use_params_map();
    let token = params.get_untracked().get("token");
    let status = RwSignal::new(initial_status(token.as_deref()));

    #[cfg(feature = "hydrate")]
    {
        let navigate = use_navigate();
        let started = RwSignal::new(false);
        Effect::new(move || {
            if started.get_untracked() || status.get_untracked() != ConfirmStatus::Confirming {
                return;
            }
            started.set(true);
            let Some(token) = token.clone() else {
                return;
            };
            let store = store.clone();
            let navigate = navigate.clone();
            leptos::task::spawn_local(async move {
                match store.confirm_email(&token).await {
                    Ok(outcome) => {
                        status.set(ConfirmStatus::Success(outcome.message));
                        gloo_timers::future::TimeoutFuture::new(REDIRECT_DELAY_MS).await;
                        navigate("/login", NavigateOptions::default());
                    }
                    Err(e) => {
                        log::warn!("email confirmation failed [{}]: {e}", e.code());
                        status.set(ConfirmStatus::Failed(e.to_string()));
                    }
                }
            });
        });
    }
    #[cfg(not(feature = "hydrate"))]
    let _ = store;

    view! {
        <div class="confirm-page">
            <div class="confirm-card">
                {move || match status.get() {
                    ConfirmStatus::Confirming => view! {
                        <div class="confirm-status" aria-live="polite">
                            <div class="loading-spinner" aria-label="Confirming email"></div>
                            <h2>"Confirming Your Email"</h2>
                            <p>"Please wait while we verify your email address..."</p>
                        </div>
                    }
                    .into_any(),
                    ConfirmStatus::Success(message) => view! {
                        <div class="confirm-status confirm-status--success" aria-live="polite">
                            <div class="confirm-status__icon" aria-hidden="true">"\u{2713}"</div>
                            <h2>"Email Confirmed Successfully!"</h2>
                            <p>{message}</p>
                            <p>"You will be redirected to the login page in a few seconds."</p>
                            <A href="/login" attr:class="btn">"Go to Login Now"</A>
                        </div>
                    }
                    .into_any(),
                    ConfirmStatus::Failed(error) => view! {
                        <div class="confirm-status confirm-status--error" aria-live="assertive">
                            <div class="confirm-status__icon" aria-hidden="true">"\u{2717}"</div>
                            <h2>"Email Confirmation Failed"</h2>
                            <p class="confirm-status__error">{error}</p>
                            <div class="confirm-status__actions">
                                <A href="/register" attr:class="btn">"Register Again"</A>
                                <A href="/login" attr:class="btn">"Try to Login"</A>
                            </div>
                        </div>
                    }
                    .into_any(),
                }}
            </div>
        </div>
    }
}
