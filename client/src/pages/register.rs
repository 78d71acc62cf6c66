//! Account registration page with email-confirmation follow-up.

#[cfg(test)]
#[path = "register_test.rs"]
mod register_test;

use leptos::prelude::*;
use leptos_router::components::A;

use crate::state::session::SessionStore;
use crate::util::validate::is_plausible_email;

pub const REGISTER_FAILED: &str = "Failed to create an account.";
pub const RESEND_FAILED: &str = "Could not resend the confirmation email.";

/// Check the sign-up form and return the trimmed email with the password.
pub fn validate_registration_input(
    email: &str,
    password: &str,
    password_confirm: &str,
) -> Result<(String, String), &'static str> {
    let email = email.trim();
    if email.is_empty() || password.is_empty() {
        return Err("Enter your email and a password.");
    }
    if !is_plausible_email(email) {
        return Err("Enter a valid email address.");
    }
    if password != password_confirm {
        return Err("Passwords do not match");
    }
    Ok((email.to_owned(), password.to_owned()))
}

#[component]
pub fn RegisterPage() -> impl IntoView {
    let store = expect_context::<SessionStore>();

    let email = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    let password_confirm = RwSignal::new(String::new());
    let error = RwSignal::new(String::new());
    let busy = RwSignal::new(false);
    // Email the confirmation was sent to, plus the latest notice for it.
    let registered = RwSignal::new(None::<String>);
    let notice = RwSignal::new(String::new());

    let submit_store = store.clone();
    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if busy.get() {
            return;
        }
        error.set(String::new());
        let (email_value, password_value) =
            match validate_registration_input(&email.get(), &password.get(), &password_confirm.get()) {
                Ok(values) => values,
                Err(msg) => {
                    error.set(msg.to_owned());
                    return;
                }
            };
        busy.set(true);

        #[cfg(feature = "hydrate")]
        {
            let store = submit_store.clone();
            leptos::task::spawn_local(async move {
                match store.register(&email_value, &password_value, None).await {
                    Ok(outcome) => {
                        notice.set(outcome.message);
                        registered.set(Some(email_value));
                    }
                    Err(e) => {
                        log::warn!("registration failed [{}]: {e}", e.code());
                        error.set(REGISTER_FAILED.to_owned());
                    }
                }
                busy.set(false);
            });
        }
        #[cfg(not(feature = "hydrate"))]
        let _ = (&submit_store, email_value, password_value);
    };

    let on_resend = move |_| {
        let Some(email_value) = registered.get() else {
            return;
        };
        if busy.get() {
            return;
        }
        busy.set(true);

        #[cfg(feature = "hydrate")]
        {
            let store = store.clone();
            leptos::task::spawn_local(async move {
                match store.resend_confirmation_email(&email_value).await {
                    Ok(message) => notice.set(message),
                    Err(e) => {
                        log::warn!("resend failed [{}]: {e}", e.code());
                        notice.set(RESEND_FAILED.to_owned());
                    }
                }
                busy.set(false);
            });
        }
        #[cfg(not(feature = "hydrate"))]
        let _ = (&store, email_value);
    };

    view! {
        <div class="auth-page">
            <div class="auth-card">
                <h1>"Register"</h1>
                <Show
                    when=move || registered.get().is_some()
                    fallback=move || {
                        view! {
                            <form class="auth-form" aria-label="Registration form" on:submit=on_submit.clone()>
                                <label for="register-email">"Email"</label>
                                <input
                                    id="register-email"
                                    class="auth-input"
                                    type="email"
                                    autocomplete="email"
                                    required
                                    prop:value=move || email.get()
                                    on:input=move |ev| email.set(event_target_value(&ev))
                                />
                                <label for="register-password">"Password"</label>
                                <input
                                    id="register-password"
                                    class="auth-input"
                                    type="password"
                                    autocomplete="new-password"
                                    required
                                    prop:value=move || password.get()
                                    on:input=move |ev| password.set(event_target_value(&ev))
                                />
                                <label for="register-password-confirm">"Confirm Password"</label>
                                <input
                                    id="register-password-confirm"
                                    class="auth-input"
                                    type="password"
                                    autocomplete="new-password"
                                    required
                                    prop:value=move || password_confirm.get()
                                    on:input=move |ev| password_confirm.set(event_target_value(&ev))
                                />
                                <button class="btn auth-button" type="submit" disabled=move || busy.get()>
                                    {move || if busy.get() { "Signing up..." } else { "Sign Up" }}
                                </button>
                                <div class="auth-error" aria-live="assertive">
                                    {move || error.get()}
                                </div>
                            </form>
                        }
                    }
                >
                    <div class="auth-notice" role="status" aria-live="polite">
                        <p>{move || notice.get()}</p>
                        <p>
                            "We sent a confirmation link to "
                            <strong>{move || registered.get().unwrap_or_default()}</strong>
                            "."
                        </p>
                        <button class="btn" type="button" disabled=move || busy.get() on:click=on_resend.clone()>
                            "Resend confirmation email"
                        </button>
                    </div>
                </Show>
                <p class="auth-card__footer">
                    "Already registered? "
                    <A href="/login">"Log in"</A>
                </p>
            </div>
        </div>
    }
}
