//! Site navigation bar.

use leptos::prelude::*;
use leptos_router::components::A;

use super::contrast_toggle::ContrastToggle;
use crate::state::auth::AuthState;

/// Top navigation with the public pages, account links that depend on the
/// session, and the contrast toggle.
#[component]
pub fn Navbar() -> impl IntoView {
    let auth = expect_context::<RwSignal<AuthState>>();
    let signed_in = move || auth.get().is_authenticated();

    view! {
        <nav class="navbar" aria-label="Main navigation">
            <A href="/" attr:class="navbar__brand">
                "Fitwell"
            </A>
            <ul class="navbar__links">
                <li><A href="/workouts">"Workouts"</A></li>
                <li><A href="/wellness">"Wellness"</A></li>
                <li><A href="/about">"About"</A></li>
                <Show
                    when=signed_in
                    fallback=|| {
                        view! {
                            <li><A href="/login">"Login"</A></li>
                            <li><A href="/register">"Register"</A></li>
                        }
                    }
                >
                    <li><A href="/dashboard">"Dashboard"</A></li>
                    <li><A href="/profile">"Profile"</A></li>
                </Show>
            </ul>
            <ContrastToggle/>
        </nav>
    }
}
