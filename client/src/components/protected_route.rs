//! Route guard for pages that need a signed-in user.

use leptos::prelude::*;
use leptos_router::NavigateOptions;
use leptos_router::components::Redirect;

use crate::state::auth::AuthState;
use crate::util::auth::{GuardDecision, guard_decision};

/// Renders `children` only when a session exists. While the session is being
/// restored a placeholder is shown; without one the visitor is sent to the
/// login page, replacing the current history entry.
#[component]
pub fn ProtectedRoute(children: ChildrenFn) -> impl IntoView {
    let auth = expect_context::<RwSignal<AuthState>>();
    // Children are rebuilt only when the decision itself changes.
    let decision = Memo::new(move |_| guard_decision(&auth.get()));

    move || match decision.get() {
        GuardDecision::Loading => view! {
            <div class="page-loading" role="status" aria-live="polite">
                "Loading..."
            </div>
        }
        .into_any(),
        GuardDecision::Allow => children().into_any(),
        GuardDecision::Redirect(path) => {
            let options = NavigateOptions { replace: true, ..NavigateOptions::default() };
            view! { <Redirect path=path options=options/> }.into_any()
        }
    }
}
