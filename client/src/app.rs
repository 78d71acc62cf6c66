//! Root application component with routing and context providers.

use std::sync::Arc;

use leptos::prelude::*;
use leptos_meta::{MetaTags, Stylesheet, Title, provide_meta_context};
use leptos_router::{
    ParamSegment, StaticSegment,
    components::{Route, Router, Routes},
};

use crate::components::{navbar::Navbar, protected_route::ProtectedRoute};
use crate::config::ClientConfig;
use crate::pages::{
    about::AboutPage, confirm_email::ConfirmEmailPage, dashboard::DashboardPage, home::HomePage, login::LoginPage,
    profile::{ProfileEditor, ProfilePage}, register::RegisterPage, wellness::WellnessPage, workouts::WorkoutsPage,
};
use crate::state::{accessibility::AccessibilityState, auth::AuthState, session::SessionStore};
use crate::util::storage::{BrowserStorage, KeyValueStore};

/// HTML shell rendered on the server for SSR + hydration.
pub fn shell(options: LeptosOptions) -> impl IntoView {
    view! {
        <!DOCTYPE html>
        <html lang="en">
            <head>
                <meta charset="utf-8"/>
                <meta name="viewport" content="width=device-width, initial-scale=1"/>
                <AutoReload options=options.clone()/>
                <HydrationScripts options/>
                <MetaTags/>
            </head>
            <body>
                <App/>
            </body>
        </html>
    }
}

/// Root application component.
///
/// Builds the session store, provides the auth, accessibility and profile
/// editor contexts, and sets up client-side routing. Dashboard and profile sit behind
/// [`ProtectedRoute`].
#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    let config = ClientConfig::from_build_env().unwrap_or_else(|e| {
        log::warn!("client config rejected, using defaults: {e}");
        ClientConfig::default()
    });
    let storage: Arc<dyn KeyValueStore> = Arc::new(BrowserStorage);

    // The store starts in the loading state so guarded routes render a
    // placeholder until the stored session has been checked.
    let auth = RwSignal::new(AuthState::initializing());
    let store = SessionStore::from_config(&config, storage).with_observer(move |state| auth.set(state.clone()));
    let accessibility = RwSignal::new(AccessibilityState::default());

    provide_context(auth);
    provide_context(accessibility);
    provide_context(store.clone());
    provide_context(RwSignal::new(ProfileEditor::default()));

    #[cfg(feature = "hydrate")]
    {
        Effect::new(move || {
            let enabled = crate::util::contrast::read_preference(&BrowserStorage);
            accessibility.set(AccessibilityState::new(enabled));
        });
        Effect::new(move || {
            let store = store.clone();
            leptos::task::spawn_local(async move {
                store.initialize().await;
            });
        });
    }
    #[cfg(not(feature = "hydrate"))]
    let _ = store;

    view! {
        <Stylesheet id="leptos" href="/pkg/fitwell.css"/>
        <Title text="Fitwell"/>

        <div class=move || format!("app {}", accessibility.get().wrapper_class())>
            <Router>
                <Navbar/>
                <main class="app-main">
                    <Routes fallback=|| "Page not found.".into_view()>
                        <Route path=StaticSegment("") view=HomePage/>
                        <Route path=StaticSegment("about") view=AboutPage/>
                        <Route path=StaticSegment("workouts") view=WorkoutsPage/>
                        <Route path=StaticSegment("wellness") view=WellnessPage/>
                        <Route path=StaticSegment("register") view=RegisterPage/>
                        <Route path=StaticSegment("login") view=LoginPage/>
                        <Route path=(StaticSegment("confirm-email"), ParamSegment("token")) view=ConfirmEmailPage/>
                        <Route
                            path=StaticSegment("dashboard")
                            view=|| view! { <ProtectedRoute><DashboardPage/></ProtectedRoute> }
                        />
                        <Route
                            path=StaticSegment("profile")
                            view=|| view! { <ProtectedRoute><ProfilePage/></ProtectedRoute> }
                        />
                    </Routes>
                </main>
            </Router>
        </div>
    }
}
