//! Dashboard for a signed-in user.
//!
//! SYSTEM CONTEXT
//! ==============
//! Rendered behind `ProtectedRoute`, so a session and its profile are present.
//! Logging out clears the session and the guard then redirects to `/login`.

#[cfg(test)]
#[path = "dashboard_test.rs"]
mod dashboard_test;

use leptos::prelude::*;
use leptos_router::components::A;

use crate::state::auth::AuthState;
use crate::state::session::SessionStore;
use crate::util::format::whole_hours;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Activity {
    pub kind: &'static str,
    pub details: &'static str,
    pub date: &'static str,
    pub time: &'static str,
}

impl Activity {
    /// Screen-reader summary for a list item.
    #[must_use]
    pub fn aria_label(&self) -> String {
        format!("{}: {} on {} at {}", self.kind, self.details, self.date, self.time)
    }
}

pub const RECENT_ACTIVITIES: [Activity; 3] = [
    Activity { kind: "Workout Completed", details: "30-minute HIIT session", date: "2024-01-15", time: "09:30 AM" },
    Activity {
        kind: "Goal Achievement",
        details: "Completed 5 workouts this week",
        date: "2024-01-14",
        time: "06:00 PM",
    },
    Activity { kind: "Profile Updated", details: "Added new fitness goals", date: "2024-01-13", time: "02:15 PM" },
];

/// `(href, title, description)` for each quick-action card.
const QUICK_ACTIONS: [(&str, &str, &str); 3] = [
    ("/workouts", "Start Workout", "Browse and start your personalized workout routines"),
    ("/wellness", "Wellness Check", "Track your mental health and wellness activities"),
    ("/profile", "Update Profile", "Manage your personal information and preferences"),
];

#[component]
pub fn DashboardPage() -> impl IntoView {
    let auth = expect_context::<RwSignal<AuthState>>();
    let store = expect_context::<SessionStore>();

    let on_logout = move |_| store.logout();
    let stats = move || auth.get().profile.map(|p| p.stats);

    view! {
        <div class="dashboard-page">
            <header class="dashboard-header">
                <div class="dashboard-header__welcome">
                    <h1>{move || format!("Welcome back, {}!", auth.get().display_name())}</h1>
                    <p>"Ready to continue your fitness journey?"</p>
                </div>
                <div class="dashboard-header__actions">
                    <A href="/profile" attr:class="btn" attr:aria-label="View and edit your profile">
                        "View Profile"
                    </A>
                    <button class="btn dashboard-header__logout" aria-label="Log out of your account" on:click=on_logout>
                        "Logout"
                    </button>
                </div>
            </header>

            <div class="dashboard-content">
                <section class="dashboard-actions" aria-labelledby="actions-heading">
                    <h2 id="actions-heading">"Quick Actions"</h2>
                    <div class="dashboard-actions__grid">
                        {QUICK_ACTIONS
                            .iter()
                            .map(|(href, title, description)| {
                                view! {
                                    <A href=*href attr:class="action-card">
                                        <h3>{*title}</h3>
                                        <p>{*description}</p>
                                    </A>
                                }
                            })
                            .collect::<Vec<_>>()}
                        <div class="action-card">
                            <h3>"View Progress"</h3>
                            <p>"See your fitness journey statistics and achievements"</p>
                        </div>
                    </div>
                </section>

                <aside class="dashboard-sidebar">
                    <section class="recent-activities" aria-labelledby="activities-heading">
                        <h2 id="activities-heading">"Recent Activities"</h2>
                        <div class="recent-activities__list" role="list">
                            {RECENT_ACTIVITIES
                                .iter()
                                .map(|activity| {
                                    view! {
                                        <div class="activity-item" role="listitem" tabindex="0" aria-label=activity.aria_label()>
                                            <h3 class="activity-item__type">{activity.kind}</h3>
                                            <span class="activity-item__details">{activity.details}</span>
                                            <span class="activity-item__date">
                                                {format!("{} at {}", activity.date, activity.time)}
                                            </span>
                                        </div>
                                    }
                                })
                                .collect::<Vec<_>>()}
                        </div>
                    </section>

                    {move || {
                        stats()
                            .map(|stats| {
                                view! {
                                    <section class="quick-stats" aria-labelledby="stats-heading">
                                        <h2 id="stats-heading">"Your Stats"</h2>
                                        <div class="quick-stats__summary">
                                            <div class="stat-item">
                                                <span class="stat-item__number">{stats.workouts_completed}</span>
                                                <span class="stat-item__label">"Workouts"</span>
                                            </div>
                                            <div class="stat-item">
                                                <span class="stat-item__number">{stats.streak_days}</span>
                                                <span class="stat-item__label">"Day Streak"</span>
                                            </div>
                                            <div class="stat-item">
                                                <span class="stat-item__number">{whole_hours(stats.total_minutes)}</span>
                                                <span class="stat-item__label">"Hours"</span>
                                            </div>
                                        </div>
                                    </section>
                                }
                            })
                    }}
                </aside>
            </div>
        </div>
    }
}
