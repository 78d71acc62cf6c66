//! Landing page.

use leptos::prelude::*;
use leptos_router::components::A;

const FEATURES: [(&str, &str); 3] = [
    ("Adaptive Workouts", "Personalized fitness plans for all abilities and levels."),
    ("Wellness Guides", "Expert advice on nutrition, mental health, and recovery."),
    ("Community Support", "Connect with peers, share progress, and stay motivated."),
];

#[component]
pub fn HomePage() -> impl IntoView {
    view! {
        <div class="home-page">
            <section class="hero">
                <h1 class="hero__title">"Accessible Fitness & Wellness"</h1>
                <p class="hero__subtitle">
                    "Your inclusive platform for adaptive workouts, wellness guides, and a supportive community."
                </p>
                <A href="/register" attr:class="btn hero__cta">
                    "Get Started"
                </A>
            </section>
            <section class="features">
                {FEATURES
                    .iter()
                    .map(|(title, body)| {
                        view! {
                            <article class="feature-card">
                                <h2>{*title}</h2>
                                <p>{*body}</p>
                            </article>
                        }
                    })
                    .collect::<Vec<_>>()}
            </section>
            <section class="testimonial">
                <blockquote>
                    "This platform changed how I see fitness. Finally a place that works for me!"
                </blockquote>
                <cite>"- Happy Member"</cite>
            </section>
        </div>
    }
}
