//! Wellness guides.

use leptos::prelude::*;

const GUIDES: [(&str, &str); 3] = [
    ("Nutrition", "Simple, balanced meals that fuel your training and recovery."),
    ("Mental Health", "Breathing exercises and routines to manage stress."),
    ("Recovery", "Rest, sleep and gentle movement to help your body rebuild."),
];

#[component]
pub fn WellnessPage() -> impl IntoView {
    view! {
        <div class="content-page">
            <h1>"Wellness"</h1>
            <p>"Guides for looking after your whole self, on training days and rest days alike."</p>
            <ul class="card-list" aria-label="Wellness guides">
                {GUIDES
                    .iter()
                    .map(|(title, body)| {
                        view! {
                            <li class="card">
                                <h2>{*title}</h2>
                                <p>{*body}</p>
                            </li>
                        }
                    })
                    .collect::<Vec<_>>()}
            </ul>
        </div>
    }
}
