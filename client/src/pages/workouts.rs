//! Adaptive workout catalogue.

use leptos::prelude::*;

/// `(name, minutes, description)` for each listed routine.
const ROUTINES: [(&str, u32, &str); 4] = [
    ("Seated Strength", 20, "Upper-body resistance work performed entirely from a chair."),
    ("Low-Impact Cardio", 30, "Steady movement that keeps the heart rate up without jumping."),
    ("Gentle Mobility", 15, "Joint-friendly stretches to start or end the day."),
    ("Balance Builder", 25, "Supported standing drills that improve stability step by step."),
];

#[component]
pub fn WorkoutsPage() -> impl IntoView {
    view! {
        <div class="content-page">
            <h1>"Workouts"</h1>
            <p>"Every routine can be adapted to your ability level. Pick one and go at your own pace."</p>
            <ul class="card-list" aria-label="Workout routines">
                {ROUTINES
                    .iter()
                    .map(|(name, minutes, description)| {
                        view! {
                            <li class="card">
                                <h2>{*name}</h2>
                                <p class="card__meta">{format!("{minutes} minutes")}</p>
                                <p>{*description}</p>
                            </li>
                        }
                    })
                    .collect::<Vec<_>>()}
            </ul>
        </div>
    }
}
