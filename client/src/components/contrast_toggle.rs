//! Navbar button that flips high-contrast mode.

use leptos::prelude::*;

use crate::state::accessibility::AccessibilityState;
use crate::util::contrast;
use crate::util::storage::BrowserStorage;

/// Toggle for the high-contrast wrapper class. The label names the mode the
/// click switches to, and the choice is saved for the next visit.
#[component]
pub fn ContrastToggle() -> impl IntoView {
    let accessibility = expect_context::<RwSignal<AccessibilityState>>();

    let on_toggle = move |_| {
        let mut next = accessibility.get_untracked();
        let enabled = next.toggle();
        accessibility.set(next);
        contrast::save_preference(&BrowserStorage, enabled);
    };

    view! {
        <button
            class="btn contrast-toggle"
            type="button"
            aria-pressed=move || if accessibility.get().high_contrast { "true" } else { "false" }
            on:click=on_toggle
        >
            {move || accessibility.get().toggle_label()}
        </button>
    }
}
