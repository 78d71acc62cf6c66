//! High-contrast preference persistence.
//!
//! Reads the user's preference from `localStorage` so the setting survives a
//! reload. The class itself is applied by the app wrapper element from
//! [`AccessibilityState`](crate::state::accessibility::AccessibilityState).
//!
//! TRADE-OFFS
//! ==========
//! Persistence is best-effort browser-only behavior; SSR renders normal
//! contrast and hydration picks up the stored preference afterwards.

#[cfg(test)]
#[path = "contrast_test.rs"]
mod contrast_test;

use crate::util::storage::KeyValueStore;

pub const STORAGE_KEY: &str = "fitwell_high_contrast";

/// Read the stored preference; `false` when nothing was stored.
pub fn read_preference(store: &dyn KeyValueStore) -> bool {
    store.get(STORAGE_KEY).is_some_and(|v| v == "true")
}

/// Persist `enabled`. A failed write only loses the preference on reload.
pub fn save_preference(store: &dyn KeyValueStore, enabled: bool) {
    if let Err(e) = store.set(STORAGE_KEY, if enabled { "true" } else { "false" }) {
        log::debug!("contrast preference not saved: {e}");
    }
}
