//! Reusable UI component modules.
//!
//! SYSTEM CONTEXT
//! ==============
//! Components render site chrome and shared page fragments while reading
//! shared state from Leptos context providers.

pub mod contrast_toggle;
pub mod navbar;
pub mod protected_route;
