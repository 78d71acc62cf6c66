//! Page modules for route-level screens.
//!
//! ARCHITECTURE
//! ============
//! Each page owns route-scoped orchestration and delegates shared chrome to
//! `components` and account logic to the session store.

pub mod about;
pub mod confirm_email;
pub mod dashboard;
pub mod home;
pub mod login;
pub mod profile;
pub mod register;
pub mod wellness;
pub mod workouts;
