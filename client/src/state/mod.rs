//! Shared client-side state modules.
//!
//! DESIGN
//! ======
//! State is split by domain (`auth`, `session`, `accessibility`,
//! `registration`) so components can depend on small focused models.

pub mod accessibility;
pub mod auth;
pub mod registration;
pub mod session;
