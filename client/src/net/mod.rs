//! Networking modules for the auth/profile REST API.
//!
//! SYSTEM CONTEXT
//! ==============
//! `api` handles REST calls, `backend` defines the port the session store
//! talks to, `dev_backend` is its offline implementation, and `types` defines
//! the shared wire schema.

pub mod api;
pub mod backend;
pub mod dev_backend;
pub mod types;
