//! Session-bound models for the dashboard.

pub mod session;

pub use session::{UserSession, keys as session_keys};
