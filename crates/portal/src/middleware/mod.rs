//! HTTP middleware: sessions and authentication extractors.

pub mod auth;
mod session;

pub use auth::{OptionalAuth, RequireAuth, clear_current_employee, set_current_employee};
pub use session::create_session_layer;
