//! Request middleware: session verification and authorization gates.

pub mod auth;
pub mod session;

pub use auth::{Identity, RequireAdmin, require_owner, require_owner_or_admin};
pub use session::{SESSION_COOKIE_NAME, SessionKeys};
