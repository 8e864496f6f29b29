//! CompParts Core - Shared domain types.
//!
//! Everything the `server` and `cli` crates agree on lives here: typed
//! entity identifiers, the string-typed part reference, validated emails,
//! non-negative prices, and user roles.
//!
//! Deliberately free of I/O - no database access, no HTTP, no async - so
//! any crate can depend on it without dragging in a runtime.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
