//! Newtype wrappers for the marketplace's domain concepts.

pub mod email;
pub mod id;
pub mod price;
pub mod role;

pub use email::{Email, EmailError};
pub use id::*;
pub use price::{PriceError, UnitPrice};
pub use role::Role;
