//! Domain models for the marketplace.
//!
//! These types are both the validated domain objects and the JSON shapes the
//! API serves (camelCase on the wire). Database row decoding happens either
//! directly via `sqlx::FromRow` or through per-repository row structs where
//! stored values need validation.

pub mod content;
pub mod part;
pub mod payment;
pub mod profile;
pub mod purchase;
pub mod review;
pub mod user;

pub use content::{BuildGuide, TechNewsItem};
pub use part::Part;
pub use payment::Payment;
pub use profile::Profile;
pub use purchase::{LineItem, PurchasedPart};
pub use review::Review;
pub use user::User;
