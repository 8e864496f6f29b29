//! Newtype IDs for type-safe entity references.
//!
//! Use the `define_id!` macro to create type-safe ID wrappers that prevent
//! accidentally mixing IDs from different entity types. Purchases store their
//! part reference as a raw string ([`PartRef`]) which must be resolved into a
//! [`PartId`] before it can be joined against the catalog.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Macro to define a type-safe ID wrapper.
///
/// Creates a newtype wrapper around [`Uuid`] with:
/// - `Serialize`/`Deserialize` with `#[serde(transparent)]`
/// - `Debug`, `Clone`, `Copy`, `PartialEq`, `Eq`, `Hash`
/// - Conversion methods: `new()`, `as_uuid()`
/// - `From<Uuid>` and `Into<Uuid>` implementations
/// - `sqlx` `Type`, `Encode`, and `Decode` implementations (with `postgres` feature)
///
/// # Example
///
/// ```rust
/// # use compparts_core::define_id;
/// define_id!(PartId);
/// define_id!(ReviewId);
///
/// let part_id = PartId::new(uuid::Uuid::nil());
///
/// // PartId and ReviewId are different types, so this won't compile:
/// // let _: ReviewId = part_id;
/// ```
#[macro_export]
macro_rules! define_id {
    ($name:ident) => {
        #[derive(
            Debug,
            Clone,
            Copy,
            PartialEq,
            Eq,
            Hash,
            ::serde::Serialize,
            ::serde::Deserialize
        )]
        #[serde(transparent)]
        pub struct $name(::uuid::Uuid);

        impl $name {
            /// Create a new ID from a [`::uuid::Uuid`] value.
            #[must_use]
            pub const fn new(id: ::uuid::Uuid) -> Self {
                Self(id)
            }

            /// Get the underlying [`::uuid::Uuid`] value.
            #[must_use]
            pub const fn as_uuid(&self) -> ::uuid::Uuid {
                self.0
            }
        }

        impl ::core::fmt::Display for $name {
            fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<::uuid::Uuid> for $name {
            fn from(id: ::uuid::Uuid) -> Self {
                Self(id)
            }
        }

        impl From<$name> for ::uuid::Uuid {
            fn from(id: $name) -> Self {
                id.0
            }
        }

        #[cfg(feature = "postgres")]
        impl ::sqlx::Type<::sqlx::Postgres> for $name {
            fn type_info() -> ::sqlx::postgres::PgTypeInfo {
                <::uuid::Uuid as ::sqlx::Type<::sqlx::Postgres>>::type_info()
            }

            fn compatible(ty: &::sqlx::postgres::PgTypeInfo) -> bool {
                <::uuid::Uuid as ::sqlx::Type<::sqlx::Postgres>>::compatible(ty)
            }
        }

        #[cfg(feature = "postgres")]
        impl<'r> ::sqlx::Decode<'r, ::sqlx::Postgres> for $name {
            fn decode(
                value: ::sqlx::postgres::PgValueRef<'r>,
            ) -> ::core::result::Result<Self, ::sqlx::error::BoxDynError> {
                let id = <::uuid::Uuid as ::sqlx::Decode<::sqlx::Postgres>>::decode(value)?;
                Ok(Self(id))
            }
        }

        #[cfg(feature = "postgres")]
        impl ::sqlx::Encode<'_, ::sqlx::Postgres> for $name {
            fn encode_by_ref(
                &self,
                buf: &mut ::sqlx::postgres::PgArgumentBuffer,
            ) -> ::std::result::Result<::sqlx::encode::IsNull, ::sqlx::error::BoxDynError> {
                <::uuid::Uuid as ::sqlx::Encode<::sqlx::Postgres>>::encode_by_ref(&self.0, buf)
            }
        }
    };
}

// Define standard entity IDs
define_id!(PartId);
define_id!(ReviewId);
define_id!(TechNewsId);
define_id!(BuildGuideId);
define_id!(PurchaseId);
define_id!(PaymentId);
define_id!(ProfileId);
define_id!(UserId);

/// Error returned when a stored part reference cannot be resolved.
#[derive(Debug, Clone, thiserror::Error)]
#[error("malformed part reference: {reference}")]
pub struct PartRefError {
    /// The offending reference string.
    pub reference: String,
}

/// A string-typed part reference as stored on a purchase record.
///
/// Purchases carry the referenced part as an opaque string rather than a
/// native identifier. The reference is only resolved into a [`PartId`] when
/// purchase details are aggregated; resolution failure is a caller error,
/// not a panic.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PartRef(String);

impl PartRef {
    /// Wrap a raw reference string without validating it.
    #[must_use]
    pub fn new(reference: impl Into<String>) -> Self {
        Self(reference.into())
    }

    /// Returns the raw reference string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Resolve the reference into a typed [`PartId`].
    ///
    /// # Errors
    ///
    /// Returns [`PartRefError`] if the stored string is not a valid
    /// identifier.
    pub fn resolve(&self) -> Result<PartId, PartRefError> {
        Uuid::parse_str(&self.0)
            .map(PartId::new)
            .map_err(|_| PartRefError {
                reference: self.0.clone(),
            })
    }
}

impl From<PartId> for PartRef {
    fn from(id: PartId) -> Self {
        Self(id.to_string())
    }
}

impl std::fmt::Display for PartRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

// SQLx support (with postgres feature): stored as TEXT, never validated by
// the store
#[cfg(feature = "postgres")]
impl sqlx::Type<sqlx::Postgres> for PartRef {
    fn type_info() -> sqlx::postgres::PgTypeInfo {
        <String as sqlx::Type<sqlx::Postgres>>::type_info()
    }

    fn compatible(ty: &sqlx::postgres::PgTypeInfo) -> bool {
        <String as sqlx::Type<sqlx::Postgres>>::compatible(ty)
    }
}

#[cfg(feature = "postgres")]
impl<'r> sqlx::Decode<'r, sqlx::Postgres> for PartRef {
    fn decode(value: sqlx::postgres::PgValueRef<'r>) -> Result<Self, sqlx::error::BoxDynError> {
        let s = <String as sqlx::Decode<sqlx::Postgres>>::decode(value)?;
        Ok(Self(s))
    }
}

#[cfg(feature = "postgres")]
impl sqlx::Encode<'_, sqlx::Postgres> for PartRef {
    fn encode_by_ref(
        &self,
        buf: &mut sqlx::postgres::PgArgumentBuffer,
    ) -> Result<sqlx::encode::IsNull, sqlx::error::BoxDynError> {
        <String as sqlx::Encode<sqlx::Postgres>>::encode_by_ref(&self.0, buf)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    define_id!(TestId);

    #[test]
    fn test_id_display_matches_uuid() {
        let uuid = Uuid::parse_str("a9f5cbbe-9d9c-45c6-b3e8-5e4d6fbb1881").unwrap();
        let id = TestId::new(uuid);
        assert_eq!(id.to_string(), "a9f5cbbe-9d9c-45c6-b3e8-5e4d6fbb1881");
    }

    #[test]
    fn test_id_serde_transparent() {
        let uuid = Uuid::new_v4();
        let id = PartId::new(uuid);
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, format!("\"{uuid}\""));

        let parsed: PartId = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, id);
    }

    #[test]
    fn test_part_ref_resolves_valid_uuid() {
        let id = PartId::new(Uuid::new_v4());
        let reference = PartRef::from(id);
        assert_eq!(reference.resolve().unwrap(), id);
    }

    #[test]
    fn test_part_ref_rejects_garbage() {
        let reference = PartRef::new("not-a-part-id");
        let err = reference.resolve().unwrap_err();
        assert_eq!(err.reference, "not-a-part-id");
    }

    #[test]
    fn test_part_ref_rejects_empty() {
        assert!(PartRef::new("").resolve().is_err());
    }
}
