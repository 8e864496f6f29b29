//! Type-safe price representation using decimal arithmetic.
//!
//! Catalog prices are stored in the currency's standard unit (dollars), but
//! the payment provider only accepts integer minor units (cents). The
//! conversion lives here so a price that does not divide evenly into cents
//! is rejected at the boundary instead of reaching the provider unrounded.

use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::{Deserialize, Serialize};

/// Errors that can occur when constructing or converting a [`UnitPrice`].
#[derive(Debug, Clone, thiserror::Error)]
pub enum PriceError {
    /// Prices cannot be negative.
    #[error("price cannot be negative: {amount}")]
    Negative {
        /// The offending amount.
        amount: Decimal,
    },
    /// The price does not convert to a whole number of minor units.
    #[error("price {amount} is not a whole number of cents")]
    FractionalCents {
        /// The offending amount.
        amount: Decimal,
    },
    /// The minor-unit amount overflows an `i64`.
    #[error("price {amount} is too large")]
    TooLarge {
        /// The offending amount.
        amount: Decimal,
    },
}

/// A non-negative per-unit price in the store currency's standard unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Decimal")]
#[serde(into = "Decimal")]
pub struct UnitPrice(Decimal);

impl UnitPrice {
    /// Create a price, rejecting negative amounts.
    ///
    /// # Errors
    ///
    /// Returns [`PriceError::Negative`] if `amount < 0`.
    pub fn new(amount: Decimal) -> Result<Self, PriceError> {
        if amount.is_sign_negative() && !amount.is_zero() {
            return Err(PriceError::Negative { amount });
        }
        Ok(Self(amount))
    }

    /// The amount in the currency's standard unit.
    #[must_use]
    pub const fn amount(&self) -> Decimal {
        self.0
    }

    /// Convert to integer minor units (cents) for the payment provider.
    ///
    /// # Errors
    ///
    /// Returns [`PriceError::FractionalCents`] if the price does not scale
    /// to a whole number of cents, or [`PriceError::TooLarge`] on overflow.
    pub fn minor_units(&self) -> Result<i64, PriceError> {
        let scaled = self.0 * Decimal::ONE_HUNDRED;
        if !scaled.fract().is_zero() {
            return Err(PriceError::FractionalCents { amount: self.0 });
        }
        scaled.to_i64().ok_or(PriceError::TooLarge { amount: self.0 })
    }

    /// The total for `quantity` units, derived on demand and never stored.
    #[must_use]
    pub fn total_for(&self, quantity: i32) -> Decimal {
        self.0 * Decimal::from(quantity)
    }
}

impl TryFrom<Decimal> for UnitPrice {
    type Error = PriceError;

    fn try_from(amount: Decimal) -> Result<Self, Self::Error> {
        Self::new(amount)
    }
}

impl From<UnitPrice> for Decimal {
    fn from(price: UnitPrice) -> Self {
        price.0
    }
}

impl std::fmt::Display for UnitPrice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.2}", self.0)
    }
}

// SQLx support (with postgres feature): stored as NUMERIC
#[cfg(feature = "postgres")]
impl sqlx::Type<sqlx::Postgres> for UnitPrice {
    fn type_info() -> sqlx::postgres::PgTypeInfo {
        <Decimal as sqlx::Type<sqlx::Postgres>>::type_info()
    }

    fn compatible(ty: &sqlx::postgres::PgTypeInfo) -> bool {
        <Decimal as sqlx::Type<sqlx::Postgres>>::compatible(ty)
    }
}

#[cfg(feature = "postgres")]
impl<'r> sqlx::Decode<'r, sqlx::Postgres> for UnitPrice {
    fn decode(value: sqlx::postgres::PgValueRef<'r>) -> Result<Self, sqlx::error::BoxDynError> {
        let amount = <Decimal as sqlx::Decode<sqlx::Postgres>>::decode(value)?;
        Ok(Self::new(amount)?)
    }
}

#[cfg(feature = "postgres")]
impl sqlx::Encode<'_, sqlx::Postgres> for UnitPrice {
    fn encode_by_ref(
        &self,
        buf: &mut sqlx::postgres::PgArgumentBuffer,
    ) -> Result<sqlx::encode::IsNull, sqlx::error::BoxDynError> {
        <Decimal as sqlx::Encode<sqlx::Postgres>>::encode_by_ref(&self.0, buf)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_negative() {
        assert!(matches!(
            UnitPrice::new(Decimal::new(-1, 2)),
            Err(PriceError::Negative { .. })
        ));
    }

    #[test]
    fn test_zero_is_allowed() {
        let price = UnitPrice::new(Decimal::ZERO).unwrap();
        assert_eq!(price.minor_units().unwrap(), 0);
    }

    #[test]
    fn test_minor_units_exact() {
        let price = UnitPrice::new(Decimal::new(1999, 2)).unwrap();
        assert_eq!(price.minor_units().unwrap(), 1999);
    }

    #[test]
    fn test_minor_units_whole_dollars() {
        let price = UnitPrice::new(Decimal::from(120)).unwrap();
        assert_eq!(price.minor_units().unwrap(), 12000);
    }

    #[test]
    fn test_minor_units_trailing_zero_scale() {
        // 19.990 still scales to an exact number of cents
        let price = UnitPrice::new(Decimal::new(19_990, 3)).unwrap();
        assert_eq!(price.minor_units().unwrap(), 1999);
    }

    #[test]
    fn test_minor_units_rejects_fractional_cents() {
        let price = UnitPrice::new(Decimal::new(19_999, 3)).unwrap();
        assert!(matches!(
            price.minor_units(),
            Err(PriceError::FractionalCents { .. })
        ));
    }

    #[test]
    fn test_total_for_quantity() {
        let price = UnitPrice::new(Decimal::new(24_950, 2)).unwrap();
        assert_eq!(price.total_for(3), Decimal::new(74_850, 2));
    }

    #[test]
    fn test_deserialize_rejects_negative() {
        let result: Result<UnitPrice, _> = serde_json::from_str("-5");
        assert!(result.is_err());
    }

    #[test]
    fn test_display_two_decimal_places() {
        let price = UnitPrice::new(Decimal::from(5)).unwrap();
        assert_eq!(price.to_string(), "5.00");
    }
}
