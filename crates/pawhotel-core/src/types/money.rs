//! Monetary amounts stored as whole cents.
//!
//! Rates and add-on fees are entered as decimal strings (`"50"`, `"28.5"`,
//! `"28.50"`) and rendered with two decimals. Parsing goes through
//! [`Decimal`]; storage and arithmetic use an `i64` count of cents so that
//! day multiplication never drifts.

use std::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;
use rust_decimal::prelude::{FromPrimitive, ToPrimitive};
use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::AppError;

/// Cents carry two decimal places.
const SCALE: u32 = 2;

/// An amount of money in cents.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Money(i64);

impl Money {
    /// The zero amount.
    pub const ZERO: Self = Self(0);

    /// Create an amount from cents.
    pub const fn from_cents(cents: i64) -> Self {
        Self(cents)
    }

    /// Create an amount from whole currency units.
    pub const fn from_units(units: i64) -> Self {
        Self(units * 100)
    }

    /// Convert a decimal amount, rejecting more than two decimal places
    /// and values that do not fit in `i64` cents.
    pub fn from_decimal(amount: Decimal) -> Result<Self, AppError> {
        let normalized = amount.normalize();
        if normalized.scale() > SCALE {
            return Err(AppError::validation(format!(
                "Amount {amount} has more than two decimal places"
            )));
        }
        normalized
            .checked_mul(Decimal::ONE_HUNDRED)
            .and_then(|cents| cents.to_i64())
            .map(Self)
            .ok_or_else(|| AppError::validation(format!("Amount {amount} is out of range")))
    }

    /// The amount as a decimal with two places.
    pub fn to_decimal(&self) -> Decimal {
        Decimal::new(self.0, SCALE)
    }

    /// Return the amount in cents.
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Whether the amount is below zero.
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Add two amounts, returning `None` on overflow.
    pub fn checked_add(self, other: Self) -> Option<Self> {
        self.0.checked_add(other.0).map(Self)
    }

    /// Multiply by a day count, returning `None` on overflow.
    pub fn checked_mul(self, quantity: u32) -> Option<Self> {
        self.0.checked_mul(i64::from(quantity)).map(Self)
    }

    /// Reject negative amounts with a validation error naming `field`.
    pub fn ensure_non_negative(self, field: &str) -> Result<Self, AppError> {
        if self.is_negative() {
            return Err(AppError::validation(format!(
                "{field} must not be negative (got {self})"
            )));
        }
        Ok(self)
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_decimal())
    }
}

impl FromStr for Money {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let amount = Decimal::from_str_exact(s.trim())
            .map_err(|e| AppError::validation(format!("Invalid amount '{s}': {e}")))?;
        Self::from_decimal(amount)
    }
}

impl Serialize for Money {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

struct MoneyVisitor;

impl Visitor<'_> for MoneyVisitor {
    type Value = Money;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a decimal amount such as \"50.00\" or 50")
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Money, E> {
        v.parse().map_err(|e: AppError| E::custom(e.message))
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<Money, E> {
        Money::from_decimal(Decimal::from(v)).map_err(|e| E::custom(e.message))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<Money, E> {
        Money::from_decimal(Decimal::from(v)).map_err(|e| E::custom(e.message))
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<Money, E> {
        let amount = Decimal::from_f64(v)
            .ok_or_else(|| E::custom(format!("amount {v} is not representable")))?;
        Money::from_decimal(amount).map_err(|e| E::custom(e.message))
    }
}

impl<'de> Deserialize<'de> for Money {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(MoneyVisitor)
    }
}

#[cfg(feature = "sqlx")]
impl sqlx::Type<sqlx::Postgres> for Money {
    fn type_info() -> sqlx::postgres::PgTypeInfo {
        <i64 as sqlx::Type<sqlx::Postgres>>::type_info()
    }
}

#[cfg(feature = "sqlx")]
impl<'q> sqlx::Encode<'q, sqlx::Postgres> for Money {
    fn encode_by_ref(
        &self,
        buf: &mut <sqlx::Postgres as sqlx::Database>::ArgumentBuffer<'q>,
    ) -> Result<sqlx::encode::IsNull, sqlx::error::BoxDynError> {
        <i64 as sqlx::Encode<'q, sqlx::Postgres>>::encode_by_ref(&self.0, buf)
    }
}

#[cfg(feature = "sqlx")]
impl<'r> sqlx::Decode<'r, sqlx::Postgres> for Money {
    fn decode(
        value: <sqlx::Postgres as sqlx::Database>::ValueRef<'r>,
    ) -> Result<Self, sqlx::error::BoxDynError> {
        <i64 as sqlx::Decode<'r, sqlx::Postgres>>::decode(value).map(Self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_variants() {
        assert_eq!("50".parse::<Money>().unwrap(), Money::from_units(50));
        assert_eq!("28.5".parse::<Money>().unwrap(), Money::from_cents(2850));
        assert_eq!("28.05".parse::<Money>().unwrap(), Money::from_cents(2805));
        assert_eq!("-1.25".parse::<Money>().unwrap(), Money::from_cents(-125));
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!("".parse::<Money>().is_err());
        assert!("abc".parse::<Money>().is_err());
        assert!("1.234".parse::<Money>().is_err());
        assert!("1.-5".parse::<Money>().is_err());
    }

    #[test]
    fn test_trailing_zeros_are_not_extra_precision() {
        assert_eq!("28.500".parse::<Money>().unwrap(), Money::from_cents(2850));
    }

    #[test]
    fn test_out_of_range_rejected() {
        let err = "99999999999999999999".parse::<Money>().unwrap_err();
        assert!(err.is(crate::error::ErrorKind::Validation));
        assert!(serde_json::from_str::<Money>("1e300").is_err());
        assert!(serde_json::from_str::<Money>(&u64::MAX.to_string()).is_err());
    }

    #[test]
    fn test_display_two_decimals() {
        assert_eq!(Money::from_units(150).to_string(), "150.00");
        assert_eq!(Money::from_cents(7).to_string(), "0.07");
        assert_eq!(Money::from_cents(-125).to_string(), "-1.25");
    }

    #[test]
    fn test_arithmetic() {
        let rate = Money::from_units(50);
        assert_eq!(rate.checked_mul(3), Some(Money::from_units(150)));
        assert_eq!(
            rate.checked_add(Money::from_units(28)),
            Some(Money::from_units(78))
        );
        assert_eq!(Money::from_cents(i64::MAX).checked_mul(2), None);
    }

    #[test]
    fn test_ensure_non_negative() {
        assert!(Money::ZERO.ensure_non_negative("rate").is_ok());
        let err = Money::from_cents(-1)
            .ensure_non_negative("rate")
            .unwrap_err();
        assert!(err.is(crate::error::ErrorKind::Validation));
    }

    #[test]
    fn test_serde_accepts_strings_and_numbers() {
        let from_str: Money = serde_json::from_str("\"28.50\"").expect("string");
        let from_int: Money = serde_json::from_str("28").expect("int");
        let from_float: Money = serde_json::from_str("28.5").expect("float");
        assert_eq!(from_str, Money::from_cents(2850));
        assert_eq!(from_int, Money::from_units(28));
        assert_eq!(from_float, Money::from_cents(2850));
        assert_eq!(
            serde_json::to_string(&from_str).expect("serialize"),
            "\"28.50\""
        );
    }
}
