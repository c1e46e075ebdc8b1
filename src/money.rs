//! Money type for prices and order totals
//!
//! `Money` wraps a `Decimal` and enforces at the Serde layer that:
//! - JSON numbers and JSON strings are both accepted (`29.99` or `"29.99"`)
//! - empty strings, `.5` and `5.` forms are rejected
//! - negative amounts are rejected
//! - at most 2 decimal places and below 10^10, the range of `NUMERIC(12, 2)`
//!
//! Values serialize as strings so no precision is lost on the way out.

use rust_decimal::prelude::*;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Hash)]
pub struct Money(Decimal);

/// Decimal places a stored amount may carry
pub const MAX_SCALE: u32 = 2;

/// Exclusive upper bound of a single amount
const MAX_AMOUNT: Decimal = Decimal::from_parts(1_410_065_408, 2, 0, false, 0); // 10^10

impl Money {
    pub const ZERO: Money = Money(Decimal::ZERO);

    /// Wrap a decimal, rejecting values the store cannot hold exactly.
    pub fn new(value: Decimal) -> Result<Self, &'static str> {
        if value.is_sign_negative() && !value.is_zero() {
            return Err("Amount cannot be negative");
        }
        if value.normalize().scale() > MAX_SCALE {
            return Err("Amount has more than 2 decimal places");
        }
        if value >= MAX_AMOUNT {
            return Err("Amount too large");
        }
        Ok(Self(value))
    }

    pub fn inner(self) -> Decimal {
        self.0
    }

    /// Price of `quantity` units, `None` on overflow.
    ///
    /// Products and sums are not range-checked; they are never stored.
    pub fn times(self, quantity: i64) -> Option<Money> {
        self.0.checked_mul(Decimal::from(quantity)).map(Money)
    }

    pub fn checked_add(self, rhs: Money) -> Option<Money> {
        self.0.checked_add(rhs.0).map(Money)
    }
}

impl FromStr for Money {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.is_empty() {
            return Err("Amount cannot be empty".to_string());
        }
        if s.starts_with('.') {
            return Err("Invalid format: use 0.5 not .5".to_string());
        }
        if s.ends_with('.') {
            return Err("Invalid format: use 5.0 not 5.".to_string());
        }
        let d = Decimal::from_str(s).map_err(|e| format!("Invalid decimal: {}", e))?;
        Money::new(d).map_err(str::to_string)
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}", self.0)
    }
}

impl<'de> Deserialize<'de> for Money {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        use serde::de::Error;

        #[derive(Deserialize)]
        #[serde(untagged)]
        enum DecimalOrString {
            String(String),
            Number(Decimal),
        }

        match DecimalOrString::deserialize(deserializer)? {
            DecimalOrString::String(s) => Money::from_str(&s).map_err(D::Error::custom),
            DecimalOrString::Number(d) => Money::new(d).map_err(D::Error::custom),
        }
    }
}

impl Serialize for Money {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.0.normalize().to_string())
    }
}
