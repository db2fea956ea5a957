//! Fixed-point decimal values for money math
//!
//! [`DecimalValue`] wraps [`rust_decimal::Decimal`]: 96-bit mantissa plus a
//! scale of 0..=28, so `0.1 + 0.2 == 0.3` holds exactly. Equality and
//! ordering are numeric (`1.0 == 1.00`).
//!
//! The infallible operators (`-x`, `+`, `-`, `*`) panic on overflow like
//! integer arithmetic does; the `checked_*` methods return [`Result`] instead.
//! Division has no operator because a zero divisor must be handled.

pub mod currency;

pub use currency::{CurrencyConventions, Locale, format_currency};

use crate::core::error::{Error, Result};
use rust_decimal::{Decimal, MathematicalOps};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, Mul, Neg, Sub};
use std::str::FromStr;

#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct DecimalValue(Decimal);

impl DecimalValue {
    pub const ZERO: Self = Self(Decimal::ZERO);
    pub const ONE: Self = Self(Decimal::ONE);

    pub fn new(mantissa: i64, scale: u32) -> Self {
        Self(Decimal::new(mantissa, scale))
    }

    pub fn inner(&self) -> Decimal {
        self.0
    }

    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    /// Sum, or [`Error::Overflow`] outside the representable range.
    ///
    /// Named `checked_*` so the by-value operator traits never shadow them.
    pub fn checked_add(&self, other: Self) -> Result<Self> {
        self.0
            .checked_add(other.0)
            .map(Self)
            .ok_or(Error::Overflow("add"))
    }

    pub fn checked_sub(&self, other: Self) -> Result<Self> {
        self.0
            .checked_sub(other.0)
            .map(Self)
            .ok_or(Error::Overflow("subtract"))
    }

    pub fn checked_mul(&self, other: Self) -> Result<Self> {
        self.0
            .checked_mul(other.0)
            .map(Self)
            .ok_or(Error::Overflow("multiply"))
    }

    /// # Errors
    ///
    /// [`Error::DivideByZero`] for a zero divisor; never infinity or NaN.
    pub fn checked_div(&self, other: Self) -> Result<Self> {
        if other.is_zero() {
            return Err(Error::DivideByZero);
        }
        self.0
            .checked_div(other.0)
            .map(Self)
            .ok_or(Error::Overflow("divide"))
    }

    /// Raises to an integer power. Negative powers divide, so `0^-1` is a
    /// division by zero.
    pub fn checked_pow(&self, exponent: i64) -> Result<Self> {
        if exponent < 0 && self.is_zero() {
            return Err(Error::DivideByZero);
        }
        self.0
            .checked_powi(exponent)
            .map(Self)
            .ok_or(Error::Overflow("pow"))
    }

    /// Currency string for `locale`.
    ///
    /// Anything that is not strictly positive renders as the locale's zero
    /// amount: `-10` prints like `0`.
    pub fn currency_string_value(&self, locale: Locale) -> String {
        if self.0 > Decimal::ZERO {
            format_currency(self.0, locale)
        } else {
            format_currency(Decimal::ZERO, locale)
        }
    }
}

impl From<Decimal> for DecimalValue {
    fn from(value: Decimal) -> Self {
        Self(value)
    }
}

impl From<DecimalValue> for Decimal {
    fn from(value: DecimalValue) -> Self {
        value.0
    }
}

impl From<i64> for DecimalValue {
    fn from(value: i64) -> Self {
        Self(Decimal::from(value))
    }
}

impl From<i32> for DecimalValue {
    fn from(value: i32) -> Self {
        Self(Decimal::from(value))
    }
}

impl FromStr for DecimalValue {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        Decimal::from_str(s)
            .or_else(|_| Decimal::from_scientific(s))
            .map(Self)
            .map_err(|_| Error::InvalidDecimal(s.to_string()))
    }
}

impl fmt::Display for DecimalValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl Neg for DecimalValue {
    type Output = Self;

    fn neg(self) -> Self {
        Self(-self.0)
    }
}

impl Add for DecimalValue {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self(self.0 + rhs.0)
    }
}

impl Sub for DecimalValue {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self(self.0 - rhs.0)
    }
}

impl Mul for DecimalValue {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self {
        Self(self.0 * rhs.0)
    }
}
