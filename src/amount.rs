use std::fmt;

use serde::Deserialize;
use thiserror::Error;

/// Fixed-point decimal with 4 decimal places, stored as a scaled integer.
///
/// Deserialization rejects values that are not finite or do not fit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Deserialize)]
#[serde(try_from = "f64")]
pub struct Amount(i64);

#[derive(Debug, Error, PartialEq)]
#[error("amount {0} is not a finite value in range")]
pub struct AmountError(pub f64);

impl Amount {
    const SCALE: i64 = 10_000;
    /// One whole unit expressed in basis points.
    const BPS_PER_UNIT: i128 = 10_000;

    pub const ZERO: Amount = Amount(0);

    /// Saturating conversion for trusted literals; use `try_from` for input.
    pub fn from_float(value: f64) -> Self {
        Amount((value * Self::SCALE as f64).round() as i64)
    }

    pub fn from_scaled(value: i64) -> Self {
        Amount(value)
    }

    pub fn is_negative(&self) -> bool {
        self.0 < 0
    }

    pub fn checked_add(self, rhs: Self) -> Option<Self> {
        self.0.checked_add(rhs.0).map(Amount)
    }

    pub fn checked_mul(self, rhs: u32) -> Option<Self> {
        self.0.checked_mul(rhs as i64).map(Amount)
    }

    /// Fraction of this amount given in basis points (`1320` is 13.2%),
    /// rounded half away from zero to the nearest scaled unit.
    pub fn percent_bps(self, bps: u32) -> Self {
        let product = self.0 as i128 * bps as i128;
        let quotient = product / Self::BPS_PER_UNIT;
        let remainder = product % Self::BPS_PER_UNIT;
        let rounded = if remainder.abs() * 2 >= Self::BPS_PER_UNIT {
            quotient + product.signum()
        } else {
            quotient
        };
        Amount(rounded as i64)
    }
}

impl TryFrom<f64> for Amount {
    type Error = AmountError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        let scaled = (value * Self::SCALE as f64).round();
        // i64::MAX as f64 rounds up to 2^63, which is already out of range
        if !scaled.is_finite() || scaled < i64::MIN as f64 || scaled >= i64::MAX as f64 {
            return Err(AmountError(value));
        }
        Ok(Amount(scaled as i64))
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let abs = self.0.abs();
        let whole = abs / Self::SCALE;
        let frac = abs % Self::SCALE;
        write!(f, "{sign}{whole}.{frac:04}")
    }
}

impl std::ops::Add for Amount {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Amount(self.0 + rhs.0)
    }
}

impl std::ops::Sub for Amount {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        Amount(self.0 - rhs.0)
    }
}

impl std::ops::AddAssign for Amount {
    fn add_assign(&mut self, rhs: Self) {
        self.0 += rhs.0;
    }
}

/// Price times quantity.
impl std::ops::Mul<u32> for Amount {
    type Output = Self;

    fn mul(self, rhs: u32) -> Self::Output {
        Amount(self.0 * rhs as i64)
    }
}

impl std::iter::Sum for Amount {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Amount::ZERO, |acc, amount| acc + amount)
    }
}
