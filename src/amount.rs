//! Monetary amounts and conversion to satoshis.

use crate::error::{Error, Result};

/// Satoshis per whole currency unit.
pub const SATOSHIS_PER_UNIT: u64 = 100_000_000;

/// A validated, non-negative, finite amount in whole currency units.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct MonetaryAmount(f64);

impl MonetaryAmount {
    /// Validate a raw amount.
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidInput` for NaN, infinite or negative values, and
    /// for values whose satoshi equivalent does not fit in a `u64`.
    pub fn new(value: f64) -> Result<Self> {
        if !value.is_finite() {
            return Err(Error::InvalidInput(format!(
                "amount must be finite, got {value}"
            )));
        }
        if value < 0.0 {
            return Err(Error::InvalidInput(format!(
                "amount must be non-negative, got {value}"
            )));
        }
        #[allow(clippy::cast_precision_loss)]
        let max_units = u64::MAX as f64 / SATOSHIS_PER_UNIT as f64;
        if value >= max_units {
            return Err(Error::InvalidInput(format!(
                "amount {value} is too large to express in satoshis"
            )));
        }
        Ok(Self(value))
    }

    /// The amount in whole units.
    #[must_use]
    pub fn value(self) -> f64 {
        self.0
    }

    /// The smallest whole number of satoshis not below the amount.
    ///
    /// Output totals are integers, so `total >= to_satoshis()` holds exactly
    /// when `total >= amount * 10^8`.
    // Range is checked in `new`.
    #[must_use]
    #[allow(
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        clippy::cast_precision_loss
    )]
    pub fn to_satoshis(self) -> u64 {
        (self.0 * SATOSHIS_PER_UNIT as f64).ceil() as u64
    }
}

impl std::fmt::Display for MonetaryAmount {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
