//! Fixed-point carat weights.
//!
//! Weights are stored as the real carat value multiplied by 100, so two
//! decimal digits are represented exactly and no floating-point value
//! ever enters the ledger. `500` means 5.00 carats.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::LedgerError;

/// Number of scaled units per whole carat (two implied decimals).
pub const SCALE: u64 = 100;

/// A carat weight as a scaled non-negative integer (real carats x100).
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct CaratWeight(u64);

impl CaratWeight {
    /// Wrap an already-scaled value (e.g. `500` for 5.00 carats).
    pub const fn from_scaled(scaled: u64) -> Self {
        CaratWeight(scaled)
    }

    /// Convert a possibly-negative scaled value from an external caller.
    ///
    /// Negative weights are `InvalidInput`; the ledger never holds one.
    pub fn try_from_scaled(scaled: i64) -> Result<Self, LedgerError> {
        u64::try_from(scaled)
            .map(CaratWeight)
            .map_err(|_| LedgerError::InvalidInput(format!("negative carat weight: {scaled}")))
    }

    /// Parse a decimal string such as `"5"`, `"2.5"`, or `"0.25"`.
    ///
    /// At most two fractional digits are accepted; anything finer cannot
    /// be represented exactly at the fixed 2-decimal scale and is
    /// rejected rather than rounded.
    pub fn parse_decimal(input: &str) -> Result<Self, LedgerError> {
        let invalid = || LedgerError::InvalidInput(format!("malformed carat value '{input}'"));

        let (whole, frac) = match input.split_once('.') {
            // A trailing dot ("5.") is malformed, not a zero fraction.
            Some((_, "")) => return Err(invalid()),
            Some((whole, frac)) => (whole, frac),
            None => (input, ""),
        };
        if whole.is_empty() || !whole.chars().all(|c| c.is_ascii_digit()) {
            return Err(invalid());
        }
        if frac.len() > 2 {
            return Err(LedgerError::InvalidInput(format!(
                "carat value '{input}' is not representable at 2-decimal precision"
            )));
        }
        if !frac.chars().all(|c| c.is_ascii_digit()) {
            return Err(invalid());
        }

        let whole: u64 = whole.parse().map_err(|_| invalid())?;
        // Right-pad the fraction to two digits: "5" -> 50, "" -> 0.
        let frac_scaled = match frac.len() {
            0 => 0,
            1 => frac.parse::<u64>().map_err(|_| invalid())? * 10,
            _ => frac.parse::<u64>().map_err(|_| invalid())?,
        };

        whole
            .checked_mul(SCALE)
            .and_then(|w| w.checked_add(frac_scaled))
            .map(CaratWeight)
            .ok_or_else(|| LedgerError::InvalidInput(format!("carat value '{input}' overflows")))
    }

    /// The raw scaled value.
    pub fn scaled(self) -> u64 {
        self.0
    }
}

impl fmt::Display for CaratWeight {
    /// Renders the real value with exactly two decimals: `500` -> `"5.00"`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{:02}", self.0 / SCALE, self.0 % SCALE)
    }
}
