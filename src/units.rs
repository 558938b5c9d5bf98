//! Size units used by walk reports.
//!
//! The table is fixed at compile time: four binary units with strictly
//! increasing multipliers. [`reduce`] is the inverse lookup used for display.

use crate::error::{Error, Result};
use std::fmt;
use std::str::FromStr;

/// A size unit symbol with a power-of-1024 multiplier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Unit {
    /// Bytes.
    B,
    /// 1024 bytes.
    KB,
    /// 1024^2 bytes.
    MB,
    /// 1024^3 bytes.
    GB,
}

impl Unit {
    /// All units in ascending rank order.
    pub const ALL: [Unit; 4] = [Unit::B, Unit::KB, Unit::MB, Unit::GB];

    /// Look a unit up by its report symbol (case-sensitive).
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownUnit`] for anything outside `B`, `KB`, `MB`, `GB`.
    pub fn from_symbol(symbol: &str) -> Result<Self> {
        match symbol {
            "B" => Ok(Unit::B),
            "KB" => Ok(Unit::KB),
            "MB" => Ok(Unit::MB),
            "GB" => Ok(Unit::GB),
            other => Err(Error::UnknownUnit(other.to_string())),
        }
    }

    /// Byte multiplier.
    #[must_use]
    pub const fn multiplier(self) -> u64 {
        match self {
            Unit::B => 1,
            Unit::KB => 1 << 10,
            Unit::MB => 1 << 20,
            Unit::GB => 1 << 30,
        }
    }

    /// Report symbol.
    #[must_use]
    pub const fn symbol(self) -> &'static str {
        match self {
            Unit::B => "B",
            Unit::KB => "KB",
            Unit::MB => "MB",
            Unit::GB => "GB",
        }
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

impl FromStr for Unit {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_symbol(s)
    }
}

/// Express `bytes` in the largest unit that leaves a non-zero whole quotient.
///
/// Zero maps to `(0, B)`. The quotient is truncated, never rounded.
#[must_use]
pub fn reduce(bytes: u64) -> (u64, Unit) {
    let (quotient, unit) = reduce_wide(u128::from(bytes));
    // The quotient never exceeds its u64 dividend.
    (quotient as u64, unit)
}

fn reduce_wide(bytes: u128) -> (u128, Unit) {
    Unit::ALL
        .iter()
        .rev()
        .map(|&unit| (bytes / u128::from(unit.multiplier()), unit))
        .find(|&(quotient, _)| quotient != 0)
        .unwrap_or((0, Unit::B))
}

/// Render a byte count as `<integer><symbol>`, e.g. `5MB` or `0B`.
#[must_use]
pub fn format_bytes(bytes: u64) -> String {
    format_total(u128::from(bytes))
}

/// [`format_bytes`] for aggregated totals, which may exceed `u64`.
#[must_use]
pub fn format_total(bytes: u128) -> String {
    let (quotient, unit) = reduce_wide(bytes);
    format!("{quotient}{unit}")
}
