//! Numeric literals with an optional storage-size unit.
//!
//! Quantities are normalized to megabytes before they reach SQL, since that is
//! how sizes are stored in the inventory schema.

use core::fmt;
use core::str::FromStr;

use serde::Serialize;

/// Storage-size unit attached to a quantity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
pub enum Unit {
    /// A bare number, taken to be in baseline units already.
    #[default]
    None,
    /// Kilobytes.
    Kb,
    /// Megabytes (the baseline).
    Mb,
    /// Gigabytes.
    Gb,
    /// Terabytes.
    Tb,
}

const SUFFIXES: &[(&str, Unit)] = &[
    ("kb", Unit::Kb),
    ("mb", Unit::Mb),
    ("gb", Unit::Gb),
    ("tb", Unit::Tb),
];

impl Unit {
    /// Looks up a two-letter unit suffix, ignoring case.
    #[must_use]
    pub fn from_suffix(suffix: &str) -> Option<Self> {
        SUFFIXES
            .iter()
            .find(|(s, _)| s.eq_ignore_ascii_case(suffix))
            .map(|(_, unit)| *unit)
    }

    /// Returns the canonical suffix, empty for [`Unit::None`].
    #[must_use]
    pub const fn suffix(&self) -> &'static str {
        match self {
            Self::None => "",
            Self::Kb => "Kb",
            Self::Mb => "Mb",
            Self::Gb => "Gb",
            Self::Tb => "Tb",
        }
    }

    /// Factor that converts a value in this unit into megabytes.
    #[must_use]
    pub fn to_mb_factor(&self) -> f64 {
        match self {
            Self::Kb => 1.0 / 1024.0,
            Self::None | Self::Mb => 1.0,
            Self::Gb => 1024.0,
            Self::Tb => 1024.0 * 1024.0,
        }
    }
}

/// A number with a unit, e.g. `1.5GB`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Quantity {
    /// The numeric value as written.
    pub value: f64,
    /// The unit it was written in.
    pub unit: Unit,
}

impl Quantity {
    /// Creates a new quantity.
    #[must_use]
    pub const fn new(value: f64, unit: Unit) -> Self {
        Self { value, unit }
    }

    /// Returns the value converted to megabytes.
    #[must_use]
    pub fn to_baseline(&self) -> f64 {
        self.value * self.unit.to_mb_factor()
    }

    /// Renders the normalized value with two fractional digits and no unit.
    #[must_use]
    pub fn to_sql(&self) -> String {
        format!("{:.2}", self.to_baseline())
    }
}

/// Error returned when a quantity lexeme cannot be parsed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InvalidQuantity {
    /// The lexeme is not a number followed by a known unit.
    #[error("invalid quantity '{0}'")]
    Malformed(String),
    /// The value, or the value converted to megabytes, is not a finite number.
    #[error("quantity '{0}' is out of range")]
    OutOfRange(String),
}

impl FromStr for Quantity {
    type Err = InvalidQuantity;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let split = s
            .find(|c: char| c.is_ascii_alphabetic())
            .unwrap_or(s.len());
        let (number, suffix) = s.split_at(split);

        let unit = if suffix.is_empty() {
            Unit::None
        } else {
            Unit::from_suffix(suffix).ok_or_else(|| InvalidQuantity::Malformed(s.to_string()))?
        };
        let value = number
            .parse::<f64>()
            .map_err(|_| InvalidQuantity::Malformed(s.to_string()))?;

        let quantity = Self { value, unit };
        if !quantity.value.is_finite() || !quantity.to_baseline().is_finite() {
            return Err(InvalidQuantity::OutOfRange(s.to_string()));
        }
        Ok(quantity)
    }
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}{}", self.value, self.unit.suffix())
    }
}
