//! Calculation method and order allocation mode.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::ParseError;

/// Which statistical point estimate to use for a surcharge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum CalculationMethod {
    /// Upper estimate (75th percentile).
    #[default]
    Conservative,
    /// Expected value (mean).
    Average,
    /// Lower estimate (25th percentile for shipping, median for surcharge percentage).
    Optimistic,
}

impl CalculationMethod {
    /// Returns the method as a string identifier.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Conservative => "conservative",
            Self::Average => "average",
            Self::Optimistic => "optimistic",
        }
    }

    /// Returns all available methods.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[Self::Conservative, Self::Average, Self::Optimistic]
    }
}

impl std::fmt::Display for CalculationMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for CalculationMethod {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "conservative" | "p75" | "high" => Ok(Self::Conservative),
            "average" | "mean" | "avg" => Ok(Self::Average),
            "optimistic" | "p25" | "low" => Ok(Self::Optimistic),
            _ => Err(ParseError {
                kind: "calculation method",
                value: s.to_string(),
                expected: "conservative, average, optimistic",
            }),
        }
    }
}

/// How shipping cost is attributed to a single item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum OrderMode {
    /// The item ships alone and carries the full shipping cost.
    Single,
    /// The item is part of a multi-item order and carries a value-proportional share.
    #[default]
    Bulk,
}

impl OrderMode {
    /// Returns the mode as a string identifier.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Single => "single",
            Self::Bulk => "bulk",
        }
    }

    /// Returns true for proportional allocation.
    #[must_use]
    pub const fn is_bulk(&self) -> bool {
        matches!(self, Self::Bulk)
    }
}

impl std::fmt::Display for OrderMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for OrderMode {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "single" | "alone" => Ok(Self::Single),
            "bulk" | "multi" | "proportional" => Ok(Self::Bulk),
            _ => Err(ParseError {
                kind: "order mode",
                value: s.to_string(),
                expected: "single, bulk",
            }),
        }
    }
}
