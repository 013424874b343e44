//! Fee estimates and breakdowns.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::CalculationMethod;

/// Qualitative reliability of an estimate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Confidence {
    /// Input price is far from the historical order-value distribution.
    Low,
    /// Input price is near the historical distribution.
    Medium,
    /// Input price is typical of historical orders.
    High,
}

impl Confidence {
    /// Returns the confidence as a string slice.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::High => "high",
            Self::Medium => "medium",
            Self::Low => "low",
        }
    }
}

impl std::fmt::Display for Confidence {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Observed historical envelope of a fee.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FeeRange {
    /// Lower bound.
    pub min: f64,
    /// Upper bound.
    pub max: f64,
}

impl FeeRange {
    /// Creates a range, swapping the bounds if given in reverse.
    #[must_use]
    pub fn new(a: f64, b: f64) -> Self {
        Self {
            min: a.min(b),
            max: a.max(b),
        }
    }

    /// Returns the width of the range.
    #[must_use]
    pub fn width(&self) -> f64 {
        self.max - self.min
    }

    /// Returns true if the value falls inside the range (inclusive).
    #[must_use]
    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }
}

/// A single estimated fee.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FeeEstimate {
    /// Estimated amount in the product currency.
    pub estimated: f64,
    /// Reliability of the estimate.
    pub confidence: Confidence,
    /// Historical envelope, if known.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub range: Option<FeeRange>,
}

impl FeeEstimate {
    /// Creates an estimate without a range.
    #[must_use]
    pub const fn new(estimated: f64, confidence: Confidence) -> Self {
        Self {
            estimated,
            confidence,
            range: None,
        }
    }

    /// Attaches a historical range.
    #[must_use]
    pub const fn with_range(mut self, range: FeeRange) -> Self {
        self.range = Some(range);
        self
    }
}

/// Full landed-cost breakdown for one product.
///
/// `total = original_price + shipping + customs + vat` and
/// `vat = (original_price + shipping + customs) * vat_rate`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeeBreakdown {
    /// Product price.
    pub original_price: f64,
    /// Shipping estimate.
    pub shipping: FeeEstimate,
    /// Customs estimate.
    pub customs: FeeEstimate,
    /// VAT amount.
    pub vat: f64,
    /// Landed cost in the product currency.
    pub total: f64,
    /// Landed cost in local currency.
    #[serde(rename = "totalILS")]
    pub total_ils: f64,
    /// Exchange rate used for `total_ils`.
    pub exchange_rate: f64,
    /// When the breakdown was produced.
    pub calculated_at: DateTime<Utc>,
}

impl FeeBreakdown {
    /// CIF value (price + shipping + customs) VAT was levied on.
    #[must_use]
    pub fn cif_value(&self) -> f64 {
        self.original_price + self.shipping.estimated + self.customs.estimated
    }

    /// Total surcharge over the product price.
    #[must_use]
    pub fn surcharge(&self) -> f64 {
        self.total - self.original_price
    }

    /// Surcharge as a percentage of the product price.
    #[must_use]
    pub fn surcharge_percentage(&self) -> f64 {
        self.surcharge() / self.original_price * 100.0
    }

    /// Overall confidence, the lower of shipping and customs.
    #[must_use]
    pub fn confidence(&self) -> Confidence {
        self.shipping.confidence.min(self.customs.confidence)
    }
}

/// Coarse single-multiplier estimate.
///
/// Uses the historical surcharge percentage directly and does not
/// reconcile with [`FeeBreakdown`] totals.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuickEstimate {
    /// Landed cost in EUR.
    #[serde(rename = "totalEUR")]
    pub total_eur: f64,
    /// Landed cost in local currency.
    #[serde(rename = "totalILS")]
    pub total_ils: f64,
    /// Surcharge percentage applied (e.g. `62.5`).
    pub hlf_percentage: f64,
    /// Method the percentage was selected by.
    pub method: CalculationMethod,
}
