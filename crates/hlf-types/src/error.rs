//! Error types for hlf.

use chrono::NaiveDate;
use thiserror::Error;

use crate::Currency;

/// Result type alias for hlf operations.
pub type Result<T> = std::result::Result<T, HlfError>;

/// Errors that can occur while loading statistics or estimating fees.
#[derive(Error, Debug)]
pub enum HlfError {
    /// Historical statistics could not be loaded. Estimation cannot proceed.
    #[error("Fee statistics unavailable: {0}")]
    DataUnavailable(#[from] StatisticsError),

    /// A fee breakdown could not be composed.
    #[error("Fee calculation failed: {0}")]
    CalculationFailed(#[from] CalculationError),

    /// Product data failed validation.
    #[error(transparent)]
    Product(#[from] ProductError),

    /// Estimator configuration failed validation.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Unrecognised method, order mode or currency.
    #[error(transparent)]
    Parse(#[from] ParseError),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Reason the statistics dataset is unavailable.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StatisticsError {
    /// The dataset is not valid JSON or does not match the schema.
    #[error("failed to parse statistics: {0}")]
    Parse(String),

    /// The dataset could not be read.
    #[error("failed to read statistics from {path}: {reason}")]
    Read {
        /// Path that was read.
        path: String,
        /// Underlying I/O error message.
        reason: String,
    },

    /// A statistic violates an invariant.
    #[error("invalid statistic `{field}`: {reason}")]
    Invalid {
        /// Dotted path of the offending field (e.g. `shipping.median`).
        field: String,
        /// What is wrong with it.
        reason: String,
    },
}

impl StatisticsError {
    /// Creates an [`StatisticsError::Invalid`] for the given field.
    #[must_use]
    pub fn invalid(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Invalid {
            field: field.into(),
            reason: reason.into(),
        }
    }
}

/// Cause of a failed fee calculation.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CalculationError {
    /// Statistics were not available.
    #[error(transparent)]
    Statistics(#[from] StatisticsError),

    /// Product price must be positive and finite.
    #[error("invalid product price: {0}")]
    InvalidPrice(f64),

    /// Exchange rate must be positive and finite.
    #[error("invalid exchange rate: {0}")]
    InvalidExchangeRate(f64),

    /// Prices must be in EUR; the exchange rate only converts the result.
    #[error("unsupported product currency: {0}")]
    UnsupportedCurrency(Currency),

    /// Known shipping must be non-negative and finite.
    #[error("invalid shipping cost: {0}")]
    InvalidShipping(f64),

    /// A component of the breakdown is not a finite number.
    #[error("{component} is not finite ({value})")]
    NonFinite {
        /// Which component (e.g. "shipping").
        component: &'static str,
        /// The offending value.
        value: f64,
    },

    /// A cart has no items or a zero subtotal.
    #[error("cart is empty or has no value")]
    EmptyCart,
}

/// Invalid product data.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ProductError {
    /// Price is zero, negative or not finite.
    #[error("product price must be positive, got {0}")]
    InvalidPrice(f64),

    /// Weight is present but zero, negative or not finite.
    #[error("product weight must be positive, got {0}")]
    InvalidWeight(f64),
}

/// Error for unrecognised enum strings.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Unknown {kind}: {value}. Valid options: {expected}")]
pub struct ParseError {
    /// What was being parsed (e.g. "calculation method").
    pub kind: &'static str,
    /// The rejected input.
    pub value: String,
    /// Comma-separated valid values.
    pub expected: &'static str,
}

/// Error for invalid date ranges.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DateRangeError {
    /// Earliest date is after latest date.
    #[error("Invalid date range: {earliest} > {latest}")]
    InvalidRange {
        /// The earliest date.
        earliest: NaiveDate,
        /// The latest date.
        latest: NaiveDate,
    },
}

/// Invalid estimator configuration.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("invalid config `{field}`: {reason}")]
pub struct ConfigError {
    /// Offending field (e.g. `fallback_vat_rate`).
    pub field: String,
    /// What is wrong with it.
    pub reason: String,
}

impl ConfigError {
    /// Creates an error for the given field.
    #[must_use]
    pub fn new(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            reason: reason.into(),
        }
    }
}
