//! Aggregate statistics over historical orders.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::{DateRange, StatisticsError};

/// Summary statistics for a single measured quantity.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct StatisticValues {
    /// Arithmetic mean.
    pub mean: f64,
    /// Median.
    pub median: f64,
    /// Smallest observation.
    pub min: f64,
    /// Largest observation.
    pub max: f64,
    /// Sample standard deviation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub std: Option<f64>,
    /// 25th percentile.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub percentile_25: Option<f64>,
    /// 75th percentile.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub percentile_75: Option<f64>,
    /// 90th percentile.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub percentile_90: Option<f64>,
}

impl StatisticValues {
    /// Creates statistics with the required fields and no percentiles.
    #[must_use]
    pub const fn new(mean: f64, median: f64, min: f64, max: f64) -> Self {
        Self {
            mean,
            median,
            min,
            max,
            std: None,
            percentile_25: None,
            percentile_75: None,
            percentile_90: None,
        }
    }

    /// Sets the standard deviation.
    #[must_use]
    pub const fn with_std(mut self, std: f64) -> Self {
        self.std = Some(std);
        self
    }

    /// Sets the 25th, 75th and 90th percentiles.
    #[must_use]
    pub const fn with_percentiles(
        mut self,
        p25: Option<f64>,
        p75: Option<f64>,
        p90: Option<f64>,
    ) -> Self {
        self.percentile_25 = p25;
        self.percentile_75 = p75;
        self.percentile_90 = p90;
        self
    }

    /// 75th percentile, or the median if absent.
    #[must_use]
    pub fn p75_or_median(&self) -> f64 {
        self.percentile_75.unwrap_or(self.median)
    }

    /// 25th percentile, or the median if absent.
    #[must_use]
    pub fn p25_or_median(&self) -> f64 {
        self.percentile_25.unwrap_or(self.median)
    }

    /// 25th percentile, or the minimum if absent.
    #[must_use]
    pub fn p25_or_min(&self) -> f64 {
        self.percentile_25.unwrap_or(self.min)
    }

    /// 90th percentile, or the maximum if absent.
    #[must_use]
    pub fn p90_or_max(&self) -> f64 {
        self.percentile_90.unwrap_or(self.max)
    }

    /// Checks value invariants, naming offending fields under `prefix`.
    ///
    /// # Errors
    ///
    /// Returns an error if any value is negative or not finite, if the median
    /// or a percentile lies outside `[min, max]`, or if present percentiles
    /// are not non-decreasing around the median.
    pub fn validate(&self, prefix: &str) -> Result<(), StatisticsError> {
        let fields = [
            ("mean", Some(self.mean)),
            ("median", Some(self.median)),
            ("min", Some(self.min)),
            ("max", Some(self.max)),
            ("std", self.std),
            ("percentile_25", self.percentile_25),
            ("percentile_75", self.percentile_75),
            ("percentile_90", self.percentile_90),
        ];
        for (name, value) in fields {
            if let Some(v) = value
                && !(v.is_finite() && v >= 0.0)
            {
                return Err(StatisticsError::invalid(
                    format!("{prefix}.{name}"),
                    format!("must be a non-negative number, got {v}"),
                ));
            }
        }

        if self.min > self.max {
            return Err(StatisticsError::invalid(
                format!("{prefix}.min"),
                format!("{} exceeds max {}", self.min, self.max),
            ));
        }
        if self.median < self.min || self.median > self.max {
            return Err(StatisticsError::invalid(
                format!("{prefix}.median"),
                format!("{} outside [{}, {}]", self.median, self.min, self.max),
            ));
        }

        let percentiles = [
            ("percentile_25", self.percentile_25),
            ("percentile_75", self.percentile_75),
            ("percentile_90", self.percentile_90),
        ];
        for (name, value) in percentiles {
            if let Some(v) = value
                && (v < self.min || v > self.max)
            {
                return Err(StatisticsError::invalid(
                    format!("{prefix}.{name}"),
                    format!("{v} outside [{}, {}]", self.min, self.max),
                ));
            }
        }

        let ordered = [
            ("percentile_25", self.percentile_25),
            ("median", Some(self.median)),
            ("percentile_75", self.percentile_75),
            ("percentile_90", self.percentile_90),
        ];
        let mut previous: Option<(&str, f64)> = None;
        for (name, value) in ordered {
            let Some(v) = value else { continue };
            if let Some((prev_name, prev)) = previous
                && v < prev
            {
                return Err(StatisticsError::invalid(
                    format!("{prefix}.{name}"),
                    format!("{v} is below {prev_name} {prev}"),
                ));
            }
            previous = Some((name, v));
        }

        Ok(())
    }
}

/// Provenance of a statistics dataset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatisticsMeta {
    /// Number of complete orders the statistics were computed from.
    pub total_orders: usize,
    /// Date range of those orders.
    pub date_range: DateRange,
    /// When the dataset was generated.
    pub generated_at: NaiveDateTime,
}

/// Historical fee statistics used as the estimation model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeeStatistics {
    /// Dataset provenance.
    pub meta: StatisticsMeta,
    /// Order subtotal in EUR.
    pub order_value: StatisticValues,
    /// Shipping cost per order in EUR.
    pub shipping: StatisticValues,
    /// Customs fee per order in EUR.
    pub customs: StatisticValues,
    /// Total surcharge (shipping + customs + VAT) per order in EUR.
    pub hlf_total: StatisticValues,
    /// Total surcharge as a percentage of order value (e.g. `62.5` for 62.5%).
    pub hlf_percentage: StatisticValues,
    /// EUR to ILS exchange rate at order time.
    pub exchange_rate: StatisticValues,
    /// VAT rate as a fraction (e.g. `0.18`).
    pub vat_rate: f64,
}

impl FeeStatistics {
    /// Parses statistics from JSON and validates them.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON does not match the schema or any
    /// invariant is violated.
    pub fn from_json(json: &str) -> Result<Self, StatisticsError> {
        let stats: Self =
            serde_json::from_str(json).map_err(|e| StatisticsError::Parse(e.to_string()))?;
        stats.validate()?;
        Ok(stats)
    }

    /// Checks the dataset's date range, every statistic and the VAT rate.
    ///
    /// # Errors
    ///
    /// Returns the first violated invariant.
    pub fn validate(&self) -> Result<(), StatisticsError> {
        let range = self.meta.date_range;
        DateRange::new(range.earliest, range.latest)
            .map_err(|e| StatisticsError::invalid("meta.date_range", e.to_string()))?;

        self.order_value.validate("order_value")?;
        self.shipping.validate("shipping")?;
        self.customs.validate("customs")?;
        self.hlf_total.validate("hlf_total")?;
        self.hlf_percentage.validate("hlf_percentage")?;
        self.exchange_rate.validate("exchange_rate")?;

        if !(self.vat_rate > 0.0 && self.vat_rate <= 1.0) {
            return Err(StatisticsError::invalid(
                "vat_rate",
                format!("must be in (0, 1], got {}", self.vat_rate),
            ));
        }
        Ok(())
    }

    /// Historical customs-to-order-value ratio, or zero if order value is zero.
    #[must_use]
    pub fn customs_ratio(&self) -> f64 {
        if self.order_value.mean == 0.0 {
            0.0
        } else {
            self.customs.mean / self.order_value.mean
        }
    }
}
