//! Accuracy of estimates against observed historical fees.

use hlf_types::{CalculationMethod, ItemObservation, OrderMode, ProductData, Result};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::calculator::FeeCalculator;

/// Estimated and actual fees for one historical item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemAccuracy {
    /// Item name.
    pub name: String,
    /// Unit price in EUR.
    pub unit_price: f64,
    /// Fees actually paid.
    pub actual_hlf: f64,
    /// Fees estimated (`total - price`).
    pub estimated_hlf: f64,
    /// `(estimated / actual - 1) * 100`; zero when the actual fee is not positive.
    pub error_pct: f64,
}

impl ItemAccuracy {
    /// Pairs an observation with its estimate.
    #[must_use]
    pub fn new(observation: &ItemObservation, estimated_hlf: f64) -> Self {
        let actual_hlf = observation.hlf_actual;
        let error_pct = if actual_hlf > 0.0 {
            (estimated_hlf / actual_hlf - 1.0) * 100.0
        } else {
            0.0
        };
        Self {
            name: observation.name.clone(),
            unit_price: observation.unit_price,
            actual_hlf,
            estimated_hlf,
            error_pct,
        }
    }
}

/// Per-item errors and their summary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccuracyReport {
    /// Method the estimates were produced with.
    pub method: CalculationMethod,
    /// Order mode the estimates were produced with.
    pub order_mode: OrderMode,
    /// Items in input order.
    pub items: Vec<ItemAccuracy>,
}

impl AccuracyReport {
    /// Estimates every observation and compares it with the actual fee.
    ///
    /// # Errors
    ///
    /// Returns the first failure from building a product or calculating its
    /// breakdown.
    pub fn evaluate(
        calculator: &FeeCalculator,
        observations: &[ItemObservation],
        method: CalculationMethod,
        order_mode: OrderMode,
    ) -> Result<Self> {
        let exchange_rate = calculator.store().statistics()?.exchange_rate.mean;

        let items = observations
            .iter()
            .map(|obs| -> Result<ItemAccuracy> {
                let product = ProductData::eur(obs.unit_price)?.with_name(obs.name.clone());
                let breakdown = calculator.calculate(&product, exchange_rate, method, order_mode)?;
                Ok(ItemAccuracy::new(obs, breakdown.total - obs.unit_price))
            })
            .collect::<Result<Vec<_>>>()?;

        let report = Self {
            method,
            order_mode,
            items,
        };
        info!(
            items = report.len(),
            mean_error = ?report.mean_error(),
            "accuracy report complete"
        );
        Ok(report)
    }

    /// Number of items.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns true if no items were evaluated.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    fn errors(&self) -> impl Iterator<Item = f64> + '_ {
        self.items.iter().map(|i| i.error_pct)
    }

    fn sorted_errors(&self) -> Vec<f64> {
        let mut errors: Vec<f64> = self.errors().collect();
        errors.sort_by(f64::total_cmp);
        errors
    }

    /// Mean error percent.
    #[must_use]
    pub fn mean_error(&self) -> Option<f64> {
        (!self.is_empty()).then(|| self.errors().sum::<f64>() / self.len() as f64)
    }

    /// Upper-median error percent (element `n / 2` of the sorted errors).
    #[must_use]
    pub fn median_error(&self) -> Option<f64> {
        let sorted = self.sorted_errors();
        sorted.get(sorted.len() / 2).copied()
    }

    /// Smallest error percent.
    #[must_use]
    pub fn min_error(&self) -> Option<f64> {
        self.sorted_errors().first().copied()
    }

    /// Largest error percent.
    #[must_use]
    pub fn max_error(&self) -> Option<f64> {
        self.sorted_errors().last().copied()
    }

    /// Number of items with `|error| < pct`.
    #[must_use]
    pub fn within(&self, pct: f64) -> usize {
        self.errors().filter(|e| e.abs() < pct).count()
    }

    /// The `n` items estimated furthest above their actual fee.
    #[must_use]
    pub fn largest_overestimates(&self, n: usize) -> Vec<&ItemAccuracy> {
        let mut items: Vec<&ItemAccuracy> = self.items.iter().collect();
        items.sort_by(|a, b| b.error_pct.total_cmp(&a.error_pct));
        items.truncate(n);
        items
    }

    /// The `n` items estimated furthest below their actual fee.
    #[must_use]
    pub fn largest_underestimates(&self, n: usize) -> Vec<&ItemAccuracy> {
        let mut items: Vec<&ItemAccuracy> = self.items.iter().collect();
        items.sort_by(|a, b| a.error_pct.total_cmp(&b.error_pct));
        items.truncate(n);
        items
    }
}
