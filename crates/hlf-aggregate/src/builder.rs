//! Streaming order-to-statistics aggregation.

use chrono::{NaiveDate, NaiveDateTime};
use hlf_types::{DateRange, FeeStatistics, HistoricalOrder, StatisticsMeta};
use tracing::{debug, info};

use crate::Sample;

/// Israeli VAT rate recorded in generated datasets.
pub const DEFAULT_VAT_RATE: f64 = 0.18;

/// Streaming statistics aggregator.
///
/// Only complete orders (subtotal, shipping and surcharge all present and
/// non-zero) contribute. Customs and exchange rate statistics use the subset
/// of complete orders where those values are present and non-zero.
#[derive(Debug, Clone)]
pub struct StatisticsBuilder {
    vat_rate: f64,
    order_values: Vec<f64>,
    shipping: Vec<f64>,
    customs: Vec<f64>,
    hlf_totals: Vec<f64>,
    hlf_percentages: Vec<f64>,
    exchange_rates: Vec<f64>,
    dates: Vec<NaiveDate>,
    skipped: usize,
}

impl StatisticsBuilder {
    /// Creates a builder recording the default VAT rate.
    #[must_use]
    pub const fn new() -> Self {
        Self::with_vat_rate(DEFAULT_VAT_RATE)
    }

    /// Creates a builder recording the given VAT rate.
    #[must_use]
    pub const fn with_vat_rate(vat_rate: f64) -> Self {
        Self {
            vat_rate,
            order_values: Vec::new(),
            shipping: Vec::new(),
            customs: Vec::new(),
            hlf_totals: Vec::new(),
            hlf_percentages: Vec::new(),
            exchange_rates: Vec::new(),
            dates: Vec::new(),
            skipped: 0,
        }
    }

    /// Processes an order. Returns true if it was complete and counted.
    pub fn push(&mut self, order: &HistoricalOrder) -> bool {
        let summary = &order.summary;
        let (Some(total), Some(shipping), Some(hlf_total)) =
            (summary.total, summary.shipping, summary.hlf_total)
        else {
            debug!(order_id = %order.order_id, "skipping incomplete order");
            self.skipped += 1;
            return false;
        };
        if !summary.is_complete() {
            debug!(order_id = %order.order_id, "skipping order with zero totals");
            self.skipped += 1;
            return false;
        }

        self.order_values.push(total);
        self.shipping.push(shipping);
        self.hlf_totals.push(hlf_total);
        if let Some(customs) = summary.customs.filter(|c| *c != 0.0) {
            self.customs.push(customs);
        }
        if let Some(rate) = summary.exchange_rate.filter(|r| *r != 0.0) {
            self.exchange_rates.push(rate);
        }
        if let Some(pct) = summary.hlf_percentage() {
            self.hlf_percentages.push(pct);
        }
        self.dates.push(order.date);
        true
    }

    /// Processes every order in the iterator.
    pub fn extend<'a>(&mut self, orders: impl IntoIterator<Item = &'a HistoricalOrder>) {
        for order in orders {
            self.push(order);
        }
    }

    /// Number of complete orders counted so far.
    #[must_use]
    pub fn complete_orders(&self) -> usize {
        self.order_values.len()
    }

    /// Number of orders skipped as incomplete.
    #[must_use]
    pub const fn skipped_orders(&self) -> usize {
        self.skipped
    }

    /// Finishes aggregation.
    ///
    /// Returns `None` if no complete order was seen.
    #[must_use]
    pub fn finish(self, generated_at: NaiveDateTime) -> Option<FeeStatistics> {
        let date_range = DateRange::spanning(self.dates.iter().copied())?;

        let shipping = Sample::new(self.shipping);
        let hlf_percentage = Sample::new(self.hlf_percentages);

        let stats = FeeStatistics {
            meta: StatisticsMeta {
                total_orders: self.order_values.len(),
                date_range,
                generated_at,
            },
            order_value: Sample::new(self.order_values).summary(),
            shipping: shipping.basic_summary().with_percentiles(
                Some(shipping.percentile(25.0)),
                Some(shipping.percentile(75.0)),
                Some(shipping.percentile(90.0)),
            ),
            customs: Sample::new(self.customs).basic_summary(),
            hlf_total: Sample::new(self.hlf_totals).basic_summary(),
            hlf_percentage: hlf_percentage.basic_summary().with_percentiles(
                None,
                Some(hlf_percentage.percentile(75.0)),
                Some(hlf_percentage.percentile(90.0)),
            ),
            exchange_rate: Sample::new(self.exchange_rates).basic_summary(),
            vat_rate: self.vat_rate,
        };

        info!(
            orders = stats.meta.total_orders,
            skipped = self.skipped,
            date_range = %stats.meta.date_range,
            "fee statistics built"
        );
        Some(stats)
    }
}

impl Default for StatisticsBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use hlf_types::OrderSummary;

    fn order(id: &str, day: u32, summary: OrderSummary) -> HistoricalOrder {
        HistoricalOrder {
            order_id: id.to_string(),
            date: NaiveDate::from_ymd_opt(2024, 3, day).unwrap(),
            summary,
            items: Vec::new(),
        }
    }

    fn complete(total: f64, shipping: f64, customs: Option<f64>, hlf: f64) -> OrderSummary {
        OrderSummary {
            total: Some(total),
            shipping: Some(shipping),
            customs,
            hlf_total: Some(hlf),
            exchange_rate: Some(3.9),
        }
    }

    fn generated_at() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 4, 1)
            .unwrap()
            .and_hms_opt(9, 30, 0)
            .unwrap()
    }

    #[test]
    fn test_no_complete_orders() {
        let mut builder = StatisticsBuilder::new();
        assert!(!builder.push(&order("1", 1, OrderSummary::default())));
        assert_eq!(builder.skipped_orders(), 1);
        assert!(builder.finish(generated_at()).is_none());
    }

    #[test]
    fn test_build_statistics() {
        let orders = vec![
            order("1", 5, complete(400.0, 100.0, Some(80.0), 200.0)),
            order("2", 1, complete(800.0, 150.0, None, 420.0)),
            order("3", 20, complete(600.0, 120.0, Some(130.0), 330.0)),
            order(
                "4",
                9,
                OrderSummary {
                    shipping: None,
                    ..complete(999.0, 1.0, None, 1.0)
                },
            ),
        ];

        let mut builder = StatisticsBuilder::new();
        builder.extend(&orders);
        assert_eq!(builder.complete_orders(), 3);
        assert_eq!(builder.skipped_orders(), 1);

        let stats = builder.finish(generated_at()).unwrap();
        assert_eq!(stats.meta.total_orders, 3);
        assert_eq!(
            stats.meta.date_range.earliest,
            NaiveDate::from_ymd_opt(2024, 3, 1).unwrap()
        );
        assert_eq!(
            stats.meta.date_range.latest,
            NaiveDate::from_ymd_opt(2024, 3, 20).unwrap()
        );

        assert_relative_eq!(stats.order_value.mean, 600.0);
        assert_relative_eq!(stats.order_value.std.unwrap(), 200.0);
        assert_eq!(stats.shipping.median, 120.0);
        assert_eq!(stats.shipping.percentile_25, Some(100.0));
        assert_eq!(stats.shipping.percentile_75, Some(150.0));
        // Customs only from orders that reported it.
        assert_relative_eq!(stats.customs.mean, 105.0);
        assert_relative_eq!(stats.hlf_percentage.mean, (50.0 + 52.5 + 55.0) / 3.0);
        assert_eq!(stats.vat_rate, DEFAULT_VAT_RATE);
        assert!(stats.validate().is_ok());
    }
}
