//! Shipping cost estimation.
//!
//! Shipping for one item is derived in three steps:
//!
//! 1. A base value is picked from the historical shipping statistic by
//!    [`CalculationMethod`].
//! 2. The base is allocated by [`OrderMode`]. In bulk mode each item carries
//!    `price / order_value.mean` of it, so allocations across a typical order
//!    sum to roughly one shipping charge.
//! 3. A weight multiplier is applied when the weight is known.
//!
//! Confidence depends only on the product price, never on the estimate.

use hlf_types::{
    CalculationMethod, Confidence, FeeEstimate, FeeRange, FeeStatistics, OrderMode, ProductData,
};

use crate::config::{ConfidenceBands, EstimatorConfig, WeightTiers};

/// Shipping estimator.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ShippingEstimator {
    confidence_bands: ConfidenceBands,
    weight_tiers: WeightTiers,
}

impl ShippingEstimator {
    /// Creates an estimator with the given band and tier tables.
    #[must_use]
    pub const fn new(confidence_bands: ConfidenceBands, weight_tiers: WeightTiers) -> Self {
        Self {
            confidence_bands,
            weight_tiers,
        }
    }

    /// Creates an estimator from a configuration.
    #[must_use]
    pub fn from_config(config: &EstimatorConfig) -> Self {
        Self::new(config.confidence_bands.clone(), config.weight_tiers.clone())
    }

    /// Estimates shipping for a product.
    #[must_use]
    pub fn estimate(
        &self,
        product: &ProductData,
        stats: &FeeStatistics,
        method: CalculationMethod,
        order_mode: OrderMode,
    ) -> FeeEstimate {
        let base = Self::base_shipping(stats, method);
        let allocated = Self::allocate(base, product.price(), stats, order_mode);
        let estimated = allocated * self.weight_multiplier(product.weight());

        FeeEstimate::new(estimated, self.confidence(product.price()))
            .with_range(Self::historical_range(stats))
    }

    /// Base shipping value for a method.
    ///
    /// Conservative uses the 75th percentile, optimistic the 25th, both
    /// falling back to the median; average uses the mean.
    #[must_use]
    pub fn base_shipping(stats: &FeeStatistics, method: CalculationMethod) -> f64 {
        let shipping = &stats.shipping;
        match method {
            CalculationMethod::Conservative => shipping.p75_or_median(),
            CalculationMethod::Average => shipping.mean,
            CalculationMethod::Optimistic => shipping.p25_or_median(),
        }
    }

    /// Allocates a base shipping value to one item.
    #[must_use]
    pub fn allocate(base: f64, price: f64, stats: &FeeStatistics, order_mode: OrderMode) -> f64 {
        match order_mode {
            OrderMode::Single => base,
            OrderMode::Bulk => (price / stats.order_value.mean) * base,
        }
    }

    /// Weight multiplier, 1.0 when the weight is unknown.
    #[must_use]
    pub fn weight_multiplier(&self, weight_kg: Option<f64>) -> f64 {
        weight_kg.map_or(1.0, |w| self.weight_tiers.multiplier(w))
    }

    /// Confidence for a product price.
    #[must_use]
    pub fn confidence(&self, price: f64) -> Confidence {
        self.confidence_bands.classify(price)
    }

    /// Observed shipping envelope: 25th percentile (or min) to 90th (or max).
    #[must_use]
    pub fn historical_range(stats: &FeeStatistics) -> FeeRange {
        FeeRange::new(stats.shipping.p25_or_min(), stats.shipping.p90_or_max())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::fixture_statistics;
    use approx::assert_relative_eq;
    use hlf_types::StatisticValues;

    fn product(price: f64) -> ProductData {
        ProductData::eur(price).unwrap()
    }

    #[test]
    fn test_base_by_method() {
        let stats = fixture_statistics();
        assert_eq!(
            ShippingEstimator::base_shipping(&stats, CalculationMethod::Conservative),
            150.0
        );
        assert_eq!(
            ShippingEstimator::base_shipping(&stats, CalculationMethod::Average),
            130.0
        );
        assert_eq!(
            ShippingEstimator::base_shipping(&stats, CalculationMethod::Optimistic),
            95.0
        );
    }

    #[test]
    fn test_base_falls_back_to_median() {
        let mut stats = fixture_statistics();
        stats.shipping = StatisticValues::new(130.0, 120.0, 60.0, 260.0);
        assert_eq!(
            ShippingEstimator::base_shipping(&stats, CalculationMethod::Conservative),
            120.0
        );
        assert_eq!(
            ShippingEstimator::base_shipping(&stats, CalculationMethod::Optimistic),
            120.0
        );
        let range = ShippingEstimator::historical_range(&stats);
        assert_eq!((range.min, range.max), (60.0, 260.0));
    }

    #[test]
    fn test_single_mode_uses_full_base() {
        let stats = fixture_statistics();
        let estimator = ShippingEstimator::default();
        for price in [20.0, 400.0, 5000.0] {
            let estimate = estimator.estimate(
                &product(price),
                &stats,
                CalculationMethod::Conservative,
                OrderMode::Single,
            );
            assert_eq!(estimate.estimated, 150.0);
        }
    }

    #[test]
    fn test_bulk_mode_is_proportional() {
        let stats = fixture_statistics();
        let estimator = ShippingEstimator::default();
        let estimate = estimator.estimate(
            &product(500.0),
            &stats,
            CalculationMethod::Conservative,
            OrderMode::Bulk,
        );
        assert_relative_eq!(estimate.estimated, 150.0 * 500.0 / 723.24, epsilon = 1e-9);
    }

    #[test]
    fn test_method_ordering() {
        let stats = fixture_statistics();
        let estimator = ShippingEstimator::default();
        for mode in [OrderMode::Single, OrderMode::Bulk] {
            let [conservative, average, optimistic] = [
                CalculationMethod::Conservative,
                CalculationMethod::Average,
                CalculationMethod::Optimistic,
            ]
            .map(|m| estimator.estimate(&product(350.0), &stats, m, mode).estimated);
            assert!(conservative >= average);
            assert!(average >= optimistic);
        }
    }

    #[test]
    fn test_weight_adjustment() {
        let stats = fixture_statistics();
        let estimator = ShippingEstimator::default();
        let run = |p: ProductData| {
            estimator
                .estimate(&p, &stats, CalculationMethod::Average, OrderMode::Bulk)
                .estimated
        };
        let unweighted = run(product(300.0));

        assert_eq!(run(product(300.0).with_weight(25.0).unwrap()), unweighted * 1.8);
        assert_eq!(run(product(300.0).with_weight(15.0).unwrap()), unweighted * 1.5);
        assert_eq!(run(product(300.0).with_weight(8.0).unwrap()), unweighted * 1.2);
        assert_eq!(run(product(300.0).with_weight(3.0).unwrap()), unweighted);
    }

    #[test]
    fn test_confidence_from_price_not_estimate() {
        let stats = fixture_statistics();
        let estimator = ShippingEstimator::default();
        let cases = [
            (400.0, Confidence::High),
            (150.0, Confidence::Medium),
            (5000.0, Confidence::Low),
            (200.0, Confidence::High),
            (600.0, Confidence::High),
            (100.0, Confidence::Medium),
            (1000.0, Confidence::Medium),
            (99.0, Confidence::Low),
        ];
        for (price, expected) in cases {
            for mode in [OrderMode::Single, OrderMode::Bulk] {
                let estimate =
                    estimator.estimate(&product(price), &stats, CalculationMethod::Average, mode);
                assert_eq!(estimate.confidence, expected, "price {price}");
            }
        }
    }

    #[test]
    fn test_range_independent_of_method_and_mode() {
        let stats = fixture_statistics();
        let estimator = ShippingEstimator::default();
        for method in CalculationMethod::all() {
            for mode in [OrderMode::Single, OrderMode::Bulk] {
                let estimate = estimator.estimate(&product(80.0), &stats, *method, mode);
                assert_eq!(estimate.range, Some(FeeRange::new(95.0, 210.0)));
            }
        }
    }
}
