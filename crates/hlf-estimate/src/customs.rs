//! Customs duty estimation.

use hlf_types::FeeStatistics;

use crate::config::CUSTOMS_EXEMPTION_THRESHOLD_EUR;

/// Estimates customs from a CIF value.
///
/// Below the exemption threshold customs are zero. Above it, customs scale
/// linearly with CIF at the historical customs-to-order-value ratio.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CustomsEstimator {
    exemption_threshold: f64,
}

impl CustomsEstimator {
    /// Creates an estimator with the given exemption threshold.
    #[must_use]
    pub const fn new(exemption_threshold: f64) -> Self {
        Self {
            exemption_threshold,
        }
    }

    /// Returns the exemption threshold.
    #[must_use]
    pub const fn exemption_threshold(&self) -> f64 {
        self.exemption_threshold
    }

    /// Returns true if the CIF value is below the exemption threshold.
    #[must_use]
    pub fn is_exempt(&self, cif_value: f64) -> bool {
        cif_value < self.exemption_threshold
    }

    /// Estimates customs for a CIF value.
    ///
    /// Returns zero when exempt or when the historical order value mean is zero.
    #[must_use]
    pub fn estimate(&self, cif_value: f64, stats: &FeeStatistics) -> f64 {
        if self.is_exempt(cif_value) {
            return 0.0;
        }

        let avg_order_value = stats.order_value.mean;
        if avg_order_value == 0.0 {
            return 0.0;
        }

        (cif_value / avg_order_value) * stats.customs.mean
    }
}

impl Default for CustomsEstimator {
    fn default() -> Self {
        Self::new(CUSTOMS_EXEMPTION_THRESHOLD_EUR)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::fixture_statistics;
    use approx::assert_relative_eq;
    use hlf_types::StatisticValues;

    #[test]
    fn test_below_threshold_is_exempt() {
        let stats = fixture_statistics();
        let customs = CustomsEstimator::default();
        for cif in [0.0, 10.0, 74.99] {
            assert_eq!(customs.estimate(cif, &stats), 0.0);
        }
    }

    #[test]
    fn test_at_threshold_is_charged() {
        let stats = fixture_statistics();
        let customs = CustomsEstimator::default();
        let at = customs.estimate(75.0, &stats);
        assert!(at > 0.0);
        assert_relative_eq!(at, (75.0 / 723.24) * 153.15);
    }

    #[test]
    fn test_scales_linearly_with_cif() {
        let stats = fixture_statistics();
        let customs = CustomsEstimator::default();
        let single = customs.estimate(300.0, &stats);
        let double = customs.estimate(600.0, &stats);
        assert_relative_eq!(double, 2.0 * single, epsilon = 1e-9);
    }

    #[test]
    fn test_zero_order_value_mean() {
        let mut stats = fixture_statistics();
        stats.order_value = StatisticValues::default();
        assert_eq!(CustomsEstimator::default().estimate(500.0, &stats), 0.0);
    }

    #[test]
    fn test_custom_threshold() {
        let stats = fixture_statistics();
        let customs = CustomsEstimator::new(68.0);
        assert!(!customs.is_exempt(70.0));
        assert!(customs.estimate(70.0, &stats) > 0.0);
    }
}
