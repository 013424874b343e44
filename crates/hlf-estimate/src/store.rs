//! Historical statistics store.

use std::path::Path;
use std::sync::OnceLock;

use hlf_types::{CalculationMethod, FeeStatistics, StatisticsError};
use tracing::{error, info, warn};

use crate::config::{EstimatorConfig, FALLBACK_VAT_RATE};
use crate::customs::CustomsEstimator;

/// Embedded JSON data with historical fee statistics.
const FEE_STATISTICS_JSON: &str = include_str!("../data/fee-statistics.json");

/// Static store built from the embedded dataset.
static BUNDLED: OnceLock<StatisticsStore> = OnceLock::new();

/// Read-only view of a validated statistics snapshot.
///
/// A store is populated once and never updated. If the dataset failed to
/// load, every statistics-dependent call reports the load failure; only
/// [`vat_rate`](Self::vat_rate) degrades to a fixed fallback.
#[derive(Debug, Clone)]
pub struct StatisticsStore {
    stats: Result<FeeStatistics, StatisticsError>,
    customs: CustomsEstimator,
    fallback_vat_rate: f64,
}

impl StatisticsStore {
    /// Creates a store from an in-memory snapshot.
    ///
    /// # Errors
    ///
    /// Returns an error if the statistics violate an invariant.
    pub fn new(stats: FeeStatistics) -> Result<Self, StatisticsError> {
        stats.validate()?;
        Ok(Self::from_result(Ok(stats)))
    }

    /// Creates a store whose statistics are unavailable for the given reason.
    #[must_use]
    pub fn unavailable(reason: StatisticsError) -> Self {
        Self::from_result(Err(reason))
    }

    /// Loads a store from JSON.
    ///
    /// Parse or validation failures are captured rather than returned, so the
    /// store can still answer [`vat_rate`](Self::vat_rate).
    #[must_use]
    pub fn from_json(json: &str) -> Self {
        Self::from_result(FeeStatistics::from_json(json))
    }

    /// Loads a store from a JSON file. Read failures are captured like parse failures.
    #[must_use]
    pub fn from_path(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        match std::fs::read_to_string(path) {
            Ok(json) => Self::from_json(&json),
            Err(e) => Self::unavailable(StatisticsError::Read {
                path: path.display().to_string(),
                reason: e.to_string(),
            }),
        }
    }

    /// Returns the store built from the embedded dataset.
    ///
    /// This lazily initializes the store on first access.
    #[must_use]
    pub fn bundled() -> &'static Self {
        BUNDLED.get_or_init(|| Self::from_json(FEE_STATISTICS_JSON))
    }

    fn from_result(stats: Result<FeeStatistics, StatisticsError>) -> Self {
        match &stats {
            Ok(s) => info!(
                orders = s.meta.total_orders,
                date_range = %s.meta.date_range,
                "fee statistics loaded"
            ),
            Err(e) => error!(error = %e, "failed to load fee statistics"),
        }
        Self {
            stats,
            customs: CustomsEstimator::default(),
            fallback_vat_rate: FALLBACK_VAT_RATE,
        }
    }

    /// Applies the exemption threshold and fallback VAT rate from a config.
    #[must_use]
    pub const fn with_config(mut self, config: &EstimatorConfig) -> Self {
        self.customs = CustomsEstimator::new(config.customs_exemption_threshold);
        self.fallback_vat_rate = config.fallback_vat_rate;
        self
    }

    /// Sets the customs exemption threshold.
    #[must_use]
    pub const fn with_exemption_threshold(mut self, threshold: f64) -> Self {
        self.customs = CustomsEstimator::new(threshold);
        self
    }

    /// Returns the statistics snapshot.
    ///
    /// # Errors
    ///
    /// Returns the load failure if the dataset could not be loaded. This is
    /// fatal for estimation and is never replaced by defaults.
    pub fn statistics(&self) -> Result<&FeeStatistics, StatisticsError> {
        self.stats.as_ref().map_err(Clone::clone)
    }

    /// Returns true if statistics loaded successfully.
    #[must_use]
    pub const fn is_available(&self) -> bool {
        self.stats.is_ok()
    }

    /// Returns the load failure, if any.
    #[must_use]
    pub fn load_error(&self) -> Option<&StatisticsError> {
        self.stats.as_ref().err()
    }

    /// VAT rate from the statistics, or the fallback rate if they failed to load.
    #[must_use]
    pub fn vat_rate(&self) -> f64 {
        match &self.stats {
            Ok(stats) => stats.vat_rate,
            Err(_) => {
                warn!(rate = self.fallback_vat_rate, "statistics unavailable, using fallback VAT rate");
                self.fallback_vat_rate
            }
        }
    }

    /// Returns the customs rule applied by [`customs_estimate`](Self::customs_estimate).
    #[must_use]
    pub const fn customs(&self) -> &CustomsEstimator {
        &self.customs
    }

    /// Estimates customs for a CIF value (price + shipping).
    ///
    /// # Errors
    ///
    /// Returns the load failure if statistics are unavailable.
    pub fn customs_estimate(&self, cif_value: f64) -> Result<f64, StatisticsError> {
        let stats = self.statistics()?;
        Ok(self.customs.estimate(cif_value, stats))
    }

    /// Historical total surcharge as a fraction of price, selected by method.
    ///
    /// Conservative uses the 75th percentile (median if absent), average the
    /// mean, optimistic the median.
    ///
    /// # Errors
    ///
    /// Returns the load failure if statistics are unavailable.
    pub fn hlf_percentage_estimate(
        &self,
        method: CalculationMethod,
    ) -> Result<f64, StatisticsError> {
        let pct = &self.statistics()?.hlf_percentage;
        let value = match method {
            CalculationMethod::Conservative => pct.p75_or_median(),
            CalculationMethod::Average => pct.mean,
            CalculationMethod::Optimistic => pct.median,
        };
        Ok(value / 100.0)
    }
}

impl Default for StatisticsStore {
    fn default() -> Self {
        Self::bundled().clone()
    }
}
