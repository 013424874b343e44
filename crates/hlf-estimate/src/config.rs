//! Estimator configuration.

use hlf_types::{CalculationMethod, Confidence, ConfigError, OrderMode, Result};
use serde::{Deserialize, Serialize};

/// CIF value in EUR below which imports are exempt from customs.
///
/// Calibrated against purchase history rather than taken from regulation:
/// whether the rule applies to CIF or to the price alone, and whether it is
/// €75 or $75, is not settled.
pub const CUSTOMS_EXEMPTION_THRESHOLD_EUR: f64 = 75.0;

/// VAT rate used when statistics failed to load.
pub const FALLBACK_VAT_RATE: f64 = 0.18;

/// An inclusive price band mapped to a confidence level.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ConfidenceBand {
    /// Confidence assigned to prices inside the band.
    pub confidence: Confidence,
    /// Lower bound (inclusive).
    pub min: f64,
    /// Upper bound (inclusive).
    pub max: f64,
}

impl ConfidenceBand {
    /// Creates a band.
    #[must_use]
    pub const fn new(confidence: Confidence, min: f64, max: f64) -> Self {
        Self {
            confidence,
            min,
            max,
        }
    }

    /// Returns true if the price falls inside the band.
    #[must_use]
    pub fn contains(&self, price: f64) -> bool {
        price >= self.min && price <= self.max
    }
}

/// Ordered confidence band table. The first matching band wins; prices
/// matching no band are [`Confidence::Low`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ConfidenceBands(Vec<ConfidenceBand>);

impl ConfidenceBands {
    /// Creates a table evaluated in the given order.
    #[must_use]
    pub const fn new(bands: Vec<ConfidenceBand>) -> Self {
        Self(bands)
    }

    /// Rates a price against the table.
    #[must_use]
    pub fn classify(&self, price: f64) -> Confidence {
        self.0
            .iter()
            .find(|band| band.contains(price))
            .map_or(Confidence::Low, |band| band.confidence)
    }

    /// Returns the bands in evaluation order.
    #[must_use]
    pub fn bands(&self) -> &[ConfidenceBand] {
        &self.0
    }
}

impl Default for ConfidenceBands {
    fn default() -> Self {
        Self(vec![
            ConfidenceBand::new(Confidence::High, 200.0, 600.0),
            ConfidenceBand::new(Confidence::Medium, 100.0, 1000.0),
        ])
    }
}

/// Shipping multiplier for items heavier than a threshold.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WeightTier {
    /// Applies to weights strictly above this (kg).
    pub above_kg: f64,
    /// Shipping multiplier.
    pub multiplier: f64,
}

impl WeightTier {
    /// Creates a tier.
    #[must_use]
    pub const fn new(above_kg: f64, multiplier: f64) -> Self {
        Self {
            above_kg,
            multiplier,
        }
    }
}

/// Weight tiers, kept sorted heaviest first.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "Vec<WeightTier>", into = "Vec<WeightTier>")]
pub struct WeightTiers(Vec<WeightTier>);

impl WeightTiers {
    /// Creates a tier table from tiers in any order.
    #[must_use]
    pub fn new(mut tiers: Vec<WeightTier>) -> Self {
        tiers.sort_by(|a, b| b.above_kg.total_cmp(&a.above_kg));
        Self(tiers)
    }

    /// Multiplier for the given weight: the heaviest tier the weight exceeds, else 1.0.
    #[must_use]
    pub fn multiplier(&self, weight_kg: f64) -> f64 {
        self.0
            .iter()
            .find(|tier| weight_kg > tier.above_kg)
            .map_or(1.0, |tier| tier.multiplier)
    }

    /// Returns the tiers, heaviest first.
    #[must_use]
    pub fn tiers(&self) -> &[WeightTier] {
        &self.0
    }
}

impl Default for WeightTiers {
    fn default() -> Self {
        Self::new(vec![
            WeightTier::new(20.0, 1.8), // very heavy
            WeightTier::new(10.0, 1.5),
            WeightTier::new(5.0, 1.2),
        ])
    }
}

impl From<Vec<WeightTier>> for WeightTiers {
    fn from(tiers: Vec<WeightTier>) -> Self {
        Self::new(tiers)
    }
}

impl From<WeightTiers> for Vec<WeightTier> {
    fn from(tiers: WeightTiers) -> Self {
        tiers.0
    }
}

/// Tunable thresholds for the estimation pipeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EstimatorConfig {
    /// CIF value below which customs are zero.
    pub customs_exemption_threshold: f64,
    /// Price bands for confidence rating.
    pub confidence_bands: ConfidenceBands,
    /// Weight-based shipping multipliers.
    pub weight_tiers: WeightTiers,
    /// VAT rate used only when statistics are unavailable.
    pub fallback_vat_rate: f64,
}

impl Default for EstimatorConfig {
    fn default() -> Self {
        Self {
            customs_exemption_threshold: CUSTOMS_EXEMPTION_THRESHOLD_EUR,
            confidence_bands: ConfidenceBands::default(),
            weight_tiers: WeightTiers::default(),
            fallback_vat_rate: FALLBACK_VAT_RATE,
        }
    }
}

impl EstimatorConfig {
    /// Parses and validates a configuration from JSON. Missing fields take
    /// their defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON is invalid or a value is out of range.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Checks the fallback VAT rate, the exemption threshold, every band and
    /// every weight tier.
    ///
    /// # Errors
    ///
    /// Returns the first out-of-range value.
    pub fn validate(&self) -> std::result::Result<(), ConfigError> {
        if !(self.fallback_vat_rate > 0.0 && self.fallback_vat_rate <= 1.0) {
            return Err(ConfigError::new(
                "fallback_vat_rate",
                format!("must be in (0, 1], got {}", self.fallback_vat_rate),
            ));
        }
        if !(self.customs_exemption_threshold.is_finite() && self.customs_exemption_threshold >= 0.0)
        {
            return Err(ConfigError::new(
                "customs_exemption_threshold",
                format!("must be non-negative, got {}", self.customs_exemption_threshold),
            ));
        }
        for (i, band) in self.confidence_bands.bands().iter().enumerate() {
            if band.min.is_nan() || band.max.is_nan() || band.min > band.max {
                return Err(ConfigError::new(
                    format!("confidence_bands[{i}]"),
                    format!("min {} exceeds max {}", band.min, band.max),
                ));
            }
        }
        for (i, tier) in self.weight_tiers.tiers().iter().enumerate() {
            if !(tier.above_kg.is_finite() && tier.multiplier.is_finite() && tier.multiplier > 0.0)
            {
                return Err(ConfigError::new(
                    format!("weight_tiers[{i}]"),
                    format!("multiplier must be positive, got {}", tier.multiplier),
                ));
            }
        }
        Ok(())
    }

    /// Sets the customs exemption threshold.
    #[must_use]
    pub const fn with_exemption_threshold(mut self, threshold: f64) -> Self {
        self.customs_exemption_threshold = threshold;
        self
    }

    /// Sets the confidence band table.
    #[must_use]
    pub fn with_confidence_bands(mut self, bands: ConfidenceBands) -> Self {
        self.confidence_bands = bands;
        self
    }

    /// Sets the weight tier table.
    #[must_use]
    pub fn with_weight_tiers(mut self, tiers: WeightTiers) -> Self {
        self.weight_tiers = tiers;
        self
    }
}

/// Which currencies to show a result in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum CurrencyDisplay {
    /// EUR and ILS.
    #[default]
    Both,
    /// ILS only.
    Ils,
    /// EUR only.
    Eur,
}

impl CurrencyDisplay {
    /// Returns true if EUR amounts should be shown.
    #[must_use]
    pub const fn shows_eur(&self) -> bool {
        matches!(self, Self::Both | Self::Eur)
    }

    /// Returns true if ILS amounts should be shown.
    #[must_use]
    pub const fn shows_ils(&self) -> bool {
        matches!(self, Self::Both | Self::Ils)
    }
}

/// User-facing defaults for a calculation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(default, rename_all = "camelCase")]
pub struct Settings {
    /// Currencies to display.
    pub currency_display: CurrencyDisplay,
    /// Calculation method, conservative unless overridden.
    pub calculation_method: CalculationMethod,
    /// Order mode, bulk unless overridden since most orders hold several items.
    pub order_mode: OrderMode,
}

#[cfg(test)]
mod tests {
    use super::*;
    use hlf_types::HlfError;

    #[test]
    fn test_default_bands() {
        let bands = ConfidenceBands::default();
        assert_eq!(bands.classify(400.0), Confidence::High);
        assert_eq!(bands.classify(150.0), Confidence::Medium);
        assert_eq!(bands.classify(5000.0), Confidence::Low);
        assert_eq!(bands.classify(50.0), Confidence::Low);
    }

    #[test]
    fn test_band_boundaries_inclusive() {
        let bands = ConfidenceBands::default();
        assert_eq!(bands.classify(200.0), Confidence::High);
        assert_eq!(bands.classify(600.0), Confidence::High);
        assert_eq!(bands.classify(100.0), Confidence::Medium);
        assert_eq!(bands.classify(1000.0), Confidence::Medium);
        assert_eq!(bands.classify(1000.01), Confidence::Low);
    }

    #[test]
    fn test_weight_tiers() {
        let tiers = WeightTiers::default();
        assert_eq!(tiers.multiplier(25.0), 1.8);
        assert_eq!(tiers.multiplier(20.0), 1.5);
        assert_eq!(tiers.multiplier(12.0), 1.5);
        assert_eq!(tiers.multiplier(8.0), 1.2);
        assert_eq!(tiers.multiplier(5.0), 1.0);
        assert_eq!(tiers.multiplier(3.0), 1.0);
    }

    #[test]
    fn test_weight_tiers_sorted_on_construction() {
        let tiers = WeightTiers::new(vec![WeightTier::new(5.0, 1.2), WeightTier::new(20.0, 1.8)]);
        assert_eq!(tiers.tiers()[0].above_kg, 20.0);
        assert_eq!(tiers.multiplier(30.0), 1.8);
    }

    #[test]
    fn test_config_from_partial_json() {
        let config = EstimatorConfig::from_json(r#"{"customs_exemption_threshold": 68.0}"#).unwrap();
        assert_eq!(config.customs_exemption_threshold, 68.0);
        assert_eq!(config.weight_tiers, WeightTiers::default());
        assert_eq!(config.fallback_vat_rate, FALLBACK_VAT_RATE);
    }

    #[test]
    fn test_default_config_is_valid() {
        assert!(EstimatorConfig::default().validate().is_ok());
    }

    #[test]
    fn test_out_of_range_config_rejected() {
        let field = |json: &str| match EstimatorConfig::from_json(json) {
            Err(HlfError::Config(err)) => err.field,
            other => panic!("expected config error, got {other:?}"),
        };
        assert_eq!(field(r#"{"fallback_vat_rate": 5.0}"#), "fallback_vat_rate");
        assert_eq!(field(r#"{"fallback_vat_rate": 0.0}"#), "fallback_vat_rate");
        assert_eq!(
            field(r#"{"customs_exemption_threshold": -10.0}"#),
            "customs_exemption_threshold"
        );
        assert_eq!(
            field(r#"{"confidence_bands": [{"confidence": "high", "min": 600.0, "max": 200.0}]}"#),
            "confidence_bands[0]"
        );
        assert_eq!(
            field(r#"{"weight_tiers": [{"above_kg": 5.0, "multiplier": 0.0}]}"#),
            "weight_tiers[0]"
        );
        assert!(matches!(
            EstimatorConfig::from_json("{ nope"),
            Err(HlfError::Json(_))
        ));
    }

    #[test]
    fn test_weight_tiers_json_unsorted() {
        let config = EstimatorConfig::from_json(
            r#"{"weight_tiers": [{"above_kg": 2.0, "multiplier": 1.1}, {"above_kg": 30.0, "multiplier": 2.5}]}"#,
        )
        .unwrap();
        assert_eq!(config.weight_tiers.multiplier(31.0), 2.5);
        assert_eq!(config.weight_tiers.multiplier(3.0), 1.1);
    }

    #[test]
    fn test_settings_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.calculation_method, CalculationMethod::Conservative);
        assert_eq!(settings.order_mode, OrderMode::Bulk);
        assert!(settings.currency_display.shows_eur());
        assert!(settings.currency_display.shows_ils());
    }
}
