//! Shared state for CLI commands, built from the global flags.

use std::path::Path;

use anyhow::{Context, Result};
use hlf_lib::prelude::*;
use hlf_lib::{CurrencyDisplay, Settings};
use serde::Deserialize;
use tracing::debug;

/// Contents of a `--config` file.
///
/// Estimator fields sit at the top level, so a plain estimator config is
/// accepted as is. User defaults go under `settings`.
#[derive(Debug, Clone, Default, Deserialize)]
pub(crate) struct ConfigFile {
    #[serde(flatten)]
    pub(crate) estimator: EstimatorConfig,
    #[serde(default)]
    pub(crate) settings: Settings,
}

impl ConfigFile {
    pub(crate) fn load(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config {}", path.display()))?;
        let config: Self = serde_json::from_str(&json)
            .with_context(|| format!("Invalid config {}", path.display()))?;
        config
            .estimator
            .validate()
            .with_context(|| format!("Invalid config {}", path.display()))?;
        Ok(config)
    }
}

/// Calculator, user defaults and output mode for one invocation.
#[derive(Debug)]
pub(crate) struct AppContext {
    pub(crate) calculator: FeeCalculator,
    pub(crate) settings: Settings,
    pub(crate) json: bool,
}

impl AppContext {
    /// Loads statistics and configuration.
    ///
    /// Fails if the statistics cannot be loaded, so commands never run
    /// against a dataset that is known to be unusable.
    pub(crate) fn load(stats: Option<&Path>, config: Option<&Path>, json: bool) -> Result<Self> {
        let config = config.map(ConfigFile::load).transpose()?.unwrap_or_default();

        let store = match stats {
            Some(path) => {
                debug!(path = %path.display(), "loading statistics");
                StatisticsStore::from_path(path)
            }
            None => StatisticsStore::bundled().clone(),
        };
        if let Some(err) = store.load_error() {
            return Err(err.clone()).context("Fee statistics unavailable");
        }

        Ok(Self {
            calculator: FeeCalculator::new(store, &config.estimator),
            settings: config.settings,
            json,
        })
    }

    /// Loaded statistics.
    pub(crate) fn statistics(&self) -> Result<&FeeStatistics> {
        Ok(self.calculator.store().statistics()?)
    }

    /// Explicit exchange rate, or the historical mean.
    pub(crate) fn exchange_rate(&self, rate: Option<f64>) -> Result<f64> {
        match rate {
            Some(rate) => Ok(rate),
            None => Ok(self.statistics()?.exchange_rate.mean),
        }
    }

    pub(crate) fn method(&self, method: Option<CalculationMethod>) -> CalculationMethod {
        method.unwrap_or(self.settings.calculation_method)
    }

    pub(crate) fn order_mode(&self, mode: Option<OrderMode>) -> OrderMode {
        mode.unwrap_or(self.settings.order_mode)
    }

    pub(crate) const fn currency_display(&self) -> CurrencyDisplay {
        self.settings.currency_display
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_plain_estimator_config_is_accepted() {
        let config: ConfigFile =
            serde_json::from_str(r#"{"customs_exemption_threshold": 68.0}"#).unwrap();
        assert_eq!(config.estimator.customs_exemption_threshold, 68.0);
        assert_eq!(config.settings, Settings::default());
    }

    #[test]
    fn test_settings_section() {
        let config: ConfigFile = serde_json::from_str(
            r#"{"settings": {"calculationMethod": "optimistic", "currencyDisplay": "ils"}}"#,
        )
        .unwrap();
        assert_eq!(config.settings.calculation_method, CalculationMethod::Optimistic);
        assert_eq!(config.settings.currency_display, CurrencyDisplay::Ils);
        assert_eq!(config.settings.order_mode, OrderMode::Bulk);
    }

    #[test]
    fn test_load_defaults_to_bundled() {
        let ctx = AppContext::load(None, None, false).unwrap();
        assert_eq!(ctx.statistics().unwrap().meta.total_orders, 17);
        assert_eq!(ctx.method(None), CalculationMethod::Conservative);
        assert_eq!(ctx.order_mode(Some(OrderMode::Single)), OrderMode::Single);
        assert_eq!(ctx.exchange_rate(Some(4.1)).unwrap(), 4.1);
    }

    #[test]
    fn test_load_fails_on_bad_statistics() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"{ broken").unwrap();
        assert!(AppContext::load(Some(file.path()), None, false).is_err());
    }

    #[test]
    fn test_out_of_range_config_file_rejected() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(br#"{"fallback_vat_rate": 5.0, "settings": {"orderMode": "single"}}"#)
            .unwrap();
        let err = ConfigFile::load(file.path()).unwrap_err();
        assert!(format!("{err:#}").contains("fallback_vat_rate"));
        assert!(AppContext::load(None, Some(file.path()), false).is_err());
    }
}
