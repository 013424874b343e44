//! Landed-cost calculation.

use std::sync::OnceLock;

use chrono::Utc;
use hlf_types::{
    CalculationError, CalculationMethod, Currency, FeeBreakdown, FeeEstimate, HlfError, OrderMode,
    ProductData, QuickEstimate, Result,
};
use tracing::{debug, error, info};

use crate::cart::CartCalculator;
use crate::config::EstimatorConfig;
use crate::shipping::ShippingEstimator;
use crate::store::StatisticsStore;

/// Static calculator over the bundled statistics.
static CALCULATOR: OnceLock<FeeCalculator> = OnceLock::new();

/// Composes shipping, customs and VAT into a landed-cost breakdown.
///
/// Holds no mutable state; a calculator can be shared across threads and
/// called concurrently.
#[derive(Debug, Clone)]
pub struct FeeCalculator {
    store: StatisticsStore,
    shipping: ShippingEstimator,
}

impl FeeCalculator {
    /// Creates a calculator over a store with the given configuration.
    #[must_use]
    pub fn new(store: StatisticsStore, config: &EstimatorConfig) -> Self {
        Self {
            store: store.with_config(config),
            shipping: ShippingEstimator::from_config(config),
        }
    }

    /// Creates a calculator over a store with the default configuration.
    #[must_use]
    pub fn with_store(store: StatisticsStore) -> Self {
        Self::new(store, &EstimatorConfig::default())
    }

    /// Returns the global calculator over the bundled statistics.
    #[must_use]
    pub fn global() -> &'static Self {
        CALCULATOR.get_or_init(|| Self::with_store(StatisticsStore::bundled().clone()))
    }

    /// Returns the statistics store.
    #[must_use]
    pub const fn store(&self) -> &StatisticsStore {
        &self.store
    }

    /// Returns the shipping estimator.
    #[must_use]
    pub const fn shipping_estimator(&self) -> &ShippingEstimator {
        &self.shipping
    }

    /// Returns a calculator for checkout carts with known shipping.
    #[must_use]
    pub const fn cart(&self) -> CartCalculator<'_> {
        CartCalculator::new(&self.store)
    }

    /// Calculates the full breakdown for a product.
    ///
    /// Customs are assessed on a preliminary CIF (price + shipping); VAT is
    /// levied on the final CIF (price + shipping + customs).
    ///
    /// # Errors
    ///
    /// Returns [`HlfError::CalculationFailed`] carrying the cause if
    /// statistics are unavailable, the exchange rate is invalid, or any
    /// component is not finite. No partial breakdown is returned.
    pub fn calculate(
        &self,
        product: &ProductData,
        exchange_rate: f64,
        method: CalculationMethod,
        order_mode: OrderMode,
    ) -> Result<FeeBreakdown> {
        debug!(
            price = product.price(),
            weight = ?product.weight(),
            exchange_rate,
            %method,
            %order_mode,
            "calculating fees"
        );

        match self.compose(product, exchange_rate, method, order_mode) {
            Ok(breakdown) => {
                info!(
                    original_price = breakdown.original_price,
                    total = breakdown.total,
                    total_ils = breakdown.total_ils,
                    confidence = %breakdown.shipping.confidence,
                    "fee calculation complete"
                );
                Ok(breakdown)
            }
            Err(cause) => {
                error!(error = %cause, url = product.url(), "fee calculation failed");
                Err(HlfError::CalculationFailed(cause))
            }
        }
    }

    fn compose(
        &self,
        product: &ProductData,
        exchange_rate: f64,
        method: CalculationMethod,
        order_mode: OrderMode,
    ) -> std::result::Result<FeeBreakdown, CalculationError> {
        if product.currency() != Currency::Eur {
            return Err(CalculationError::UnsupportedCurrency(product.currency()));
        }
        let price = product.price();
        check_price(price)?;
        check_exchange_rate(exchange_rate)?;

        let stats = self.store.statistics()?;

        let shipping = self.shipping.estimate(product, stats, method, order_mode);
        ensure_finite("shipping", shipping.estimated)?;

        let preliminary_cif = price + shipping.estimated;
        let customs = FeeEstimate::new(
            self.store.customs().estimate(preliminary_cif, stats),
            shipping.confidence,
        );
        ensure_finite("customs", customs.estimated)?;

        let cif_value = price + shipping.estimated + customs.estimated;
        let vat = cif_value * stats.vat_rate;
        let total = cif_value + vat;
        let total_ils = total * exchange_rate;
        ensure_finite("total", total_ils)?;

        Ok(FeeBreakdown {
            original_price: price,
            shipping,
            customs,
            vat,
            total,
            total_ils,
            exchange_rate,
            calculated_at: Utc::now(),
        })
    }

    /// Coarse estimate from the historical surcharge percentage alone.
    ///
    /// This is a separate model from [`calculate`](Self::calculate): it
    /// applies one blended percentage instead of itemised shipping, customs
    /// and VAT, and the two generally give different totals.
    ///
    /// # Errors
    ///
    /// Returns [`HlfError::CalculationFailed`] if statistics are unavailable
    /// or the price or exchange rate is invalid.
    pub fn quick_estimate(
        &self,
        price: f64,
        exchange_rate: f64,
        method: CalculationMethod,
    ) -> Result<QuickEstimate> {
        let estimate = || -> std::result::Result<QuickEstimate, CalculationError> {
            check_price(price)?;
            check_exchange_rate(exchange_rate)?;
            let hlf_fraction = self.store.hlf_percentage_estimate(method)?;
            let total_eur = price * (1.0 + hlf_fraction);
            Ok(QuickEstimate {
                total_eur,
                total_ils: total_eur * exchange_rate,
                hlf_percentage: hlf_fraction * 100.0,
                method,
            })
        };

        estimate().map_err(|cause| {
            error!(error = %cause, price, "quick estimate failed");
            HlfError::CalculationFailed(cause)
        })
    }

    /// Formats an amount with its currency symbol and thousands separators
    /// (e.g., "€1,234.56").
    #[must_use]
    pub fn format_money(amount: f64, currency: Currency) -> String {
        let sign = if amount < 0.0 { "-" } else { "" };
        let scaled = (amount.abs() * 100.0).round();
        // Past u64 cents the cast saturates; print the raw value instead.
        if !scaled.is_finite() || scaled >= u64::MAX as f64 {
            return format!("{sign}{}{}", currency.symbol(), amount.abs());
        }
        let cents = scaled as u64;
        let whole = (cents / 100).to_string();
        let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
        for (i, ch) in whole.chars().enumerate() {
            if i > 0 && (whole.len() - i) % 3 == 0 {
                grouped.push(',');
            }
            grouped.push(ch);
        }
        format!("{sign}{}{grouped}.{:02}", currency.symbol(), cents % 100)
    }

    /// Formats a percentage with one decimal (e.g., "18.0%").
    #[must_use]
    pub fn format_percent(value: f64) -> String {
        format!("{value:.1}%")
    }

    /// Formats a breakdown as a human-readable summary.
    #[must_use]
    pub fn format_breakdown(breakdown: &FeeBreakdown, vat_rate: f64) -> String {
        let eur = |v| Self::format_money(v, Currency::Eur);
        let range = breakdown.shipping.range.map_or_else(String::new, |r| {
            format!(" (historical {} - {})", eur(r.min), eur(r.max))
        });
        format!(
            "Price:    {}\n\
             Shipping: {}{}\n\
             Customs:  {}\n\
             VAT:      {} ({})\n\
             Total:    {} / {} (+{})\n\
             Confidence: {}",
            eur(breakdown.original_price),
            eur(breakdown.shipping.estimated),
            range,
            eur(breakdown.customs.estimated),
            eur(breakdown.vat),
            Self::format_percent(vat_rate * 100.0),
            eur(breakdown.total),
            Self::format_money(breakdown.total_ils, Currency::Ils),
            Self::format_percent(breakdown.surcharge_percentage()),
            breakdown.confidence(),
        )
    }
}

impl Default for FeeCalculator {
    fn default() -> Self {
        Self::global().clone()
    }
}

pub(crate) fn check_price(price: f64) -> std::result::Result<(), CalculationError> {
    if price.is_finite() && price > 0.0 {
        Ok(())
    } else {
        Err(CalculationError::InvalidPrice(price))
    }
}

pub(crate) fn check_exchange_rate(rate: f64) -> std::result::Result<(), CalculationError> {
    if rate.is_finite() && rate > 0.0 {
        Ok(())
    } else {
        Err(CalculationError::InvalidExchangeRate(rate))
    }
}

pub(crate) fn ensure_finite(
    component: &'static str,
    value: f64,
) -> std::result::Result<(), CalculationError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(CalculationError::NonFinite { component, value })
    }
}
