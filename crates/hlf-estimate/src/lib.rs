//! Landed-cost estimation for goods shipped to Israel.
//!
//! This crate estimates shipping, customs and VAT for a product from a
//! snapshot of historical order statistics:
//!
//! - [`StatisticsStore`] - Validated, read-only statistics and the customs rule
//! - [`ShippingEstimator`] - Method- and mode-aware shipping estimate
//! - [`CustomsEstimator`] - CIF-proportional customs with an exemption threshold
//! - [`FeeCalculator`] - Full [`FeeBreakdown`](hlf_types::FeeBreakdown) and quick estimates
//! - [`CartCalculator`] - Allocation of a known shipping cost over a cart
//! - [`AccuracyReport`] - Estimates compared with fees actually paid
//! - [`EstimatorConfig`] - Thresholds, confidence bands and weight tiers

#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/hlf/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod accuracy;
mod calculator;
mod cart;
mod config;
mod customs;
mod shipping;
mod store;

#[cfg(test)]
mod test_support;

pub use accuracy::{AccuracyReport, ItemAccuracy};
pub use calculator::FeeCalculator;
pub use cart::{Cart, CartBreakdown, CartCalculator, CartItem, ItemAllocation};
pub use config::{
    CUSTOMS_EXEMPTION_THRESHOLD_EUR, ConfidenceBand, ConfidenceBands, CurrencyDisplay,
    EstimatorConfig, FALLBACK_VAT_RATE, Settings, WeightTier, WeightTiers,
};
pub use customs::CustomsEstimator;
pub use shipping::ShippingEstimator;
pub use store::StatisticsStore;
