//! Core types for the Holy Land Fee landed-cost estimator.
//!
//! This crate provides the fundamental data structures used throughout hlf:
//!
//! - [`FeeStatistics`] - Historical aggregate statistics used as the estimation model
//! - [`StatisticValues`] - Mean, median, bounds and percentiles of one quantity
//! - [`ProductData`] - Product price, currency and optional weight
//! - [`FeeEstimate`] / [`FeeBreakdown`] - Estimation results
//! - [`CalculationMethod`] / [`OrderMode`] - Estimation policies
//! - [`HistoricalOrder`] - Past orders the statistics are computed from

#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/hlf/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod date_range;
mod error;
mod fee;
mod method;
mod order;
mod product;
mod statistics;

pub use date_range::DateRange;
pub use error::{
    CalculationError, ConfigError, DateRangeError, HlfError, ParseError, ProductError, Result,
    StatisticsError,
};
pub use fee::{Confidence, FeeBreakdown, FeeEstimate, FeeRange, QuickEstimate};
pub use method::{CalculationMethod, OrderMode};
pub use order::{HistoricalOrder, ItemObservation, OrderItem, OrderSummary, parse_sheet_date};
pub use product::{Currency, ProductData};
pub use statistics::{FeeStatistics, StatisticValues, StatisticsMeta};
