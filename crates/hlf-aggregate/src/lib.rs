//! Historical order aggregation for hlf.
//!
//! This crate turns past orders into the statistics the estimator runs on:
//!
//! - [`Sample`] - Summary statistics over a list of observations
//! - [`StatisticsBuilder`] - Streaming order-to-[`FeeStatistics`](hlf_types::FeeStatistics) aggregator

#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/hlf/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod builder;
mod sample;

pub use builder::{DEFAULT_VAT_RATE, StatisticsBuilder};
pub use sample::Sample;
