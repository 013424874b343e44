//! Landed-cost estimation for goods shipped to Israel.
//!
//! This is a facade crate that re-exports functionality from the hlf
//! workspace crates for convenient access.
//!
//! # Quick Start
//!
//! ```ignore
//! use hlf_lib::prelude::*;
//!
//! fn main() -> Result<()> {
//!     let calculator = FeeCalculator::global();
//!     let quick = calculator.quick_estimate(250.0, 3.9, CalculationMethod::Average)?;
//!     println!("about {:.2} EUR landed", quick.total_eur);
//!     Ok(())
//! }
//! ```

#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/hlf/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

// Re-export core types
pub use hlf_types::*;

// Re-export estimation
#[cfg(feature = "estimate")]
pub use hlf_estimate::{
    AccuracyReport, Cart, CartBreakdown, CartCalculator, CartItem, ConfidenceBand,
    ConfidenceBands, CurrencyDisplay, CustomsEstimator, EstimatorConfig, FeeCalculator,
    ItemAccuracy, ItemAllocation, Settings, ShippingEstimator, StatisticsStore, WeightTier,
    WeightTiers,
};

// Re-export aggregation
#[cfg(feature = "aggregate")]
pub use hlf_aggregate::{Sample, StatisticsBuilder};

/// Prelude module for convenient imports.
///
/// ```
/// use hlf_lib::prelude::*;
/// ```
pub mod prelude {
    pub use hlf_types::{
        CalculationMethod, Confidence, Currency, FeeBreakdown, FeeEstimate, FeeStatistics,
        HlfError, OrderMode, ProductData, QuickEstimate, Result,
    };

    #[cfg(feature = "estimate")]
    pub use hlf_estimate::{
        Cart, CartCalculator, CartItem, EstimatorConfig, FeeCalculator, StatisticsStore,
    };

    #[cfg(feature = "aggregate")]
    pub use hlf_aggregate::StatisticsBuilder;
}
