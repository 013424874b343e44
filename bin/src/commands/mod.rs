//! CLI command implementations.

pub(crate) mod build_stats;
pub(crate) mod calculate;
pub(crate) mod cart;
pub(crate) mod quick;
pub(crate) mod stats;
pub(crate) mod validate;
