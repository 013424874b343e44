//! Build-stats command implementation.
//!
//! Aggregates a JSON list of historical orders into the statistics dataset
//! the estimator loads with `--stats`.

use anyhow::{Context, Result, bail};
use hlf_lib::HistoricalOrder;
use hlf_lib::prelude::*;
use std::path::Path;
use tracing::info;

/// Build fee statistics from historical orders.
pub(crate) fn build_stats(
    orders_path: &Path,
    output: Option<&Path>,
    vat_rate: f64,
    json: bool,
) -> Result<()> {
    let data = std::fs::read_to_string(orders_path)
        .with_context(|| format!("Failed to read {}", orders_path.display()))?;
    let orders: Vec<HistoricalOrder> = serde_json::from_str(&data)
        .with_context(|| format!("Invalid orders in {}", orders_path.display()))?;

    let mut builder = StatisticsBuilder::with_vat_rate(vat_rate);
    builder.extend(&orders);
    let complete = builder.complete_orders();
    let skipped = builder.skipped_orders();

    let Some(stats) = builder.finish(chrono::Local::now().naive_local()) else {
        bail!(
            "No complete orders in {} ({} skipped)",
            orders_path.display(),
            skipped
        );
    };
    stats
        .validate()
        .context("Aggregated statistics are inconsistent")?;

    let rendered = serde_json::to_string_pretty(&stats)?;
    match output {
        Some(path) => {
            std::fs::write(path, rendered)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            info!(path = %path.display(), complete, skipped, "statistics written");
            if !json {
                println!(
                    "Wrote statistics for {complete} orders ({skipped} skipped) to {}",
                    path.display()
                );
            }
        }
        None => println!("{rendered}"),
    }

    Ok(())
}
