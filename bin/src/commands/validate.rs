//! Validate command implementation.
//!
//! This module compares estimated surcharges with those actually paid on
//! past orders and summarises the error distribution.

use anyhow::{Context, Result};
use hlf_lib::prelude::*;
use hlf_lib::{AccuracyReport, ItemObservation};
use std::path::Path;

use crate::context::AppContext;
use crate::display::{self, eur, signed_percent};

/// Error bands reported as "within ±N%".
const ERROR_BANDS: [f64; 3] = [10.0, 25.0, 50.0];

/// Evaluate estimates against observed item surcharges.
pub(crate) fn validate(
    ctx: &AppContext,
    file: &Path,
    method: Option<CalculationMethod>,
    mode: Option<OrderMode>,
    top: usize,
) -> Result<()> {
    let json = std::fs::read_to_string(file)
        .with_context(|| format!("Failed to read {}", file.display()))?;
    let observations: Vec<ItemObservation> = serde_json::from_str(&json)
        .with_context(|| format!("Invalid observations in {}", file.display()))?;

    let report = AccuracyReport::evaluate(
        &ctx.calculator,
        &observations,
        ctx.method(method),
        ctx.order_mode(mode),
    )?;

    if ctx.json {
        return display::print_json(&report);
    }

    if report.is_empty() {
        println!("No observations in {}.", file.display());
        return Ok(());
    }

    println!(
        "{:<40} {:>10} {:>12} {:>12} {:>9}",
        "ITEM", "PRICE", "ACTUAL HLF", "EST. HLF", "ERROR"
    );
    println!("{}", "-".repeat(87));
    for item in &report.items {
        println!(
            "{:<40} {:>10} {:>12} {:>12} {:>9}",
            truncate(&item.name, 40),
            eur(item.unit_price),
            eur(item.actual_hlf),
            eur(item.estimated_hlf),
            signed_percent(item.error_pct),
        );
    }

    let n = report.len();
    println!();
    display::heading(&format!(
        "Summary ({} items, {}, {} order)",
        n, report.method, report.order_mode
    ));
    let stat = |v: Option<f64>| v.map_or_else(|| "-".to_string(), signed_percent);
    println!("Mean error:   {}", stat(report.mean_error()));
    println!("Median error: {}", stat(report.median_error()));
    println!("Min error:    {}", stat(report.min_error()));
    println!("Max error:    {}", stat(report.max_error()));
    for band in ERROR_BANDS {
        let count = report.within(band);
        println!(
            "Within ±{band:.0}%:  {count}/{n} ({:.0}%)",
            count as f64 / n as f64 * 100.0
        );
    }

    println!("\nLargest overestimates:");
    for item in report.largest_overestimates(top) {
        println!("  {}: {}", truncate(&item.name, 50), signed_percent(item.error_pct));
    }
    println!("\nLargest underestimates:");
    for item in report.largest_underestimates(top) {
        println!("  {}: {}", truncate(&item.name, 50), signed_percent(item.error_pct));
    }

    Ok(())
}

fn truncate(s: &str, max: usize) -> String {
    s.chars().take(max).collect()
}
