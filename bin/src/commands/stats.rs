//! Stats command implementation.
//!
//! This module prints a summary of the statistics the estimator runs on.

use anyhow::Result;
use hlf_lib::StatisticValues;

use crate::context::AppContext;
use crate::display::{self, eur, percent};

/// Show the loaded statistics dataset.
pub(crate) fn show_stats(ctx: &AppContext) -> Result<()> {
    let stats = ctx.statistics()?;

    if ctx.json {
        return display::print_json(stats);
    }

    println!("Orders:       {}", stats.meta.total_orders);
    println!("Date range:   {}", stats.meta.date_range);
    println!(
        "Generated:    {}",
        stats.meta.generated_at.format("%Y-%m-%d %H:%M")
    );
    println!("VAT rate:     {}", percent(stats.vat_rate * 100.0));
    println!(
        "Customs ratio: {}",
        percent(stats.customs_ratio() * 100.0)
    );
    println!(
        "Exemption:    CIF below {}",
        eur(ctx.calculator.store().customs().exemption_threshold())
    );

    println!();
    println!(
        "{:<16} {:>10} {:>10} {:>10} {:>10} {:>10} {:>10}",
        "STATISTIC", "MEAN", "MEDIAN", "MIN", "MAX", "P75", "P90"
    );
    println!("{}", "-".repeat(82));

    let rows = [
        ("Order value", &stats.order_value),
        ("Shipping", &stats.shipping),
        ("Customs", &stats.customs),
        ("HLF total", &stats.hlf_total),
        ("HLF %", &stats.hlf_percentage),
        ("EUR/ILS rate", &stats.exchange_rate),
    ];
    for (label, values) in rows {
        print_row(label, values);
    }

    Ok(())
}

fn print_row(label: &str, values: &StatisticValues) {
    let optional = |v: Option<f64>| v.map_or_else(|| "-".to_string(), |v| format!("{v:.2}"));
    println!(
        "{:<16} {:>10.2} {:>10.2} {:>10.2} {:>10.2} {:>10} {:>10}",
        label,
        values.mean,
        values.median,
        values.min,
        values.max,
        optional(values.percentile_75),
        optional(values.percentile_90),
    );
}
