//! Quick command implementation.

use anyhow::Result;
use hlf_lib::prelude::*;

use crate::context::AppContext;
use crate::display::{self, amount, percent};

/// Estimate the landed cost from the historical surcharge percentage.
pub(crate) fn quick(
    ctx: &AppContext,
    price: f64,
    method: Option<CalculationMethod>,
    rate: Option<f64>,
) -> Result<()> {
    let method = ctx.method(method);
    let rate = ctx.exchange_rate(rate)?;
    let estimate = ctx.calculator.quick_estimate(price, rate, method)?;

    if ctx.json {
        return display::print_json(&estimate);
    }

    let currencies = ctx.currency_display();
    println!(
        "{} + {} ({method}) = {}",
        amount(price, rate, currencies),
        percent(estimate.hlf_percentage),
        amount(estimate.total_eur, rate, currencies)
    );
    println!("Rough estimate from historical totals; run `hlf calculate` for a breakdown.");
    Ok(())
}
