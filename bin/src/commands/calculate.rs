//! Calculate command implementation.
//!
//! Prints the full landed-cost breakdown for one product.

use anyhow::Result;
use hlf_lib::prelude::*;

use crate::context::AppContext;
use crate::display::{self, amount, eur, percent};

/// Calculate shipping, customs and VAT for a product.
pub(crate) fn calculate(
    ctx: &AppContext,
    price: f64,
    method: Option<CalculationMethod>,
    mode: Option<OrderMode>,
    rate: Option<f64>,
    weight: Option<f64>,
    url: Option<&str>,
) -> Result<()> {
    let method = ctx.method(method);
    let mode = ctx.order_mode(mode);
    let rate = ctx.exchange_rate(rate)?;

    let mut product = ProductData::new(price, Currency::Eur, url.unwrap_or_default())?;
    if let Some(weight) = weight {
        product = product.with_weight(weight)?;
    }

    let breakdown = ctx.calculator.calculate(&product, rate, method, mode)?;

    if ctx.json {
        return display::print_json(&breakdown);
    }

    let currencies = ctx.currency_display();
    let vat_rate = ctx.calculator.store().vat_rate();

    display::heading(&format!("Landed cost ({method}, {mode} order)"));
    println!("{:<12} {}", "Price:", amount(price, rate, currencies));
    print!("{:<12} {}", "Shipping:", amount(breakdown.shipping.estimated, rate, currencies));
    match breakdown.shipping.range {
        Some(range) => println!("  [historical {} - {}]", eur(range.min), eur(range.max)),
        None => println!(),
    }
    println!(
        "{:<12} {}",
        "Customs:",
        amount(breakdown.customs.estimated, rate, currencies)
    );
    println!(
        "{:<12} {}  ({} of {})",
        "VAT:",
        amount(breakdown.vat, rate, currencies),
        percent(vat_rate * 100.0),
        eur(breakdown.cif_value())
    );
    println!("{}", "-".repeat(40));
    println!("{:<12} {}", "Total:", amount(breakdown.total, rate, currencies));
    println!(
        "{:<12} {} (+{})",
        "Surcharge:",
        eur(breakdown.surcharge()),
        percent(breakdown.surcharge_percentage())
    );
    println!("{:<12} {}", "Confidence:", breakdown.confidence());
    println!("\nExchange rate: 1 EUR = {rate:.3} ILS");

    Ok(())
}
