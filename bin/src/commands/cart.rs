//! Cart command implementation.

use anyhow::Result;
use hlf_lib::prelude::*;

use crate::context::AppContext;
use crate::display::{self, amount, eur, percent};

/// Allocate a known shipping cost over cart items.
pub(crate) fn cart(
    ctx: &AppContext,
    items: Vec<CartItem>,
    shipping: f64,
    rate: Option<f64>,
) -> Result<()> {
    let rate = ctx.exchange_rate(rate)?;
    let cart = Cart::new(items, shipping);
    let breakdown = ctx.calculator.cart().allocate(&cart, rate)?;

    if ctx.json {
        return display::print_json(&breakdown);
    }

    println!(
        "{:<6} {:>10} {:>4} {:>10} {:>10} {:>10} {:>12}",
        "ITEM", "PRICE", "QTY", "SHIPPING", "CUSTOMS", "VAT", "HLF/UNIT"
    );
    println!("{}", "-".repeat(68));
    for (i, line) in breakdown.items.iter().enumerate() {
        println!(
            "{:<6} {:>10} {:>4} {:>10} {:>10} {:>10} {:>12}",
            line.item.name.clone().unwrap_or_else(|| format!("#{}", i + 1)),
            eur(line.item.unit_price),
            line.item.quantity,
            eur(line.shipping),
            eur(line.customs),
            eur(line.vat),
            eur(line.hlf),
        );
    }

    let currencies = ctx.currency_display();
    println!();
    println!("Subtotal:   {}", amount(breakdown.subtotal, rate, currencies));
    println!("Shipping:   {}", amount(breakdown.shipping, rate, currencies));
    println!(
        "Total HLF:  {} ({} of subtotal)",
        amount(breakdown.total_hlf, rate, currencies),
        percent(breakdown.hlf_percentage())
    );
    println!("True total: {}", amount(breakdown.true_total_eur, rate, currencies));

    Ok(())
}
