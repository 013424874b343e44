//! Display utilities and output formatting for the hlf CLI.

use anyhow::Result;
use hlf_lib::CurrencyDisplay;
use hlf_lib::prelude::*;
use serde::Serialize;

/// Print a value as pretty JSON on stdout.
pub(crate) fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Format an EUR amount.
pub(crate) fn eur(amount: f64) -> String {
    FeeCalculator::format_money(amount, Currency::Eur)
}

/// Format an ILS amount.
pub(crate) fn ils(amount: f64) -> String {
    FeeCalculator::format_money(amount, Currency::Ils)
}

/// Format an amount in the currencies selected by the user's settings.
pub(crate) fn amount(eur_amount: f64, exchange_rate: f64, display: CurrencyDisplay) -> String {
    match (display.shows_eur(), display.shows_ils()) {
        (true, true) => format!("{} ({})", eur(eur_amount), ils(eur_amount * exchange_rate)),
        (false, true) => ils(eur_amount * exchange_rate),
        _ => eur(eur_amount),
    }
}

/// Format a percentage.
pub(crate) fn percent(value: f64) -> String {
    FeeCalculator::format_percent(value)
}

/// Format a signed percentage (e.g., "+12.5%").
pub(crate) fn signed_percent(value: f64) -> String {
    format!("{value:+.1}%")
}

/// Print a section heading with an underline.
pub(crate) fn heading(title: &str) {
    println!("{title}");
    println!("{}", "-".repeat(title.chars().count().max(40)));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_amount_respects_display() {
        assert_eq!(amount(100.0, 4.0, CurrencyDisplay::Both), "€100.00 (₪400.00)");
        assert_eq!(amount(100.0, 4.0, CurrencyDisplay::Ils), "₪400.00");
        assert_eq!(amount(100.0, 4.0, CurrencyDisplay::Eur), "€100.00");
    }

    #[test]
    fn test_signed_percent() {
        assert_eq!(signed_percent(12.345), "+12.3%");
        assert_eq!(signed_percent(-4.0), "-4.0%");
    }
}
