//! Historical orders the statistics are computed from.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A line item of a historical order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderItem {
    /// Item name.
    pub name: String,
    /// Units ordered.
    pub quantity: u32,
    /// Line total in EUR.
    pub item_total: f64,
    /// Price per unit in EUR.
    pub unit_price: f64,
}

/// Order-level totals, all in EUR unless noted. Any may be missing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct OrderSummary {
    /// Order subtotal.
    #[serde(rename = "total_eur")]
    pub total: Option<f64>,
    /// Shipping paid.
    #[serde(rename = "shipping_eur")]
    pub shipping: Option<f64>,
    /// Customs paid.
    #[serde(rename = "customs_eur")]
    pub customs: Option<f64>,
    /// Total surcharge paid (shipping + customs + VAT).
    #[serde(rename = "hlf_total_eur")]
    pub hlf_total: Option<f64>,
    /// EUR to ILS rate on the order date.
    pub exchange_rate: Option<f64>,
}

impl OrderSummary {
    /// True when subtotal, shipping and surcharge are all present and non-zero.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        [self.total, self.shipping, self.hlf_total]
            .iter()
            .all(|v| v.is_some_and(|v| v != 0.0))
    }

    /// Surcharge as a percentage of the subtotal, when both are positive.
    #[must_use]
    pub fn hlf_percentage(&self) -> Option<f64> {
        match (self.hlf_total, self.total) {
            (Some(hlf), Some(total)) if hlf > 0.0 && total > 0.0 => Some(hlf / total * 100.0),
            _ => None,
        }
    }
}

/// A historical order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoricalOrder {
    /// Order identifier.
    pub order_id: String,
    /// Order date.
    pub date: NaiveDate,
    /// Order totals.
    pub summary: OrderSummary,
    /// Line items.
    #[serde(default)]
    pub items: Vec<OrderItem>,
}

impl HistoricalOrder {
    /// Number of line items.
    #[must_use]
    pub fn item_count(&self) -> usize {
        self.items.len()
    }
}

/// An item price paired with the surcharge actually paid for it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemObservation {
    /// Item name.
    pub name: String,
    /// Price per unit in EUR.
    pub unit_price: f64,
    /// Surcharge actually paid per unit in EUR.
    pub hlf_actual: f64,
}

/// Parses an order sheet name in `DDMMYY`, `DMMYY` or `DMYY` form.
///
/// Returns `None` for other lengths or out-of-range components.
#[must_use]
pub fn parse_sheet_date(sheet_name: &str) -> Option<NaiveDate> {
    if !sheet_name.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let (day, month, year) = match sheet_name.len() {
        6 => (&sheet_name[0..2], &sheet_name[2..4], &sheet_name[4..6]),
        5 => (&sheet_name[0..1], &sheet_name[1..3], &sheet_name[3..5]),
        4 => (&sheet_name[0..1], &sheet_name[1..2], &sheet_name[2..4]),
        _ => return None,
    };
    let year = 2000 + year.parse::<i32>().ok()?;
    NaiveDate::from_ymd_opt(year, month.parse().ok()?, day.parse().ok()?)
}
