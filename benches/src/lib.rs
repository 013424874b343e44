//! Input generators for the hlf benchmarks.
//!
//! Run with: `cargo bench --package hlf-bench`

#![forbid(unsafe_code)]

use chrono::{Days, NaiveDate};
use hlf_lib::prelude::*;
use hlf_lib::{HistoricalOrder, OrderSummary};

/// Product prices spanning every confidence band.
pub const PRICES: [f64; 5] = [25.0, 150.0, 450.0, 900.0, 2500.0];

/// Deterministic historical orders with plausible totals.
///
/// Every tenth order lacks a shipping figure so the builder's skip path is
/// exercised.
#[must_use]
pub fn synthetic_orders(count: usize) -> Vec<HistoricalOrder> {
    let start = NaiveDate::from_ymd_opt(2023, 1, 1).unwrap_or_default();
    (0..count)
        .map(|i| {
            let step = (i % 37) as f64;
            let total = 180.0 + step * 45.0;
            let shipping = 60.0 + step * 6.0;
            let customs = total * 0.21;
            let vat = (total + shipping + customs) * 0.18;
            HistoricalOrder {
                order_id: format!("order-{i}"),
                date: start + Days::new(i as u64 % 900),
                summary: OrderSummary {
                    total: Some(total),
                    shipping: (i % 10 != 9).then_some(shipping),
                    customs: Some(customs),
                    hlf_total: Some(shipping + customs + vat),
                    exchange_rate: Some(3.7 + (i % 5) as f64 * 0.1),
                },
                items: Vec::new(),
            }
        })
        .collect()
}

/// A cart of `lines` items with shipping proportional to its size.
#[must_use]
pub fn sample_cart(lines: usize) -> Cart {
    let items = (0..lines)
        .map(|i| CartItem::new(PRICES[i % PRICES.len()], 1 + (i % 3) as u32))
        .collect();
    Cart::new(items, 40.0 + lines as f64 * 8.0)
}
