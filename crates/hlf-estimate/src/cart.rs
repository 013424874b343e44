//! Allocation of a known shipping cost over a checkout cart.
//!
//! Once the real shipping charge for an order is known, each unit carries a
//! share of it proportional to its price. Customs and VAT are then applied
//! per unit exactly as in [`FeeCalculator`](crate::FeeCalculator), but with
//! the allocated shipping in place of an estimate.
//!
//! The exemption threshold is tested against price plus allocated shipping,
//! matching the calculator, not against the item price alone.

use std::str::FromStr;

use hlf_types::{CalculationError, HlfError, ParseError, Result};
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info};

use crate::calculator::{check_exchange_rate, check_price, ensure_finite};
use crate::store::StatisticsStore;

/// One cart line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartItem {
    /// Price per unit in EUR.
    pub unit_price: f64,
    /// Number of units.
    pub quantity: u32,
    /// Display name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl CartItem {
    /// Creates a cart line.
    #[must_use]
    pub const fn new(unit_price: f64, quantity: u32) -> Self {
        Self {
            unit_price,
            quantity,
            name: None,
        }
    }

    /// Sets the display name.
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Line total before fees.
    #[must_use]
    pub fn line_total(&self) -> f64 {
        self.unit_price * f64::from(self.quantity)
    }
}

impl FromStr for CartItem {
    type Err = ParseError;

    /// Parses `price` or `pricexqty` (e.g., `49.90x2`).
    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let err = || ParseError {
            kind: "cart item",
            value: s.to_string(),
            expected: "<price> or <price>x<quantity>",
        };
        let (price, quantity) = match s.trim().split_once(['x', 'X', '*']) {
            Some((price, qty)) => (price, qty.trim().parse::<u32>().map_err(|_| err())?),
            None => (s, 1),
        };
        let price = price.trim().parse::<f64>().map_err(|_| err())?;
        Ok(Self::new(price, quantity))
    }
}

/// A checkout cart with its real shipping charge.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Cart {
    /// Cart lines.
    pub items: Vec<CartItem>,
    /// Shipping charged for the whole order, in EUR.
    pub shipping: f64,
}

impl Cart {
    /// Creates a cart.
    #[must_use]
    pub const fn new(items: Vec<CartItem>, shipping: f64) -> Self {
        Self { items, shipping }
    }

    /// Sum of line totals.
    #[must_use]
    pub fn subtotal(&self) -> f64 {
        self.items.iter().map(CartItem::line_total).sum()
    }
}

/// Fees allocated to one cart line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemAllocation {
    /// The cart line.
    pub item: CartItem,
    /// Shipping share per unit.
    pub shipping: f64,
    /// Customs per unit.
    pub customs: f64,
    /// VAT per unit.
    pub vat: f64,
    /// Shipping + customs + VAT per unit.
    pub hlf: f64,
    /// Landed cost per unit in EUR.
    pub total_eur: f64,
    /// Landed cost per unit in local currency.
    #[serde(rename = "totalILS")]
    pub total_ils: f64,
}

impl ItemAllocation {
    /// Fees for the whole line.
    #[must_use]
    pub fn line_hlf(&self) -> f64 {
        self.hlf * f64::from(self.item.quantity)
    }

    /// Landed cost for the whole line in EUR.
    #[must_use]
    pub fn line_total_eur(&self) -> f64 {
        self.total_eur * f64::from(self.item.quantity)
    }
}

/// Allocation over a whole cart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartBreakdown {
    /// Per-line allocations, in cart order.
    pub items: Vec<ItemAllocation>,
    /// Sum of line totals before fees.
    pub subtotal: f64,
    /// Real shipping for the order.
    pub shipping: f64,
    /// Sum of line fees.
    pub total_hlf: f64,
    /// Subtotal plus fees in EUR.
    #[serde(rename = "trueTotalEUR")]
    pub true_total_eur: f64,
    /// Subtotal plus fees in local currency.
    #[serde(rename = "trueTotalILS")]
    pub true_total_ils: f64,
    /// Exchange rate used for the local totals.
    pub exchange_rate: f64,
}

impl CartBreakdown {
    /// Fees as a percentage of the subtotal.
    #[must_use]
    pub fn hlf_percentage(&self) -> f64 {
        self.total_hlf / self.subtotal * 100.0
    }
}

/// Distributes known shipping over a cart and applies customs and VAT.
#[derive(Debug, Clone, Copy)]
pub struct CartCalculator<'a> {
    store: &'a StatisticsStore,
}

impl<'a> CartCalculator<'a> {
    /// Creates a cart calculator over a store.
    #[must_use]
    pub const fn new(store: &'a StatisticsStore) -> Self {
        Self { store }
    }

    /// Allocates the cart's shipping over its units.
    ///
    /// # Errors
    ///
    /// Returns [`HlfError::CalculationFailed`] if the cart is empty, its
    /// subtotal is not positive, any price or the shipping is invalid, or
    /// statistics are unavailable.
    pub fn allocate(&self, cart: &Cart, exchange_rate: f64) -> Result<CartBreakdown> {
        debug!(
            items = cart.items.len(),
            shipping = cart.shipping,
            exchange_rate,
            "allocating cart fees"
        );

        match self.compose(cart, exchange_rate) {
            Ok(breakdown) => {
                info!(
                    subtotal = breakdown.subtotal,
                    total_hlf = breakdown.total_hlf,
                    "cart allocation complete"
                );
                Ok(breakdown)
            }
            Err(cause) => {
                error!(error = %cause, "cart allocation failed");
                Err(HlfError::CalculationFailed(cause))
            }
        }
    }

    fn compose(
        &self,
        cart: &Cart,
        exchange_rate: f64,
    ) -> std::result::Result<CartBreakdown, CalculationError> {
        check_exchange_rate(exchange_rate)?;
        if !cart.shipping.is_finite() || cart.shipping < 0.0 {
            return Err(CalculationError::InvalidShipping(cart.shipping));
        }
        for item in &cart.items {
            check_price(item.unit_price)?;
        }

        let subtotal = cart.subtotal();
        if cart.items.is_empty() || subtotal <= 0.0 {
            return Err(CalculationError::EmptyCart);
        }

        let stats = self.store.statistics()?;
        let customs_rule = self.store.customs();

        let mut items = Vec::with_capacity(cart.items.len());
        let mut total_hlf = 0.0;
        for item in &cart.items {
            let shipping = item.unit_price / subtotal * cart.shipping;
            let customs = customs_rule.estimate(item.unit_price + shipping, stats);
            let vat = (item.unit_price + shipping + customs) * stats.vat_rate;
            let hlf = shipping + customs + vat;
            ensure_finite("item fees", hlf)?;

            let total_eur = item.unit_price + hlf;
            let allocation = ItemAllocation {
                item: item.clone(),
                shipping,
                customs,
                vat,
                hlf,
                total_eur,
                total_ils: total_eur * exchange_rate,
            };
            total_hlf += allocation.line_hlf();
            items.push(allocation);
        }

        let true_total_eur = subtotal + total_hlf;
        Ok(CartBreakdown {
            items,
            subtotal,
            shipping: cart.shipping,
            total_hlf,
            true_total_eur,
            true_total_ils: true_total_eur * exchange_rate,
            exchange_rate,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::fixture_statistics;
    use approx::assert_relative_eq;

    fn store() -> StatisticsStore {
        StatisticsStore::new(fixture_statistics()).unwrap()
    }

    #[test]
    fn test_parse_cart_item() {
        assert_eq!("49.90".parse::<CartItem>().unwrap(), CartItem::new(49.9, 1));
        assert_eq!("120x3".parse::<CartItem>().unwrap(), CartItem::new(120.0, 3));
        assert_eq!(" 15.5 X 2 ".parse::<CartItem>().unwrap(), CartItem::new(15.5, 2));
        assert!("abc".parse::<CartItem>().is_err());
        assert!("10x-1".parse::<CartItem>().is_err());
    }

    #[test]
    fn test_shipping_allocated_in_full() {
        let store = store();
        let cart = Cart::new(
            vec![
                CartItem::new(300.0, 1),
                CartItem::new(45.0, 4),
                CartItem::new(120.0, 2),
            ],
            90.0,
        );
        let breakdown = CartCalculator::new(&store).allocate(&cart, 4.0).unwrap();

        assert_eq!(breakdown.subtotal, 720.0);
        let allocated: f64 = breakdown
            .items
            .iter()
            .map(|a| a.shipping * f64::from(a.item.quantity))
            .sum();
        assert_relative_eq!(allocated, 90.0, epsilon = 1e-9);
        assert_relative_eq!(breakdown.items[0].shipping, 300.0 / 720.0 * 90.0);
    }

    #[test]
    fn test_item_fee_composition() {
        let store = store();
        let cart = Cart::new(vec![CartItem::new(400.0, 1), CartItem::new(20.0, 1)], 60.0);
        let breakdown = CartCalculator::new(&store).allocate(&cart, 3.5).unwrap();

        let expensive = &breakdown.items[0];
        let shipping = 400.0 / 420.0 * 60.0;
        let customs = ((400.0 + shipping) / 723.24) * 153.15;
        assert_eq!(expensive.shipping, shipping);
        assert_eq!(expensive.customs, customs);
        assert_eq!(expensive.vat, (400.0 + shipping + customs) * 0.18);
        assert_eq!(expensive.hlf, shipping + customs + expensive.vat);
        assert_eq!(expensive.total_ils, (400.0 + expensive.hlf) * 3.5);

        // 20 EUR plus a small shipping share stays below the exemption threshold.
        let cheap = &breakdown.items[1];
        assert_eq!(cheap.customs, 0.0);
    }

    #[test]
    fn test_allocated_shipping_counts_toward_exemption() {
        let store = store();
        let cart = Cart::new(vec![CartItem::new(70.0, 1), CartItem::new(130.0, 1)], 20.0);
        let breakdown = CartCalculator::new(&store).allocate(&cart, 4.0).unwrap();

        // 70 EUR alone is exempt; its 7 EUR shipping share pushes it to 77.
        let item = &breakdown.items[0];
        assert_relative_eq!(item.shipping, 7.0, epsilon = 1e-9);
        assert_relative_eq!(item.customs, 77.0 / 723.24 * 153.15, epsilon = 1e-9);
    }

    #[test]
    fn test_totals_scale_with_quantity() {
        let store = store();
        let cart = Cart::new(vec![CartItem::new(100.0, 3)], 30.0);
        let breakdown = CartCalculator::new(&store).allocate(&cart, 4.0).unwrap();

        let line = &breakdown.items[0];
        assert_relative_eq!(line.shipping, 10.0, epsilon = 1e-12);
        assert_relative_eq!(breakdown.total_hlf, line.hlf * 3.0, epsilon = 1e-9);
        assert_relative_eq!(
            breakdown.true_total_eur,
            300.0 + breakdown.total_hlf,
            epsilon = 1e-9
        );
        assert_relative_eq!(
            breakdown.true_total_ils,
            breakdown.true_total_eur * 4.0,
            epsilon = 1e-9
        );
    }

    #[test]
    fn test_empty_cart_fails() {
        let store = store();
        let calc = CartCalculator::new(&store);
        let err = calc.allocate(&Cart::new(Vec::new(), 20.0), 4.0).unwrap_err();
        assert!(matches!(
            err,
            HlfError::CalculationFailed(CalculationError::EmptyCart)
        ));

        let zero_qty = Cart::new(vec![CartItem::new(50.0, 0)], 20.0);
        assert!(matches!(
            calc.allocate(&zero_qty, 4.0),
            Err(HlfError::CalculationFailed(CalculationError::EmptyCart))
        ));
    }

    #[test]
    fn test_invalid_inputs_fail() {
        let store = store();
        let calc = CartCalculator::new(&store);
        let cart = Cart::new(vec![CartItem::new(-5.0, 1)], 20.0);
        assert!(matches!(
            calc.allocate(&cart, 4.0),
            Err(HlfError::CalculationFailed(CalculationError::InvalidPrice(_)))
        ));

        let cart = Cart::new(vec![CartItem::new(50.0, 1)], 20.0);
        assert!(calc.allocate(&cart, f64::NAN).is_err());

        let cart = Cart::new(vec![CartItem::new(50.0, 1)], -1.0);
        assert!(matches!(
            calc.allocate(&cart, 4.0),
            Err(HlfError::CalculationFailed(CalculationError::InvalidShipping(_)))
        ));
    }

    #[test]
    fn test_unavailable_statistics() {
        let store = StatisticsStore::from_json("not json");
        let cart = Cart::new(vec![CartItem::new(50.0, 1)], 20.0);
        assert!(matches!(
            CartCalculator::new(&store).allocate(&cart, 4.0),
            Err(HlfError::CalculationFailed(CalculationError::Statistics(_)))
        ));
    }
}
