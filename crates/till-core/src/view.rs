//! # Cart View
//!
//! Render projection of the cart: everything the screen draws, already
//! formatted. The cart itself never formats money; this module does it once
//! per render.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::cart::Cart;
use crate::money::Money;
use crate::pricing::display_change;
use crate::types::LineItem;
use crate::DEFAULT_CURRENCY_SYMBOL;

/// One row of the cart list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct CartLineView {
    pub id: String,
    pub name: String,
    /// Shows the "Custom" badge.
    pub custom: bool,
    pub price: String,
    pub quantity: u32,
    /// `₱100.00 × 2`
    pub summary: String,
}

/// The whole cart panel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct CartView {
    pub lines: Vec<CartLineView>,
    pub total: String,
    /// Live change, never negative.
    pub change: String,
    pub item_count: u32,
}

impl CartLineView {
    fn project(item: &LineItem, symbol: &str) -> Self {
        let price = item.price.format_with(symbol);
        CartLineView {
            id: item.id.clone(),
            name: item.name.clone(),
            custom: item.origin.is_custom(),
            summary: format!("{price} × {}", item.quantity),
            price,
            quantity: item.quantity,
        }
    }
}

impl CartView {
    /// Projects the cart with the cash currently typed in.
    ///
    /// `tendered` is the parsed cash field; `None` (not a number) shows zero
    /// change.
    pub fn render(cart: &Cart, tendered: Option<Money>, symbol: &str) -> Self {
        let total = cart.total();
        CartView {
            lines: cart
                .items()
                .iter()
                .map(|item| CartLineView::project(item, symbol))
                .collect(),
            total: total.format_with(symbol),
            change: display_change(tendered, total).format_with(symbol),
            item_count: u32::try_from(cart.total_quantity()).unwrap_or(u32::MAX),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

impl From<&Cart> for CartView {
    fn from(cart: &Cart) -> Self {
        CartView::render(cart, None, DEFAULT_CURRENCY_SYMBOL)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{ItemOrigin, StockLimit};

    #[test]
    fn test_render_scenario() {
        let mut cart = Cart::new();
        cart.add_item("1", "Coaster", Money::from_cents(10_000), StockLimit::Finite(5))
            .unwrap();
        cart.add_item("1", "Coaster", Money::from_cents(10_000), StockLimit::Finite(5))
            .unwrap();
        cart.add_item("2", "Keychain", Money::from_cents(5_000), StockLimit::Finite(5))
            .unwrap();

        let view = CartView::render(&cart, Some(Money::from_cents(30_000)), "₱");

        assert_eq!(view.total, "₱250.00");
        assert_eq!(view.change, "₱50.00");
        assert_eq!(view.item_count, 3);
        assert_eq!(view.lines[0].summary, "₱100.00 × 2");
        assert!(!view.lines[0].custom);
    }

    #[test]
    fn test_short_cash_shows_zero_change() {
        let mut cart = Cart::new();
        cart.add_item("1", "Coaster", Money::from_cents(10_000), StockLimit::Finite(5))
            .unwrap();

        assert_eq!(
            CartView::render(&cart, Some(Money::from_cents(5_000)), "₱").change,
            "₱0.00"
        );
        assert_eq!(CartView::render(&cart, None, "₱").change, "₱0.00");
    }

    #[test]
    fn test_custom_badge() {
        let mut cart = Cart::new();
        cart.seed(LineItem {
            id: "7".into(),
            name: "Engraved Plaque".into(),
            price: Money::from_cents(6_750),
            quantity: 4,
            stock_limit: StockLimit::Unlimited,
            origin: ItemOrigin::Custom,
        });

        let view = CartView::from(&cart);
        assert!(view.lines[0].custom);
        assert_eq!(view.total, "₱270.00");
    }

    #[test]
    fn test_empty_cart() {
        let view = CartView::from(&Cart::new());
        assert!(view.is_empty());
        assert_eq!(view.total, "₱0.00");
        assert_eq!(view.item_count, 0);
    }
}
