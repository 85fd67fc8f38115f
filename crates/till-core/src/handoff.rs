//! # Pricing Hand-off
//!
//! The pricing calculator can push exactly one item into the POS. It writes
//! a pending record; the next POS session reads it, deletes it, and seeds
//! the cart with it.
//!
//! ```text
//! Pricing calculator ──► PendingItem (JSON) ──► PosSession::start
//!                                                 │ take() = read + delete
//!                                                 ▼
//!                                           Cart::seed(line)
//! ```
//!
//! The storage itself lives in till-client; this module only owns the
//! record's shape and its conversion into a cart line.

use serde::{Deserialize, Serialize};

use crate::error::CoreResult;
use crate::types::{deserialize_id, ItemOrigin, LineItem, StockLimit};
use crate::validation::{
    validate_decimal_price, validate_item_id, validate_item_name, validate_quantity_input,
};

/// The pending record: `{id, name, unit_price, quantity, source}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PendingItem {
    /// Material / product id. The calculator writes the backend's integer id.
    #[serde(deserialize_with = "deserialize_id")]
    pub id: String,

    pub name: String,

    /// Price of one unit in major currency units.
    pub unit_price: f64,

    pub quantity: u32,

    /// `"pricing"` for calculator items.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
}

impl PendingItem {
    /// Parses a record from its JSON text.
    pub fn from_json(text: &str) -> serde_json::Result<Self> {
        serde_json::from_str(text)
    }

    /// Validates the record and turns it into a cart line.
    ///
    /// Hand-off items are outside stock tracking, so the line is
    /// `Unlimited`.
    pub fn into_line_item(self) -> CoreResult<LineItem> {
        validate_item_id(&self.id)?;
        validate_item_name(&self.name)?;
        let quantity = validate_quantity_input(i64::from(self.quantity))?;
        let price = validate_decimal_price("unit_price", self.unit_price)?;

        Ok(LineItem {
            origin: ItemOrigin::from_source(self.source.as_deref()),
            id: self.id,
            name: self.name,
            price,
            quantity,
            stock_limit: StockLimit::Unlimited,
        })
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{CoreError, ValidationError};
    use crate::money::Money;

    #[test]
    fn test_parse_calculator_record() {
        let json = r#"{"id": 12, "name": "Acrylic 3mm", "unit_price": 67.5,
                       "quantity": 4, "source": "pricing"}"#;
        let line = PendingItem::from_json(json).unwrap().into_line_item().unwrap();

        assert_eq!(line.id, "12");
        assert_eq!(line.price, Money::from_cents(6750));
        assert_eq!(line.quantity, 4);
        assert_eq!(line.stock_limit, StockLimit::Unlimited);
        assert_eq!(line.origin, ItemOrigin::Custom);
    }

    #[test]
    fn test_missing_source_is_catalog() {
        let json = r#"{"id": "p9", "name": "Tag", "unit_price": 10, "quantity": 1}"#;
        let line = PendingItem::from_json(json).unwrap().into_line_item().unwrap();
        assert_eq!(line.origin, ItemOrigin::Catalog);
    }

    #[test]
    fn test_zero_quantity_is_rejected() {
        let item = PendingItem {
            id: "1".into(),
            name: "Tag".into(),
            unit_price: 5.0,
            quantity: 0,
            source: None,
        };
        assert!(matches!(item.into_line_item(), Err(CoreError::Validation(_))));
    }

    #[test]
    fn test_negative_price_is_rejected() {
        let item = PendingItem {
            id: "1".into(),
            name: "Tag".into(),
            unit_price: -5.0,
            quantity: 1,
            source: None,
        };
        assert!(item.into_line_item().is_err());
    }

    #[test]
    fn test_oversized_price_is_rejected_before_it_reaches_the_cart() {
        let item = PendingItem {
            id: "1".into(),
            name: "Plaque".into(),
            unit_price: 9.0e16,
            quantity: 2,
            source: Some("pricing".into()),
        };
        assert!(matches!(
            item.into_line_item(),
            Err(CoreError::Validation(ValidationError::OutOfRange { .. }))
        ));
    }
}
