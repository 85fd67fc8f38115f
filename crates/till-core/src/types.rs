//! # Domain Types
//!
//! Core domain types used throughout Till POS.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    LineItem     │   │   StockLimit    │   │   ItemOrigin    │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id             │   │  Finite(n)      │   │  Catalog        │       │
//! │  │  name           │   │  Unlimited      │   │  Custom         │       │
//! │  │  price          │   └─────────────────┘   └─────────────────┘       │
//! │  │  quantity       │                                                    │
//! │  │  stock_limit    │   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │  origin         │   │    Product      │   │   StockLevel    │       │
//! │  └─────────────────┘   │  (backend row)  │   │  {id, stock}    │       │
//! │                        └─────────────────┘   └─────────────────┘       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Identifiers
//! The backend uses integer primary keys while the POS screen keys its cart
//! by string. Every id coming off the wire goes through [`deserialize_id`],
//! which accepts either form and stores the string.

use serde::{Deserialize, Deserializer, Serialize};

use crate::money::{self, Money};

/// `source` value the pricing calculator stamps on its hand-off records.
pub const PRICING_SOURCE: &str = "pricing";

// =============================================================================
// Stock Limit
// =============================================================================

/// The most units of an item that may sit in the cart.
///
/// Catalog items carry the stock count the backend reported. Items priced
/// ad hoc by the pricing calculator are not stock tracked and are
/// `Unlimited`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StockLimit {
    /// At most this many units. May be zero or negative when the backend
    /// reports an oversold product.
    Finite(i64),
    /// No upper bound.
    Unlimited,
}

impl StockLimit {
    /// True when not even one unit can be sold.
    pub const fn is_exhausted(&self) -> bool {
        match self {
            StockLimit::Finite(n) => *n <= 0,
            StockLimit::Unlimited => false,
        }
    }

    /// True when `quantity` units fit under the limit.
    pub const fn allows(&self, quantity: i64) -> bool {
        match self {
            StockLimit::Finite(n) => quantity <= *n,
            StockLimit::Unlimited => true,
        }
    }

    /// Caps `quantity` at the limit.
    pub fn cap(&self, quantity: i64) -> i64 {
        match self {
            StockLimit::Finite(n) => quantity.min(*n),
            StockLimit::Unlimited => quantity,
        }
    }
}

impl From<i64> for StockLimit {
    fn from(stock: i64) -> Self {
        StockLimit::Finite(stock)
    }
}

// =============================================================================
// Item Origin
// =============================================================================

/// Where a cart line came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ItemOrigin {
    /// A product tapped from the catalog.
    #[default]
    Catalog,
    /// An item priced by the pricing calculator and handed to the POS.
    Custom,
}

impl ItemOrigin {
    /// Maps a hand-off `source` tag to an origin.
    ///
    /// Only the pricing calculator's tag marks an item as custom; anything
    /// else (including a missing tag) is treated as a catalog item.
    pub fn from_source(source: Option<&str>) -> Self {
        match source {
            Some(PRICING_SOURCE) => ItemOrigin::Custom,
            _ => ItemOrigin::Catalog,
        }
    }

    /// The `source` tag sent back to the backend, if any.
    pub const fn source_tag(&self) -> Option<&'static str> {
        match self {
            ItemOrigin::Catalog => None,
            ItemOrigin::Custom => Some(PRICING_SOURCE),
        }
    }

    pub const fn is_custom(&self) -> bool {
        matches!(self, ItemOrigin::Custom)
    }
}

// =============================================================================
// Line Item
// =============================================================================

/// One product / quantity / price entry in the cart.
///
/// ## Invariants (enforced by [`crate::cart::Cart`])
/// - `quantity > 0` while the line is in the cart
/// - `quantity <= stock_limit` when the limit is finite
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineItem {
    /// Catalog id (or the pricing flow's material id).
    pub id: String,

    /// Display label.
    pub name: String,

    /// Unit price, frozen at the moment the item entered the cart.
    pub price: Money,

    /// Units in the cart.
    pub quantity: u32,

    /// Ceiling for `quantity`.
    pub stock_limit: StockLimit,

    /// Catalog or custom (pricing) item.
    pub origin: ItemOrigin,
}

impl LineItem {
    /// Unit price × quantity.
    #[inline]
    pub fn line_total(&self) -> Money {
        self.price * self.quantity
    }
}

// =============================================================================
// Product & Stock Snapshot
// =============================================================================

/// A product row as returned by the backend product lookup.
///
/// Extra columns the backend sends (category, material type) are ignored.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Product {
    #[serde(deserialize_with = "deserialize_id")]
    pub id: String,

    pub name: String,

    #[serde(with = "money::as_decimal")]
    pub price: Money,

    pub stock: i64,
}

impl Product {
    /// Stock limit to use when this product is added to the cart.
    #[inline]
    pub fn stock_limit(&self) -> StockLimit {
        StockLimit::Finite(self.stock)
    }
}

/// One entry of the stock snapshot (`GET /api/products/stock`).
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct StockLevel {
    #[serde(deserialize_with = "deserialize_id")]
    pub id: String,

    pub stock: i64,
}

// =============================================================================
// Wire Helpers
// =============================================================================

#[derive(Deserialize)]
#[serde(untagged)]
enum RawId {
    Text(String),
    Integer(i64),
}

/// Deserializes an id that may be a JSON string or a JSON integer.
pub fn deserialize_id<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match RawId::deserialize(deserializer)? {
        RawId::Text(text) => text,
        RawId::Integer(number) => number.to_string(),
    })
}

// =============================================================================
// Unit Tests
// =============================================================================
