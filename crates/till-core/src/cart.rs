//! # Cart Store
//!
//! The in-memory cart owned by one POS session.
//!
//! ## Cart Operations Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Cart Store Operations                                │
//! │                                                                         │
//! │  Screen Action            Store Call               Cart Change          │
//! │  ─────────────            ──────────               ───────────          │
//! │                                                                         │
//! │  Tap product ────────────► add_item() ───────────► push / qty + 1      │
//! │                                                    (REJECT at ceiling)  │
//! │                                                                         │
//! │  Tap − / + ──────────────► change_quantity() ────► qty + delta         │
//! │                                                    (CLAMP at ceiling)   │
//! │                                                    (remove at ≤ 0)      │
//! │                                                                         │
//! │  Sale recorded ──────────► clear() ──────────────► items.clear()       │
//! │                                                                         │
//! │  Render ─────────────────► total() / CartView ───► (read only)         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Reject vs Clamp
//! `add_item` at the stock ceiling refuses and leaves the quantity alone.
//! `change_quantity` past the ceiling sets the quantity to the ceiling and
//! reports [`CartChange::Clamped`]. Both surface a "Stock limit reached"
//! warning; only one of them mutates.

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::types::{ItemOrigin, LineItem, StockLimit};

// =============================================================================
// Actions & Changes
// =============================================================================

/// A cart mutation expressed as data.
///
/// Lets the screen (or a test) drive the store through [`Cart::apply`]
/// without calling individual methods.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum CartAction {
    Add {
        id: String,
        name: String,
        price: Money,
        stock_limit: StockLimit,
    },
    ChangeQuantity {
        id: String,
        delta: i64,
    },
    Clear,
}

/// What a successful mutation did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CartChange {
    /// A new line was inserted.
    Added { id: String, quantity: u32 },
    /// An existing line changed quantity.
    Updated { id: String, quantity: u32 },
    /// The requested quantity exceeded the stock limit and was capped.
    Clamped { id: String, quantity: u32 },
    /// The line dropped to zero and was removed.
    Removed { id: String },
    /// The cart was emptied.
    Cleared,
}

impl CartChange {
    /// True when the change should be accompanied by a stock warning.
    pub fn is_clamped(&self) -> bool {
        matches!(self, CartChange::Clamped { .. })
    }
}

// =============================================================================
// Cart
// =============================================================================

/// The shopping cart.
///
/// ## Invariants
/// - Items are unique by `id` (adding the same id increases quantity)
/// - `0 < quantity` for every line (reaching 0 removes the line)
/// - `quantity <= stock_limit` for every line with a finite limit
/// - Insertion order is preserved for display
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cart {
    items: Vec<LineItem>,
}

impl Cart {
    /// Creates a new empty cart.
    pub fn new() -> Self {
        Cart { items: Vec::new() }
    }

    /// Lines in insertion order.
    pub fn items(&self) -> &[LineItem] {
        &self.items
    }

    /// Looks up a line by id.
    pub fn get(&self, id: &str) -> Option<&LineItem> {
        self.items.iter().find(|i| i.id == id)
    }

    /// Number of distinct lines.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Units across all lines.
    pub fn total_quantity(&self) -> u64 {
        self.items.iter().map(|i| u64::from(i.quantity)).sum()
    }

    /// Adds one unit of a catalog item.
    ///
    /// ## Behavior
    /// - `stock_limit <= 0`: rejected with [`CoreError::OutOfStock`]
    /// - Already in cart: the line takes `stock_limit` as its new limit
    /// - Already in cart at that limit: rejected with
    ///   [`CoreError::StockLimitReached`], quantity unchanged
    /// - Already in cart below the ceiling: quantity + 1
    /// - Not in cart: new line with quantity 1
    pub fn add_item(
        &mut self,
        id: &str,
        name: &str,
        price: Money,
        stock_limit: StockLimit,
    ) -> CoreResult<CartChange> {
        if stock_limit.is_exhausted() {
            warn!(id = %id, name = %name, "Rejected add: out of stock");
            return Err(CoreError::OutOfStock {
                id: id.to_string(),
                name: name.to_string(),
            });
        }

        if let Some(item) = self.items.iter_mut().find(|i| i.id == id) {
            // The caller's limit is the freshest stock figure; it replaces
            // whatever the line was added with.
            item.stock_limit = stock_limit;

            let next = i64::from(item.quantity) + 1;
            if !stock_limit.allows(next) || item.quantity == u32::MAX {
                warn!(id = %id, quantity = item.quantity, "Rejected add: stock limit reached");
                return Err(CoreError::StockLimitReached {
                    id: id.to_string(),
                    limit: limit_value(stock_limit, item.quantity),
                });
            }

            item.quantity += 1;
            debug!(id = %id, quantity = item.quantity, "Incremented cart line");
            return Ok(CartChange::Updated {
                id: id.to_string(),
                quantity: item.quantity,
            });
        }

        self.items.push(LineItem {
            id: id.to_string(),
            name: name.to_string(),
            price,
            quantity: 1,
            stock_limit,
            origin: ItemOrigin::Catalog,
        });
        debug!(id = %id, price = %price, "Added cart line");

        Ok(CartChange::Added {
            id: id.to_string(),
            quantity: 1,
        })
    }

    /// Adjusts a line's quantity by `delta`.
    ///
    /// ## Behavior
    /// - Result `<= 0`: the line is removed
    /// - Result above a finite stock limit: capped at the limit and reported
    ///   as [`CartChange::Clamped`] (the change is applied, not refused)
    /// - Unknown id: [`CoreError::NotInCart`], nothing changes
    pub fn change_quantity(&mut self, id: &str, delta: i64) -> CoreResult<CartChange> {
        let index = self
            .items
            .iter()
            .position(|i| i.id == id)
            .ok_or_else(|| CoreError::NotInCart(id.to_string()))?;

        let item = &mut self.items[index];
        let requested = i64::from(item.quantity).saturating_add(delta);

        if requested <= 0 {
            self.items.remove(index);
            debug!(id = %id, "Removed cart line");
            return Ok(CartChange::Removed { id: id.to_string() });
        }

        let capped = item.stock_limit.cap(requested).min(i64::from(u32::MAX));
        if capped <= 0 {
            self.items.remove(index);
            debug!(id = %id, "Removed cart line with exhausted stock");
            return Ok(CartChange::Removed { id: id.to_string() });
        }

        // capped is in 1..=u32::MAX here
        item.quantity = capped as u32;

        if capped < requested {
            warn!(id = %id, requested, quantity = item.quantity, "Clamped quantity to stock limit");
            Ok(CartChange::Clamped {
                id: id.to_string(),
                quantity: item.quantity,
            })
        } else {
            debug!(id = %id, quantity = item.quantity, "Changed cart quantity");
            Ok(CartChange::Updated {
                id: id.to_string(),
                quantity: item.quantity,
            })
        }
    }

    /// Puts a pre-built line into the cart (pricing hand-off).
    ///
    /// The line keeps its own quantity and limit. If the id is already
    /// present the quantities are merged, capped by the existing line's
    /// stock limit.
    pub fn seed(&mut self, line: LineItem) -> CartChange {
        if let Some(item) = self.items.iter_mut().find(|i| i.id == line.id) {
            let requested = i64::from(item.quantity) + i64::from(line.quantity);
            let capped = item.stock_limit.cap(requested).min(i64::from(u32::MAX));
            item.quantity = capped.max(i64::from(item.quantity)) as u32;

            return if capped < requested {
                CartChange::Clamped {
                    id: line.id,
                    quantity: item.quantity,
                }
            } else {
                CartChange::Updated {
                    id: line.id,
                    quantity: item.quantity,
                }
            };
        }

        let change = CartChange::Added {
            id: line.id.clone(),
            quantity: line.quantity,
        };
        debug!(id = %line.id, quantity = line.quantity, origin = ?line.origin, "Seeded cart line");
        self.items.push(line);
        change
    }

    /// Σ(price × quantity) over all lines.
    ///
    /// Exact in cents; round only when displaying.
    pub fn total(&self) -> Money {
        self.items.iter().map(LineItem::line_total).sum()
    }

    /// Empties the cart.
    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Applies a [`CartAction`].
    pub fn apply(&mut self, action: CartAction) -> CoreResult<CartChange> {
        match action {
            CartAction::Add {
                id,
                name,
                price,
                stock_limit,
            } => self.add_item(&id, &name, price, stock_limit),
            CartAction::ChangeQuantity { id, delta } => self.change_quantity(&id, delta),
            CartAction::Clear => {
                self.clear();
                Ok(CartChange::Cleared)
            }
        }
    }

    /// Reduce-style form of [`Cart::apply`]: consumes the cart and hands it
    /// back with the outcome.
    pub fn reduce(mut self, action: CartAction) -> (Self, CoreResult<CartChange>) {
        let outcome = self.apply(action);
        (self, outcome)
    }
}

fn limit_value(limit: StockLimit, quantity: u32) -> i64 {
    match limit {
        StockLimit::Finite(n) => n,
        StockLimit::Unlimited => i64::from(quantity),
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
