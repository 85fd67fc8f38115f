//! # Pricing & Totals
//!
//! Change computation for the cash box and quotes for custom-priced items.
//!
//! ## Two Different Change Values
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Live display (this module)       Receipt (receipt.rs)                 │
//! │  ───────────────────────────      ────────────────────                 │
//! │  compute_change = max(0, c - t)   change = c - t (may be negative)     │
//! │  cash 200, total 250 → 0.00       cash 200, total 250 → -50.00         │
//! │                                                                         │
//! │  The display clamp is cosmetic. Whether short cash blocks the sale is  │
//! │  decided by the `require_cash` gate in checkout.rs.                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::{Deserialize, Serialize};

use crate::error::{CoreResult, ValidationError};
use crate::handoff::PendingItem;
use crate::money::Money;
use crate::types::PRICING_SOURCE;
use crate::validation::{validate_discount_percent, validate_item_id, validate_item_name};

// =============================================================================
// Change
// =============================================================================

/// Change to show on screen: `max(0, cash - total)`.
///
/// ## Example
/// ```rust
/// use till_core::money::Money;
/// use till_core::pricing::compute_change;
///
/// let total = Money::from_cents(25_000);
/// assert_eq!(compute_change(Money::from_cents(30_000), total).cents(), 5_000);
/// assert_eq!(compute_change(Money::from_cents(20_000), total).cents(), 0);
/// ```
pub fn compute_change(cash_tendered: Money, total: Money) -> Money {
    if cash_tendered >= total {
        cash_tendered - total
    } else {
        Money::zero()
    }
}

/// Parses the cash field.
///
/// Blank input counts as zero. Anything else that is not a finite number is
/// "not a number" and comes back as `None`.
pub fn parse_tendered(input: &str) -> Option<Money> {
    if input.trim().is_empty() {
        return Some(Money::zero());
    }

    Money::parse_decimal(input)
}

/// Change for the live display when the cash field may hold garbage.
///
/// Unparsable cash shows as zero change.
pub fn display_change(cash_tendered: Option<Money>, total: Money) -> Money {
    compute_change(cash_tendered.unwrap_or_default(), total)
}

// =============================================================================
// Pricing Quote
// =============================================================================

/// Cost inputs for an item priced on the spot (laser jobs and the like).
///
/// ## Formula
/// ```text
/// base      = material + laser_minutes × laser_rate + labor + overhead
/// unit      = base / quantity
/// unit_price = unit − unit × discount% / 100
/// ```
/// The base cost covers the whole batch, so it is divided across the
/// quantity before the discount is taken off each unit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricingQuote {
    pub material_cost: f64,
    pub laser_minutes: f64,
    pub laser_rate: f64,
    pub labor_cost: f64,
    pub overhead: f64,
    pub discount_percent: f64,
    pub quantity: u32,
}

impl PricingQuote {
    /// Cost of the whole batch before discount.
    pub fn base_cost(&self) -> f64 {
        self.material_cost + self.laser_minutes * self.laser_rate + self.labor_cost + self.overhead
    }

    /// Discounted price of one unit, rounded to the cent.
    pub fn unit_price(&self) -> CoreResult<Money> {
        if self.quantity == 0 {
            return Err(ValidationError::MustBePositive {
                field: "quantity".to_string(),
            }
            .into());
        }
        validate_discount_percent(self.discount_percent)?;

        let unit = self.base_cost() / f64::from(self.quantity);
        let discounted = unit - unit * self.discount_percent / 100.0;

        let price = Money::from_decimal(discounted).ok_or_else(|| ValidationError::InvalidFormat {
            field: "unit price".to_string(),
            reason: "cost inputs must be finite numbers".to_string(),
        })?;

        if !price.is_positive() {
            return Err(ValidationError::MustBePositive {
                field: "unit price".to_string(),
            }
            .into());
        }

        Ok(price)
    }

    /// Builds the hand-off record the POS picks up on its next start.
    pub fn into_pending(self, material_id: &str, material_name: &str) -> CoreResult<PendingItem> {
        validate_item_id(material_id)?;
        validate_item_name(material_name)?;
        let unit_price = self.unit_price()?;

        Ok(PendingItem {
            id: material_id.to_string(),
            name: material_name.to_string(),
            unit_price: unit_price.to_decimal(),
            quantity: self.quantity,
            source: Some(PRICING_SOURCE.to_string()),
        })
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CoreError;

    fn quote() -> PricingQuote {
        PricingQuote {
            material_cost: 120.0,
            laser_minutes: 10.0,
            laser_rate: 5.0,
            labor_cost: 80.0,
            overhead: 50.0,
            discount_percent: 10.0,
            quantity: 4,
        }
    }

    #[test]
    fn test_change_never_negative() {
        let total = Money::from_cents(10_000);
        for cash in [-500, 0, 9_999, 10_000, 10_001, 50_000] {
            let change = compute_change(Money::from_cents(cash), total);
            assert!(!change.is_negative());
            if cash < total.cents() {
                assert!(change.is_zero());
            }
        }
        assert_eq!(
            compute_change(Money::from_cents(30_000), Money::from_cents(25_000)),
            Money::from_cents(5_000)
        );
    }

    #[test]
    fn test_parse_tendered() {
        assert_eq!(parse_tendered(""), Some(Money::zero()));
        assert_eq!(parse_tendered("  "), Some(Money::zero()));
        assert_eq!(parse_tendered("300"), Some(Money::from_cents(30_000)));
        assert_eq!(parse_tendered("12abc"), None);
    }

    #[test]
    fn test_display_change_treats_garbage_as_zero() {
        assert_eq!(display_change(None, Money::from_cents(100)), Money::zero());
    }

    #[test]
    fn test_quote_unit_price() {
        // base = 120 + 50 + 80 + 50 = 300, unit = 75, less 10% = 67.50
        assert_eq!(quote().base_cost(), 300.0);
        assert_eq!(quote().unit_price(), Ok(Money::from_cents(6_750)));
    }

    #[test]
    fn test_quote_rejects_zero_quantity_and_bad_discount() {
        let mut q = quote();
        q.quantity = 0;
        assert!(matches!(q.unit_price(), Err(CoreError::Validation(_))));

        let mut q = quote();
        q.discount_percent = 150.0;
        assert!(matches!(q.unit_price(), Err(CoreError::Validation(_))));

        let mut q = quote();
        q.discount_percent = 100.0;
        assert!(matches!(q.unit_price(), Err(CoreError::Validation(_))));
    }

    #[test]
    fn test_quote_into_pending() {
        let pending = quote().into_pending("7", "Birch Plywood").unwrap();

        assert_eq!(pending.id, "7");
        assert_eq!(pending.quantity, 4);
        assert_eq!(pending.unit_price, 67.5);
        assert_eq!(pending.source.as_deref(), Some("pricing"));
    }
}
