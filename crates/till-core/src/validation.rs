//! # Validation Module
//!
//! Input validation for values that enter the cart from outside: catalog
//! rows, the pricing hand-off, and the pricing calculator.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: POS screen                                                   │
//! │  └── Basic format checks, immediate feedback                           │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: till-core (THIS MODULE)                                      │
//! │  └── Ids, names, prices, quantities before they reach the cart         │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Backend                                                      │
//! │  └── Stock re-checked when the sale is recorded                        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use crate::error::ValidationError;
use crate::money::Money;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Longest accepted display name.
pub const MAX_NAME_LEN: usize = 200;

/// Longest accepted item id.
pub const MAX_ID_LEN: usize = 64;

// =============================================================================
// String Validators
// =============================================================================

/// Validates an item id.
///
/// ## Rules
/// - Must not be blank
/// - At most [`MAX_ID_LEN`] characters
///
/// ## Example
/// ```rust
/// use till_core::validation::validate_item_id;
///
/// assert!(validate_item_id("42").is_ok());
/// assert!(validate_item_id("  ").is_err());
/// ```
pub fn validate_item_id(id: &str) -> ValidationResult<()> {
    let id = id.trim();

    if id.is_empty() {
        return Err(ValidationError::Required {
            field: "id".to_string(),
        });
    }

    if id.chars().count() > MAX_ID_LEN {
        return Err(ValidationError::TooLong {
            field: "id".to_string(),
            max: MAX_ID_LEN,
        });
    }

    Ok(())
}

/// Validates an item display name.
pub fn validate_item_name(name: &str) -> ValidationResult<()> {
    let name = name.trim();

    if name.is_empty() {
        return Err(ValidationError::Required {
            field: "name".to_string(),
        });
    }

    if name.chars().count() > MAX_NAME_LEN {
        return Err(ValidationError::TooLong {
            field: "name".to_string(),
            max: MAX_NAME_LEN,
        });
    }

    Ok(())
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a typed quantity.
///
/// ## Rules
/// - Must be positive (> 0)
/// - Must fit a cart line quantity (`u32`)
///
/// ## Returns
/// The quantity as stored on a line item.
pub fn validate_quantity_input(qty: i64) -> ValidationResult<u32> {
    if qty <= 0 {
        return Err(ValidationError::MustBePositive {
            field: "quantity".to_string(),
        });
    }

    u32::try_from(qty).map_err(|_| ValidationError::OutOfRange {
        field: "quantity".to_string(),
        min: 1,
        max: i64::from(u32::MAX),
    })
}

/// Validates a unit price.
///
/// ## Rules
/// - Must be non-negative (zero is allowed for free items)
///
/// ## Example
/// ```rust
/// use till_core::money::Money;
/// use till_core::validation::validate_price;
///
/// assert!(validate_price(Money::from_cents(0)).is_ok());
/// assert!(validate_price(Money::from_cents(-100)).is_err());
/// ```
pub fn validate_price(price: Money) -> ValidationResult<()> {
    if price.is_negative() {
        return Err(ValidationError::OutOfRange {
            field: "price".to_string(),
            min: 0,
            max: i64::MAX,
        });
    }

    Ok(())
}

/// Validates a decimal price coming off the wire and converts it.
pub fn validate_decimal_price(field: &str, amount: f64) -> ValidationResult<Money> {
    let money = Money::from_decimal(amount).ok_or_else(|| ValidationError::InvalidFormat {
        field: field.to_string(),
        reason: "must be a finite number".to_string(),
    })?;

    if money.is_negative() || money > Money::MAX_PRICE {
        return Err(ValidationError::OutOfRange {
            field: field.to_string(),
            min: 0,
            max: Money::MAX_PRICE.cents(),
        });
    }

    Ok(money)
}

/// Validates a discount percentage (0-100 inclusive).
pub fn validate_discount_percent(percent: f64) -> ValidationResult<()> {
    if !percent.is_finite() || !(0.0..=100.0).contains(&percent) {
        return Err(ValidationError::OutOfRange {
            field: "discount".to_string(),
            min: 0,
            max: 100,
        });
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================
