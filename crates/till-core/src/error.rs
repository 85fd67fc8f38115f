//! # Error Types
//!
//! Domain-specific error types for till-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  till-core errors (this file)                                          │
//! │  ├── CoreError        - Cart / checkout rule violations                │
//! │  └── ValidationError  - Input validation failures                      │
//! │                                                                         │
//! │  till-client errors (separate crate)                                   │
//! │  └── ClientError      - Network, config, hand-off file failures        │
//! │                                                                         │
//! │  Presentation                                                          │
//! │  └── Notice           - What the cashier sees (notice.rs)              │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → ClientError → Notice → Screen     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Include context in error messages (item id, limits, amounts)
//! 3. Errors are enum variants, never String
//! 4. Each error variant maps to a user-facing notice

use thiserror::Error;

use crate::checkout::CheckoutPhase;
use crate::money::Money;

// =============================================================================
// Core Error
// =============================================================================

/// Cart and checkout rule violations.
///
/// None of these corrupt state: the operation that produced the error left
/// the cart exactly as it was.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoreError {
    /// The product has no sellable stock at all.
    ///
    /// ## When This Occurs
    /// - Adding a catalog item whose stock limit is zero or negative
    #[error("{name} is out of stock")]
    OutOfStock { id: String, name: String },

    /// Adding one more unit would exceed the stock limit.
    ///
    /// ## User Workflow
    /// ```text
    /// Tap "Coaster" (stock: 1, in cart: 1)
    ///      │
    ///      ▼
    /// StockLimitReached { id: "p1", limit: 1 }
    ///      │
    ///      ▼
    /// UI shows: "Stock limit reached" (cart unchanged)
    /// ```
    #[error("Stock limit reached for {id}: limit {limit}")]
    StockLimitReached { id: String, limit: i64 },

    /// Quantity change targeted an item that is not in the cart.
    #[error("Item {0} is not in the cart")]
    NotInCart(String),

    /// Checkout was attempted with nothing in the cart.
    #[error("Cart is empty")]
    EmptyCart,

    /// Cash is required and was missing, not a number, or short of the total.
    #[error("Insufficient cash: total {total}, tendered {}", describe_tendered(.tendered))]
    CashRequired {
        total: Money,
        tendered: Option<Money>,
    },

    /// A checkout is already being submitted.
    #[error("A checkout is already in progress")]
    CheckoutInFlight,

    /// The checkout state machine does not allow this action now.
    #[error("Cannot {action} while checkout is {phase}")]
    InvalidTransition {
        phase: CheckoutPhase,
        action: &'static str,
    },

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

fn describe_tendered(tendered: &Option<Money>) -> String {
    match tendered {
        Some(cash) => cash.to_string(),
        None => "nothing".to_string(),
    }
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// Raised before any cart mutation happens.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Value must be positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Invalid format (e.g. a price that is not a finite number).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = CoreError::StockLimitReached {
            id: "p1".to_string(),
            limit: 3,
        };
        assert_eq!(err.to_string(), "Stock limit reached for p1: limit 3");

        let err = CoreError::CashRequired {
            total: Money::from_cents(25000),
            tendered: None,
        };
        assert_eq!(
            err.to_string(),
            "Insufficient cash: total 250.00, tendered nothing"
        );
    }

    #[test]
    fn test_invalid_transition_message() {
        let err = CoreError::InvalidTransition {
            phase: CheckoutPhase::Confirming,
            action: "submit",
        };
        assert_eq!(err.to_string(), "Cannot submit while checkout is confirming");
    }

    #[test]
    fn test_validation_converts_to_core_error() {
        let validation_err = ValidationError::Required {
            field: "id".to_string(),
        };
        let core_err: CoreError = validation_err.into();
        assert!(matches!(core_err, CoreError::Validation(_)));
    }
}
