//! # User Notices
//!
//! Every error and every completed action ends up as a [`Notice`]: a level,
//! a short title and an optional line of text. The screen shows it as a
//! toast or modal; the terminal prints it.
//!
//! ## Mapping
//! | Source | Level | Title |
//! |---|---|---|
//! | `OutOfStock` | Error | Out of stock |
//! | `StockLimitReached`, clamped quantity | Warning | Stock limit reached |
//! | `EmptyCart` | Warning | Cart is empty |
//! | `CashRequired` | Error | Cash Required |
//! | `CheckoutInFlight` | Warning | Checkout in progress |
//! | `InvalidTransition` | Warning | Checkout unavailable |
//! | `NotInCart` | Warning | Item not in cart |
//! | `Validation` | Error | Invalid input |

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::cart::CartChange;
use crate::error::CoreError;

/// Severity of a notice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum NoticeLevel {
    Success,
    Info,
    Warning,
    Error,
}

/// A message for the cashier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Notice {
    pub level: NoticeLevel,
    pub title: String,
    pub text: Option<String>,
}

impl Notice {
    pub fn new(level: NoticeLevel, title: impl Into<String>) -> Self {
        Notice {
            level,
            title: title.into(),
            text: None,
        }
    }

    pub fn success(title: impl Into<String>) -> Self {
        Notice::new(NoticeLevel::Success, title)
    }

    pub fn info(title: impl Into<String>) -> Self {
        Notice::new(NoticeLevel::Info, title)
    }

    pub fn warning(title: impl Into<String>) -> Self {
        Notice::new(NoticeLevel::Warning, title)
    }

    pub fn error(title: impl Into<String>) -> Self {
        Notice::new(NoticeLevel::Error, title)
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    /// Warning for a quantity change that was capped at the stock limit.
    /// `None` for every other change.
    pub fn for_change(change: &CartChange) -> Option<Self> {
        match change {
            CartChange::Clamped { quantity, .. } => Some(
                Notice::warning("Stock limit reached")
                    .with_text(format!("Only {quantity} available")),
            ),
            _ => None,
        }
    }

    pub fn is_error(&self) -> bool {
        self.level == NoticeLevel::Error
    }
}

impl From<&CoreError> for Notice {
    fn from(err: &CoreError) -> Self {
        match err {
            CoreError::OutOfStock { name, .. } => {
                Notice::error("Out of stock").with_text(format!("{name} is unavailable"))
            }
            CoreError::StockLimitReached { limit, .. } => Notice::warning("Stock limit reached")
                .with_text(format!("Only {limit} available")),
            CoreError::NotInCart(_) => Notice::warning("Item not in cart"),
            CoreError::EmptyCart => Notice::warning("Cart is empty"),
            CoreError::CashRequired { .. } => {
                Notice::error("Cash Required").with_text("Please enter sufficient cash")
            }
            CoreError::CheckoutInFlight => Notice::warning("Checkout in progress"),
            CoreError::InvalidTransition { .. } => {
                Notice::warning("Checkout unavailable").with_text(err.to_string())
            }
            CoreError::Validation(inner) => Notice::error("Invalid input").with_text(inner.to_string()),
        }
    }
}

impl From<CoreError> for Notice {
    fn from(err: CoreError) -> Self {
        Notice::from(&err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::money::Money;

    #[test]
    fn test_error_levels() {
        let out = Notice::from(&CoreError::OutOfStock {
            id: "1".into(),
            name: "Coaster".into(),
        });
        assert_eq!(out.level, NoticeLevel::Error);
        assert_eq!(out.text.as_deref(), Some("Coaster is unavailable"));

        let limit = Notice::from(&CoreError::StockLimitReached {
            id: "1".into(),
            limit: 3,
        });
        assert_eq!(limit.level, NoticeLevel::Warning);

        let cash = Notice::from(CoreError::CashRequired {
            total: Money::from_cents(100),
            tendered: None,
        });
        assert!(cash.is_error());
        assert_eq!(cash.title, "Cash Required");

        assert_eq!(Notice::from(&CoreError::EmptyCart).title, "Cart is empty");
    }

    #[test]
    fn test_clamp_notice() {
        let clamped = CartChange::Clamped {
            id: "1".into(),
            quantity: 3,
        };
        let notice = Notice::for_change(&clamped).unwrap();
        assert_eq!(notice.level, NoticeLevel::Warning);
        assert_eq!(notice.text.as_deref(), Some("Only 3 available"));

        assert!(Notice::for_change(&CartChange::Cleared).is_none());
    }

    #[test]
    fn test_serializes_for_the_screen() {
        let json = serde_json::to_value(Notice::success("Checkout Complete")).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"level": "success", "title": "Checkout Complete", "text": null})
        );
    }
}
