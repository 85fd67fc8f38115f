//! # POS Settings
//!
//! Feature flags that shape the checkout workflow. Loaded by till-client
//! from the `[pos]` section of the config file.
//!
//! | Flag | Default | Effect |
//! |---|---|---|
//! | `enable_pos` | `true` | `false` makes the whole session inert |
//! | `require_cash` | `false` | block checkout without sufficient cash |
//! | `confirm_checkout` | `false` | ask for confirmation before submitting |
//! | `auto_print_receipt` | `false` | print the receipt after a recorded sale |
//! | `receipt_template` | `compact` | `compact` or `detailed` |
//! | `reset_delay_ms` | `1200` | pause between a recorded sale and the session reset |

use serde::{Deserialize, Serialize};

use crate::receipt::ReceiptTemplate;
use crate::CHECKOUT_RESET_DELAY_MS;

/// Checkout feature flags.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PosSettings {
    pub enable_pos: bool,
    pub require_cash: bool,
    pub confirm_checkout: bool,
    pub auto_print_receipt: bool,
    pub receipt_template: ReceiptTemplate,
    pub reset_delay_ms: u64,
}

impl Default for PosSettings {
    fn default() -> Self {
        PosSettings {
            enable_pos: true,
            require_cash: false,
            confirm_checkout: false,
            auto_print_receipt: false,
            receipt_template: ReceiptTemplate::Compact,
            reset_delay_ms: CHECKOUT_RESET_DELAY_MS,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = PosSettings::default();
        assert!(settings.enable_pos);
        assert!(!settings.require_cash);
        assert!(!settings.confirm_checkout);
        assert!(!settings.auto_print_receipt);
        assert_eq!(settings.receipt_template, ReceiptTemplate::Compact);
        assert_eq!(settings.reset_delay_ms, 1_200);
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let settings: PosSettings =
            serde_json::from_str(r#"{"require_cash": true, "receipt_template": "detailed"}"#).unwrap();
        assert!(settings.enable_pos);
        assert!(settings.require_cash);
        assert_eq!(settings.receipt_template, ReceiptTemplate::Detailed);
    }
}
