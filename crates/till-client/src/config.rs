//! # Till Configuration
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Environment Variables (highest priority)                           │
//! │     TILL_BACKEND_URL=http://192.168.1.20:5000                          │
//! │     TILL_REQUIRE_CASH=true                                             │
//! │                                                                         │
//! │  2. TOML Config File                                                   │
//! │     ~/.config/till-pos/till.toml (Linux)                               │
//! │     ~/Library/Application Support/com.till.pos/till.toml (macOS)      │
//! │                                                                         │
//! │  3. Default Values (lowest priority)                                   │
//! │     http://127.0.0.1:5000, every checkout flag off                     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! [backend]
//! base_url = "http://127.0.0.1:5000"
//! checkout_timeout_secs = 30
//! request_timeout_secs = 10
//!
//! [pos]
//! enable_pos = true
//! require_cash = true
//! confirm_checkout = false
//! auto_print_receipt = true
//! receipt_template = "detailed"
//!
//! [receipt]
//! name = "AE LaserCraft"
//! currency_symbol = "₱"
//! output_dir = "/var/spool/till"
//!
//! [handoff]
//! path = "/tmp/pending_item.json"
//! ```

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, info, warn};
use url::Url;

use till_core::{Merchant, PosSettings, ReceiptTemplate, DEFAULT_CHECKOUT_TIMEOUT_SECS};

use crate::error::{ClientError, ClientResult};

/// Name of the hand-off file inside the platform data directory.
pub const HANDOFF_FILE_NAME: &str = "pending_item.json";

// =============================================================================
// Backend
// =============================================================================

/// Where the sale-recording backend lives.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BackendConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Upper bound on `POST /sales/checkout`.
    #[serde(default = "default_checkout_timeout")]
    pub checkout_timeout_secs: u64,

    /// Upper bound on stock and product lookups.
    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,
}

fn default_base_url() -> String {
    "http://127.0.0.1:5000".to_string()
}

fn default_checkout_timeout() -> u64 {
    DEFAULT_CHECKOUT_TIMEOUT_SECS
}

fn default_request_timeout() -> u64 {
    10
}

impl Default for BackendConfig {
    fn default() -> Self {
        BackendConfig {
            base_url: default_base_url(),
            checkout_timeout_secs: default_checkout_timeout(),
            request_timeout_secs: default_request_timeout(),
        }
    }
}

impl BackendConfig {
    pub fn checkout_timeout(&self) -> Duration {
        Duration::from_secs(self.checkout_timeout_secs)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

// =============================================================================
// Receipt
// =============================================================================

/// Receipt identity and where printed receipts go.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReceiptConfig {
    #[serde(flatten)]
    pub merchant: Merchant,

    /// Directory for printed receipts. Unset prints to stdout.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output_dir: Option<PathBuf>,
}

// =============================================================================
// Hand-off
// =============================================================================

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HandoffConfig {
    /// Pending item file. Unset uses the platform data directory.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,
}

// =============================================================================
// Main Configuration
// =============================================================================

/// Complete till configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TillConfig {
    #[serde(default)]
    pub backend: BackendConfig,

    #[serde(default)]
    pub pos: PosSettings,

    #[serde(default)]
    pub receipt: ReceiptConfig,

    #[serde(default)]
    pub handoff: HandoffConfig,
}

impl TillConfig {
    /// Loads configuration from file, environment, and defaults.
    ///
    /// ## Load Order (later overrides earlier)
    /// 1. Default values
    /// 2. Config file (till.toml)
    /// 3. Environment variables
    pub fn load(config_path: Option<PathBuf>) -> ClientResult<Self> {
        let mut config = Self::default();

        if let Some(path) = config_path.or_else(Self::default_config_path) {
            if path.exists() {
                info!(?path, "Loading till config from file");
                config = Self::from_file(&path)?;
            } else {
                debug!(?path, "Config file not found, using defaults");
            }
        }

        config.apply_overrides(|key| std::env::var(key).ok());
        config.validate()?;

        Ok(config)
    }

    /// Loads config or returns defaults if loading fails.
    pub fn load_or_default(config_path: Option<PathBuf>) -> Self {
        Self::load(config_path).unwrap_or_else(|e| {
            warn!("Failed to load till config: {}. Using defaults.", e);
            Self::default()
        })
    }

    pub fn from_file(path: &Path) -> ClientResult<Self> {
        let contents = std::fs::read_to_string(path)?;
        Ok(toml::from_str(&contents)?)
    }

    /// Validates the configuration.
    pub fn validate(&self) -> ClientResult<()> {
        let url = Url::parse(&self.backend.base_url).map_err(|e| {
            ClientError::Config(format!("Invalid backend URL '{}': {}", self.backend.base_url, e))
        })?;

        if url.scheme() != "http" && url.scheme() != "https" {
            return Err(ClientError::Config(format!(
                "Backend URL must start with http:// or https://, got: {}",
                self.backend.base_url
            )));
        }

        if self.backend.checkout_timeout_secs == 0 {
            return Err(ClientError::Config(
                "checkout_timeout_secs must be greater than 0".into(),
            ));
        }

        if self.backend.request_timeout_secs == 0 {
            return Err(ClientError::Config(
                "request_timeout_secs must be greater than 0".into(),
            ));
        }

        Ok(())
    }

    /// Applies `TILL_*` overrides. `lookup` is `std::env::var` outside tests.
    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup("TILL_BACKEND_URL") {
            debug!(url = %url, "Overriding backend URL from environment");
            self.backend.base_url = url;
        }

        if let Some(secs) = lookup("TILL_CHECKOUT_TIMEOUT_SECS") {
            match secs.parse::<u64>() {
                Ok(secs) => self.backend.checkout_timeout_secs = secs,
                Err(_) => warn!(value = %secs, "Ignoring invalid TILL_CHECKOUT_TIMEOUT_SECS"),
            }
        }

        let flags: [(&str, &mut bool); 4] = [
            ("TILL_ENABLE_POS", &mut self.pos.enable_pos),
            ("TILL_REQUIRE_CASH", &mut self.pos.require_cash),
            ("TILL_CONFIRM_CHECKOUT", &mut self.pos.confirm_checkout),
            ("TILL_AUTO_PRINT_RECEIPT", &mut self.pos.auto_print_receipt),
        ];
        for (key, slot) in flags {
            if let Some(value) = lookup(key) {
                match parse_flag(&value) {
                    Some(flag) => *slot = flag,
                    None => warn!(key, value = %value, "Ignoring invalid boolean in environment"),
                }
            }
        }

        if let Some(template) = lookup("TILL_RECEIPT_TEMPLATE") {
            self.pos.receipt_template = ReceiptTemplate::from_name(Some(&template));
        }

        if let Some(dir) = lookup("TILL_RECEIPT_DIR") {
            self.receipt.output_dir = Some(PathBuf::from(dir));
        }

        if let Some(path) = lookup("TILL_HANDOFF_PATH") {
            self.handoff.path = Some(PathBuf::from(path));
        }
    }

    /// Returns the default config file path.
    pub fn default_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("com", "till", "pos")
            .map(|dirs| dirs.config_dir().join("till.toml"))
    }

    /// The hand-off file, falling back to the platform data directory.
    pub fn handoff_path(&self) -> Option<PathBuf> {
        self.handoff.path.clone().or_else(|| {
            directories::ProjectDirs::from("com", "till", "pos")
                .map(|dirs| dirs.data_dir().join(HANDOFF_FILE_NAME))
        })
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_default_config() {
        let config = TillConfig::default();
        assert_eq!(config.backend.base_url, "http://127.0.0.1:5000");
        assert_eq!(config.backend.checkout_timeout_secs, 30);
        assert!(config.pos.enable_pos);
        assert!(!config.pos.require_cash);
        assert_eq!(config.receipt.merchant.currency_symbol, "₱");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_validation() {
        let mut config = TillConfig::default();

        config.backend.base_url = "ftp://example.com".into();
        assert!(config.validate().is_err());

        config.backend.base_url = "not a url".into();
        assert!(config.validate().is_err());

        config.backend.base_url = "https://pos.example.com".into();
        assert!(config.validate().is_ok());

        config.backend.checkout_timeout_secs = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_partial_toml() {
        let config: TillConfig = toml::from_str(
            r#"
            [pos]
            require_cash = true
            receipt_template = "detailed"

            [receipt]
            name = "Corner Shop"
            "#,
        )
        .unwrap();

        assert!(config.pos.require_cash);
        assert!(config.pos.enable_pos);
        assert_eq!(config.pos.receipt_template, ReceiptTemplate::Detailed);
        assert_eq!(config.receipt.merchant.name, "Corner Shop");
        assert_eq!(config.backend, BackendConfig::default());
    }

    #[test]
    fn test_unknown_template_falls_back() {
        let config: TillConfig = toml::from_str("[pos]\nreceipt_template = \"fancy\"\n").unwrap();
        assert_eq!(config.pos.receipt_template, ReceiptTemplate::Compact);
    }

    #[test]
    fn test_overrides() {
        let env: HashMap<&str, &str> = [
            ("TILL_BACKEND_URL", "http://10.0.0.5:8000"),
            ("TILL_REQUIRE_CASH", "yes"),
            ("TILL_ENABLE_POS", "0"),
            ("TILL_CONFIRM_CHECKOUT", "maybe"),
            ("TILL_RECEIPT_TEMPLATE", "DETAILED"),
            ("TILL_HANDOFF_PATH", "/tmp/handoff.json"),
        ]
        .into_iter()
        .collect();

        let mut config = TillConfig::default();
        config.apply_overrides(|key| env.get(key).map(|v| v.to_string()));

        assert_eq!(config.backend.base_url, "http://10.0.0.5:8000");
        assert!(config.pos.require_cash);
        assert!(!config.pos.enable_pos);
        assert!(!config.pos.confirm_checkout);
        assert_eq!(config.pos.receipt_template, ReceiptTemplate::Detailed);
        assert_eq!(config.handoff_path(), Some(PathBuf::from("/tmp/handoff.json")));
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("till.toml");
        std::fs::write(&path, "[backend]\nbase_url = \"http://localhost:9000\"\n").unwrap();

        let config = TillConfig::from_file(&path).unwrap();
        assert_eq!(config.backend.base_url, "http://localhost:9000");
    }

    #[test]
    fn test_toml_serialization() {
        let toml_str = toml::to_string_pretty(&TillConfig::default()).unwrap();
        assert!(toml_str.contains("[backend]"));
        assert!(toml_str.contains("[pos]"));
    }
}
