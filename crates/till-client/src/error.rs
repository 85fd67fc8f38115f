//! # Client Error Types
//!
//! Everything that can go wrong once the POS leaves pure logic.
//!
//! ## Error Categories
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Client Error Categories                            │
//! │                                                                         │
//! │  ┌─────────────────┐  ┌─────────────────┐  ┌─────────────────────────┐ │
//! │  │  Configuration  │  │   Transport     │  │     Backend answer      │ │
//! │  │                 │  │                 │  │                         │ │
//! │  │  Config         │  │  Http           │  │  Rejected               │ │
//! │  │  Io             │  │  Timeout        │  │  MalformedResponse      │ │
//! │  │                 │  │                 │  │  ProductNotFound        │ │
//! │  └─────────────────┘  └─────────────────┘  └─────────────────────────┘ │
//! │                                                                         │
//! │  ┌─────────────────┐  ┌─────────────────┐                              │
//! │  │    Session      │  │      Core       │                              │
//! │  │  PosDisabled    │  │  CoreError      │                              │
//! │  └─────────────────┘  └─────────────────┘                              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! No session operation panics on any of these; they are turned into a
//! [`Notice`] at the session boundary.

use std::time::Duration;
use thiserror::Error;
use till_core::{CoreError, Notice};

/// Result type alias for client operations.
pub type ClientResult<T> = Result<T, ClientError>;

#[derive(Debug, Error)]
pub enum ClientError {
    // =========================================================================
    // Configuration Errors
    // =========================================================================
    /// Invalid or unreadable configuration.
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// File system failure (config file, hand-off record, receipt output).
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    // =========================================================================
    // Transport Errors
    // =========================================================================
    /// The request never produced a usable HTTP response.
    #[error("HTTP error: {0}")]
    Http(String),

    /// The backend did not answer in time.
    #[error("Request timed out after {0:?}")]
    Timeout(Duration),

    // =========================================================================
    // Backend Answers
    // =========================================================================
    /// The body was not the JSON we expected.
    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    /// The backend answered and refused the sale.
    #[error("Sale rejected: {}", .message.as_deref().unwrap_or("no reason given"))]
    Rejected { message: Option<String> },

    /// Product lookup returned 404.
    #[error("Product not found: {0}")]
    ProductNotFound(String),

    // =========================================================================
    // Session Errors
    // =========================================================================
    /// The POS is switched off in the configuration.
    #[error("POS is disabled")]
    PosDisabled,

    /// Business rule violation from till-core.
    #[error(transparent)]
    Core(#[from] CoreError),
}

impl From<reqwest::Error> for ClientError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            ClientError::MalformedResponse(err.to_string())
        } else {
            ClientError::Http(err.to_string())
        }
    }
}

impl From<toml::de::Error> for ClientError {
    fn from(err: toml::de::Error) -> Self {
        ClientError::Config(err.to_string())
    }
}

impl From<serde_json::Error> for ClientError {
    fn from(err: serde_json::Error) -> Self {
        ClientError::MalformedResponse(err.to_string())
    }
}

impl From<&ClientError> for Notice {
    fn from(err: &ClientError) -> Self {
        match err {
            ClientError::Core(core) => Notice::from(core),
            ClientError::Rejected { message } => Notice::error("Checkout Failed").with_text(
                message
                    .clone()
                    .unwrap_or_else(|| "The sale could not be recorded".to_string()),
            ),
            ClientError::Http(_) | ClientError::Timeout(_) | ClientError::MalformedResponse(_) => {
                Notice::error("Server Error").with_text("Check backend logs")
            }
            ClientError::ProductNotFound(id) => {
                Notice::error("Product not found").with_text(format!("No product with id {id}"))
            }
            ClientError::PosDisabled => Notice::error("POS is currently disabled"),
            ClientError::Config(msg) => Notice::error("Configuration error").with_text(msg.clone()),
            ClientError::Io(err) => Notice::error("File error").with_text(err.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use till_core::NoticeLevel;

    #[test]
    fn test_rejected_notice_uses_server_message() {
        let err = ClientError::Rejected {
            message: Some("Out of stock".into()),
        };
        let notice = Notice::from(&err);
        assert_eq!(notice.level, NoticeLevel::Error);
        assert_eq!(notice.title, "Checkout Failed");
        assert_eq!(notice.text.as_deref(), Some("Out of stock"));
    }

    #[test]
    fn test_rejected_notice_fallback() {
        let notice = Notice::from(&ClientError::Rejected { message: None });
        assert_eq!(notice.text.as_deref(), Some("The sale could not be recorded"));
    }

    #[test]
    fn test_transport_errors_are_generic() {
        for err in [
            ClientError::Http("connection refused".into()),
            ClientError::Timeout(Duration::from_secs(30)),
            ClientError::MalformedResponse("expected value".into()),
        ] {
            let notice = Notice::from(&err);
            assert_eq!(notice.title, "Server Error");
            assert_eq!(notice.text.as_deref(), Some("Check backend logs"));
        }
    }

    #[test]
    fn test_timeout_message_keeps_sub_second_precision() {
        let err = ClientError::Timeout(Duration::from_millis(250));
        assert_eq!(err.to_string(), "Request timed out after 250ms");
    }

    #[test]
    fn test_core_errors_pass_through() {
        let notice = Notice::from(&ClientError::from(CoreError::EmptyCart));
        assert_eq!(notice.title, "Cart is empty");
    }
}
