//! # till-core: Pure Point-of-Sale Logic for Till POS
//!
//! This crate holds the cart, checkout and receipt rules of the point-of-sale
//! screen as plain data and pure functions. Nothing here touches the network,
//! the file system or the clock.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Till POS Architecture                           │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │             POS Screen (browser or till-terminal)               │   │
//! │  │    Product buttons ──► Cart list ──► Cash input ──► Receipt     │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ PosSession (till-client)              │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ till-core (THIS CRATE) ★                        │   │
//! │  │                                                                 │   │
//! │  │   ┌─────────┐  ┌─────────┐  ┌──────────┐  ┌─────────┐          │   │
//! │  │   │  cart   │  │ pricing │  │ checkout │  │ receipt │          │   │
//! │  │   │  Cart   │  │ change  │  │ Checkout │  │ format  │          │   │
//! │  │   │ LineItem│  │ quotes  │  │  phases  │  │ document│          │   │
//! │  │   └─────────┘  └─────────┘  └──────────┘  └─────────┘          │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO NETWORK • NO CLOCK • PURE FUNCTIONS              │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                 Sale-recording backend (JSON/HTTP)              │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`money`] - Money type with integer arithmetic (no floating point!)
//! - [`types`] - Line items, stock limits, catalog products
//! - [`cart`] - The cart store and its quantity/stock invariants
//! - [`pricing`] - Change computation, cash parsing, custom-item quotes
//! - [`checkout`] - The checkout state machine
//! - [`receipt`] - Receipt templates and the receipt document
//! - [`handoff`] - The pending item deposited by the pricing flow
//! - [`settings`] - POS feature flags
//! - [`notice`] - User-facing notices
//! - [`view`] - Render projection of the cart
//! - [`error`] - Domain error types
//! - [`validation`] - Input validation
//!
//! ## Example Usage
//!
//! ```rust
//! use till_core::{Cart, Money, StockLimit};
//! use till_core::pricing::compute_change;
//!
//! let mut cart = Cart::new();
//! cart.add_item("p1", "Coaster", Money::from_cents(10_000), StockLimit::Finite(5)).unwrap();
//! cart.change_quantity("p1", 1).unwrap();
//! cart.add_item("p2", "Keychain", Money::from_cents(5_000), StockLimit::Finite(5)).unwrap();
//!
//! assert_eq!(cart.total(), Money::from_cents(25_000));
//! assert_eq!(compute_change(Money::from_cents(30_000), cart.total()).cents(), 5_000);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod cart;
pub mod checkout;
pub mod error;
pub mod handoff;
pub mod money;
pub mod notice;
pub mod pricing;
pub mod receipt;
pub mod settings;
pub mod types;
pub mod validation;
pub mod view;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use cart::{Cart, CartAction, CartChange};
pub use checkout::{
    Checkout, CheckoutPhase, CheckoutStep, ConfirmationPrompt, PendingSale, SaleLine, SaleRequest,
};
pub use error::{CoreError, CoreResult, ValidationError};
pub use handoff::PendingItem;
pub use money::Money;
pub use notice::{Notice, NoticeLevel};
pub use receipt::{format_receipt, Merchant, ReceiptContext, ReceiptDocument, ReceiptTemplate};
pub use settings::PosSettings;
pub use types::*;
pub use view::{CartLineView, CartView};

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Delay between a successful checkout and the session reset, in milliseconds.
///
/// Long enough for the cashier to see the success notice before the cart
/// is wiped.
pub const CHECKOUT_RESET_DELAY_MS: u64 = 1_200;

/// Default upper bound on the checkout network call, in seconds.
pub const DEFAULT_CHECKOUT_TIMEOUT_SECS: u64 = 30;

/// Currency symbol used when none is configured.
pub const DEFAULT_CURRENCY_SYMBOL: &str = "₱";
