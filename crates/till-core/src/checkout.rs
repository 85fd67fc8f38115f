//! # Checkout State Machine
//!
//! Tracks a single checkout attempt from the cashier's tap to the backend's
//! answer. The machine is pure: it decides what happens next and hands the
//! caller a [`SaleRequest`] to send, but it never sends anything itself.
//!
//! ## Phases
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │   ┌──────┐  begin()   validate (empty cart? cash?)                       │
//! │   │ Idle │──────────► ──────────────────────────┐                       │
//! │   └──────┘                 │ fail → Idle        │                       │
//! │      ▲                     │                    │ confirm_checkout      │
//! │      │                     ▼                    ▼                       │
//! │      │              ┌────────────┐  confirm(false) → Idle               │
//! │      │              │ Submitting │◄──── ┌────────────┐                  │
//! │      │              └─────┬──────┘      │ Confirming │ confirm(true)    │
//! │      │        fail()      │  succeed()  └────────────┘                  │
//! │      └────────────────────┤                                             │
//! │      │                    ▼                                             │
//! │      │  reset()     ┌───────────┐                                       │
//! │      └──────────────│ Succeeded │                                       │
//! │                     └───────────┘                                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Validation runs synchronously inside [`Checkout::begin`], so there is no
//! observable "validating" phase.
//!
//! ## Re-entrancy
//! `begin` while a submission is in flight fails with
//! [`CoreError::CheckoutInFlight`]. The guard lives here, not in the screen,
//! so a programmatic double call cannot record the sale twice.

use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::{debug, info, warn};

use crate::cart::Cart;
use crate::error::{CoreError, CoreResult};
use crate::money::{self, Money};
use crate::settings::PosSettings;
use crate::types::LineItem;

// =============================================================================
// Phase
// =============================================================================

/// Where the current checkout attempt stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CheckoutPhase {
    /// Nothing in progress.
    #[default]
    Idle,
    /// Waiting for the cashier to confirm.
    Confirming,
    /// The sale request is on the wire.
    Submitting,
    /// The backend recorded the sale; waiting for the session reset.
    Succeeded,
}

impl fmt::Display for CheckoutPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CheckoutPhase::Idle => write!(f, "idle"),
            CheckoutPhase::Confirming => write!(f, "confirming"),
            CheckoutPhase::Submitting => write!(f, "submitting"),
            CheckoutPhase::Succeeded => write!(f, "succeeded"),
        }
    }
}

// =============================================================================
// Wire Types
// =============================================================================

/// One cart line as the checkout endpoint expects it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SaleLine {
    pub id: String,
    pub name: String,
    #[serde(with = "money::as_decimal")]
    pub price: Money,
    pub qty: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
}

impl From<&LineItem> for SaleLine {
    fn from(item: &LineItem) -> Self {
        SaleLine {
            id: item.id.clone(),
            name: item.name.clone(),
            price: item.price,
            qty: item.quantity,
            source: item.origin.source_tag().map(str::to_string),
        }
    }
}

/// Body of `POST /sales/checkout`: `{"cart": [...]}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SaleRequest {
    pub cart: Vec<SaleLine>,
}

impl SaleRequest {
    pub fn from_items(items: &[LineItem]) -> Self {
        SaleRequest {
            cart: items.iter().map(SaleLine::from).collect(),
        }
    }
}

// =============================================================================
// Snapshots & Steps
// =============================================================================

/// The cart as it was when checkout started.
///
/// The receipt is built from this snapshot, never from the live cart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingSale {
    pub items: Vec<LineItem>,
    pub total: Money,
    /// Parsed cash, `None` when the field held something that is not a number.
    pub tendered: Option<Money>,
}

impl PendingSale {
    /// Cash to print on the receipt (unparsable cash prints as zero).
    pub fn cash(&self) -> Money {
        self.tendered.unwrap_or_default()
    }

    pub fn request(&self) -> SaleRequest {
        SaleRequest::from_items(&self.items)
    }
}

/// What the cashier is asked to confirm.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConfirmationPrompt {
    pub total: Money,
    pub cash: Money,
    /// `cash - total`, unclamped.
    pub change: Money,
}

/// What the caller must do after [`Checkout::begin`].
#[derive(Debug, Clone, PartialEq)]
pub enum CheckoutStep {
    /// Show the prompt, then call [`Checkout::confirm`].
    Confirm(ConfirmationPrompt),
    /// Send the request, then call [`Checkout::succeed`] or [`Checkout::fail`].
    Submit(SaleRequest),
}

// =============================================================================
// Machine
// =============================================================================

/// One session's checkout state machine.
#[derive(Debug, Clone, Default)]
pub struct Checkout {
    phase: CheckoutPhase,
    pending: Option<PendingSale>,
}

impl Checkout {
    pub fn new() -> Self {
        Checkout::default()
    }

    pub fn phase(&self) -> CheckoutPhase {
        self.phase
    }

    /// True while a sale request is on the wire.
    pub fn is_in_flight(&self) -> bool {
        self.phase == CheckoutPhase::Submitting
    }

    /// The snapshot being confirmed or submitted, if any.
    pub fn pending(&self) -> Option<&PendingSale> {
        self.pending.as_ref()
    }

    /// Starts a checkout attempt.
    ///
    /// ## Validation Order
    /// 1. Already submitting? → [`CoreError::CheckoutInFlight`]
    /// 2. Not idle? → [`CoreError::InvalidTransition`]
    /// 3. Empty cart? → [`CoreError::EmptyCart`]
    /// 4. `require_cash` and cash missing / short? → [`CoreError::CashRequired`]
    ///
    /// Every failure leaves the machine `Idle` (or where it was, for 1-2).
    pub fn begin(
        &mut self,
        cart: &Cart,
        tendered: Option<Money>,
        settings: &PosSettings,
    ) -> CoreResult<CheckoutStep> {
        match self.phase {
            CheckoutPhase::Submitting => {
                warn!("Checkout requested while a submission is in flight");
                return Err(CoreError::CheckoutInFlight);
            }
            CheckoutPhase::Idle => {}
            phase => {
                return Err(CoreError::InvalidTransition {
                    phase,
                    action: "start checkout",
                })
            }
        }

        if cart.is_empty() {
            debug!("Checkout rejected: empty cart");
            return Err(CoreError::EmptyCart);
        }

        let total = cart.total();

        if settings.require_cash {
            let sufficient = matches!(tendered, Some(cash) if cash >= total);
            if !sufficient {
                debug!(total = %total, ?tendered, "Checkout rejected: insufficient cash");
                return Err(CoreError::CashRequired { total, tendered });
            }
        }

        let pending = PendingSale {
            items: cart.items().to_vec(),
            total,
            tendered,
        };

        if settings.confirm_checkout {
            let cash = pending.cash();
            let prompt = ConfirmationPrompt {
                total,
                cash,
                change: cash - total,
            };
            self.pending = Some(pending);
            self.phase = CheckoutPhase::Confirming;
            debug!(total = %total, "Checkout awaiting confirmation");
            return Ok(CheckoutStep::Confirm(prompt));
        }

        let request = pending.request();
        self.pending = Some(pending);
        self.phase = CheckoutPhase::Submitting;
        info!(total = %total, lines = request.cart.len(), "Checkout submitting");
        Ok(CheckoutStep::Submit(request))
    }

    /// Resolves the confirmation prompt.
    ///
    /// Declining returns to `Idle` with nothing sent; accepting moves to
    /// `Submitting` and returns the request to send.
    pub fn confirm(&mut self, accepted: bool) -> CoreResult<Option<SaleRequest>> {
        if self.phase != CheckoutPhase::Confirming {
            return Err(CoreError::InvalidTransition {
                phase: self.phase,
                action: "confirm",
            });
        }

        if !accepted {
            self.pending = None;
            self.phase = CheckoutPhase::Idle;
            debug!("Checkout declined at confirmation");
            return Ok(None);
        }

        let request = self.pending.as_ref().map(PendingSale::request);
        match request {
            Some(request) => {
                self.phase = CheckoutPhase::Submitting;
                info!(lines = request.cart.len(), "Checkout confirmed, submitting");
                Ok(Some(request))
            }
            None => {
                self.phase = CheckoutPhase::Idle;
                Err(CoreError::InvalidTransition {
                    phase: CheckoutPhase::Confirming,
                    action: "confirm without a pending sale",
                })
            }
        }
    }

    /// The backend recorded the sale. Returns the submitted snapshot.
    pub fn succeed(&mut self) -> CoreResult<PendingSale> {
        if self.phase != CheckoutPhase::Submitting {
            return Err(CoreError::InvalidTransition {
                phase: self.phase,
                action: "complete",
            });
        }

        let pending = self.pending.take().ok_or(CoreError::InvalidTransition {
            phase: CheckoutPhase::Submitting,
            action: "complete without a pending sale",
        })?;
        self.phase = CheckoutPhase::Succeeded;
        info!(total = %pending.total, "Checkout recorded");
        Ok(pending)
    }

    /// The submission failed. The machine returns to `Idle`; the cart was
    /// never touched, so the cashier can retry.
    pub fn fail(&mut self) -> CoreResult<()> {
        if self.phase != CheckoutPhase::Submitting {
            return Err(CoreError::InvalidTransition {
                phase: self.phase,
                action: "fail",
            });
        }

        self.pending = None;
        self.phase = CheckoutPhase::Idle;
        warn!("Checkout failed, back to idle");
        Ok(())
    }

    /// Back to `Idle` after the post-sale reset.
    pub fn reset(&mut self) {
        self.pending = None;
        self.phase = CheckoutPhase::Idle;
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
