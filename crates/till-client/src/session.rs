//! # POS Session
//!
//! One cashier's screen: the cart, the cash field, the checkout machine and
//! the collaborators that talk to the outside world.
//!
//! ## Checkout Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                          PosSession::checkout                           │
//! │                                                                         │
//! │  Checkout::begin ──► empty cart / cash gate ──► notice, back to Idle    │
//! │        │                                                                │
//! │        ├── Confirm(prompt) ──► Presenter::confirm ──► declined: Idle    │
//! │        ▼                                                                │
//! │  timeout(SaleGateway::submit_sale)                                      │
//! │        │                                                                │
//! │        ├── error / rejected / timeout ──► notice, cart kept, Idle       │
//! │        ▼                                                                │
//! │  receipt from snapshot ──► auto print? ──► success notice               │
//! │        │                                                                │
//! │        ▼  reset_delay_ms                                                │
//! │  reset: cart cleared, machine Idle, stock refreshed                     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every operation takes `&mut self`, so two checkouts cannot overlap within
//! a session; [`Checkout`] rejects re-entry on top of that.

use std::collections::HashMap;
use std::time::Duration;
use tracing::{debug, error, info, warn};

use till_core::pricing::parse_tendered;
use till_core::{
    format_receipt, Cart, CartChange, CartView, Checkout, CheckoutPhase, CheckoutStep,
    ConfirmationPrompt, Merchant, Money, Notice, PendingSale, PosSettings, ReceiptContext,
    ReceiptDocument, StockLevel, StockLimit, DEFAULT_CHECKOUT_TIMEOUT_SECS,
};

use crate::config::TillConfig;
use crate::error::{ClientError, ClientResult};
use crate::gateway::SaleGateway;
use crate::handoff_store::HandoffStore;
use crate::printer::ReceiptPrinter;

/// The screen side of the session: shows notices and asks for confirmation.
pub trait Presenter {
    fn notify(&self, notice: Notice);

    /// Asks the cashier to confirm the sale. `true` proceeds.
    async fn confirm(&self, prompt: &ConfirmationPrompt) -> bool;
}

pub struct PosSession<G, P, U> {
    settings: PosSettings,
    merchant: Merchant,
    checkout_timeout: Duration,

    gateway: G,
    printer: P,
    presenter: U,
    handoff: Option<HandoffStore>,

    cart: Cart,
    checkout: Checkout,
    cash_input: String,
    stock: HashMap<String, i64>,
    last_receipt: Option<ReceiptDocument>,
    receipts_issued: u32,
}

impl<G, P, U> PosSession<G, P, U>
where
    G: SaleGateway,
    P: ReceiptPrinter,
    U: Presenter,
{
    pub fn new(settings: PosSettings, gateway: G, printer: P, presenter: U) -> Self {
        PosSession {
            settings,
            merchant: Merchant::default(),
            checkout_timeout: Duration::from_secs(DEFAULT_CHECKOUT_TIMEOUT_SECS),
            gateway,
            printer,
            presenter,
            handoff: None,
            cart: Cart::new(),
            checkout: Checkout::new(),
            cash_input: String::new(),
            stock: HashMap::new(),
            last_receipt: None,
            receipts_issued: 0,
        }
    }

    /// Session wired from the loaded configuration.
    pub fn from_config(config: &TillConfig, gateway: G, printer: P, presenter: U) -> Self {
        let session = Self::new(config.pos.clone(), gateway, printer, presenter)
            .with_merchant(config.receipt.merchant.clone())
            .with_checkout_timeout(config.backend.checkout_timeout());

        match config.handoff_path() {
            Some(path) => session.with_handoff(HandoffStore::new(path)),
            None => session,
        }
    }

    pub fn with_merchant(mut self, merchant: Merchant) -> Self {
        self.merchant = merchant;
        self
    }

    pub fn with_checkout_timeout(mut self, timeout: Duration) -> Self {
        self.checkout_timeout = timeout;
        self
    }

    pub fn with_handoff(mut self, store: HandoffStore) -> Self {
        self.handoff = Some(store);
        self
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    pub fn phase(&self) -> CheckoutPhase {
        self.checkout.phase()
    }

    pub fn settings(&self) -> &PosSettings {
        &self.settings
    }

    pub fn presenter(&self) -> &U {
        &self.presenter
    }

    pub fn printer(&self) -> &P {
        &self.printer
    }

    /// Receipt of the most recent recorded sale, for reprints.
    pub fn last_receipt(&self) -> Option<&ReceiptDocument> {
        self.last_receipt.as_ref()
    }

    /// Last known stock for a product, from the most recent refresh or lookup.
    pub fn known_stock(&self, id: &str) -> Option<i64> {
        self.stock.get(id).copied()
    }

    /// The stock snapshot, ordered by id.
    pub fn stock_levels(&self) -> Vec<StockLevel> {
        let mut levels: Vec<StockLevel> = self
            .stock
            .iter()
            .map(|(id, stock)| StockLevel {
                id: id.clone(),
                stock: *stock,
            })
            .collect();
        levels.sort_by(|a, b| a.id.cmp(&b.id));
        levels
    }

    /// Limit to enforce for `id`. A known stock figure overrides the caller's
    /// finite limit; untracked items stay unlimited.
    fn stock_limit_for(&self, id: &str, requested: StockLimit) -> StockLimit {
        match (requested, self.known_stock(id)) {
            (StockLimit::Unlimited, _) => StockLimit::Unlimited,
            (StockLimit::Finite(_), Some(stock)) => StockLimit::Finite(stock),
            (limit, None) => limit,
        }
    }

    /// Parsed cash field. `None` means "not a number".
    pub fn tendered(&self) -> Option<Money> {
        parse_tendered(&self.cash_input)
    }

    pub fn view(&self) -> CartView {
        CartView::render(&self.cart, self.tendered(), &self.merchant.currency_symbol)
    }

    // =========================================================================
    // Lifecycle
    // =========================================================================

    /// Opens the session: seeds the hand-off item and loads stock.
    pub async fn start(&mut self) -> ClientResult<()> {
        self.ensure_enabled()?;
        self.seed_from_handoff();
        self.refresh_stock().await;
        info!(lines = self.cart.len(), "POS session started");
        Ok(())
    }

    fn seed_from_handoff(&mut self) {
        let Some(store) = &self.handoff else {
            return;
        };

        let pending = match store.take() {
            Ok(Some(pending)) => pending,
            Ok(None) => return,
            Err(e) => {
                warn!(error = %e, "Could not read pending item");
                return;
            }
        };

        match pending.into_line_item() {
            Ok(line) => {
                let text = format!("{} × {}", line.name, line.quantity);
                let change = self.cart.seed(line);
                debug!(?change, "Cart seeded from pricing");
                self.presenter
                    .notify(Notice::success("Item Added from Pricing").with_text(text));
            }
            Err(e) => {
                warn!(error = %e, "Rejected pending item");
                self.presenter.notify(Notice::from(&e));
            }
        }
    }

    /// Reloads stock levels. Failures are logged and ignored.
    pub async fn refresh_stock(&mut self) {
        match self.gateway.fetch_stock().await {
            Ok(levels) => {
                debug!(count = levels.len(), "Stock refreshed");
                self.stock = levels.into_iter().map(|l| (l.id, l.stock)).collect();
            }
            Err(e) => warn!(error = %e, "Stock refresh failed, keeping previous levels"),
        }
    }

    /// Clears the sale and starts over.
    pub async fn reset(&mut self) {
        self.cart.clear();
        self.checkout.reset();
        self.cash_input.clear();
        self.refresh_stock().await;
        debug!("POS session reset");
    }

    // =========================================================================
    // Cart Operations
    // =========================================================================

    /// Looks the product up on the backend and adds one unit.
    pub async fn add_product(&mut self, id: &str) -> ClientResult<CartChange> {
        self.ensure_enabled()?;

        let product = match self.gateway.fetch_product(id).await {
            Ok(product) => product,
            Err(e) => return Err(self.report(e)),
        };

        self.stock.insert(product.id.clone(), product.stock);
        self.add_item(&product.id, &product.name, product.price, product.stock_limit())
    }

    /// Adds one unit of an item the screen already knows about.
    ///
    /// The limit is checked against the last stock snapshot when the
    /// product is in it, so a refresh decides what can still be sold.
    pub fn add_item(
        &mut self,
        id: &str,
        name: &str,
        price: Money,
        stock_limit: StockLimit,
    ) -> ClientResult<CartChange> {
        self.ensure_enabled()?;
        let stock_limit = self.stock_limit_for(id, stock_limit);
        self.cart
            .add_item(id, name, price, stock_limit)
            .map_err(|e| self.report(e.into()))
    }

    pub fn change_quantity(&mut self, id: &str, delta: i64) -> ClientResult<CartChange> {
        self.ensure_enabled()?;
        let change = self
            .cart
            .change_quantity(id, delta)
            .map_err(|e| self.report(e.into()))?;

        if let Some(notice) = Notice::for_change(&change) {
            self.presenter.notify(notice);
        }
        Ok(change)
    }

    /// Replaces the cash field's text.
    pub fn set_cash(&mut self, input: &str) {
        self.cash_input = input.to_string();
    }

    // =========================================================================
    // Checkout
    // =========================================================================

    /// Runs one checkout attempt to completion.
    ///
    /// Returns the receipt when the sale was recorded, `None` when the
    /// cashier declined the confirmation. Every failure has already been
    /// shown through the presenter when `Err` comes back, and the cart is
    /// untouched.
    pub async fn checkout(&mut self) -> ClientResult<Option<ReceiptDocument>> {
        self.ensure_enabled()?;

        let tendered = self.tendered();
        let step = self
            .checkout
            .begin(&self.cart, tendered, &self.settings)
            .map_err(|e| self.report(e.into()))?;

        let request = match step {
            CheckoutStep::Submit(request) => request,
            CheckoutStep::Confirm(prompt) => {
                let accepted = self.presenter.confirm(&prompt).await;
                match self.checkout.confirm(accepted)? {
                    Some(request) => request,
                    None => {
                        info!("Checkout cancelled by cashier");
                        return Ok(None);
                    }
                }
            }
        };

        let submitted =
            match tokio::time::timeout(self.checkout_timeout, self.gateway.submit_sale(&request))
                .await
            {
                Ok(result) => result,
                Err(_) => {
                    error!(timeout = ?self.checkout_timeout, "Checkout timed out");
                    Err(ClientError::Timeout(self.checkout_timeout))
                }
            };

        if let Err(e) = submitted {
            self.checkout.fail()?;
            return Err(self.report(e));
        }

        let sale = self.checkout.succeed()?;
        let receipt = self.issue_receipt(&sale);

        if self.settings.auto_print_receipt {
            if let Err(e) = self.printer.print(&receipt) {
                error!(error = %e, "Receipt printing failed");
                self.presenter.notify(Notice::from(&e));
            }
        }

        let change = sale.cash() - sale.total;
        self.presenter.notify(
            Notice::success("Checkout Complete")
                .with_text(format!("Change: {}", change.format_with(&self.merchant.currency_symbol))),
        );
        self.last_receipt = Some(receipt.clone());

        tokio::time::sleep(Duration::from_millis(self.settings.reset_delay_ms)).await;
        self.reset().await;

        Ok(Some(receipt))
    }

    /// Prints the last receipt again.
    pub fn reprint(&self) -> ClientResult<bool> {
        match &self.last_receipt {
            Some(receipt) => {
                self.printer.print(receipt)?;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    fn issue_receipt(&mut self, sale: &PendingSale) -> ReceiptDocument {
        self.receipts_issued += 1;
        let ctx = ReceiptContext {
            merchant: self.merchant.clone(),
            issued_at: chrono::Local::now().naive_local(),
            receipt_number: self.receipts_issued,
        };
        format_receipt(
            self.settings.receipt_template,
            &sale.items,
            sale.total,
            sale.cash(),
            &ctx,
        )
    }

    // =========================================================================
    // Helpers
    // =========================================================================

    fn ensure_enabled(&self) -> ClientResult<()> {
        if self.settings.enable_pos {
            Ok(())
        } else {
            Err(self.report(ClientError::PosDisabled))
        }
    }

    /// Shows the error to the cashier and hands it back for propagation.
    fn report(&self, err: ClientError) -> ClientError {
        self.presenter.notify(Notice::from(&err));
        err
    }
}
