//! # Receipt Formatter
//!
//! Turns a finished sale into a printable document. Pure: the timestamp and
//! receipt number come in through [`ReceiptContext`], so the same inputs
//! always produce the same text.
//!
//! ## Templates
//! ```text
//! compact (32 cols)                  detailed (42 cols)
//! ─────────────────                  ──────────────────
//!   AE LaserCraft                          AE LaserCraft
//!  Custom Laser Engraving               Custom Laser Engraving
//! 2026-10-16 14:03                          Philippines
//! ------------------------------     Receipt #: 0042
//! Coaster                            Date: 2026-10-16 14:03
//!   ₱100.00 x 2          ₱200.00     ------------------------------------------
//! Name Tag *                         Item               Qty     Price     Total
//! ...                                ...
//! ```
//!
//! Change on the receipt is `cash - total` and may be negative. The live
//! display clamps at zero; the receipt does not.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::money::Money;
use crate::types::LineItem;
use crate::DEFAULT_CURRENCY_SYMBOL;

const COMPACT_WIDTH: usize = 32;
const DETAILED_WIDTH: usize = 42;

const DETAILED_QTY_COL: usize = 4;
const DETAILED_PRICE_COL: usize = 10;
const DETAILED_TOTAL_COL: usize = 10;

// =============================================================================
// Template
// =============================================================================

/// Receipt layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", from = "String")]
pub enum ReceiptTemplate {
    #[default]
    Compact,
    Detailed,
}

impl ReceiptTemplate {
    /// Resolves a configured template name. Anything unrecognized is compact.
    pub fn from_name(value: Option<&str>) -> Self {
        match value.map(str::trim).map(str::to_ascii_lowercase).as_deref() {
            Some("detailed") => ReceiptTemplate::Detailed,
            _ => ReceiptTemplate::Compact,
        }
    }

    pub const fn width(&self) -> usize {
        match self {
            ReceiptTemplate::Compact => COMPACT_WIDTH,
            ReceiptTemplate::Detailed => DETAILED_WIDTH,
        }
    }

    fn custom_marker(&self) -> &'static str {
        match self {
            ReceiptTemplate::Compact => " *",
            ReceiptTemplate::Detailed => " (Custom)",
        }
    }

    fn default_footer(&self, merchant: &str) -> Vec<String> {
        match self {
            ReceiptTemplate::Compact => vec![
                "Thank you for your purchase!".to_string(),
                format!("FB / IG / TikTok: {merchant}"),
            ],
            ReceiptTemplate::Detailed => vec![
                "Thank you for supporting small business!".to_string(),
                format!("Follow us: Facebook / Instagram / TikTok @{merchant}"),
            ],
        }
    }
}

impl From<String> for ReceiptTemplate {
    fn from(value: String) -> Self {
        ReceiptTemplate::from_name(Some(&value))
    }
}

impl fmt::Display for ReceiptTemplate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReceiptTemplate::Compact => write!(f, "compact"),
            ReceiptTemplate::Detailed => write!(f, "detailed"),
        }
    }
}

// =============================================================================
// Inputs
// =============================================================================

/// Shop identity printed on the receipt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Merchant {
    pub name: String,
    pub tagline: Option<String>,
    pub location: Option<String>,
    /// Overrides the template's closing lines when not empty.
    pub footer: Vec<String>,
    pub currency_symbol: String,
}

impl Default for Merchant {
    fn default() -> Self {
        Merchant {
            name: "AE LaserCraft".to_string(),
            tagline: Some("Custom Laser Engraving".to_string()),
            location: Some("Philippines".to_string()),
            footer: Vec::new(),
            currency_symbol: DEFAULT_CURRENCY_SYMBOL.to_string(),
        }
    }
}

/// Everything the formatter needs that is not part of the sale.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReceiptContext {
    pub merchant: Merchant,
    pub issued_at: NaiveDateTime,
    pub receipt_number: u32,
}

// =============================================================================
// Document
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReceiptHeader {
    pub merchant: String,
    pub tagline: Option<String>,
    pub location: Option<String>,
    pub issued_at: NaiveDateTime,
    /// Printed by the detailed template only.
    pub receipt_number: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReceiptLine {
    pub name: String,
    pub custom: bool,
    pub quantity: u32,
    pub unit_price: Money,
    pub line_total: Money,
}

/// A formatted receipt. `Display` renders it as fixed-width text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReceiptDocument {
    pub template: ReceiptTemplate,
    pub currency_symbol: String,
    pub header: ReceiptHeader,
    pub lines: Vec<ReceiptLine>,
    pub total: Money,
    pub cash: Money,
    /// `cash - total`, negative when the customer paid short.
    pub change: Money,
    pub footer: Vec<String>,
}

/// Builds the receipt for a recorded sale.
///
/// ## Example
/// ```rust
/// use chrono::NaiveDate;
/// use till_core::money::Money;
/// use till_core::receipt::{format_receipt, Merchant, ReceiptContext, ReceiptTemplate};
/// use till_core::types::{ItemOrigin, LineItem, StockLimit};
///
/// let items = vec![LineItem {
///     id: "1".into(),
///     name: "Coaster".into(),
///     price: Money::from_cents(10_000),
///     quantity: 2,
///     stock_limit: StockLimit::Finite(5),
///     origin: ItemOrigin::Catalog,
/// }];
/// let ctx = ReceiptContext {
///     merchant: Merchant::default(),
///     issued_at: NaiveDate::from_ymd_opt(2026, 1, 2).unwrap().and_hms_opt(9, 30, 0).unwrap(),
///     receipt_number: 1,
/// };
///
/// let doc = format_receipt(
///     ReceiptTemplate::Compact,
///     &items,
///     Money::from_cents(20_000),
///     Money::from_cents(15_000),
///     &ctx,
/// );
/// assert_eq!(doc.change.cents(), -5_000);
/// assert!(doc.to_string().contains("-₱50.00"));
/// ```
pub fn format_receipt(
    template: ReceiptTemplate,
    items: &[LineItem],
    total: Money,
    cash: Money,
    ctx: &ReceiptContext,
) -> ReceiptDocument {
    let merchant = &ctx.merchant;
    let detailed = template == ReceiptTemplate::Detailed;

    let header = ReceiptHeader {
        merchant: merchant.name.clone(),
        tagline: merchant.tagline.clone(),
        location: merchant.location.clone().filter(|_| detailed),
        issued_at: ctx.issued_at,
        receipt_number: detailed.then_some(ctx.receipt_number),
    };

    let lines = items
        .iter()
        .map(|item| ReceiptLine {
            name: item.name.clone(),
            custom: item.origin.is_custom(),
            quantity: item.quantity,
            unit_price: item.price,
            line_total: item.line_total(),
        })
        .collect();

    let footer = if merchant.footer.is_empty() {
        template.default_footer(&merchant.name)
    } else {
        merchant.footer.clone()
    };

    ReceiptDocument {
        template,
        currency_symbol: merchant.currency_symbol.clone(),
        header,
        lines,
        total,
        cash,
        change: cash - total,
        footer,
    }
}

// =============================================================================
// Text Rendering
// =============================================================================

fn center(text: &str, width: usize) -> String {
    let len = text.chars().count();
    if len >= width {
        return text.to_string();
    }
    format!("{}{}", " ".repeat((width - len) / 2), text)
}

/// Greedy word wrap. A single word longer than `width` gets a line of its own.
fn wrap(text: &str, width: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();
    for word in text.split_whitespace() {
        if !current.is_empty() && current.chars().count() + 1 + word.chars().count() > width {
            lines.push(std::mem::take(&mut current));
        }
        if !current.is_empty() {
            current.push(' ');
        }
        current.push_str(word);
    }
    if !current.is_empty() {
        lines.push(current);
    }
    lines
}

/// `left` and `right` on one line, `right` flush with the edge.
fn spread(left: &str, right: &str, width: usize) -> String {
    let used = left.chars().count() + right.chars().count();
    let gap = width.saturating_sub(used).max(1);
    format!("{left}{}{right}", " ".repeat(gap))
}

fn pad_left(text: &str, width: usize) -> String {
    let len = text.chars().count();
    format!("{}{text}", " ".repeat(width.saturating_sub(len)))
}

fn pad_right(text: &str, width: usize) -> String {
    let len = text.chars().count();
    format!("{text}{}", " ".repeat(width.saturating_sub(len)))
}

impl ReceiptDocument {
    fn money(&self, amount: Money) -> String {
        amount.format_with(&self.currency_symbol)
    }

    fn label(&self, line: &ReceiptLine) -> String {
        if line.custom {
            format!("{}{}", line.name, self.template.custom_marker())
        } else {
            line.name.clone()
        }
    }

    fn write_compact_lines(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let width = self.template.width();
        for line in &self.lines {
            writeln!(f, "{}", self.label(line))?;
            let each = format!("  {} x {}", self.money(line.unit_price), line.quantity);
            writeln!(f, "{}", spread(&each, &self.money(line.line_total), width))?;
        }
        Ok(())
    }

    fn write_detailed_lines(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let item_col = DETAILED_WIDTH - DETAILED_QTY_COL - DETAILED_PRICE_COL - DETAILED_TOTAL_COL;
        let row = |item: &str, qty: &str, price: &str, total: &str| {
            format!(
                "{}{}{}{}",
                pad_right(item, item_col),
                pad_left(qty, DETAILED_QTY_COL),
                pad_left(price, DETAILED_PRICE_COL),
                pad_left(total, DETAILED_TOTAL_COL),
            )
        };

        writeln!(f, "{}", row("Item", "Qty", "Price", "Total"))?;
        writeln!(f, "{}", "-".repeat(DETAILED_WIDTH))?;

        for line in &self.lines {
            let label = self.label(line);
            let qty = line.quantity.to_string();
            let price = self.money(line.unit_price);
            let total = self.money(line.line_total);

            // Long names get their own line so the numbers stay aligned.
            if label.chars().count() >= item_col {
                writeln!(f, "{label}")?;
                writeln!(f, "{}", row("", &qty, &price, &total))?;
            } else {
                writeln!(f, "{}", row(&label, &qty, &price, &total))?;
            }
        }
        Ok(())
    }
}

impl fmt::Display for ReceiptDocument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let width = self.template.width();
        let rule = "-".repeat(width);
        let stamp = self.header.issued_at.format("%Y-%m-%d %H:%M").to_string();

        writeln!(f, "{}", center(&self.header.merchant, width))?;
        if let Some(tagline) = &self.header.tagline {
            writeln!(f, "{}", center(tagline, width))?;
        }
        if let Some(location) = &self.header.location {
            writeln!(f, "{}", center(location, width))?;
        }

        match self.header.receipt_number {
            Some(number) => {
                writeln!(f, "Receipt #: {number:04}")?;
                writeln!(f, "Date: {stamp}")?;
            }
            None => writeln!(f, "{stamp}")?,
        }
        writeln!(f, "{rule}")?;

        match self.template {
            ReceiptTemplate::Compact => self.write_compact_lines(f)?,
            ReceiptTemplate::Detailed => self.write_detailed_lines(f)?,
        }

        writeln!(f, "{rule}")?;
        writeln!(f, "{}", spread("Total", &self.money(self.total), width))?;
        writeln!(f, "{}", spread("Cash", &self.money(self.cash), width))?;
        writeln!(f, "{}", spread("Change", &self.money(self.change), width))?;
        writeln!(f, "{rule}")?;

        for line in self.footer.iter().flat_map(|line| wrap(line, width)) {
            writeln!(f, "{}", center(&line, width))?;
        }
        Ok(())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
