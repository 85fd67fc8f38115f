//! Terminal presenter: notices go to stdout, confirmations read stdin.

use tokio::io::{AsyncBufReadExt, BufReader, Lines, Stdin};
use tokio::sync::Mutex;

use till_client::Presenter;
use till_core::{CartView, ConfirmationPrompt, Notice, NoticeLevel, StockLevel};

pub struct TerminalPresenter {
    input: Mutex<Lines<BufReader<Stdin>>>,
    currency_symbol: String,
}

impl TerminalPresenter {
    pub fn new(currency_symbol: impl Into<String>) -> Self {
        TerminalPresenter {
            input: Mutex::new(BufReader::new(tokio::io::stdin()).lines()),
            currency_symbol: currency_symbol.into(),
        }
    }

    /// Next line of input. `None` at end of input or on a read error.
    pub async fn read_line(&self) -> Option<String> {
        self.input.lock().await.next_line().await.ok().flatten()
    }

    pub fn show_cart(&self, view: &CartView) {
        if view.is_empty() {
            println!("  (cart is empty)");
        } else {
            for line in &view.lines {
                let badge = if line.custom { " [Custom]" } else { "" };
                println!("  {:<8} {}{}  {}", line.id, line.name, badge, line.summary);
            }
        }
        println!("  Total: {}   Change: {}   Items: {}", view.total, view.change, view.item_count);
    }

    pub fn show_stock(&self, levels: &[StockLevel]) {
        if levels.is_empty() {
            println!("  (no stock levels loaded)");
        }
        for level in levels {
            if level.stock <= 0 {
                println!("  {:<8} sold out", level.id);
            } else {
                println!("  {:<8} {}", level.id, level.stock);
            }
        }
    }
}

fn tag(level: NoticeLevel) -> &'static str {
    match level {
        NoticeLevel::Success => "[ok]",
        NoticeLevel::Info => "[i]",
        NoticeLevel::Warning => "[!]",
        NoticeLevel::Error => "[x]",
    }
}

impl Presenter for TerminalPresenter {
    fn notify(&self, notice: Notice) {
        match notice.text {
            Some(text) => println!("{} {}: {}", tag(notice.level), notice.title, text),
            None => println!("{} {}", tag(notice.level), notice.title),
        }
    }

    async fn confirm(&self, prompt: &ConfirmationPrompt) -> bool {
        let symbol = &self.currency_symbol;
        println!(
            "Confirm sale? Total {}  Cash {}  Change {}  [y/N]",
            prompt.total.format_with(symbol),
            prompt.cash.format_with(symbol),
            prompt.change.format_with(symbol),
        );

        matches!(
            self.read_line().await.as_deref().map(str::trim),
            Some("y" | "Y" | "yes" | "Yes" | "YES")
        )
    }
}
