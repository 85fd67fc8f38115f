//! # Till Terminal
//!
//! Line-oriented front end for Till POS. Everything the browser screen does
//! (tap a product, change quantities, type the cash, check out) is a typed
//! command here.
//!
//! ## Module Organization
//! ```text
//! till_terminal/
//! ├── lib.rs          ◄─── CLI, startup, the session loop
//! ├── command.rs      ◄─── Parsing of `till>` input lines
//! └── presenter.rs    ◄─── Notices to stdout, confirmations from stdin
//! ```
//!
//! ## Startup Sequence
//! 1. Initialize tracing (stderr, `RUST_LOG` or `info,till=debug`)
//! 2. Load configuration (defaults → till.toml → `TILL_*`)
//! 3. Open the session: pick up the hand-off item, load stock
//! 4. Read commands until `quit` or end of input

pub mod command;
pub mod presenter;

use clap::{Args, Parser, Subcommand};
use std::io::Write;
use std::path::PathBuf;
use thiserror::Error;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use till_client::{
    printer_for, ClientError, HandoffStore, HttpGateway, PosSession, Presenter, ReceiptPrinter,
    TillConfig,
};
use till_core::pricing::PricingQuote;
use till_core::{CoreError, Notice};

use command::{PosCommand, HELP};
use presenter::TerminalPresenter;

// =============================================================================
// Command Line
// =============================================================================

/// Till POS - point-of-sale cart and checkout.
#[derive(Parser, Debug)]
#[command(name = "till-terminal")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Path to till.toml (defaults to the platform config directory)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the POS (the default)
    Run,

    /// Price a custom item and hand it to the next POS session
    Quote(QuoteArgs),

    /// Print the effective configuration
    Config,
}

#[derive(Args, Debug)]
pub struct QuoteArgs {
    /// Material / product id
    #[arg(long)]
    pub id: String,

    /// Name shown in the cart
    #[arg(long)]
    pub name: String,

    #[arg(long, default_value_t = 0.0)]
    pub material: f64,

    #[arg(long, default_value_t = 0.0)]
    pub laser_minutes: f64,

    /// Cost per laser minute
    #[arg(long, default_value_t = 0.0)]
    pub laser_rate: f64,

    #[arg(long, default_value_t = 0.0)]
    pub labor: f64,

    #[arg(long, default_value_t = 0.0)]
    pub overhead: f64,

    /// Discount in percent, applied to the unit price
    #[arg(long, default_value_t = 0.0)]
    pub discount: f64,

    #[arg(long, default_value_t = 1)]
    pub quantity: u32,
}

impl QuoteArgs {
    fn quote(&self) -> PricingQuote {
        PricingQuote {
            material_cost: self.material,
            laser_minutes: self.laser_minutes,
            laser_rate: self.laser_rate,
            labor_cost: self.labor,
            overhead: self.overhead,
            discount_percent: self.discount,
            quantity: self.quantity,
        }
    }
}

// =============================================================================
// Errors
// =============================================================================

#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Client(#[from] ClientError),

    #[error(transparent)]
    Core(#[from] CoreError),

    #[error("Could not render configuration: {0}")]
    Render(#[from] toml::ser::Error),

    #[error("No hand-off location: set [handoff] path or TILL_HANDOFF_PATH")]
    NoHandoffPath,
}

pub type AppResult<T> = Result<T, AppError>;

// =============================================================================
// Startup
// =============================================================================

/// Initializes the tracing subscriber for structured logging.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages
/// - `RUST_LOG=till=trace` - Show trace for till crates only
/// - Default: `info,till=debug`
pub fn init_tracing() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info,till=debug"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Runs the selected subcommand.
pub async fn run(cli: Cli) -> AppResult<()> {
    let config = TillConfig::load(cli.config)?;
    debug!(backend = %config.backend.base_url, "Configuration loaded");

    match cli.command.unwrap_or(Commands::Run) {
        Commands::Run => run_pos(&config).await,
        Commands::Quote(args) => run_quote(&config, &args),
        Commands::Config => {
            println!("{}", toml::to_string_pretty(&config)?);
            Ok(())
        }
    }
}

/// Prices a custom item and deposits it for the next session.
pub fn run_quote(config: &TillConfig, args: &QuoteArgs) -> AppResult<()> {
    let pending = args.quote().into_pending(&args.id, &args.name)?;
    let path = config.handoff_path().ok_or(AppError::NoHandoffPath)?;
    HandoffStore::new(path).deposit(&pending)?;

    println!(
        "{} × {} at {:.2} each. It will be added when the POS starts.",
        pending.name, pending.quantity, pending.unit_price
    );
    Ok(())
}

// =============================================================================
// Session Loop
// =============================================================================

type TerminalSession = PosSession<
    HttpGateway,
    Box<dyn ReceiptPrinter + Send + Sync>,
    TerminalPresenter,
>;

/// Runs the interactive POS until `quit` or end of input.
pub async fn run_pos(config: &TillConfig) -> AppResult<()> {
    let presenter = TerminalPresenter::new(config.receipt.merchant.currency_symbol.clone());
    let mut session: TerminalSession = PosSession::from_config(
        config,
        HttpGateway::from_config(&config.backend),
        printer_for(&config.receipt),
        presenter,
    );

    match session.start().await {
        Ok(()) => {}
        // Already shown to the cashier.
        Err(ClientError::PosDisabled) => return Ok(()),
        Err(e) => return Err(e.into()),
    }

    info!(backend = %config.backend.base_url, "Till POS ready");
    println!("Till POS ready. Type 'help' for commands.");
    if !session.cart().is_empty() {
        session.presenter().show_cart(&session.view());
    }

    loop {
        print!("till> ");
        // A failed flush only loses the prompt.
        let _ = std::io::stdout().flush();

        let Some(line) = session.presenter().read_line().await else {
            break;
        };

        match command::parse(&line) {
            Ok(None) => {}
            Ok(Some(PosCommand::Quit)) => break,
            Ok(Some(cmd)) => dispatch(&mut session, cmd).await,
            Err(e) => println!("{e}"),
        }
    }

    info!("Till POS closed");
    Ok(())
}

async fn dispatch(session: &mut TerminalSession, cmd: PosCommand) {
    match cmd {
        PosCommand::Add(id) => {
            if session.add_product(&id).await.is_ok() {
                session.presenter().show_cart(&session.view());
            }
        }
        PosCommand::ChangeQuantity { id, delta } => {
            if session.change_quantity(&id, delta).is_ok() {
                session.presenter().show_cart(&session.view());
            }
        }
        PosCommand::Cash(text) => {
            session.set_cash(&text);
            let view = session.view();
            println!("  Total: {}   Change: {}", view.total, view.change);
        }
        PosCommand::Checkout => match session.checkout().await {
            Ok(Some(receipt)) => {
                if !session.settings().auto_print_receipt {
                    print!("{receipt}");
                }
            }
            Ok(None) => println!("Checkout cancelled"),
            Err(e) => debug!(error = %e, "Checkout did not complete"),
        },
        PosCommand::Cart => session.presenter().show_cart(&session.view()),
        PosCommand::Clear => {
            session.reset().await;
            println!("Sale cleared");
        }
        PosCommand::Refresh => {
            session.refresh_stock().await;
            session.presenter().show_stock(&session.stock_levels());
        }
        PosCommand::Stock => session.presenter().show_stock(&session.stock_levels()),
        PosCommand::Reprint => match session.reprint() {
            Ok(true) => {}
            Ok(false) => println!("No receipt to reprint"),
            Err(e) => session.presenter().notify(Notice::from(&e)),
        },
        PosCommand::Help => println!("{HELP}"),
        PosCommand::Quit => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_defaults_to_run() {
        let cli = Cli::parse_from(["till-terminal"]);
        assert!(cli.command.is_none());
        assert!(cli.config.is_none());
    }

    #[test]
    fn test_quote_args() {
        let cli = Cli::parse_from([
            "till-terminal",
            "quote",
            "--id",
            "7",
            "--name",
            "Birch Plaque",
            "--material",
            "120",
            "--laser-minutes",
            "10",
            "--laser-rate",
            "5",
            "--labor",
            "80",
            "--overhead",
            "50",
            "--discount",
            "10",
            "--quantity",
            "4",
            "--config",
            "/tmp/till.toml",
        ]);

        assert_eq!(cli.config, Some(PathBuf::from("/tmp/till.toml")));
        let Some(Commands::Quote(args)) = cli.command else {
            panic!("expected quote");
        };
        let pending = args.quote().into_pending(&args.id, &args.name).unwrap();
        assert_eq!(pending.unit_price, 67.5);
    }

    #[test]
    fn test_quote_deposits_handoff() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("handoff").join("pending_item.json");

        let mut config = TillConfig::default();
        config.handoff.path = Some(path.clone());

        let args = QuoteArgs {
            id: "7".into(),
            name: "Birch Plaque".into(),
            material: 100.0,
            laser_minutes: 0.0,
            laser_rate: 0.0,
            labor: 0.0,
            overhead: 0.0,
            discount: 0.0,
            quantity: 2,
        };
        run_quote(&config, &args).unwrap();

        let taken = HandoffStore::new(&path).take().unwrap().unwrap();
        assert_eq!(taken.unit_price, 50.0);
        assert_eq!(taken.source.as_deref(), Some("pricing"));
    }
}
