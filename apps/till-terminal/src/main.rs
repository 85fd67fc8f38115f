//! # Till Terminal Entry Point
//!
//! The setup lives in lib.rs so it can be tested.

use clap::Parser;
use std::process::ExitCode;
use tracing::error;

use till_terminal::{init_tracing, run, Cli};

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(error = %e, "Till terminal failed");
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}
