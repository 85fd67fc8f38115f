//! # till-client: I/O Layer for Till POS
//!
//! Drives the pure rules in `till-core` against the real world: the
//! sale-recording backend, the hand-off file, the receipt printer and the
//! configuration on disk.
//!
//! ## Architecture Overview
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         till-client                                     │
//! │                                                                         │
//! │  ┌──────────────────────────────────────────────────────────────────┐  │
//! │  │                    PosSession (one per screen)                   │  │
//! │  │   Cart + Checkout machine + cash field + stock cache             │  │
//! │  └───────┬───────────────┬────────────────┬───────────────┬─────────┘  │
//! │          ▼               ▼                ▼               ▼            │
//! │  ┌──────────────┐ ┌──────────────┐ ┌──────────────┐ ┌─────────────┐    │
//! │  │ SaleGateway  │ │ HandoffStore │ │ReceiptPrinter│ │  Presenter  │    │
//! │  │ (reqwest)    │ │ (JSON file)  │ │ file/stdout  │ │ notices and │    │
//! │  │              │ │ take = read  │ │              │ │ confirmation│    │
//! │  │              │ │ + delete     │ │              │ │             │    │
//! │  └──────────────┘ └──────────────┘ └──────────────┘ └─────────────┘    │
//! │                                                                         │
//! │  TillConfig: defaults → till.toml → TILL_* environment → validate       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//! - [`config`] - Configuration loading
//! - [`error`] - Client error types and their notices
//! - [`gateway`] - Backend calls over HTTP
//! - [`handoff_store`] - The pending item file
//! - [`printer`] - Receipt destinations
//! - [`session`] - The POS session driver

// Sessions run on a single task; the async trait methods need no Send bound.
#![allow(async_fn_in_trait)]

pub mod config;
pub mod error;
pub mod gateway;
pub mod handoff_store;
pub mod printer;
pub mod session;

pub use config::TillConfig;
pub use error::{ClientError, ClientResult};
pub use gateway::{HttpGateway, SaleGateway};
pub use handoff_store::HandoffStore;
pub use printer::{printer_for, FilePrinter, MemoryPrinter, ReceiptPrinter, StdoutPrinter};
pub use session::{PosSession, Presenter};
