//! # Receipt Printers
//!
//! Printing is a side effect after a recorded sale. A printer failure is
//! logged and shown to the cashier but never undoes the sale.

use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing::info;

use till_core::ReceiptDocument;

use crate::config::ReceiptConfig;
use crate::error::ClientResult;

/// Destination for finished receipts.
pub trait ReceiptPrinter {
    fn print(&self, receipt: &ReceiptDocument) -> ClientResult<()>;
}

/// Writes receipts to standard output.
#[derive(Debug, Default, Clone, Copy)]
pub struct StdoutPrinter;

impl ReceiptPrinter for StdoutPrinter {
    fn print(&self, receipt: &ReceiptDocument) -> ClientResult<()> {
        let mut out = std::io::stdout().lock();
        write!(out, "{receipt}")?;
        out.flush()?;
        Ok(())
    }
}

/// Writes each receipt to its own text file.
///
/// File name: `receipt-<number>-<YYYYMMDD-HHMMSS>.txt`.
#[derive(Debug, Clone)]
pub struct FilePrinter {
    dir: PathBuf,
}

impl FilePrinter {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        FilePrinter { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn file_name(receipt: &ReceiptDocument) -> String {
        let stamp = receipt.header.issued_at.format("%Y%m%d-%H%M%S");
        match receipt.header.receipt_number {
            Some(number) => format!("receipt-{number:04}-{stamp}.txt"),
            None => format!("receipt-{stamp}.txt"),
        }
    }
}

impl ReceiptPrinter for FilePrinter {
    fn print(&self, receipt: &ReceiptDocument) -> ClientResult<()> {
        std::fs::create_dir_all(&self.dir)?;
        let path = self.dir.join(Self::file_name(receipt));
        std::fs::write(&path, receipt.to_string())?;
        info!(?path, "Receipt written");
        Ok(())
    }
}

/// Keeps printed receipts in memory. Used by front ends that show the
/// receipt on screen instead of printing it.
#[derive(Debug, Default)]
pub struct MemoryPrinter {
    printed: Mutex<Vec<String>>,
}

impl MemoryPrinter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every receipt printed so far, as text.
    pub fn printed(&self) -> Vec<String> {
        match self.printed.lock() {
            Ok(guard) => guard.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }
}

impl ReceiptPrinter for MemoryPrinter {
    fn print(&self, receipt: &ReceiptDocument) -> ClientResult<()> {
        let mut guard = match self.printed.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        guard.push(receipt.to_string());
        Ok(())
    }
}

impl<P: ReceiptPrinter + ?Sized> ReceiptPrinter for Box<P> {
    fn print(&self, receipt: &ReceiptDocument) -> ClientResult<()> {
        (**self).print(receipt)
    }
}

impl<P: ReceiptPrinter + ?Sized> ReceiptPrinter for std::sync::Arc<P> {
    fn print(&self, receipt: &ReceiptDocument) -> ClientResult<()> {
        (**self).print(receipt)
    }
}

/// Printer for the configured destination.
pub fn printer_for(config: &ReceiptConfig) -> Box<dyn ReceiptPrinter + Send + Sync> {
    match &config.output_dir {
        Some(dir) => Box::new(FilePrinter::new(dir.clone())),
        None => Box::new(StdoutPrinter),
    }
}
