//! # Hand-off Store
//!
//! File-backed slot for the single pending item the pricing calculator
//! deposits. [`HandoffStore::take`] reads and deletes in one step, so an
//! item is seeded into at most one session.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

use till_core::PendingItem;

use crate::error::ClientResult;

#[derive(Debug, Clone)]
pub struct HandoffStore {
    path: PathBuf,
}

impl HandoffStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        HandoffStore { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Writes the pending item, replacing any previous one.
    pub fn deposit(&self, item: &PendingItem) -> ClientResult<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let json = serde_json::to_string(item)?;
        std::fs::write(&self.path, json)?;

        info!(path = ?self.path, id = %item.id, "Pending item deposited");
        Ok(())
    }

    /// Consumes the pending item.
    ///
    /// The file is deleted whether or not it parses; a corrupt record is
    /// logged and dropped rather than retried on every start.
    pub fn take(&self) -> ClientResult<Option<PendingItem>> {
        let contents = match std::fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!(path = ?self.path, "No pending item");
                return Ok(None);
            }
            Err(e) => return Err(e.into()),
        };

        std::fs::remove_file(&self.path)?;

        match PendingItem::from_json(&contents) {
            Ok(item) => {
                info!(id = %item.id, quantity = item.quantity, "Pending item taken");
                Ok(Some(item))
            }
            Err(e) => {
                warn!(path = ?self.path, error = %e, "Discarding unreadable pending item");
                Ok(None)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item() -> PendingItem {
        PendingItem {
            id: "12".into(),
            name: "Acrylic 3mm".into(),
            unit_price: 67.5,
            quantity: 4,
            source: Some("pricing".into()),
        }
    }

    #[test]
    fn test_take_consumes_once() {
        let dir = tempfile::tempdir().unwrap();
        let store = HandoffStore::new(dir.path().join("pending_item.json"));

        store.deposit(&item()).unwrap();
        assert_eq!(store.take().unwrap(), Some(item()));
        assert!(!store.path().exists());
        assert_eq!(store.take().unwrap(), None);
    }

    #[test]
    fn test_missing_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = HandoffStore::new(dir.path().join("nothing.json"));
        assert_eq!(store.take().unwrap(), None);
    }

    #[test]
    fn test_corrupt_record_is_dropped() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("pending_item.json");
        std::fs::write(&path, "{not json").unwrap();

        let store = HandoffStore::new(&path);
        assert_eq!(store.take().unwrap(), None);
        assert!(!path.exists());
    }

    #[test]
    fn test_numeric_id_from_calculator() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("pending_item.json");
        std::fs::write(
            &path,
            r#"{"id":12,"name":"Acrylic","unit_price":67.5,"quantity":4,"source":"pricing"}"#,
        )
        .unwrap();

        let taken = HandoffStore::new(&path).take().unwrap().unwrap();
        assert_eq!(taken.id, "12");
    }
}
