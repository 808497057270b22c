//! Device-local donation ledger.
//!
//! Remembers which requests this device has committed to, backing the
//! "my commitments" view. The ledger is private per-device state with no
//! consistency requirement against the shared store: ids stay recorded
//! even if the request later disappears from the database. Reads and
//! writes are synchronous against a small JSON file.

use crate::errors::Result;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// The list of request ids this device has donated to.
#[derive(Debug)]
pub struct DonationLedger {
    path: PathBuf,
    ids: Vec<String>,
}

impl DonationLedger {
    /// Loads the ledger from `path`. A missing file reads as an empty
    /// ledger; a present file must contain a JSON array of ids.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let ids = if path.exists() {
            serde_json::from_str(&fs::read_to_string(&path)?)?
        } else {
            Vec::new()
        };
        debug!(path = %path.display(), count = ids.len(), "Donation ledger loaded");
        Ok(Self { path, ids })
    }

    /// Records a commitment to `request_id` and persists the ledger.
    /// Recording the same id again is a no-op; returns whether the id
    /// was newly added.
    pub fn record(&mut self, request_id: &str) -> Result<bool> {
        if self.contains(request_id) {
            return Ok(false);
        }
        self.ids.push(request_id.to_string());
        self.save()?;
        Ok(true)
    }

    /// Whether this device has committed to `request_id`.
    pub fn contains(&self, request_id: &str) -> bool {
        self.ids.iter().any(|id| id == request_id)
    }

    /// All recorded request ids, in commitment order.
    pub fn ids(&self) -> &[String] {
        &self.ids
    }

    fn save(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        fs::write(&self.path, serde_json::to_string(&self.ids)?)?;
        Ok(())
    }
}
