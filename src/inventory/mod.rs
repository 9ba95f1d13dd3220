// src/inventory/mod.rs
// Durable discount-code pool with at-most-once issuance

pub mod snapshot;

use parking_lot::Mutex;
use std::path::PathBuf;
use tracing::{debug, info};

use crate::error::InventoryResult;
pub use snapshot::InventorySnapshot;

/// Live totals for the pool partition
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InventoryCounts {
    pub available: usize,
    pub used: usize,
}

impl InventoryCounts {
    pub fn total(&self) -> usize {
        self.available + self.used
    }
}

/// Owns the code pool. Every read and state transition goes through one
/// mutex, so checking availability and claiming a code is a single critical
/// section and a code can never be handed to two callers.
pub struct CodeInventory {
    snapshot_path: PathBuf,
    state: Mutex<InventorySnapshot>,
}

impl CodeInventory {
    /// Build the inventory from configuration plus whatever snapshot
    /// survives at `snapshot_path`.
    pub fn load(
        configured: &[String],
        deprecated: &[String],
        snapshot_path: impl Into<PathBuf>,
    ) -> Self {
        let snapshot_path = snapshot_path.into();
        let state = InventorySnapshot::load_or_seed(&snapshot_path, configured, deprecated);
        info!(
            "Code inventory ready: {} available, {} used",
            state.available.len(),
            state.used.len()
        );
        Self {
            snapshot_path,
            state: Mutex::new(state),
        }
    }

    /// Claim the oldest available code. Returns Ok(None) when the pool is
    /// exhausted. The claim only sticks if the snapshot write succeeds; on a
    /// failed write the code goes back to the front of the line and the
    /// error is returned.
    pub fn try_issue(&self) -> InventoryResult<Option<String>> {
        let mut state = self.state.lock();
        if state.available.is_empty() {
            debug!("Code pool exhausted, nothing to issue");
            return Ok(None);
        }
        let previous_last = state.last_issued.clone();
        let code = state.available.remove(0);
        state.used.push(code.clone());
        state.last_issued = Some(code.clone());
        if let Err(e) = state.write(&self.snapshot_path) {
            state.used.pop();
            state.available.insert(0, code);
            state.last_issued = previous_last;
            return Err(e);
        }
        info!("Issued a code ({} left in the pool)", state.available.len());
        Ok(Some(code))
    }

    pub fn counts(&self) -> InventoryCounts {
        let state = self.state.lock();
        InventoryCounts {
            available: state.available.len(),
            used: state.used.len(),
        }
    }

    /// Copy of the current partition, mainly for tests and debugging
    pub fn snapshot(&self) -> InventorySnapshot {
        self.state.lock().clone()
    }
}
