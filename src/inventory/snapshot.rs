// src/inventory/snapshot.rs
// On-disk inventory state: schema, reconciliation, atomic persistence

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::io::Write;
use std::path::Path;
use tracing::{info, warn};

use crate::error::InventoryResult;

/// Durable partition of the code pool. The serde renames are the snapshot
/// file's JSON schema, so changing them is a format change.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InventorySnapshot {
    #[serde(rename = "available_codes")]
    pub available: Vec<String>,
    #[serde(rename = "used_codes")]
    pub used: Vec<String>,
    #[serde(rename = "last_given_code", default)]
    pub last_issued: Option<String>,
}

impl InventorySnapshot {
    /// Fresh state with every configured code waiting in line
    pub fn seeded(configured: &[String]) -> Self {
        Self {
            available: configured.to_vec(),
            used: Vec::new(),
            last_issued: None,
        }
    }

    /// Read the snapshot at `path` and reconcile it with the current
    /// configuration. A missing or unreadable file falls back to a seeded
    /// state; snapshot trouble never stops startup.
    pub fn load_or_seed(path: &Path, configured: &[String], deprecated: &[String]) -> Self {
        match Self::read(path) {
            Ok(Some(persisted)) => persisted.reconciled(configured, deprecated),
            Ok(None) => {
                info!(
                    "No inventory snapshot at {}, seeding from configuration",
                    path.display()
                );
                Self::seeded(configured)
            }
            Err(e) => {
                warn!(
                    "Discarding unreadable inventory snapshot at {}: {}",
                    path.display(),
                    e
                );
                Self::seeded(configured)
            }
        }
    }

    fn read(path: &Path) -> anyhow::Result<Option<Self>> {
        let raw = match fs::read_to_string(path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        Ok(Some(serde_json::from_str(&raw)?))
    }

    /// Apply configuration changes to a persisted snapshot: drop codes that
    /// are no longer configured or are now deprecated, keep the survivors in
    /// their recorded positions, and queue newly configured codes at the
    /// back of the available line. A hand-edited file may list a code twice
    /// or on both sides of the partition; each code keeps exactly one slot,
    /// and a used entry outranks an available one.
    fn reconciled(self, configured: &[String], deprecated: &[String]) -> Self {
        let keep = |code: &str| {
            configured.iter().any(|c| c == code) && !deprecated.iter().any(|d| d == code)
        };
        let mut seen: HashSet<String> = HashSet::new();
        let used: Vec<String> = self
            .used
            .into_iter()
            .filter(|c| keep(c) && seen.insert(c.clone()))
            .collect();
        let mut available: Vec<String> = self
            .available
            .into_iter()
            .filter(|c| keep(c) && seen.insert(c.clone()))
            .collect();
        for code in configured {
            if deprecated.iter().any(|d| d == code) {
                continue;
            }
            if seen.insert(code.clone()) {
                available.push(code.clone());
            }
        }
        Self {
            available,
            used,
            last_issued: self.last_issued,
        }
    }

    /// Persist atomically: write a temp file next to the target, flush it to
    /// disk, then rename over the destination so a reader never sees a
    /// partial snapshot.
    pub fn write(&self, path: &Path) -> InventoryResult<()> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let json = serde_json::to_string_pretty(self)?;
        let temp_path = path.with_extension(format!(
            "tmp.{}.{}",
            std::process::id(),
            crate::utils::get_timestamp_millis()
        ));
        {
            let mut file = fs::File::create(&temp_path)?;
            file.write_all(json.as_bytes())?;
            file.sync_all()?;
        }
        if let Err(e) = fs::rename(&temp_path, path) {
            let _ = fs::remove_file(&temp_path);
            return Err(e.into());
        }
        Ok(())
    }
}
