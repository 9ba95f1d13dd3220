// src/config/giveaway.rs
// Discount-code pool and giveaway cadence configuration

use serde::{Deserialize, Serialize};

use super::helpers::{env_or, env_parsed_or, split_csv};
use crate::error::ConfigError;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CodesConfig {
    /// Usable pool after merging sources and removing deprecated values
    pub configured: Vec<String>,
    pub deprecated: Vec<String>,
}

impl CodesConfig {
    pub fn from_env() -> Self {
        let deprecated = split_csv(&env_or("DEPRECATED_CODES", ""));
        // DISCOUNT_CODE is the legacy single-value variable; it merges in
        // after the list so upgraded deployments keep their old code.
        let sources = [env_or("DISCOUNT_CODES", ""), env_or("DISCOUNT_CODE", "")];
        let configured = build_pool(&sources, &deprecated);
        Self {
            configured,
            deprecated,
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.configured.is_empty() {
            return Err(ConfigError::NoUsableCodes);
        }
        Ok(())
    }
}

/// Merge code sources in order: trim entries, keep first occurrence of each
/// value, exclude anything listed as deprecated.
pub fn build_pool(sources: &[String], deprecated: &[String]) -> Vec<String> {
    let mut pool: Vec<String> = Vec::new();
    for source in sources {
        for code in split_csv(source) {
            if deprecated.iter().any(|d| *d == code) {
                continue;
            }
            if pool.iter().any(|c| *c == code) {
                continue;
            }
            pool.push(code);
        }
    }
    pool
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GiveawayConfig {
    /// Attempts between giveaway rounds before any code has been issued
    pub base_interval: u32,
    /// Added to the interval each time a code is issued
    pub interval_increment: u32,
    /// Attempt count that triggers the first round
    pub initial_threshold: u32,
}

impl GiveawayConfig {
    pub fn from_env() -> Self {
        let base_interval = env_parsed_or("GIVEAWAY_BASE_INTERVAL", 15);
        Self {
            base_interval,
            interval_increment: env_parsed_or("GIVEAWAY_INTERVAL_INCREMENT", 10),
            initial_threshold: env_parsed_or("GIVEAWAY_INITIAL_THRESHOLD", base_interval),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InventoryConfig {
    pub snapshot_path: String,
}

impl InventoryConfig {
    pub fn from_env() -> Self {
        Self {
            snapshot_path: env_or("INVENTORY_PATH", "data/code_inventory.json"),
        }
    }
}
