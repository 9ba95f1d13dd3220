// src/config/mod.rs
// Central configuration for the codewarden Slack service

pub mod giveaway;
pub mod helpers;
pub mod llm;
pub mod server;
pub mod slack;

use lazy_static::lazy_static;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

lazy_static! {
    pub static ref CONFIG: AppConfig = AppConfig::from_env();
}

/// Main configuration structure - composes all domain configs
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub slack: slack::SlackConfig,
    pub gemini: llm::GeminiConfig,
    pub codes: giveaway::CodesConfig,
    pub giveaway: giveaway::GiveawayConfig,
    pub inventory: giveaway::InventoryConfig,
    pub server: server::ServerConfig,
}

impl AppConfig {
    pub fn from_env() -> Self {
        // Load .env file
        dotenv::dotenv().ok(); // Don't panic if .env doesn't exist (for production)

        Self {
            slack: slack::SlackConfig::from_env(),
            gemini: llm::GeminiConfig::from_env(),
            codes: giveaway::CodesConfig::from_env(),
            giveaway: giveaway::GiveawayConfig::from_env(),
            inventory: giveaway::InventoryConfig::from_env(),
            server: server::ServerConfig::from_env(),
        }
    }

    /// Validate config on startup
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.codes.validate()
    }

    pub fn bind_address(&self) -> String {
        self.server.bind_address()
    }
}
