// src/state.rs
// Application state shared across handlers

use std::sync::Arc;
use tracing::info;

use crate::config::CONFIG;
use crate::gate::RoundGate;
use crate::inventory::CodeInventory;
use crate::llm::GeminiClient;
use crate::slack::SlackClient;

/// Application state shared across handlers
pub struct AppState {
    pub inventory: Arc<CodeInventory>,
    pub gate: Arc<RoundGate>,
    pub slack: SlackClient,
    pub llm: GeminiClient,
}

impl AppState {
    pub fn new() -> Self {
        let inventory = Arc::new(CodeInventory::load(
            &CONFIG.codes.configured,
            &CONFIG.codes.deprecated,
            CONFIG.inventory.snapshot_path.as_str(),
        ));
        let gate = Arc::new(RoundGate::new(
            CONFIG.giveaway.base_interval,
            CONFIG.giveaway.interval_increment,
            CONFIG.giveaway.initial_threshold,
        ));
        info!("Application state initialized");

        Self {
            inventory,
            gate,
            slack: SlackClient::new(CONFIG.slack.bot_token.clone()),
            llm: GeminiClient::new(
                CONFIG.gemini.api_key.clone(),
                CONFIG.gemini.model.clone(),
                CONFIG.gemini.thinking_budget,
            ),
        }
    }
}
