// src/config/llm.rs
// Gemini provider configuration

use serde::{Deserialize, Serialize};

use super::helpers::{env_or, env_parsed_or, require_env};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeminiConfig {
    pub api_key: String,
    pub model: String,
    /// Token budget for the model's internal reasoning pass
    pub thinking_budget: u32,
}

impl GeminiConfig {
    pub fn from_env() -> Self {
        Self {
            api_key: require_env("GOOGLE_API_KEY"),
            model: env_or("GEMINI_MODEL", "gemini-2.5-flash"),
            thinking_budget: env_parsed_or("GEMINI_THINKING_BUDGET", 1024),
        }
    }
}
