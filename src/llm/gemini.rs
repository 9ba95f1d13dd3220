// src/llm/gemini.rs
// Gemini generateContent client

use anyhow::{Result, bail};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

const GEMINI_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";

#[derive(Clone)]
pub struct GeminiClient {
    client: Client,
    api_key: String,
    model: String,
    thinking_budget: u32,
    base_url: String,
}

#[derive(Debug, Serialize)]
struct GeminiRequest {
    contents: Vec<GeminiContent>,
    #[serde(rename = "systemInstruction")]
    system_instruction: GeminiSystemInstruction,
    #[serde(rename = "generationConfig")]
    generation_config: GeminiGenerationConfig,
}

#[derive(Debug, Serialize)]
struct GeminiContent {
    role: String,
    parts: Vec<GeminiTextPart>,
}

#[derive(Debug, Serialize)]
struct GeminiSystemInstruction {
    parts: Vec<GeminiTextPart>,
}

#[derive(Debug, Serialize)]
struct GeminiTextPart {
    text: String,
}

#[derive(Debug, Serialize)]
struct GeminiGenerationConfig {
    #[serde(rename = "thinkingConfig")]
    thinking_config: GeminiThinkingConfig,
}

#[derive(Debug, Serialize)]
struct GeminiThinkingConfig {
    #[serde(rename = "thinkingBudget")]
    thinking_budget: u32,
}

#[derive(Debug, Deserialize)]
struct GeminiResponse {
    candidates: Option<Vec<GeminiCandidate>>,
    error: Option<GeminiApiError>,
}

#[derive(Debug, Deserialize)]
struct GeminiCandidate {
    content: Option<GeminiCandidateContent>,
}

#[derive(Debug, Deserialize)]
struct GeminiCandidateContent {
    parts: Option<Vec<GeminiResponsePart>>,
}

#[derive(Debug, Deserialize)]
struct GeminiResponsePart {
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
struct GeminiApiError {
    message: String,
}

impl GeminiClient {
    pub fn new(api_key: String, model: String, thinking_budget: u32) -> Self {
        Self {
            client: Client::new(),
            api_key,
            model,
            thinking_budget,
            base_url: GEMINI_API_BASE.to_string(),
        }
    }

    fn api_url(&self) -> String {
        format!(
            "{}/models/{}:generateContent?key={}",
            self.base_url, self.model, self.api_key
        )
    }

    /// One-shot chat completion for a user message under a system prompt
    pub async fn respond(&self, system_prompt: &str, user_text: &str) -> Result<String> {
        let request = GeminiRequest {
            contents: vec![GeminiContent {
                role: "user".to_string(),
                parts: vec![GeminiTextPart {
                    text: user_text.to_string(),
                }],
            }],
            system_instruction: GeminiSystemInstruction {
                parts: vec![GeminiTextPart {
                    text: system_prompt.to_string(),
                }],
            },
            generation_config: GeminiGenerationConfig {
                thinking_config: GeminiThinkingConfig {
                    thinking_budget: self.thinking_budget,
                },
            },
        };

        debug!("Calling Gemini model {}", self.model);
        let response = self.client.post(self.api_url()).json(&request).send().await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            bail!("Gemini API error ({}): {}", status, body);
        }

        let parsed: GeminiResponse = response.json().await?;
        if let Some(error) = parsed.error {
            bail!("Gemini API error: {}", error.message);
        }

        let text = parsed
            .candidates
            .unwrap_or_default()
            .into_iter()
            .next()
            .and_then(|candidate| candidate.content)
            .and_then(|content| content.parts)
            .unwrap_or_default()
            .into_iter()
            .filter_map(|part| part.text)
            .collect::<Vec<_>>()
            .join("");

        if text.trim().is_empty() {
            bail!("Gemini returned an empty response");
        }
        Ok(text.trim().to_string())
    }
}
