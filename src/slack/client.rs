// src/slack/client.rs
// Minimal Slack Web API client (users.info, chat.postMessage)

use anyhow::{Result, anyhow};
use reqwest::Client;
use serde::Deserialize;
use serde_json::json;
use tracing::{debug, warn};

const SLACK_API_BASE: &str = "https://slack.com/api";

#[derive(Clone)]
pub struct SlackClient {
    client: Client,
    bot_token: String,
    base_url: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
struct UserProfile {
    #[serde(default)]
    display_name: String,
    #[serde(default)]
    real_name: String,
}

#[derive(Debug, Deserialize)]
struct UserRecord {
    #[serde(default)]
    name: String,
    #[serde(default)]
    profile: UserProfile,
}

#[derive(Debug, Deserialize)]
struct UsersInfoResponse {
    ok: bool,
    error: Option<String>,
    user: Option<UserRecord>,
}

#[derive(Debug, Deserialize)]
struct PostMessageResponse {
    ok: bool,
    error: Option<String>,
}

impl SlackClient {
    pub fn new(bot_token: String) -> Self {
        Self {
            client: Client::new(),
            bot_token,
            base_url: SLACK_API_BASE.to_string(),
        }
    }

    fn api_url(&self, method: &str) -> String {
        format!("{}/{}", self.base_url, method)
    }

    /// Resolve a user id to a human-readable name for log lines. Falls back
    /// to the raw id when the lookup fails, so a flaky directory never
    /// blocks a reply.
    pub async fn display_name(&self, user_id: &str) -> String {
        match self.users_info(user_id).await {
            Ok(name) => name,
            Err(e) => {
                warn!("users.info failed for {}: {}", user_id, e);
                user_id.to_string()
            }
        }
    }

    async fn users_info(&self, user_id: &str) -> Result<String> {
        let response = self
            .client
            .get(self.api_url("users.info"))
            .bearer_auth(&self.bot_token)
            .query(&[("user", user_id)])
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(anyhow!("users.info failed ({}): {}", status, body));
        }

        let parsed: UsersInfoResponse = response.json().await?;
        if !parsed.ok {
            return Err(anyhow!(
                "users.info returned error: {}",
                parsed.error.unwrap_or_else(|| "unknown".to_string())
            ));
        }
        let user = parsed
            .user
            .ok_or_else(|| anyhow!("users.info returned no user record"))?;

        // Prefer what the person actually shows as in the workspace
        let name = [user.profile.display_name, user.profile.real_name, user.name]
            .into_iter()
            .find(|candidate| !candidate.is_empty())
            .unwrap_or_else(|| user_id.to_string());
        Ok(name)
    }

    /// Post a message. `thread_ts` threads the reply under that message.
    pub async fn post_message(
        &self,
        channel: &str,
        text: &str,
        thread_ts: Option<&str>,
    ) -> Result<()> {
        let mut body = json!({
            "channel": channel,
            "text": text,
        });
        if let Some(ts) = thread_ts {
            body["thread_ts"] = json!(ts);
        }

        let response = self
            .client
            .post(self.api_url("chat.postMessage"))
            .bearer_auth(&self.bot_token)
            .json(&body)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(anyhow!("chat.postMessage failed ({}): {}", status, body));
        }

        // Slack reports API-level failures inside a 200 response
        let parsed: PostMessageResponse = response.json().await?;
        if !parsed.ok {
            return Err(anyhow!(
                "chat.postMessage returned error: {}",
                parsed.error.unwrap_or_else(|| "unknown".to_string())
            ));
        }
        debug!("Posted message to {}", channel);
        Ok(())
    }
}
