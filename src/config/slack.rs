// src/config/slack.rs
// Slack credentials and reply behavior

use serde::{Deserialize, Serialize};

use super::helpers::{env_or, require_env};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SlackConfig {
    pub bot_token: String,
    pub signing_secret: String,
    /// Post the reply into the channel as well as the thread
    pub reply_in_channel: bool,
}

impl SlackConfig {
    pub fn from_env() -> Self {
        Self {
            bot_token: require_env("SLACK_BOT_TOKEN"),
            signing_secret: require_env("SLACK_SIGNING_SECRET"),
            reply_in_channel: env_or("SHOULD_REPLY_IN_CHANNEL", "true").eq_ignore_ascii_case("true"),
        }
    }
}
