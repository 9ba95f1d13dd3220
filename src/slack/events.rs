// src/slack/events.rs
// Event payload types for the Slack Events API

use lazy_static::lazy_static;
use regex::Regex;
use serde::Deserialize;

lazy_static! {
    static ref MENTION_TAG: Regex = Regex::new(r"<@[^>]+>\s*").expect("mention regex is valid");
}

/// Top-level Events API envelope
#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum EventEnvelope {
    UrlVerification { challenge: String },
    EventCallback { event: CallbackEvent },
}

/// Inner event of an event_callback envelope. Only mentions are
/// subscribed; anything else fails the parse and the delivery is acked
/// and dropped.
#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum CallbackEvent {
    AppMention(MentionEvent),
}

#[derive(Debug, Clone, Deserialize)]
pub struct MentionEvent {
    pub channel: String,
    #[serde(default)]
    pub user: String,
    #[serde(default)]
    pub text: String,
    pub ts: String,
}

/// Strip `<@...>` mention tags and surrounding whitespace from a message
pub fn clean_mention_text(text: &str) -> String {
    MENTION_TAG.replace_all(text, "").trim().to_string()
}
