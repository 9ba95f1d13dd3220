// src/slack/mod.rs
// Slack integration: signature checks, event payloads, Web API client

pub mod client;
pub mod events;
pub mod signature;

pub use client::SlackClient;
pub use events::{CallbackEvent, EventEnvelope, MentionEvent, clean_mention_text};
