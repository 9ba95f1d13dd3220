// src/api/http/events.rs
//
// POST /slack/events: verify the signature, ack fast, hand work to the
// chat layer. Slack drops deliveries that take longer than three seconds,
// so only the synchronous round bookkeeping runs before the ack and all
// network I/O is spawned.

use axum::{
    Json,
    body::Bytes,
    extract::State,
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
};
use serde_json::json;
use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::chat;
use crate::config::CONFIG;
use crate::slack::events::{CallbackEvent, EventEnvelope, clean_mention_text};
use crate::slack::signature;
use crate::state::AppState;
use crate::utils::get_timestamp;

const TIMESTAMP_HEADER: &str = "x-slack-request-timestamp";
const SIGNATURE_HEADER: &str = "x-slack-signature";
const RETRY_HEADER: &str = "x-slack-retry-num";

pub async fn slack_events(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let timestamp = header_str(&headers, TIMESTAMP_HEADER);
    let signature_header = header_str(&headers, SIGNATURE_HEADER);
    let (Some(timestamp), Some(signature_header)) = (timestamp, signature_header) else {
        warn!("Rejecting request without signature headers");
        return StatusCode::UNAUTHORIZED.into_response();
    };

    if let Err(e) = signature::verify(
        &CONFIG.slack.signing_secret,
        timestamp,
        signature_header,
        &body,
        get_timestamp() as i64,
    ) {
        warn!("Rejecting request with bad signature: {}", e);
        return StatusCode::UNAUTHORIZED.into_response();
    }

    if let Some(retry) = header_str(&headers, RETRY_HEADER) {
        debug!("Slack retry delivery #{}", retry);
    }

    let envelope: EventEnvelope = match serde_json::from_slice(&body) {
        Ok(envelope) => envelope,
        Err(e) => {
            debug!("Acking unrecognized event payload: {}", e);
            return StatusCode::OK.into_response();
        }
    };

    match envelope {
        EventEnvelope::UrlVerification { challenge } => {
            info!("Answering Slack URL verification challenge");
            Json(json!({ "challenge": challenge })).into_response()
        }
        EventEnvelope::EventCallback { event } => {
            let CallbackEvent::AppMention(mention) = event;
            let cleaned = clean_mention_text(&mention.text);
            // Round bookkeeping happens before the ack so concurrent
            // mentions are judged in arrival order.
            let plan = chat::plan_reply(&state.gate, &state.inventory, &mention.channel, &cleaned);
            tokio::spawn(chat::deliver_reply(state.clone(), mention, cleaned, plan));
            StatusCode::OK.into_response()
        }
    }
}

fn header_str<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers.get(name).and_then(|value| value.to_str().ok())
}
