// src/chat.rs
// Decision layer: count the attempt, run the giveaway round, shape the reply

use std::sync::Arc;
use tracing::{error, info};

use crate::config::CONFIG;
use crate::gate::RoundGate;
use crate::intent::{self, MessageIntent};
use crate::inventory::{CodeInventory, InventoryCounts};
use crate::prompt::{RoundOutcome, build_system_prompt};
use crate::slack::MentionEvent;
use crate::state::AppState;

/// Reply to an empty mention
const GREETING_REPLY: &str = "Hi! How can I help you?";
/// Reply when the LLM cannot be reached
const LLM_UNAVAILABLE_REPLY: &str = "Sorry, I could not reach the Gemini service.";
/// Reply when a won code could not be persisted and was returned to the pool
const VAULT_JAMMED_REPLY: &str =
    "The code vault is jammed at the moment. Try me again in a little while.";

/// What the bot decided to say, fixed before any network I/O happens
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReplyPlan {
    /// Empty mention: greet, skip the LLM
    Greeting,
    /// Count inquiry: answer with exact numbers, skip the LLM
    CountReport(InventoryCounts),
    /// Issuance failed to persist: deterministic apology, skip the LLM
    VaultJammed,
    /// Normal conversation through the LLM under the round outcome
    Chat(RoundOutcome),
}

/// Run the whole giveaway sequence for one inbound mention. Synchronous on
/// purpose: callers fix arrival order by calling this in order, and a code
/// can never be double-spent across interleaved messages.
pub fn plan_reply(
    gate: &RoundGate,
    inventory: &CodeInventory,
    conversation_id: &str,
    cleaned_text: &str,
) -> ReplyPlan {
    let state = gate.record_attempt(conversation_id);
    let intent = intent::classify(cleaned_text);
    info!(
        "Mention in {}: {:?} (attempt {}, next round at {}, intent {:?})",
        conversation_id, cleaned_text, state.attempts, state.next_threshold, intent
    );

    // Count inquiries answer straight from the inventory and leave any
    // pending round untouched.
    if intent == MessageIntent::CountInquiry {
        return ReplyPlan::CountReport(inventory.counts());
    }

    let outcome = if state.is_giveaway_round() {
        if intent == MessageIntent::CodeRequest {
            match inventory.try_issue() {
                Ok(Some(code)) => {
                    let resolved = gate.resolve_round(conversation_id, true);
                    info!(
                        "Giveaway round won in {}; next round at attempt {}",
                        conversation_id, resolved.next_threshold
                    );
                    RoundOutcome::Issued(code)
                }
                Ok(None) => {
                    gate.resolve_round(conversation_id, false);
                    info!(
                        "Giveaway round hit in {} but the pool is empty",
                        conversation_id
                    );
                    RoundOutcome::PoolEmpty
                }
                Err(e) => {
                    gate.resolve_round(conversation_id, false);
                    error!("Could not issue a code in {}: {}", conversation_id, e);
                    return ReplyPlan::VaultJammed;
                }
            }
        } else {
            // A due round nobody asked about is forfeited; the next one
            // lands a full interval from here.
            gate.resolve_round(conversation_id, false);
            info!("Giveaway round in {} expired unclaimed", conversation_id);
            RoundOutcome::NotARound
        }
    } else {
        RoundOutcome::NotARound
    };

    if cleaned_text.is_empty() {
        return ReplyPlan::Greeting;
    }
    ReplyPlan::Chat(outcome)
}

/// Carry a planned reply out: resolve the user's name for the log line,
/// produce the text (canned or via Gemini), and post it.
pub async fn deliver_reply(
    state: Arc<AppState>,
    event: MentionEvent,
    cleaned_text: String,
    plan: ReplyPlan,
) {
    let who = state.slack.display_name(&event.user).await;
    info!("Replying to {} in {}", who, event.channel);

    let text = match plan {
        ReplyPlan::Greeting => GREETING_REPLY.to_string(),
        ReplyPlan::CountReport(counts) => count_report(&counts),
        ReplyPlan::VaultJammed => VAULT_JAMMED_REPLY.to_string(),
        ReplyPlan::Chat(outcome) => {
            let counts = state.inventory.counts();
            let system_prompt = build_system_prompt(&counts, &outcome);
            match state.llm.respond(&system_prompt, &cleaned_text).await {
                Ok(reply) => reply,
                Err(e) => {
                    error!("Gemini call failed: {}", e);
                    fallback_reply(&outcome)
                }
            }
        }
    };

    post_replies(&state, &event, &text).await;
}

/// Deterministic inventory report, never routed through the LLM
fn count_report(counts: &InventoryCounts) -> String {
    format!(
        "Vault status: {} of {} discount codes still up for grabs, {} already claimed.",
        counts.available,
        counts.total(),
        counts.used
    )
}

/// Stand-in when Gemini cannot be reached. A code that is already marked
/// used and persisted must still reach its winner.
fn fallback_reply(outcome: &RoundOutcome) -> String {
    match outcome {
        RoundOutcome::Issued(code) => format!(
            "{} You still won this round though: your discount code is {}.",
            LLM_UNAVAILABLE_REPLY, code
        ),
        _ => LLM_UNAVAILABLE_REPLY.to_string(),
    }
}

/// Every reply copy addresses the mentioning user directly
fn addressed_to(user: &str, text: &str) -> String {
    format!("<@{}> {}", user, text)
}

/// Post into the thread, and into the channel as well when configured
async fn post_replies(state: &AppState, event: &MentionEvent, text: &str) {
    let addressed = addressed_to(&event.user, text);

    if let Err(e) = state
        .slack
        .post_message(&event.channel, &addressed, Some(&event.ts))
        .await
    {
        error!("Failed to post thread reply in {}: {}", event.channel, e);
    }

    if CONFIG.slack.reply_in_channel {
        if let Err(e) = state
            .slack
            .post_message(&event.channel, &addressed, None)
            .await
        {
            error!("Failed to post channel reply in {}: {}", event.channel, e);
        }
    }
}
