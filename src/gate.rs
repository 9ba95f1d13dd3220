// src/gate.rs
// Per-conversation attempt counters and giveaway round scheduling

use parking_lot::Mutex;
use std::collections::HashMap;
use tracing::debug;

/// Counter state for one conversation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversationState {
    /// Messages seen in this conversation, monotonically increasing
    pub attempts: u32,
    /// Current spacing between giveaway rounds
    pub interval: u32,
    /// Attempt count at which the next round triggers
    pub next_threshold: u32,
}

impl ConversationState {
    pub fn is_giveaway_round(&self) -> bool {
        self.attempts >= self.next_threshold
    }
}

/// Schedules giveaway rounds per conversation. Each gate owns its counter
/// map outright; two instances never share state.
pub struct RoundGate {
    base_interval: u32,
    interval_increment: u32,
    initial_threshold: u32,
    conversations: Mutex<HashMap<String, ConversationState>>,
}

impl RoundGate {
    pub fn new(base_interval: u32, interval_increment: u32, initial_threshold: u32) -> Self {
        Self {
            base_interval,
            interval_increment,
            initial_threshold,
            conversations: Mutex::new(HashMap::new()),
        }
    }

    fn fresh_state(&self) -> ConversationState {
        ConversationState {
            attempts: 0,
            interval: self.base_interval,
            next_threshold: self.initial_threshold,
        }
    }

    /// Count an inbound message and return the updated counters
    pub fn record_attempt(&self, conversation_id: &str) -> ConversationState {
        let mut conversations = self.conversations.lock();
        let state = conversations
            .entry(conversation_id.to_string())
            .or_insert_with(|| self.fresh_state());
        state.attempts += 1;
        state.clone()
    }

    /// Close the current round. Issuing a code stretches the interval;
    /// either way the next round lands a full interval from here.
    pub fn resolve_round(&self, conversation_id: &str, code_was_issued: bool) -> ConversationState {
        let mut conversations = self.conversations.lock();
        let state = conversations
            .entry(conversation_id.to_string())
            .or_insert_with(|| self.fresh_state());
        if code_was_issued {
            state.interval += self.interval_increment;
        }
        state.next_threshold = state.attempts + state.interval;
        debug!(
            "Round resolved for {}: issued={}, next threshold at attempt {}",
            conversation_id, code_was_issued, state.next_threshold
        );
        state.clone()
    }

    /// Current counters for a conversation, if it has been seen at all
    pub fn conversation(&self, conversation_id: &str) -> Option<ConversationState> {
        self.conversations.lock().get(conversation_id).cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_triggers_exactly_at_threshold() {
        let gate = RoundGate::new(15, 10, 15);
        for expected_attempt in 1..15 {
            let state = gate.record_attempt("C1");
            assert_eq!(state.attempts, expected_attempt);
            assert!(
                !state.is_giveaway_round(),
                "attempt {} should not trigger a round",
                expected_attempt
            );
        }
        let state = gate.record_attempt("C1");
        assert_eq!(state.attempts, 15);
        assert!(state.is_giveaway_round());
    }

    #[test]
    fn test_issuing_a_code_stretches_the_interval() {
        let gate = RoundGate::new(15, 10, 15);
        for _ in 0..15 {
            gate.record_attempt("C1");
        }
        let state = gate.resolve_round("C1", true);
        assert_eq!(state.interval, 25);
        assert_eq!(state.next_threshold, 40);
    }

    #[test]
    fn test_unissued_round_keeps_the_interval() {
        let gate = RoundGate::new(15, 10, 15);
        for _ in 0..15 {
            gate.record_attempt("C1");
        }
        let state = gate.resolve_round("C1", false);
        assert_eq!(state.interval, 15);
        assert_eq!(state.next_threshold, 30);
    }

    #[test]
    fn test_next_round_lands_a_full_interval_later() {
        let gate = RoundGate::new(15, 10, 15);
        for _ in 0..15 {
            gate.record_attempt("C1");
        }
        gate.resolve_round("C1", true);

        // next_threshold is now 40, so attempts 16..=39 stay quiet
        for expected_attempt in 16..40 {
            let state = gate.record_attempt("C1");
            assert_eq!(state.attempts, expected_attempt);
            assert!(!state.is_giveaway_round());
        }
        assert!(gate.record_attempt("C1").is_giveaway_round());
    }

    #[test]
    fn test_conversations_are_independent() {
        let gate = RoundGate::new(2, 1, 2);
        gate.record_attempt("C1");
        gate.record_attempt("C1");
        let other = gate.record_attempt("C2");

        assert!(gate.conversation("C1").unwrap().is_giveaway_round());
        assert_eq!(other.attempts, 1);
        assert!(!other.is_giveaway_round());
    }

    #[test]
    fn test_initial_threshold_can_differ_from_base_interval() {
        let gate = RoundGate::new(15, 10, 3);
        gate.record_attempt("C1");
        gate.record_attempt("C1");
        let state = gate.record_attempt("C1");
        assert!(state.is_giveaway_round());

        // After the first round the base interval takes over
        let state = gate.resolve_round("C1", false);
        assert_eq!(state.next_threshold, 18);
    }

    #[test]
    fn test_unknown_conversation_has_no_state() {
        let gate = RoundGate::new(15, 10, 15);
        assert!(gate.conversation("NEVER-SEEN").is_none());
    }
}
