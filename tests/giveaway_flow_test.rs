// tests/giveaway_flow_test.rs
// End-to-end giveaway cadence through the decision layer
//
// Drives plan_reply the way the events handler does, with a real inventory
// persisting to a temp snapshot, and checks the cadence arithmetic across
// multiple conversations sharing one pool.

use codewarden::chat::{ReplyPlan, plan_reply};
use codewarden::gate::RoundGate;
use codewarden::inventory::CodeInventory;
use codewarden::prompt::RoundOutcome;
use tempfile::tempdir;

fn strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| v.to_string()).collect()
}

#[test]
fn test_two_conversations_share_one_pool() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("inventory.json");
    let inventory = CodeInventory::load(&strings(&["A", "B"]), &[], &path);
    let gate = RoundGate::new(15, 10, 15);

    // Conversation X chats up to one message short of the threshold
    for _ in 0..14 {
        let plan = plan_reply(&gate, &inventory, "X", "so how is everyone doing");
        assert_eq!(plan, ReplyPlan::Chat(RoundOutcome::NotARound));
    }

    // Attempt 15 with a request wins the first code
    let plan = plan_reply(&gate, &inventory, "X", "any chance of a discount?");
    assert_eq!(plan, ReplyPlan::Chat(RoundOutcome::Issued("A".to_string())));
    let snap = inventory.snapshot();
    assert_eq!(snap.available, strings(&["B"]));
    assert_eq!(snap.used, strings(&["A"]));
    assert_eq!(snap.last_issued, Some("A".to_string()));

    // X's interval stretched to 25, so its next round lands at attempt 40
    let x = gate.conversation("X").unwrap();
    assert_eq!(x.interval, 25);
    assert_eq!(x.next_threshold, 40);

    // Conversation Y keeps its own counters and wins B at its own attempt 15
    for _ in 0..14 {
        plan_reply(&gate, &inventory, "Y", "hello again");
    }
    let plan = plan_reply(&gate, &inventory, "Y", "coupon me please");
    assert_eq!(plan, ReplyPlan::Chat(RoundOutcome::Issued("B".to_string())));

    // The pool is spent. X grinds on to attempt 40 and hits an empty vault.
    for _ in 0..24 {
        let plan = plan_reply(&gate, &inventory, "X", "still here");
        assert_eq!(plan, ReplyPlan::Chat(RoundOutcome::NotARound));
    }
    let plan = plan_reply(&gate, &inventory, "X", "ok NOW hand over that discount");
    assert_eq!(plan, ReplyPlan::Chat(RoundOutcome::PoolEmpty));

    // A miss does not stretch the interval; the next round is a full 25 out
    let x = gate.conversation("X").unwrap();
    assert_eq!(x.attempts, 40);
    assert_eq!(x.interval, 25);
    assert_eq!(x.next_threshold, 65);

    let counts = inventory.counts();
    assert_eq!(counts.available, 0);
    assert_eq!(counts.used, 2);
}

#[test]
fn test_unclaimed_round_is_forfeited_until_the_next_threshold() {
    let dir = tempdir().unwrap();
    let inventory = CodeInventory::load(&strings(&["A"]), &[], &dir.path().join("inv.json"));
    let gate = RoundGate::new(3, 10, 3);

    plan_reply(&gate, &inventory, "X", "hi");
    plan_reply(&gate, &inventory, "X", "hi again");

    // Attempt 3 is a due round, but nobody asked for a code
    let plan = plan_reply(&gate, &inventory, "X", "lovely weather");
    assert_eq!(plan, ReplyPlan::Chat(RoundOutcome::NotARound));

    // Asking one message later is too late; the round moved to attempt 6
    let plan = plan_reply(&gate, &inventory, "X", "wait, I wanted a code");
    assert_eq!(plan, ReplyPlan::Chat(RoundOutcome::NotARound));
    assert_eq!(inventory.counts().available, 1);

    plan_reply(&gate, &inventory, "X", "patience then");
    let plan = plan_reply(&gate, &inventory, "X", "discount code please");
    assert_eq!(plan, ReplyPlan::Chat(RoundOutcome::Issued("A".to_string())));
}

#[test]
fn test_count_inquiry_reports_without_spending_the_round() {
    let dir = tempdir().unwrap();
    let inventory = CodeInventory::load(&strings(&["A", "B"]), &[], &dir.path().join("inv.json"));
    let gate = RoundGate::new(2, 10, 2);

    plan_reply(&gate, &inventory, "X", "hello");

    // Attempt 2 is a due round, but a status question bypasses it entirely
    let plan = plan_reply(&gate, &inventory, "X", "how many codes are left?");
    let ReplyPlan::CountReport(counts) = plan else {
        panic!("expected a count report, got {:?}", plan);
    };
    assert_eq!(counts.available, 2);
    assert_eq!(counts.used, 0);
    assert_eq!(gate.conversation("X").unwrap().next_threshold, 2);

    // The round is still pending, so the next request pays out
    let plan = plan_reply(&gate, &inventory, "X", "then hand over a code");
    assert_eq!(plan, ReplyPlan::Chat(RoundOutcome::Issued("A".to_string())));
    assert_eq!(gate.conversation("X").unwrap().next_threshold, 3 + 12);
}

#[test]
fn test_cadence_survives_a_restart() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("inventory.json");
    let codes = strings(&["A", "B"]);

    {
        let inventory = CodeInventory::load(&codes, &[], &path);
        let gate = RoundGate::new(1, 10, 1);
        let plan = plan_reply(&gate, &inventory, "X", "code please");
        assert_eq!(plan, ReplyPlan::Chat(RoundOutcome::Issued("A".to_string())));
    }

    // A rebooted service reloads the partition and issues the next code,
    // never the one already given away
    let inventory = CodeInventory::load(&codes, &[], &path);
    let gate = RoundGate::new(1, 10, 1);
    let plan = plan_reply(&gate, &inventory, "X", "code please");
    assert_eq!(plan, ReplyPlan::Chat(RoundOutcome::Issued("B".to_string())));

    let snap = inventory.snapshot();
    assert!(snap.available.is_empty());
    assert_eq!(snap.used, codes);
    assert_eq!(snap.last_issued, Some("B".to_string()));
}
