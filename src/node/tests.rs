//! Tests for node state, ownership helpers, and built-in participants.

use std::rc::Rc;

use crate::message::{Message, MessageId, MessageType, Payload};
use crate::time::Tick;

use super::basic::BasicNode;
use super::id::NodeId;
use super::state::{NodeState, OWNER_KEY_PREFIX};
use super::traits::SimNode;

fn message_to(recipient: &str) -> Rc<Message> {
    Rc::new(
        Message::new(
            MessageId::new(0),
            NodeId::new("sender"),
            NodeId::new(recipient),
            MessageType::Data,
            Payload::Text("payload".into()),
            Tick::ZERO,
            Tick::ZERO,
        )
        .unwrap(),
    )
}

// ── NodeState ─────────────────────────────────────────────────────────

#[test]
fn test_write_read_has_key() {
    let mut state = NodeState::new(NodeId::new("Alice"));
    assert_eq!(state.read("balance"), None);
    assert!(!state.has_key("balance"));

    state.write("balance", "100");
    assert_eq!(state.read("balance"), Some("100"));
    assert!(state.has_key("balance"));
}

#[test]
fn test_absent_is_distinct_from_empty_value() {
    let mut state = NodeState::new(NodeId::new("Alice"));
    state.write("note", "");
    assert_eq!(state.read("note"), Some(""));
    assert_eq!(state.read("other"), None);
}

#[test]
fn test_write_overwrites() {
    let mut state = NodeState::new(NodeId::new("Alice"));
    state.write("k", "v1");
    state.write("k", "v2");
    assert_eq!(state.read("k"), Some("v2"));
    assert_eq!(state.len(), 1);
}

#[test]
fn test_claim_ownership_asserts_own_id_only() {
    let mut state = NodeState::new(NodeId::new("Alice"));
    state.claim_ownership("Coin1");

    assert_eq!(state.get_owner("Coin1"), Some("Alice"));
    // Claims are specially-prefixed keys in the generic store.
    assert_eq!(
        state.read(&format!("{}Coin1", OWNER_KEY_PREFIX)),
        Some("Alice")
    );
}

#[test]
fn test_get_owner_absent_means_no_opinion() {
    let state = NodeState::new(NodeId::new("Alice"));
    assert_eq!(state.get_owner("Coin1"), None);
}

#[test]
fn test_claimed_items_lists_only_prefixed_keys() {
    let mut state = NodeState::new(NodeId::new("Alice"));
    state.write("balance", "5");
    state.claim_ownership("Coin1");
    state.claim_ownership("Coin2");

    let items: Vec<&str> = state.claimed_items().collect();
    assert_eq!(items, vec!["Coin1", "Coin2"]);
}

#[test]
fn test_entries_iterate_in_key_order() {
    let mut state = NodeState::new(NodeId::new("Alice"));
    state.write("zeta", "1");
    state.write("alpha", "2");

    let keys: Vec<&str> = state.entries().map(|(k, _)| k).collect();
    assert_eq!(keys, vec!["alpha", "zeta"]);
}

// ── BasicNode ─────────────────────────────────────────────────────────

#[test]
fn test_basic_node_accumulates_incoming() {
    let mut node = BasicNode::new(NodeId::new("Bob"));
    assert!(node.incoming().is_empty());

    node.receive_message(message_to("Bob"));
    node.receive_message(message_to("Bob"));
    assert_eq!(node.incoming().len(), 2);
}

#[test]
fn test_clear_outgoing_drains_queue() {
    let mut node = BasicNode::new(NodeId::new("Bob"));
    node.send_message(message_to("Carol"));
    assert_eq!(node.outgoing().len(), 1);

    let drained = node.clear_outgoing();
    assert_eq!(drained.len(), 1);
    assert!(node.outgoing().is_empty());
}

#[test]
fn test_queues_share_the_message_record() {
    let msg = message_to("Bob");
    let mut node = BasicNode::new(NodeId::new("Bob"));
    node.receive_message(Rc::clone(&msg));

    assert!(Rc::ptr_eq(&msg, &node.incoming()[0]));
}

#[test]
fn test_reset_restores_initial_state() {
    let mut initial = NodeState::new(NodeId::new("Alice"));
    initial.write("seed", "1");
    let mut node = BasicNode::with_state(initial);

    node.state_mut().write("extra", "2");
    node.state_mut().claim_ownership("Coin1");
    node.receive_message(message_to("Alice"));

    node.reset();
    assert_eq!(node.state().read("seed"), Some("1"));
    assert_eq!(node.state().read("extra"), None);
    assert_eq!(node.state().get_owner("Coin1"), None);
    assert!(node.incoming().is_empty());
}

#[test]
fn test_downcast_via_as_any() {
    let node: Box<dyn SimNode> = Box::new(BasicNode::new(NodeId::new("Bob")));
    assert!(node.as_any().downcast_ref::<BasicNode>().is_some());
}
