//! Built-in participant variants.
//!
//! `BasicNode` is the passive store-bearing workhorse of ownership
//! scenarios; `HeartbeatNode` exercises the tick/delivery machinery.

use std::rc::Rc;

use crate::message::{Message, MessageType, Payload};
use crate::scheduler::TickContext;

use super::id::NodeId;
use super::state::NodeState;
use super::traits::SimNode;

// ── BasicNode ─────────────────────────────────────────────────────────

/// A passive node: holds local state, accumulates received messages,
/// does nothing on its own tick.
///
/// Scenarios drive it from outside (writes, ownership claims) and read
/// its inbound queue for assertions.
pub struct BasicNode {
    state: NodeState,
    initial: NodeState,
    incoming: Vec<Rc<Message>>,
    outgoing: Vec<Rc<Message>>,
}

impl BasicNode {
    /// Create a node with an empty store.
    pub fn new(id: NodeId) -> Self {
        let state = NodeState::new(id);
        BasicNode {
            initial: state.clone(),
            state,
            incoming: Vec::new(),
            outgoing: Vec::new(),
        }
    }

    /// Create a node whose initial state is `state`. `reset` restores
    /// exactly this state.
    pub fn with_state(state: NodeState) -> Self {
        BasicNode {
            initial: state.clone(),
            state,
            incoming: Vec::new(),
            outgoing: Vec::new(),
        }
    }
}

impl SimNode for BasicNode {
    fn id(&self) -> &NodeId {
        self.state.node_id()
    }

    fn state(&self) -> &NodeState {
        &self.state
    }

    fn state_mut(&mut self) -> &mut NodeState {
        &mut self.state
    }

    fn incoming(&self) -> &[Rc<Message>] {
        &self.incoming
    }

    fn outgoing(&self) -> &[Rc<Message>] {
        &self.outgoing
    }

    fn execute_tick(&mut self, _ctx: &mut TickContext) {}

    fn receive_message(&mut self, message: Rc<Message>) {
        self.incoming.push(message);
    }

    fn send_message(&mut self, message: Rc<Message>) {
        self.outgoing.push(message);
    }

    fn clear_outgoing(&mut self) -> Vec<Rc<Message>> {
        std::mem::take(&mut self.outgoing)
    }

    fn reset(&mut self) {
        self.state = self.initial.clone();
        self.incoming.clear();
        self.outgoing.clear();
    }

    fn as_any(&self) -> &dyn std::any::Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn std::any::Any {
        self
    }
}

// ── HeartbeatNode ─────────────────────────────────────────────────────

/// A node that sends a heartbeat to a fixed peer every `interval` ticks,
/// with a configured delivery delay.
pub struct HeartbeatNode {
    state: NodeState,
    initial: NodeState,
    peer: NodeId,
    interval: u64,
    delay: u64,
    sent_count: u64,
    incoming: Vec<Rc<Message>>,
    outgoing: Vec<Rc<Message>>,
}

impl HeartbeatNode {
    /// Create a heartbeat node targeting `peer`.
    ///
    /// Fires on every tick whose value is a multiple of `interval`
    /// (interval 0 is treated as 1). Each heartbeat is delivered `delay`
    /// ticks after it is sent.
    pub fn new(id: NodeId, peer: NodeId, interval: u64, delay: u64) -> Self {
        let state = NodeState::new(id);
        HeartbeatNode {
            initial: state.clone(),
            state,
            peer,
            interval: interval.max(1),
            delay,
            sent_count: 0,
            incoming: Vec::new(),
            outgoing: Vec::new(),
        }
    }

    /// Number of heartbeats sent so far.
    pub fn sent_count(&self) -> u64 {
        self.sent_count
    }
}

impl SimNode for HeartbeatNode {
    fn id(&self) -> &NodeId {
        self.state.node_id()
    }

    fn state(&self) -> &NodeState {
        &self.state
    }

    fn state_mut(&mut self) -> &mut NodeState {
        &mut self.state
    }

    fn incoming(&self) -> &[Rc<Message>] {
        &self.incoming
    }

    fn outgoing(&self) -> &[Rc<Message>] {
        &self.outgoing
    }

    fn execute_tick(&mut self, ctx: &mut TickContext) {
        if ctx.now().value() % self.interval == 0 {
            let message = ctx.compose(
                self.state.node_id().clone(),
                self.peer.clone(),
                MessageType::Heartbeat,
                Payload::Empty,
                self.delay,
            );
            self.sent_count += 1;
            self.send_message(message);
        }
    }

    fn receive_message(&mut self, message: Rc<Message>) {
        self.incoming.push(message);
    }

    fn send_message(&mut self, message: Rc<Message>) {
        self.outgoing.push(message);
    }

    fn clear_outgoing(&mut self) -> Vec<Rc<Message>> {
        std::mem::take(&mut self.outgoing)
    }

    fn reset(&mut self) {
        self.state = self.initial.clone();
        self.sent_count = 0;
        self.incoming.clear();
        self.outgoing.clear();
    }

    fn as_any(&self) -> &dyn std::any::Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn std::any::Any {
        self
    }
}
