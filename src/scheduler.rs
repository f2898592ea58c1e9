/// Deterministic tick-based execution.
///
/// The scheduler advances all participants in discrete steps. Within one
/// step, every participant's per-tick logic runs to completion (in
/// stable registration order) before any message is delivered, and
/// outbound queues are drained only after delivery. Messages whose
/// delivery tick has not arrived wait in an in-flight buffer.
///
/// Everything is synchronous and single-threaded: two runs with the same
/// inputs produce identical execution and delivery order.

use std::rc::Rc;

use crate::message::{Message, MessageIdGen, MessageType, Payload};
use crate::node::{NodeId, NodeState, SimNode};
use crate::time::Tick;

// ── Simulator contract ────────────────────────────────────────────────

/// The discrete tick-based execution contract.
///
/// Scenario drivers program against this trait; [`TickScheduler`] is the
/// standard implementation.
pub trait Simulator {
    /// Current simulation tick.
    fn current_tick(&self) -> Tick;

    /// Execute a single simulation step.
    fn step(&mut self);

    /// Restore the clock and every participant to initial state.
    /// Participants stay registered.
    fn reset(&mut self);

    /// Whether the scenario-defined victory condition holds.
    fn is_complete(&self) -> bool;

    /// Add a participant. Re-adding an id overwrites the previous
    /// registration in its original slot.
    fn add_node(&mut self, node: Box<dyn SimNode>);

    /// Remove a participant. Pending messages addressed to it are
    /// silently dropped, never an error. Returns `true` if it existed.
    fn remove_node(&mut self, id: &NodeId) -> bool;

    /// Number of registered participants.
    fn node_count(&self) -> usize;
}

// ── Tick Context ──────────────────────────────────────────────────────

/// Per-participant view handed to [`SimNode::execute_tick`].
///
/// Provides the current tick and deterministic message composition. The
/// context borrows the scheduler's id generator, so every message id is
/// minted from the same monotonic counter regardless of which node
/// composes it.
pub struct TickContext<'a> {
    now: Tick,
    ids: &'a mut MessageIdGen,
}

impl TickContext<'_> {
    /// Current simulation tick.
    #[inline]
    pub fn now(&self) -> Tick {
        self.now
    }

    /// Compose a message sent now and delivered `delay` ticks later.
    pub fn compose(
        &mut self,
        from: NodeId,
        to: NodeId,
        kind: MessageType,
        payload: Payload,
        delay: u64,
    ) -> Rc<Message> {
        let delivery = self
            .now
            .plus(delay)
            .expect("tick overflow when composing message");
        let id = self.ids.next_id();
        Rc::new(
            Message::new(id, from, to, kind, payload, self.now, delivery)
                .expect("delivery tick is never before the send tick"),
        )
    }
}

// ── TickScheduler ─────────────────────────────────────────────────────

/// Scenario-defined victory predicate: a pure read over the registered
/// participants and the clock.
pub type VictoryCheck = Box<dyn Fn(&[Box<dyn SimNode>], Tick) -> bool>;

/// The standard [`Simulator`] implementation.
pub struct TickScheduler {
    clock: Tick,
    /// Participants in stable registration order.
    participants: Vec<Box<dyn SimNode>>,
    /// Messages drained from outbound queues, waiting for their
    /// delivery tick.
    in_flight: Vec<Rc<Message>>,
    id_gen: MessageIdGen,
    victory: Option<VictoryCheck>,
}

impl TickScheduler {
    /// Create an empty scheduler at tick zero.
    pub fn new() -> Self {
        TickScheduler {
            clock: Tick::ZERO,
            participants: Vec::new(),
            in_flight: Vec::new(),
            id_gen: MessageIdGen::new(),
            victory: None,
        }
    }

    /// Install the scenario's victory condition.
    ///
    /// The scheduler holds no victory logic of its own — `is_complete`
    /// merely evaluates this predicate (and is `false` without one).
    pub fn set_victory<F>(&mut self, check: F)
    where
        F: Fn(&[Box<dyn SimNode>], Tick) -> bool + 'static,
    {
        self.victory = Some(Box::new(check));
    }

    /// Downcast a participant reference for inspection.
    pub fn node<T: SimNode + 'static>(&self, id: &NodeId) -> Option<&T> {
        let index = self.position_of(id)?;
        self.participants[index].as_any().downcast_ref::<T>()
    }

    /// Downcast a mutable participant reference.
    pub fn node_mut<T: SimNode + 'static>(&mut self, id: &NodeId) -> Option<&mut T> {
        let index = self.position_of(id)?;
        self.participants[index].as_any_mut().downcast_mut::<T>()
    }

    /// All participant states in registration order, for conflict scans
    /// over a live simulation.
    pub fn states(&self) -> impl Iterator<Item = &NodeState> + Clone {
        self.participants.iter().map(|n| n.state())
    }

    /// Messages waiting for their delivery tick.
    pub fn in_flight(&self) -> &[Rc<Message>] {
        &self.in_flight
    }

    fn position_of(&self, id: &NodeId) -> Option<usize> {
        self.participants.iter().position(|n| n.id() == id)
    }
}

impl Default for TickScheduler {
    fn default() -> Self {
        Self::new()
    }
}

impl Simulator for TickScheduler {
    fn current_tick(&self) -> Tick {
        self.clock
    }

    fn step(&mut self) {
        let now = self
            .clock
            .plus(1)
            .expect("tick overflow when stepping");
        self.clock = now;

        // Phase 1: every participant executes, in registration order.
        for node in &mut self.participants {
            let mut ctx = TickContext {
                now,
                ids: &mut self.id_gen,
            };
            node.execute_tick(&mut ctx);
        }

        // Phase 2: drain all outbound queues into the in-flight buffer.
        for node in &mut self.participants {
            self.in_flight.extend(node.clear_outgoing());
        }

        // Phase 3: deliver everything whose delivery tick has arrived.
        // Missing recipients mean the message is dropped silently.
        let pending = std::mem::take(&mut self.in_flight);
        for message in pending {
            if now.is_before(message.delivery_tick()) {
                self.in_flight.push(message);
                continue;
            }
            if let Some(index) = self.position_of(message.recipient()) {
                self.participants[index].receive_message(message);
            }
        }
    }

    fn reset(&mut self) {
        self.clock = Tick::ZERO;
        self.in_flight.clear();
        // Restart the id generator so a re-run mints identical ids.
        self.id_gen = MessageIdGen::new();
        for node in &mut self.participants {
            node.reset();
        }
    }

    fn is_complete(&self) -> bool {
        match &self.victory {
            Some(check) => check(&self.participants, self.clock),
            None => false,
        }
    }

    fn add_node(&mut self, node: Box<dyn SimNode>) {
        match self.position_of(node.id()) {
            Some(index) => self.participants[index] = node,
            None => self.participants.push(node),
        }
    }

    fn remove_node(&mut self, id: &NodeId) -> bool {
        match self.position_of(id) {
            Some(index) => {
                self.participants.remove(index);
                true
            }
            None => false,
        }
    }

    fn node_count(&self) -> usize {
        self.participants.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::network::scan_ownership_conflicts;
    use crate::node::{BasicNode, HeartbeatNode};

    fn heartbeat_pair(interval: u64, delay: u64) -> (TickScheduler, NodeId, NodeId) {
        let hb = NodeId::new("hb");
        let sink = NodeId::new("sink");
        let mut sched = TickScheduler::new();
        sched.add_node(Box::new(HeartbeatNode::new(
            hb.clone(),
            sink.clone(),
            interval,
            delay,
        )));
        sched.add_node(Box::new(BasicNode::new(sink.clone())));
        (sched, hb, sink)
    }

    #[test]
    fn test_step_advances_clock_by_one() {
        let mut sched = TickScheduler::new();
        assert_eq!(sched.current_tick(), Tick::ZERO);
        sched.step();
        assert_eq!(sched.current_tick(), Tick::new(1));
        sched.step();
        assert_eq!(sched.current_tick(), Tick::new(2));
    }

    #[test]
    fn test_zero_delay_message_delivered_same_tick() {
        let (mut sched, _, sink) = heartbeat_pair(1, 0);
        sched.step();

        let sink = sched.node::<BasicNode>(&sink).unwrap();
        assert_eq!(sink.incoming().len(), 1);
        assert_eq!(sink.incoming()[0].delivery_tick(), Tick::new(1));
        assert_eq!(sink.incoming()[0].kind(), MessageType::Heartbeat);
    }

    #[test]
    fn test_delayed_message_waits_in_flight() {
        let (mut sched, _, sink) = heartbeat_pair(10, 2);

        // Heartbeat fires at T=10 with delivery at T=12.
        for _ in 0..10 {
            sched.step();
        }
        assert_eq!(sched.in_flight().len(), 1);
        assert!(sched.node::<BasicNode>(&sink).unwrap().incoming().is_empty());

        sched.step(); // T=11: still in flight
        assert_eq!(sched.in_flight().len(), 1);

        sched.step(); // T=12: delivered
        assert!(sched.in_flight().is_empty());
        let sink = sched.node::<BasicNode>(&sink).unwrap();
        assert_eq!(sink.incoming().len(), 1);
        assert_eq!(sink.incoming()[0].sent_tick(), Tick::new(10));
        assert_eq!(sink.incoming()[0].delivery_tick(), Tick::new(12));
    }

    #[test]
    fn test_outbound_queues_cleared_every_step() {
        let (mut sched, hb, _) = heartbeat_pair(1, 3);
        sched.step();
        let node = sched.node::<HeartbeatNode>(&hb).unwrap();
        assert!(node.outgoing().is_empty());
        assert_eq!(node.sent_count(), 1);
    }

    #[test]
    fn test_removed_recipient_drops_messages_silently() {
        let (mut sched, _, sink) = heartbeat_pair(5, 2);
        for _ in 0..5 {
            sched.step(); // heartbeat fires at T=5, delivers at T=7
        }
        assert_eq!(sched.in_flight().len(), 1);

        assert!(sched.remove_node(&sink));
        assert_eq!(sched.node_count(), 1);

        sched.step();
        sched.step(); // T=7: delivery tick reached; message dropped, no error
        assert!(sched.in_flight().is_empty());
    }

    #[test]
    fn test_remove_unknown_node_returns_false() {
        let mut sched = TickScheduler::new();
        assert!(!sched.remove_node(&NodeId::new("ghost")));
    }

    #[test]
    fn test_add_node_overwrites_same_id() {
        let mut sched = TickScheduler::new();
        let id = NodeId::new("n");
        let mut seeded = BasicNode::new(id.clone());
        seeded.state_mut().write("k", "v");
        sched.add_node(Box::new(seeded));
        sched.add_node(Box::new(BasicNode::new(id.clone())));

        assert_eq!(sched.node_count(), 1);
        let node = sched.node::<BasicNode>(&id).unwrap();
        assert_eq!(node.state().read("k"), None);
    }

    #[test]
    fn test_reset_restores_initial_state() {
        let (mut sched, hb, sink) = heartbeat_pair(1, 0);
        for _ in 0..5 {
            sched.step();
        }
        assert_eq!(sched.node::<BasicNode>(&sink).unwrap().incoming().len(), 5);

        sched.reset();
        assert_eq!(sched.current_tick(), Tick::ZERO);
        assert_eq!(sched.node_count(), 2);
        assert!(sched.in_flight().is_empty());
        assert!(sched.node::<BasicNode>(&sink).unwrap().incoming().is_empty());
        assert_eq!(sched.node::<HeartbeatNode>(&hb).unwrap().sent_count(), 0);
    }

    #[test]
    fn test_rerun_after_reset_is_identical() {
        fn trace(sched: &mut TickScheduler, sink: &NodeId, steps: u32) -> Vec<(u64, u64)> {
            for _ in 0..steps {
                sched.step();
            }
            sched
                .node::<BasicNode>(sink)
                .unwrap()
                .incoming()
                .iter()
                .map(|m| (m.id().raw(), m.delivery_tick().value()))
                .collect()
        }

        let (mut sched, _, sink) = heartbeat_pair(2, 1);
        let first = trace(&mut sched, &sink, 12);
        sched.reset();
        let second = trace(&mut sched, &sink, 12);

        assert_eq!(first, second, "re-run after reset diverged");
        assert!(!first.is_empty());
    }

    #[test]
    fn test_two_identical_schedulers_agree() {
        fn run() -> Vec<(u64, u64)> {
            let (mut sched, _, sink) = heartbeat_pair(3, 2);
            for _ in 0..20 {
                sched.step();
            }
            sched
                .node::<BasicNode>(&sink)
                .unwrap()
                .incoming()
                .iter()
                .map(|m| (m.id().raw(), m.delivery_tick().value()))
                .collect()
        }

        assert_eq!(run(), run(), "identical inputs produced different runs");
    }

    #[test]
    fn test_is_complete_without_victory_is_false() {
        let mut sched = TickScheduler::new();
        assert!(!sched.is_complete());
        sched.step();
        assert!(!sched.is_complete());
    }

    #[test]
    fn test_victory_predicate_drives_completion() {
        let (mut sched, _, sink) = heartbeat_pair(1, 0);
        let watched = sink.clone();
        sched.set_victory(move |nodes, _| {
            nodes
                .iter()
                .find(|n| n.id() == &watched)
                .map(|n| n.incoming().len() >= 3)
                .unwrap_or(false)
        });

        let mut ticks = 0;
        while !sched.is_complete() {
            sched.step();
            ticks += 1;
            assert!(ticks <= 10, "victory condition never reached");
        }
        assert_eq!(sched.current_tick(), Tick::new(3));
    }

    #[test]
    fn test_conflict_scan_over_live_participants() {
        let mut sched = TickScheduler::new();
        let alice = NodeId::new("Alice");
        let bob = NodeId::new("Bob");
        sched.add_node(Box::new(BasicNode::new(alice.clone())));
        sched.add_node(Box::new(BasicNode::new(bob.clone())));

        sched
            .node_mut::<BasicNode>(&alice)
            .unwrap()
            .state_mut()
            .claim_ownership("Coin1");
        sched
            .node_mut::<BasicNode>(&bob)
            .unwrap()
            .state_mut()
            .claim_ownership("Coin1");

        let conflicts = scan_ownership_conflicts(sched.states());
        assert_eq!(conflicts.len(), 1);
        assert_eq!(conflicts["Coin1"].len(), 2);
    }
}
