//! `SimNode` — the participant contract driven by the scheduler.

use std::rc::Rc;

use crate::message::Message;
use crate::scheduler::TickContext;

use super::id::NodeId;
use super::state::NodeState;

/// Trait implemented by every simulated participant.
///
/// A participant exposes its local state, inbound and outbound message
/// queues, per-tick execution, and reset-to-initial-state semantics.
/// Queues hold `Rc<Message>` references — the message record itself is
/// owned by whoever logged it, never duplicated.
///
/// # Contract
///
/// Implementations **must**:
/// - Not use global mutable state.
/// - Route all outbound communication through the outbound queue.
/// - Be deterministic for equal inputs.
pub trait SimNode {
    /// This node's id.
    fn id(&self) -> &NodeId;

    /// Current local state (read-only).
    fn state(&self) -> &NodeState;

    /// Mutable local state. Only the node itself and the scenario that
    /// constructed it should call this — foreign nodes never do.
    fn state_mut(&mut self) -> &mut NodeState;

    /// Inbound message queue.
    fn incoming(&self) -> &[Rc<Message>];

    /// Outbound message queue (not yet handed to the scheduler).
    fn outgoing(&self) -> &[Rc<Message>];

    /// Execute one tick of this node's logic. Outbound messages are
    /// composed through `ctx` and pushed via [`SimNode::send_message`].
    fn execute_tick(&mut self, ctx: &mut TickContext);

    /// Receive a message routed by the scheduler.
    fn receive_message(&mut self, message: Rc<Message>);

    /// Queue a message for sending.
    fn send_message(&mut self, message: Rc<Message>);

    /// Drain and return the outbound queue. Called by the scheduler
    /// after every delivery phase.
    fn clear_outgoing(&mut self) -> Vec<Rc<Message>>;

    /// Restore the node to its constructed initial state.
    fn reset(&mut self);

    /// Downcast support for test and scenario inspection.
    fn as_any(&self) -> &dyn std::any::Any;
    fn as_any_mut(&mut self) -> &mut dyn std::any::Any;
}
