/// Immutable message records passed between nodes.
///
/// A `Message` is a directed communication between two nodes, carrying a
/// logical send tick and a delivery tick. Messages are immutable once
/// created; queues and history hold `Rc` references to the same record,
/// never independent copies. Payloads are opaque to the core and passed
/// through untouched.

use crate::error::{AgoraError, AgoraResult};
use crate::node::NodeId;
use crate::time::Tick;

// ── Message ID ────────────────────────────────────────────────────────

/// A unique, strictly-increasing message identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serialize", derive(serde::Serialize, serde::Deserialize))]
pub struct MessageId(u64);

impl MessageId {
    /// Wrap a raw u64 into a `MessageId`.
    #[inline]
    pub fn new(raw: u64) -> Self {
        MessageId(raw)
    }

    /// Return the raw value.
    #[inline]
    pub fn raw(self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for MessageId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "M#{}", self.0)
    }
}

// ── Message ID Generator ─────────────────────────────────────────────

/// Deterministic, strictly-increasing message-ID generator.
///
/// The simulation is single-threaded, so a plain counter is trivially
/// deterministic. Monotonic IDs double as a stable tiebreak for delivery
/// ordering.
#[derive(Debug, Clone, Default)]
#[cfg_attr(feature = "serialize", derive(serde::Serialize, serde::Deserialize))]
pub struct MessageIdGen {
    next: u64,
}

impl MessageIdGen {
    /// Create a generator starting at 0.
    pub fn new() -> Self {
        MessageIdGen { next: 0 }
    }

    /// Mint the next message ID.
    pub fn next_id(&mut self) -> MessageId {
        let id = MessageId(self.next);
        self.next += 1;
        id
    }

    /// Peek at the next ID without consuming it.
    pub fn peek(&self) -> MessageId {
        MessageId(self.next)
    }
}

// ── Message Type ──────────────────────────────────────────────────────

/// Type tag for routing and processing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serialize", derive(serde::Serialize, serde::Deserialize))]
pub enum MessageType {
    /// General data message.
    Data,
    /// Request for coordination.
    Coordination,
    /// Heartbeat / keepalive.
    Heartbeat,
    /// Error or failure notification.
    Error,
}

impl std::fmt::Display for MessageType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MessageType::Data => write!(f, "Data"),
            MessageType::Coordination => write!(f, "Coordination"),
            MessageType::Heartbeat => write!(f, "Heartbeat"),
            MessageType::Error => write!(f, "Error"),
        }
    }
}

// ── Payload ───────────────────────────────────────────────────────────

/// Opaque message payload.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serialize", derive(serde::Serialize, serde::Deserialize))]
pub enum Payload {
    /// Human-readable text (convenient for puzzles and tests).
    Text(String),
    /// Raw bytes.
    Data(Vec<u8>),
    /// Empty payload (heartbeats, acks).
    Empty,
}

// ── Message ───────────────────────────────────────────────────────────

/// An immutable record of a directed communication between two nodes.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serialize", derive(serde::Serialize, serde::Deserialize))]
pub struct Message {
    id: MessageId,
    sender: NodeId,
    recipient: NodeId,
    kind: MessageType,
    payload: Payload,
    sent_tick: Tick,
    delivery_tick: Tick,
}

impl Message {
    /// Create a message.
    ///
    /// Fails with [`AgoraError::NonCausalDelivery`] if `delivery_tick`
    /// is before `sent_tick`.
    pub fn new(
        id: MessageId,
        sender: NodeId,
        recipient: NodeId,
        kind: MessageType,
        payload: Payload,
        sent_tick: Tick,
        delivery_tick: Tick,
    ) -> AgoraResult<Self> {
        if delivery_tick.is_before(sent_tick) {
            return Err(AgoraError::NonCausalDelivery {
                sent: sent_tick,
                delivery: delivery_tick,
            });
        }
        Ok(Message {
            id,
            sender,
            recipient,
            kind,
            payload,
            sent_tick,
            delivery_tick,
        })
    }

    /// Unique identifier.
    pub fn id(&self) -> MessageId {
        self.id
    }

    /// Sender node id.
    pub fn sender(&self) -> &NodeId {
        &self.sender
    }

    /// Recipient node id.
    pub fn recipient(&self) -> &NodeId {
        &self.recipient
    }

    /// Type tag.
    pub fn kind(&self) -> MessageType {
        self.kind
    }

    /// Opaque payload.
    pub fn payload(&self) -> &Payload {
        &self.payload
    }

    /// Tick at which the message was sent.
    pub fn sent_tick(&self) -> Tick {
        self.sent_tick
    }

    /// Tick at which the message becomes deliverable.
    pub fn delivery_tick(&self) -> Tick {
        self.delivery_tick
    }
}

impl std::fmt::Display for Message {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "[{}] {} → {}: {} (sent {}, delivers {})",
            self.id, self.sender, self.recipient, self.kind, self.sent_tick, self.delivery_tick
        )
    }
}
