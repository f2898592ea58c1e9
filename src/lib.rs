//! # Agora — Deterministic Distributed-Systems Teaching Kernel
//!
//! A small simulation kernel for puzzles that teach distributed-systems
//! concepts: players detect and repair corrupted data, and watch
//! independent nodes disagree about shared facts. No async, no threads,
//! no wall-clock time — just pure state machines driven by a tick clock.
//!
//! ## Architecture
//!
//! ```text
//! ┌───────────────────────────┐   ┌──────────────────────────┐
//! │       TickScheduler        │   │      RepairSession        │
//! │  ┌─────────────────────┐  │   │  ┌────────────────────┐  │
//! │  │ SimNode participants │  │   │  │  BitVector pair    │  │
//! │  └─────────────────────┘  │   │  └────────────────────┘  │
//! │  ┌─────────────────────┐  │   │  ┌────────────────────┐  │
//! │  │  in-flight messages  │  │   │  │  XOR integrity     │  │
//! │  └─────────────────────┘  │   │  └────────────────────┘  │
//! │  ┌─────────────────────┐  │   └──────────────────────────┘
//! │  │     Tick clock       │  │
//! │  └─────────────────────┘  │   ┌──────────────────────────┐
//! └───────────────────────────┘   │     NetworkRegistry       │
//!                                 │  node stores + history +  │
//!                                 │  conflict detection       │
//!                                 └──────────────────────────┘
//! ```
//!
//! The two puzzle families are independent: a [`RepairSession`] is built
//! directly from two [`BitVector`]s, while a [`NetworkRegistry`] observes
//! node stores for ownership disagreements. The [`TickScheduler`] is the
//! execution contract both families are driven by.

pub mod bitvec;
pub mod error;
pub mod integrity;
pub mod message;
pub mod network;
pub mod node;
pub mod repair;
pub mod scheduler;
pub mod time;

#[cfg(feature = "serialize")]
pub mod report;

// Re-exports for convenience.
pub use bitvec::BitVector;
pub use error::{AgoraError, AgoraResult};
pub use message::{Message, MessageId, MessageIdGen, MessageType, Payload};
pub use network::{ConflictMap, NetworkRegistry, OwnershipClaim};
pub use node::{BasicNode, HeartbeatNode, NodeId, NodeState, SimNode};
pub use repair::{RepairSession, RepairStatus};
pub use scheduler::{Simulator, TickContext, TickScheduler};
pub use time::Tick;
