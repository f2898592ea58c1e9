//! Node identity, local state, and the participant contract.
//!
//! Each node owns a private key/value store — no node can read another
//! node's store directly. All cross-node interaction goes through
//! messages routed by the scheduler, and only external observers (the
//! registry, the scheduler's scan helpers) may read all stores at once.
//!
//! # Module structure
//!
//! | Sub-module | Contents |
//! |---|---|
//! | [`id`] | [`NodeId`] newtype |
//! | [`state`] | [`NodeState`] store + ownership-claim helpers |
//! | [`traits`] | [`SimNode`] participant trait |
//! | [`basic`] | [`BasicNode`], [`HeartbeatNode`] |

pub mod basic;
pub mod id;
pub mod state;
pub mod traits;

// Flat re-exports so external callers can use `agora::node::NodeId` etc.
pub use basic::{BasicNode, HeartbeatNode};
pub use id::NodeId;
pub use state::NodeState;
pub use traits::SimNode;

#[cfg(test)]
mod tests;
