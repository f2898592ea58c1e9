/// Node registry, message history, and ownership-conflict detection.
///
/// The registry is the sole external observer allowed to read every
/// node's store. It never mutates node state: conflict detection is a
/// pure read, and the registry never elects a winner among disagreeing
/// claims — resolving them is a consensus problem, deliberately out of
/// scope.

use std::collections::{BTreeMap, BTreeSet};
use std::rc::Rc;

use crate::message::{Message, MessageIdGen, MessageType, Payload};
use crate::node::state::OWNER_KEY_PREFIX;
use crate::node::{NodeId, NodeState};
use crate::time::Tick;

// ── Conflict records ──────────────────────────────────────────────────

/// One node's opinion about who owns an item.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serialize", derive(serde::Serialize, serde::Deserialize))]
pub struct OwnershipClaim {
    /// The node holding the opinion.
    pub claimant: NodeId,
    /// Who that node thinks the owner is.
    pub claimed_owner: String,
}

/// Item id → claimant list, covering only items with a conflict.
pub type ConflictMap = BTreeMap<String, Vec<OwnershipClaim>>;

/// Scan a sequence of node states for ownership conflicts.
///
/// Claimant lists preserve the order in which states are supplied
/// (node-registration order for registry scans). An item is a conflict
/// iff two or more nodes hold an opinion about it — even when the
/// opinions agree. A single claimant is never a conflict, regardless of
/// who it names.
pub fn scan_ownership_conflicts<'a, I>(states: I) -> ConflictMap
where
    I: IntoIterator<Item = &'a NodeState>,
    I::IntoIter: Clone,
{
    let states = states.into_iter();

    // Pass 1: every item id any node holds an opinion about.
    let mut item_ids: BTreeSet<String> = BTreeSet::new();
    for state in states.clone() {
        for (key, _) in state.entries() {
            if let Some(item_id) = key.strip_prefix(OWNER_KEY_PREFIX) {
                item_ids.insert(item_id.to_string());
            }
        }
    }

    // Pass 2: collect opinions per item, in supplied-state order.
    let mut conflicts = ConflictMap::new();
    for item_id in item_ids {
        let mut claimants = Vec::new();
        for state in states.clone() {
            if let Some(owner) = state.get_owner(&item_id) {
                claimants.push(OwnershipClaim {
                    claimant: state.node_id().clone(),
                    claimed_owner: owner.to_string(),
                });
            }
        }
        if claimants.len() > 1 {
            conflicts.insert(item_id, claimants);
        }
    }
    conflicts
}

// ── NetworkRegistry ───────────────────────────────────────────────────

/// Owns the set of node states and the append-only message history.
#[derive(Debug, Clone, Default)]
pub struct NetworkRegistry {
    /// Node states in registration order.
    nodes: Vec<NodeState>,
    /// Append-only message log. Never reordered or pruned. Dangling node
    /// ids are tolerated here — history is for debugging, not delivery.
    history: Vec<Rc<Message>>,
    id_gen: MessageIdGen,
}

impl NetworkRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        NetworkRegistry {
            nodes: Vec::new(),
            history: Vec::new(),
            id_gen: MessageIdGen::new(),
        }
    }

    /// Register a node state.
    ///
    /// Re-adding an existing id overwrites the previous registration in
    /// its original slot (last write wins, no merge).
    pub fn add_node(&mut self, state: NodeState) {
        match self.position_of(state.node_id()) {
            Some(index) => self.nodes[index] = state,
            None => self.nodes.push(state),
        }
    }

    /// Look up a node state by id.
    pub fn get_node(&self, id: &NodeId) -> Option<&NodeState> {
        self.position_of(id).map(|i| &self.nodes[i])
    }

    /// Mutable access for the scenario driving this node's operations.
    pub fn get_node_mut(&mut self, id: &NodeId) -> Option<&mut NodeState> {
        self.position_of(id).map(move |i| &mut self.nodes[i])
    }

    /// All node states in registration order.
    pub fn list_nodes(&self) -> &[NodeState] {
        &self.nodes
    }

    /// Number of registered nodes.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    fn position_of(&self, id: &NodeId) -> Option<usize> {
        self.nodes.iter().position(|n| n.node_id() == id)
    }

    // ── Message history ───────────────────────────────────────────

    /// Record a message in the history log.
    ///
    /// This only logs: it does not deliver anything and does not mutate
    /// any node — delivery belongs to the tick layer.
    pub fn record_message(
        &mut self,
        from: NodeId,
        to: NodeId,
        kind: MessageType,
        payload: Payload,
        at_tick: Tick,
    ) -> Rc<Message> {
        let id = self.id_gen.next_id();
        let message = Rc::new(
            Message::new(id, from, to, kind, payload, at_tick, at_tick)
                .expect("delivery tick equals sent tick"),
        );
        self.history.push(Rc::clone(&message));
        message
    }

    /// The full message history, in append order.
    pub fn history(&self) -> &[Rc<Message>] {
        &self.history
    }

    // ── Conflict detection ────────────────────────────────────────

    /// Scan all registered stores for conflicting ownership claims.
    ///
    /// Pure read over node states; the registry mutates nothing.
    pub fn detect_ownership_conflicts(&self) -> ConflictMap {
        scan_ownership_conflicts(self.nodes.iter())
    }
}
