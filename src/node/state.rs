//! Per-node local key/value state and ownership-claim helpers.

use std::collections::BTreeMap;

use super::id::NodeId;

/// Reserved key prefix under which ownership claims are stored.
///
/// Claims are just specially-prefixed keys in the generic store; the
/// helpers below keep the prefix convention out of calling code.
pub const OWNER_KEY_PREFIX: &str = "owner_of_";

/// A node's private key/value store.
///
/// Exclusively owned and mutated by its node. Only external observers
/// (the registry's conflict scan) read foreign stores, and they never
/// mutate. Iteration order is deterministic (sorted by key).
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serialize", derive(serde::Serialize, serde::Deserialize))]
pub struct NodeState {
    node_id: NodeId,
    store: BTreeMap<String, String>,
}

impl NodeState {
    /// Create an empty store for `node_id`.
    pub fn new(node_id: NodeId) -> Self {
        NodeState {
            node_id,
            store: BTreeMap::new(),
        }
    }

    /// The owning node's id.
    pub fn node_id(&self) -> &NodeId {
        &self.node_id
    }

    /// Write a key/value pair. Overwrites any previous value.
    pub fn write(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.store.insert(key.into(), value.into());
    }

    /// Read a value. `None` means "never written" — distinct from a key
    /// written with an empty value.
    pub fn read(&self, key: &str) -> Option<&str> {
        self.store.get(key).map(String::as_str)
    }

    /// Whether `key` exists in the store.
    pub fn has_key(&self, key: &str) -> bool {
        self.store.contains_key(key)
    }

    /// Number of stored keys.
    pub fn len(&self) -> usize {
        self.store.len()
    }

    /// Whether the store is empty.
    pub fn is_empty(&self) -> bool {
        self.store.is_empty()
    }

    /// Iterate over all entries in key order.
    pub fn entries(&self) -> impl Iterator<Item = (&str, &str)> {
        self.store.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    // ── Ownership claims ──────────────────────────────────────────

    /// Claim ownership of `item_id` from this node's local perspective.
    ///
    /// A node can only assert *itself* as owner — there is no way to
    /// claim on behalf of another node id.
    pub fn claim_ownership(&mut self, item_id: &str) {
        let owner = self.node_id.as_str().to_string();
        self.write(format!("{}{}", OWNER_KEY_PREFIX, item_id), owner);
    }

    /// Who this node thinks owns `item_id`. `None` means no opinion.
    pub fn get_owner(&self, item_id: &str) -> Option<&str> {
        self.read(&format!("{}{}", OWNER_KEY_PREFIX, item_id))
    }

    /// Item ids this node holds an ownership opinion about, in key order.
    pub fn claimed_items(&self) -> impl Iterator<Item = &str> {
        self.store
            .keys()
            .filter_map(|k| k.strip_prefix(OWNER_KEY_PREFIX))
    }
}
