//! `NodeId` newtype.

/// A unique identifier for a node.
///
/// Ids are plain strings ("Alice", "Bob") so puzzle scenarios read
/// naturally in logs and assertions.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serialize", derive(serde::Serialize, serde::Deserialize))]
pub struct NodeId(String);

impl NodeId {
    /// Create a node id.
    pub fn new(id: impl Into<String>) -> Self {
        NodeId(id.into())
    }

    /// Borrow the id as a string slice.
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for NodeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for NodeId {
    fn from(s: &str) -> Self {
        NodeId(s.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_and_as_str() {
        let id = NodeId::new("Alice");
        assert_eq!(id.as_str(), "Alice");
        assert_eq!(format!("{}", id), "Alice");
    }

    #[test]
    fn test_ordering_is_lexicographic() {
        assert!(NodeId::new("Alice") < NodeId::new("Bob"));
    }
}
