//! Read-only JSON snapshots for the presentation layer.
//!
//! Everything here is display glue: it reads conflict maps and repair
//! sessions through their public query methods and never mutates core
//! state. Only compiled with the `serialize` feature.

use crate::network::{ConflictMap, NetworkRegistry};
use crate::repair::{RepairSession, RepairStatus};

/// Snapshot of a repair session for display.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct SessionSnapshot {
    pub status: RepairStatus,
    pub expected: String,
    pub received: String,
    pub differing_indices: Vec<usize>,
}

impl SessionSnapshot {
    /// Capture the session's current state.
    pub fn capture(session: &RepairSession) -> Self {
        SessionSnapshot {
            status: session.status(),
            expected: session.expected().to_bit_string(),
            received: session.inspect(),
            // A session always holds equal-length vectors, so the diff
            // cannot fail.
            differing_indices: session.diff().unwrap_or_default(),
        }
    }
}

/// The registry's current conflict map as pretty-printed JSON.
pub fn conflict_report_json(registry: &NetworkRegistry) -> String {
    let conflicts: ConflictMap = registry.detect_ownership_conflicts();
    serde_json::to_string_pretty(&conflicts).unwrap_or_else(|_| "{}".into())
}

/// A repair-session snapshot as pretty-printed JSON.
pub fn session_snapshot_json(session: &RepairSession) -> String {
    let snapshot = SessionSnapshot::capture(session);
    serde_json::to_string_pretty(&snapshot).unwrap_or_else(|_| "{}".into())
}
