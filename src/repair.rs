/// Corruption-repair session state machine.
///
/// Wraps an expected/received bit-vector pair and exposes the puzzle
/// verbs: diff, inspect, flip, commit. The session holds its own clones
/// of both vectors, so the caller retains no aliasing power over session
/// internals.
///
/// State machine: `InProgress → {Succeeded, Failed}`. The terminal
/// transition happens exactly once, on the first `commit`; every mutating
/// verb after that fails with `SessionClosed`.

use crate::bitvec::BitVector;
use crate::error::{AgoraError, AgoraResult};
use crate::integrity;

/// Status of a repair session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serialize", derive(serde::Serialize, serde::Deserialize))]
pub enum RepairStatus {
    /// The session accepts mutating verbs.
    InProgress,
    /// Committed with all bits matching. Terminal.
    Succeeded,
    /// Committed while differences remained. Terminal.
    Failed,
}

impl std::fmt::Display for RepairStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RepairStatus::InProgress => write!(f, "InProgress"),
            RepairStatus::Succeeded => write!(f, "Succeeded"),
            RepairStatus::Failed => write!(f, "Failed"),
        }
    }
}

/// A single detect-and-patch puzzle over two equal-length bit vectors.
#[derive(Debug, Clone)]
pub struct RepairSession {
    expected: BitVector,
    received: BitVector,
    status: RepairStatus,
}

impl RepairSession {
    /// Create a session over clones of `expected` and `received`.
    ///
    /// Fails with [`AgoraError::LengthMismatch`] if the vectors differ
    /// in length.
    pub fn new(expected: &BitVector, received: &BitVector) -> AgoraResult<Self> {
        if expected.len() != received.len() {
            return Err(AgoraError::LengthMismatch {
                expected: expected.len(),
                received: received.len(),
            });
        }
        Ok(RepairSession {
            expected: expected.clone(),
            received: received.clone(),
            status: RepairStatus::InProgress,
        })
    }

    /// Current session status.
    pub fn status(&self) -> RepairStatus {
        self.status
    }

    /// The expected vector (read-only).
    pub fn expected(&self) -> &BitVector {
        &self.expected
    }

    /// The received vector (read-only).
    pub fn received(&self) -> &BitVector {
        &self.received
    }

    /// Indices where expected and received currently differ.
    ///
    /// Read-only and callable in any state.
    pub fn diff(&self) -> AgoraResult<Vec<usize>> {
        integrity::differing_indices(&self.expected, &self.received)
    }

    /// The received bits as a binary string. Read-only, any state.
    pub fn inspect(&self) -> String {
        self.received.to_bit_string()
    }

    /// Flip a single bit in the received vector.
    ///
    /// Requires `InProgress`; fails with [`AgoraError::SessionClosed`]
    /// naming the current status otherwise.
    pub fn flip_bit(&mut self, index: usize) -> AgoraResult<()> {
        self.ensure_in_progress()?;
        self.received.flip(index)
    }

    /// Attempt to commit the received vector.
    ///
    /// On an exact match the session transitions to `Succeeded` and
    /// returns `Ok(true)`; otherwise it transitions to `Failed` and
    /// returns `Ok(false)`. Either way the transition is final: any
    /// further `flip_bit` or `commit` fails with `SessionClosed`.
    pub fn commit(&mut self) -> AgoraResult<bool> {
        self.ensure_in_progress()?;

        if integrity::is_exact_match(&self.expected, &self.received)? {
            self.status = RepairStatus::Succeeded;
            Ok(true)
        } else {
            self.status = RepairStatus::Failed;
            Ok(false)
        }
    }

    fn ensure_in_progress(&self) -> AgoraResult<()> {
        if self.status != RepairStatus::InProgress {
            return Err(AgoraError::SessionClosed { status: self.status });
        }
        Ok(())
    }
}
