//! Structured error types for Agora.
//!
//! All fallible public APIs return `Result<T, AgoraError>`. Failures are
//! local and synchronous: every operation either fully applies its effect
//! or fully rejects with no mutation. Each variant carries enough detail
//! to construct a precise user-facing message without string parsing.

use crate::repair::RepairStatus;
use crate::time::Tick;

/// The top-level error type for the Agora kernel.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serialize", derive(serde::Serialize, serde::Deserialize))]
pub enum AgoraError {
    // ── Bit-vector construction ───────────────────────────

    /// A bit vector was constructed with an empty or whitespace-only id.
    BlankId,

    /// A bit vector was constructed with zero bits.
    EmptyBits,

    /// A bit string contained a character other than '0' or '1'.
    InvalidBitChar { index: usize, ch: char },

    // ── Bit access ────────────────────────────────────────

    /// A bit index was outside the vector's valid range `[0, len)`.
    IndexOutOfRange { index: usize, len: usize },

    // ── Integrity / repair ────────────────────────────────

    /// Two bit vectors of unequal length were compared or paired.
    LengthMismatch { expected: usize, received: usize },

    /// A mutating verb was invoked on a repair session that has already
    /// reached a terminal status.
    SessionClosed { status: RepairStatus },

    // ── Messages ──────────────────────────────────────────

    /// A message was constructed with a delivery tick before its send tick.
    NonCausalDelivery { sent: Tick, delivery: Tick },
}

impl std::fmt::Display for AgoraError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AgoraError::BlankId => write!(f, "bit vector id must not be blank"),
            AgoraError::EmptyBits => {
                write!(f, "bit vector must contain at least one bit")
            }
            AgoraError::InvalidBitChar { index, ch } => write!(
                f,
                "unsupported bit character '{}' at index {}",
                ch, index
            ),
            AgoraError::IndexOutOfRange { index, len } => {
                write!(f, "bit index {} is outside [0, {})", index, len)
            }
            AgoraError::LengthMismatch { expected, received } => write!(
                f,
                "bit vectors must have the same length: expected {} bits but received {}",
                expected, received
            ),
            AgoraError::SessionClosed { status } => write!(
                f,
                "repair session is no longer active (current status: {})",
                status
            ),
            AgoraError::NonCausalDelivery { sent, delivery } => write!(
                f,
                "message cannot be delivered at {} before it was sent at {}",
                delivery, sent
            ),
        }
    }
}

impl std::error::Error for AgoraError {}

/// Convenience alias for `Result<T, AgoraError>`.
pub type AgoraResult<T> = Result<T, AgoraError>;
