/// Deterministic XOR integrity analysis over bit-vector pairs.
///
/// Pure free functions with no shared state: every call is a function of
/// its inputs alone, so repeated calls with identical inputs yield
/// identical results. The comparison is symmetric in its arguments.

use crate::bitvec::BitVector;
use crate::error::{AgoraError, AgoraResult};

/// Returns the ascending indices where the two vectors differ.
///
/// Fails with [`AgoraError::LengthMismatch`] naming both lengths if the
/// vectors are not the same length. Returns an empty vec when the
/// vectors match exactly.
pub fn differing_indices(
    expected: &BitVector,
    received: &BitVector,
) -> AgoraResult<Vec<usize>> {
    check_comparable(expected, received)?;

    let mut indices = Vec::new();
    for index in 0..expected.len() {
        if expected.get(index)? != received.get(index)? {
            indices.push(index);
        }
    }
    Ok(indices)
}

/// Returns `true` when no bit differences exist between the vectors.
///
/// Same precondition as [`differing_indices`]. Short-circuits on the
/// first differing bit, which is observably equivalent to computing the
/// full diff and checking emptiness.
pub fn is_exact_match(expected: &BitVector, received: &BitVector) -> AgoraResult<bool> {
    check_comparable(expected, received)?;

    for index in 0..expected.len() {
        if expected.get(index)? != received.get(index)? {
            return Ok(false);
        }
    }
    Ok(true)
}

fn check_comparable(expected: &BitVector, received: &BitVector) -> AgoraResult<()> {
    if expected.len() != received.len() {
        return Err(AgoraError::LengthMismatch {
            expected: expected.len(),
            received: received.len(),
        });
    }
    Ok(())
}
