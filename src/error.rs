//! Errors surfaced by tree construction and proof generation.
//!
//! Verification never errors; a proof that does not reproduce the claimed
//! root simply verifies to `false`.

use thiserror::Error;

/// Result alias used by the fallible tree operations.
pub type MerkleResult<T> = std::result::Result<T, MerkleError>;

/// Failures of [`MerkleTree`](crate::MerkleTree) construction and proof extraction.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MerkleError {
    /// A tree was requested over zero leaves.
    #[error("cannot build a merkle tree from an empty leaf set")]
    EmptyInput,

    /// A proof was requested for a leaf the tree does not contain.
    #[error("leaf 0x{leaf} is not in the tree")]
    LeafNotFound {
        /// Hex encoding of the requested leaf.
        leaf: String,
    },

    /// A proof was requested for a leaf position past the last leaf.
    #[error("leaf index {index} out of range for {len} leaves")]
    IndexOutOfRange {
        /// Requested position.
        index: usize,
        /// Number of leaves in the tree.
        len: usize,
    },
}

impl MerkleError {
    pub(crate) fn leaf_not_found(leaf: impl AsRef<[u8]>) -> Self {
        MerkleError::LeafNotFound {
            leaf: hex::encode(leaf),
        }
    }
}
