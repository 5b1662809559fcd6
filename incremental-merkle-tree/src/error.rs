use thiserror::Error;

/// Errors from Merkle tree construction, update and proof handling.
///
/// Verification never produces one of these; a bad proof is just `false`.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum MerkleTreeError {
    /// The tree was built from an empty leaf list.
    #[error("no leaves provided")]
    EmptyLeaves,
    /// The requested depth is above [`MAX_TREE_DEPTH`](crate::MAX_TREE_DEPTH).
    #[error("depth {depth} exceeds maximum tree depth {max}")]
    ExceededDepth {
        /// Depth that was asked for.
        depth: u8,
        /// Largest supported depth.
        max: u8,
    },
    /// A negative leaf index was given.
    #[error("negative index {0}")]
    NegativeIndex(i64),
    /// An index or leaf count does not fit in the `2^depth` leaf slots.
    #[error("index {index} out of range for tree capacity {capacity}")]
    CapacityExceeded {
        /// Offending index (for a leaf list, the index of its last leaf).
        index: u64,
        /// Number of leaf slots, `2^depth`.
        capacity: u64,
    },
    /// Encoded proof bytes could not be decoded.
    #[error("invalid proof: {0}")]
    InvalidProof(String),
}
