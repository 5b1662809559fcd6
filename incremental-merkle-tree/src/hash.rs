//! Digest type, the node combine function and the zero-hash cache.

use std::sync::LazyLock;

use crate::MerkleTreeError;

/// Width in bytes of every node in the tree.
pub const DIGEST_LEN: usize = 32;

/// A tree node: leaves, internal nodes and roots are all digests.
pub type Digest = [u8; DIGEST_LEN];

/// Deepest tree that can be built. Capacity is `2^depth` leaves.
pub const MAX_TREE_DEPTH: u8 = 32;

/// `ZERO_HASHES[k]` is the root of a subtree of height `k` whose leaves are
/// all `[0; 32]`.
static ZERO_HASHES: LazyLock<[Digest; MAX_TREE_DEPTH as usize + 1]> = LazyLock::new(|| {
    let mut zeros = [[0u8; DIGEST_LEN]; MAX_TREE_DEPTH as usize + 1];
    for level in 1..zeros.len() {
        zeros[level] = combine(&zeros[level - 1], &zeros[level - 1]);
    }
    zeros
});

/// Combine two children into their parent: `blake3(left || right)`.
pub fn combine(left: &Digest, right: &Digest) -> Digest {
    let mut hasher = blake3::Hasher::new();
    hasher.update(left);
    hasher.update(right);
    *hasher.finalize().as_bytes()
}

/// Root of an all-zero subtree of height `level`.
///
/// # Panics
///
/// If `level > MAX_TREE_DEPTH`. Tree code only asks for levels of a tree
/// whose depth was validated at construction.
pub fn zero_hash(level: u8) -> Digest {
    ZERO_HASHES[level as usize]
}

/// All zero hashes, indexed by level, `0..=MAX_TREE_DEPTH`.
pub fn zero_hashes() -> &'static [Digest] {
    ZERO_HASHES.as_slice()
}

/// Length mixin: `count` as little-endian `u64` in the first 8 bytes, the
/// rest zero.
pub fn mixin_length(count: u64) -> Digest {
    let mut out = [0u8; DIGEST_LEN];
    out[..8].copy_from_slice(&count.to_le_bytes());
    out
}

/// Number of leaf slots in a tree of the given depth.
///
/// Valid for any depth up to 63; tree depths stop at [`MAX_TREE_DEPTH`].
pub fn capacity_for_depth(depth: u8) -> u64 {
    1u64 << depth
}

/// Reject depths above [`MAX_TREE_DEPTH`].
pub(crate) fn validate_depth(depth: u8) -> Result<(), MerkleTreeError> {
    if depth > MAX_TREE_DEPTH {
        return Err(MerkleTreeError::ExceededDepth {
            depth,
            max: MAX_TREE_DEPTH,
        });
    }
    Ok(())
}
