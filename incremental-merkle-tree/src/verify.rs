//! Proof verification.
//!
//! Pure functions over a root, a leaf, an index and a sibling list; no tree
//! is needed. A proof that does not match yields `false`, never an error,
//! since proofs usually come from untrusted peers.

use tracing::trace;

use crate::hash::{Digest, MAX_TREE_DEPTH, combine};

/// Verify a proof produced by
/// [`MerkleTree::proof_with_mixin`](crate::MerkleTree::proof_with_mixin).
///
/// The first `proof.len() - 1` entries are folded into the leaf following
/// the bits of `index`; the result is then combined with the trailing length
/// mixin, which is always the right operand, and compared to `root`.
pub fn verify_proof(root: &Digest, leaf: &Digest, index: u64, proof: &[Digest]) -> bool {
    let Some((mixin, branch)) = proof.split_last() else {
        trace!("empty proof");
        return false;
    };
    if branch.len() > MAX_TREE_DEPTH as usize {
        trace!(len = proof.len(), "proof longer than any supported tree");
        return false;
    }
    fold_branch(leaf, branch, index).is_some_and(|data_root| combine(&data_root, mixin) == *root)
}

/// Verify a plain branch of exactly `depth` siblings with no mixin step.
///
/// Passing `depth + 1` with a mixin proof checks the same thing as
/// [`verify_proof`], because the mixin sits above bit `depth` of any valid
/// index and therefore folds in as the right operand.
pub fn is_valid_branch(leaf: &Digest, proof: &[Digest], depth: u8, index: u64, root: &Digest) -> bool {
    if proof.len() != depth as usize {
        trace!(len = proof.len(), depth, "branch length does not match depth");
        return false;
    }
    fold_branch(leaf, proof, index).is_some_and(|computed| computed == *root)
}

/// Hash `leaf` up through `branch`. Bit `k` of `index` set means the node
/// is the right child at level `k`.
///
/// `None` if `index` has bits at or above `branch.len()`: such an index
/// names no leaf under this branch.
fn fold_branch(leaf: &Digest, branch: &[Digest], index: u64) -> Option<Digest> {
    if branch.len() < u64::BITS as usize && index >> branch.len() != 0 {
        trace!(index, depth = branch.len(), "index outside branch");
        return None;
    }
    let root = branch.iter().enumerate().fold(*leaf, |node, (level, sibling)| {
        let is_right = index.checked_shr(level as u32).unwrap_or(0) & 1 == 1;
        if is_right {
            combine(sibling, &node)
        } else {
            combine(&node, sibling)
        }
    });
    Some(root)
}
