//! Fixed-depth binary Merkle tree with incremental updates.
//!
//! The tree commits to an ordered list of 32-byte digests padded with
//! zero leaves up to `2^depth` slots. Only nodes that were actually computed
//! are stored; every missing subtree is stood in for by a precomputed zero
//! hash, so a depth-32 tree over a handful of leaves costs a handful of
//! nodes per level.
//!
//! Parent nodes are `blake3(left || right)`. Proofs produced by
//! [`MerkleTree::proof_with_mixin`] carry one extra trailing entry that
//! encodes the leaf count, so they verify against
//! `blake3(data_root || length)`, the usual list commitment.
//!
//! # Thread safety
//!
//! [`MerkleTree`] has no internal locking. Mutation goes through `&mut self`,
//! so sharing a tree between threads requires an external lock around it.
//! [`verify_proof`] and [`is_valid_branch`] are pure and may run anywhere.

#![warn(missing_docs)]

mod error;
pub(crate) mod hash;
pub(crate) mod proof;
pub(crate) mod store;
pub(crate) mod tree;
mod verify;

#[cfg(test)]
pub(crate) mod test_utils;

pub use error::MerkleTreeError;
pub use hash::{
    DIGEST_LEN, Digest, MAX_TREE_DEPTH, capacity_for_depth, combine, mixin_length, zero_hash,
    zero_hashes,
};
pub use incremental_merkle_costs::{CostContext, CostResult, CostsExt, OperationCost};
pub use proof::{MAX_PROOF_LEN, decode_proof, encode_proof};
pub use tree::MerkleTree;
pub use verify::{is_valid_branch, verify_proof};
