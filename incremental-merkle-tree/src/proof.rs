//! Inclusion proof generation and the proof wire format.
//!
//! A proof is the list of sibling digests on the path from a leaf to the
//! root, ordered leaf-side first. Siblings that were never materialized are
//! filled in from the zero-hash table, so generating a proof never hashes.
//! Proofs are plain values and do not track later changes to the tree.

use bincode::config::{self, BigEndian, Configuration, Fixint, Limit};
use incremental_merkle_costs::{
    CostResult, CostsExt, OperationCost, cost_return_on_error_no_add,
};
use tracing::trace;

use crate::{
    MerkleTree, MerkleTreeError,
    hash::{DIGEST_LEN, Digest, MAX_TREE_DEPTH, mixin_length},
};

/// Longest proof accepted by [`decode_proof`]: a full-depth branch plus the
/// length mixin.
pub const MAX_PROOF_LEN: usize = MAX_TREE_DEPTH as usize + 1;

/// Encoded size of a [`MAX_PROOF_LEN`] proof: 8-byte length prefix plus the
/// digests.
const MAX_ENCODED_PROOF_BYTES: usize = 8 + MAX_PROOF_LEN * DIGEST_LEN;

type WireConfig = Configuration<BigEndian, Fixint, Limit<MAX_ENCODED_PROOF_BYTES>>;

fn wire_config() -> WireConfig {
    config::standard()
        .with_big_endian()
        .with_fixed_int_encoding()
        .with_limit::<MAX_ENCODED_PROOF_BYTES>()
}

impl MerkleTree {
    /// Sibling path for the leaf at `index`: exactly `depth` digests.
    ///
    /// Verify with [`is_valid_branch`](crate::is_valid_branch) at this
    /// tree's depth against [`data_root`](Self::data_root).
    pub fn proof(&self, index: u64) -> CostResult<Vec<Digest>, MerkleTreeError> {
        let cost = OperationCost::default();
        let position = cost_return_on_error_no_add!(cost, self.checked_position(index));
        let position = position as u64;

        let nodes = self.nodes();
        let siblings: Vec<Digest> = (0..self.depth())
            .map(|level| nodes.node_or_zero(level, (position >> level) ^ 1))
            .collect();

        trace!(index, depth = self.depth(), "generated merkle proof");
        let cost = OperationCost::with_nodes_read(siblings.len() as u32);
        Ok(siblings).wrap_with_cost(cost)
    }

    /// Sibling path for the leaf at `index` followed by the length mixin of
    /// the current leaf count: `depth + 1` digests.
    ///
    /// Verifies with [`verify_proof`](crate::verify_proof) against
    /// [`root`](Self::root).
    pub fn proof_with_mixin(&self, index: u64) -> CostResult<Vec<Digest>, MerkleTreeError> {
        let leaf_count = self.leaf_count();
        self.proof(index).map_ok(|mut siblings| {
            siblings.push(mixin_length(leaf_count));
            siblings
        })
    }
}

/// Serialize a proof for transport.
pub fn encode_proof(proof: &[Digest]) -> Result<Vec<u8>, MerkleTreeError> {
    if proof.len() > MAX_PROOF_LEN {
        return Err(MerkleTreeError::InvalidProof(format!(
            "proof has {} entries, at most {} allowed",
            proof.len(),
            MAX_PROOF_LEN
        )));
    }
    bincode::encode_to_vec(proof, wire_config())
        .map_err(|e| MerkleTreeError::InvalidProof(format!("encode error: {}", e)))
}

/// Deserialize a proof produced by [`encode_proof`].
///
/// Rejects trailing bytes and proofs longer than [`MAX_PROOF_LEN`].
pub fn decode_proof(bytes: &[u8]) -> Result<Vec<Digest>, MerkleTreeError> {
    let (proof, read): (Vec<Digest>, usize) = bincode::decode_from_slice(bytes, wire_config())
        .map_err(|e| MerkleTreeError::InvalidProof(format!("decode error: {}", e)))?;
    if read != bytes.len() {
        return Err(MerkleTreeError::InvalidProof(format!(
            "{} trailing bytes after proof",
            bytes.len() - read
        )));
    }
    if proof.len() > MAX_PROOF_LEN {
        return Err(MerkleTreeError::InvalidProof(format!(
            "proof has {} entries, at most {} allowed",
            proof.len(),
            MAX_PROOF_LEN
        )));
    }
    Ok(proof)
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;
    use crate::{hash::zero_hash, test_utils::to_bytes32, verify_proof};

    fn sample_tree(depth: u8) -> MerkleTree {
        let leaves: Vec<Digest> = (1u8..=5).map(|i| to_bytes32(&[i])).collect();
        MerkleTree::build(&leaves, depth)
            .unwrap()
            .expect("build tree")
    }

    #[test]
    fn proof_length_tracks_depth() {
        for depth in [3u8, 8, MAX_TREE_DEPTH] {
            let tree = sample_tree(depth);
            let ctx = tree.proof(1);
            assert_eq!(ctx.cost.hash_node_calls, 0);
            assert_eq!(ctx.cost.nodes_read, depth as u32);
            assert_eq!(ctx.value.expect("proof").len(), depth as usize);
            let with_mixin = tree.proof_with_mixin(1).unwrap().expect("proof");
            assert_eq!(with_mixin.len(), depth as usize + 1);
        }
    }

    #[test]
    fn siblings_past_materialized_nodes_are_zero_hashes() {
        let tree = sample_tree(6);
        let proof = tree.proof(4).unwrap().expect("proof");
        // leaf 4 is the last leaf; its level-0 sibling (5) was never written
        assert_eq!(proof[0], zero_hash(0));
        // the whole right half of the tree above level 3 is empty
        for level in 3..6 {
            assert_eq!(proof[level], zero_hash(level as u8));
        }
    }

    #[test]
    fn mixin_entry_encodes_leaf_count() {
        let tree = sample_tree(4);
        let proof = tree.proof_with_mixin(0).unwrap().expect("proof");
        assert_eq!(proof.last(), Some(&mixin_length(5)));
    }

    #[test]
    fn proof_rejects_index_beyond_capacity() {
        let tree = sample_tree(3);
        assert_matches!(
            tree.proof_with_mixin(8).unwrap(),
            Err(MerkleTreeError::CapacityExceeded {
                index: 8,
                capacity: 8
            })
        );
        // within capacity but never written: zero leaf, still provable
        let proof = tree.proof_with_mixin(7).unwrap().expect("proof");
        assert!(verify_proof(&tree.root(), &[0u8; 32], 7, &proof));
    }

    #[test]
    fn proof_is_detached_from_tree() {
        let mut tree = sample_tree(4);
        let before = tree.proof(0).unwrap().expect("proof");
        tree.insert([0xaa; 32], 1).unwrap().expect("insert");
        let after = tree.proof(0).unwrap().expect("proof");
        assert_ne!(before[0], after[0]);
        assert_eq!(after[0], [0xaa; 32]);
    }

    #[test]
    fn encode_decode_proof() {
        let tree = sample_tree(MAX_TREE_DEPTH);
        let proof = tree.proof_with_mixin(2).unwrap().expect("proof");
        let bytes = encode_proof(&proof).expect("encode");
        assert_eq!(bytes.len(), 8 + proof.len() * DIGEST_LEN);
        assert_eq!(decode_proof(&bytes).expect("decode"), proof);
    }

    #[test]
    fn decode_rejects_garbage() {
        assert_matches!(decode_proof(&[]), Err(MerkleTreeError::InvalidProof(_)));
        assert_matches!(decode_proof(&[0u8; 3]), Err(MerkleTreeError::InvalidProof(_)));

        let mut bytes = encode_proof(&[[1u8; 32]]).expect("encode");
        bytes.push(0);
        assert_matches!(decode_proof(&bytes), Err(MerkleTreeError::InvalidProof(_)));

        // truncated digest
        let bytes = encode_proof(&[[1u8; 32], [2u8; 32]]).expect("encode");
        assert_matches!(
            decode_proof(&bytes[..bytes.len() - 1]),
            Err(MerkleTreeError::InvalidProof(_))
        );
    }

    #[test]
    fn oversized_proofs_are_rejected() {
        let too_long = vec![[0u8; 32]; MAX_PROOF_LEN + 1];
        assert_matches!(encode_proof(&too_long), Err(MerkleTreeError::InvalidProof(_)));

        // hand-build an oversized payload: the length prefix alone exceeds
        // the limit
        let mut bytes = ((MAX_PROOF_LEN + 1) as u64).to_be_bytes().to_vec();
        bytes.extend(std::iter::repeat_n(0u8, (MAX_PROOF_LEN + 1) * DIGEST_LEN));
        assert_matches!(decode_proof(&bytes), Err(MerkleTreeError::InvalidProof(_)));
    }
}
