use incremental_merkle_costs::{
    CostResult, CostsExt, OperationCost, cost_return_on_error_no_add,
};
use tracing::{debug, trace};

use crate::{
    MerkleTreeError,
    hash::{Digest, capacity_for_depth, combine, mixin_length, validate_depth, zero_hash},
    store::LayeredNodeStore,
};

/// A fixed-depth binary Merkle tree over 32-byte leaves.
///
/// Leaves past the ones written are implicitly `[0; 32]` and never stored.
/// The depth is fixed at construction and bounds the tree to `2^depth`
/// leaves.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MerkleTree {
    depth: u8,
    nodes: LayeredNodeStore,
}

impl MerkleTree {
    /// Build a tree of the given depth from a non-empty list of leaves.
    ///
    /// Levels are computed bottom-up by pairing adjacent nodes; an odd last
    /// node is paired with the zero hash of its level. Only
    /// `ceil(n / 2^k)` nodes are computed at level `k`, so building over `n`
    /// leaves costs about `n + depth` hashes no matter how deep the tree is.
    pub fn build(leaves: &[Digest], depth: u8) -> CostResult<Self, MerkleTreeError> {
        let cost = OperationCost::default();
        if leaves.is_empty() {
            return Err(MerkleTreeError::EmptyLeaves).wrap_with_cost(cost);
        }
        cost_return_on_error_no_add!(cost, validate_depth(depth));
        let capacity = capacity_for_depth(depth);
        if leaves.len() as u64 > capacity {
            return Err(MerkleTreeError::CapacityExceeded {
                index: leaves.len() as u64 - 1,
                capacity,
            })
            .wrap_with_cost(cost);
        }

        let mut cost = OperationCost::with_nodes_written(saturating_u32(leaves.len()));
        let mut nodes = LayeredNodeStore::with_leaves(depth, leaves.to_vec());
        for level in 1..=depth {
            let odd_sibling = zero_hash(level - 1);
            let parents: Vec<Digest> = nodes
                .level(level - 1)
                .chunks(2)
                .map(|pair| combine(&pair[0], pair.get(1).unwrap_or(&odd_sibling)))
                .collect();
            let computed = saturating_u32(parents.len());
            cost.hash_node_calls += computed;
            cost.nodes_written += computed;
            nodes.replace_level(level, parents);
        }

        let tree = Self { depth, nodes };
        debug!(
            depth,
            leaves = leaves.len(),
            data_root = %hex::encode(tree.data_root()),
            "built merkle tree"
        );
        Ok(tree).wrap_with_cost(cost)
    }

    /// Overwrite the leaf at `index` and rehash its path to the root.
    ///
    /// Exactly `depth` parent nodes are recomputed. Writing past the current
    /// leaf count fills the gap with zero leaves; those leave the data root
    /// alone but raise the leaf count bound into [`root`](Self::root). Proofs generated before the call stay valid against the old
    /// root only.
    ///
    /// Fails before touching the tree if `index` is negative or not below
    /// `2^depth`.
    pub fn insert(&mut self, value: Digest, index: i64) -> CostResult<(), MerkleTreeError> {
        let cost = OperationCost::default();
        let index = cost_return_on_error_no_add!(cost, self.checked_index(index));

        let mut cost = OperationCost::with_nodes_written(self.nodes.set_node(0, index, value));
        let mut position = index;
        for level in 1..=self.depth {
            position /= 2;
            let left = self.nodes.node_or_zero(level - 1, 2 * position as u64);
            let right = self.nodes.node_or_zero(level - 1, 2 * position as u64 + 1);
            cost.hash_node_calls += 1;
            cost.nodes_written += self.nodes.set_node(level, position, combine(&left, &right));
        }

        trace!(
            index,
            depth = self.depth,
            data_root = %hex::encode(self.data_root()),
            "inserted leaf"
        );
        Ok(()).wrap_with_cost(cost)
    }

    /// The tree's commitment: `combine(data_root, mixin_length(leaf_count))`.
    ///
    /// This binds the leaf count into the root and is what proofs from
    /// [`proof_with_mixin`](Self::proof_with_mixin) verify against.
    pub fn root(&self) -> Digest {
        combine(&self.data_root(), &mixin_length(self.leaf_count()))
    }

    /// Root of the data tree alone: the leaves padded to `2^depth`, no
    /// length mixin. Plain branches from [`proof`](Self::proof) verify
    /// against this.
    pub fn data_root(&self) -> Digest {
        self.nodes.node_or_zero(self.depth, 0)
    }

    /// Depth of the tree, fixed at construction.
    pub fn depth(&self) -> u8 {
        self.depth
    }

    /// Number of leaf slots, `2^depth`.
    pub fn capacity(&self) -> u64 {
        capacity_for_depth(self.depth)
    }

    /// Number of materialized leaves, including zero leaves filled in by
    /// [`insert`](Self::insert) past the previous end.
    pub fn leaf_count(&self) -> u64 {
        self.nodes.level(0).len() as u64
    }

    /// The materialized leaves in order.
    pub fn leaves(&self) -> &[Digest] {
        self.nodes.level(0)
    }

    /// Leaf at `index`, or `None` if it was never written.
    pub fn leaf(&self, index: u64) -> Option<Digest> {
        usize::try_from(index)
            .ok()
            .and_then(|i| self.leaves().get(i))
            .copied()
    }

    /// Check `index` against the leaf capacity and convert it for indexing.
    pub(crate) fn checked_position(&self, index: u64) -> Result<usize, MerkleTreeError> {
        let capacity = self.capacity();
        let out_of_range = MerkleTreeError::CapacityExceeded { index, capacity };
        if index >= capacity {
            return Err(out_of_range);
        }
        usize::try_from(index).map_err(|_| out_of_range)
    }

    fn checked_index(&self, index: i64) -> Result<usize, MerkleTreeError> {
        let index = u64::try_from(index).map_err(|_| MerkleTreeError::NegativeIndex(index))?;
        self.checked_position(index)
    }

    pub(crate) fn nodes(&self) -> &LayeredNodeStore {
        &self.nodes
    }
}

fn saturating_u32(n: usize) -> u32 {
    u32::try_from(n).unwrap_or(u32::MAX)
}
