//! Layered node storage: one dense `Vec` per level.
//!
//! Level 0 holds leaves and level `depth` holds the root. A level only holds
//! the nodes that were computed; anything past its end is an all-zero
//! subtree and reads back as [`zero_hash`] for that level. Parent of node
//! `i` is `i / 2`; its children are `2i` and `2i + 1`.

use crate::hash::{Digest, zero_hash};

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct LayeredNodeStore {
    levels: Vec<Vec<Digest>>,
}

impl LayeredNodeStore {
    /// Empty store with `depth + 1` levels.
    pub(crate) fn with_depth(depth: u8) -> Self {
        Self {
            levels: vec![Vec::new(); depth as usize + 1],
        }
    }

    /// Store whose leaf level is `leaves`; upper levels are left empty.
    pub(crate) fn with_leaves(depth: u8, leaves: Vec<Digest>) -> Self {
        let mut store = Self::with_depth(depth);
        store.levels[0] = leaves;
        store
    }

    pub(crate) fn level(&self, level: u8) -> &[Digest] {
        &self.levels[level as usize]
    }

    pub(crate) fn replace_level(&mut self, level: u8, nodes: Vec<Digest>) {
        self.levels[level as usize] = nodes;
    }

    /// Materialized node at `(level, index)`, or the zero hash for `level`.
    pub(crate) fn node_or_zero(&self, level: u8, index: u64) -> Digest {
        usize::try_from(index)
            .ok()
            .and_then(|i| self.levels[level as usize].get(i))
            .copied()
            .unwrap_or_else(|| zero_hash(level))
    }

    /// Write a node, growing the level with zero hashes if `index` is past
    /// its end.
    ///
    /// Returns the number of nodes written, padding included. The caller has
    /// already checked `index` against the tree's capacity.
    pub(crate) fn set_node(&mut self, level: u8, index: usize, node: Digest) -> u32 {
        let nodes = &mut self.levels[level as usize];
        if index < nodes.len() {
            nodes[index] = node;
            return 1;
        }
        let padding = index - nodes.len();
        nodes.resize(index, zero_hash(level));
        nodes.push(node);
        padding as u32 + 1
    }
}
