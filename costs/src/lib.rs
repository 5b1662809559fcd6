#![deny(missing_docs)]
//! Cost accounting for Merkle tree operations.
//!
//! Every fallible tree operation returns its value wrapped in a
//! [`CostContext`] so callers can check how much hashing and node traffic a
//! call actually performed. The incremental update path relies on this to
//! prove it stays `O(depth)`.

pub mod context;

use std::ops::{Add, AddAssign};

pub use context::{CostContext, CostResult, CostsExt};

/// Work performed by a single tree operation.
#[derive(Debug, Default, Clone, Copy, Eq, PartialEq)]
pub struct OperationCost {
    /// How many times two digests were combined into a parent digest.
    pub hash_node_calls: u32,
    /// How many nodes were written into the layered node store, zero
    /// padding included.
    pub nodes_written: u32,
    /// How many nodes were read back out of the layered node store.
    pub nodes_read: u32,
}

impl OperationCost {
    /// Cost with only `hash_node_calls` set.
    pub fn with_hash_node_calls(hash_node_calls: u32) -> Self {
        OperationCost {
            hash_node_calls,
            ..Default::default()
        }
    }

    /// Cost with only `nodes_written` set.
    pub fn with_nodes_written(nodes_written: u32) -> Self {
        OperationCost {
            nodes_written,
            ..Default::default()
        }
    }

    /// Cost with only `nodes_read` set.
    pub fn with_nodes_read(nodes_read: u32) -> Self {
        OperationCost {
            nodes_read,
            ..Default::default()
        }
    }

    /// `true` if no work was recorded at all.
    pub fn is_nothing(&self) -> bool {
        *self == Self::default()
    }
}

impl Add for OperationCost {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        OperationCost {
            hash_node_calls: self.hash_node_calls + rhs.hash_node_calls,
            nodes_written: self.nodes_written + rhs.nodes_written,
            nodes_read: self.nodes_read + rhs.nodes_read,
        }
    }
}

impl AddAssign for OperationCost {
    fn add_assign(&mut self, rhs: Self) {
        self.hash_node_calls += rhs.hash_node_calls;
        self.nodes_written += rhs.nodes_written;
        self.nodes_read += rhs.nodes_read;
    }
}
