//! Helpers shared by the unit tests.

use tracing_subscriber::EnvFilter;

use crate::hash::{Digest, combine};

/// Right-pad (or truncate) `bytes` into a digest-shaped value.
pub(crate) fn to_bytes32(bytes: &[u8]) -> Digest {
    let mut out = [0u8; 32];
    let n = bytes.len().min(32);
    out[..n].copy_from_slice(&bytes[..n]);
    out
}

/// Leaves `"A"`, `"B"`, ... as padded digests.
pub(crate) fn letter_leaves(count: u8) -> Vec<Digest> {
    (0..count).map(|i| to_bytes32(&[b'A' + i])).collect()
}

/// Data root computed the slow way: materialize all `2^depth` leaves and
/// hash every level. Only usable for small depths.
pub(crate) fn naive_data_root(leaves: &[Digest], depth: u8) -> Digest {
    let mut level: Vec<Digest> = (0..1usize << depth)
        .map(|i| leaves.get(i).copied().unwrap_or([0u8; 32]))
        .collect();
    while level.len() > 1 {
        level = level
            .chunks(2)
            .map(|pair| combine(&pair[0], &pair[1]))
            .collect();
    }
    level[0]
}

/// Route `tracing` output through the test harness. Honours `RUST_LOG`.
pub(crate) fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}
