// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Identifier and hashing utilities for scene nodes.
use std::fmt;

use blake3::Hasher;

/// Canonical 256-bit hash used to address scene nodes.
pub type Hash = [u8; 32];

/// Strongly typed handle for a scene node (brick, stud, tube, volume).
///
/// `NodeId` values are obtained from [`make_node_id`] and remain stable across
/// runs because they are derived from a BLAKE3 hash of a string label, so a
/// scene loaded twice yields the same handles.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub struct NodeId(pub Hash);

impl NodeId {
    /// First eight bytes, enough to tell nodes apart in logs.
    pub fn short(&self) -> u64 {
        let mut head = [0u8; 8];
        head.copy_from_slice(&self.0[..8]);
        u64::from_be_bytes(head)
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:016x}", self.short())
    }
}

/// Produces a stable node identifier derived from a label using BLAKE3.
pub fn make_node_id(label: &str) -> NodeId {
    let mut hasher = Hasher::new();
    hasher.update(b"node:");
    hasher.update(label.as_bytes());
    NodeId(hasher.finalize().into())
}
