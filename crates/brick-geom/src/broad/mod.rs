// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>

//! Broad-phase interfaces and a minimal reference implementation.
//!
//! - Pair identity is canonicalized as `(min_key, max_key)`.
//! - The emitted pair list is strictly sorted lexicographically by that tuple.
//! - Overlap is inclusive on faces.

#[doc = "Reference AABB-based broad-phase and trait definitions."]
pub mod aabb_tree;
