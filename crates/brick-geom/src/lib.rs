// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
#![forbid(unsafe_code)]
#![doc = r"Geometry primitives for brick snapping.

This crate provides:
- Rigid poses (`Pose`) with parent/child composition.
- Axis-aligned bounding boxes (`Aabb`) for trigger volumes.
- A minimal broad-phase (`AabbTree`) that reports overlapping trigger pairs.
- `SnapSpan`, the start-to-target path an animated snap samples each step.

Design notes:
- Float32 throughout, matching `brick-core::math`.
- Pair outputs are canonical `(min, max)` and sorted, so contact order is
  reproducible run to run.
"]

/// Overlap queries over trigger volumes.
pub mod broad;
/// Snap interpolation paths.
pub mod temporal;
/// Foundational geometric types.
pub mod types;

pub use broad::aabb_tree::{AabbTree, BroadPhase};
pub use temporal::snap_span::SnapSpan;
pub use types::aabb::Aabb;
pub use types::pose::Pose;
