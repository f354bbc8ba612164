// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Core geometry types used by snapping (pose, AABB).
//!
//! Overlap semantics are inclusive on faces: a stud resting exactly on a tube
//! rim counts as touching.

#[doc = "Axis-aligned bounding boxes (world space)."]
pub mod aabb;
#[doc = "Rigid poses (position + rotation)."]
pub mod pose;
