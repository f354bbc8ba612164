// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! brick-core: shared math and identifiers for the brick snap system.
//!
//! Higher crates build poses (`brick-geom`) and the stud/tube snap logic
//! (`brick-snap`) on top of these primitives.
#![forbid(unsafe_code)]

/// Float32 math (Vec3, Quat, Mat4, easing).
pub mod math;

mod ident;

pub use ident::{make_node_id, Hash, NodeId};
