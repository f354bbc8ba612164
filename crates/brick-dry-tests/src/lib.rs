// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Shared test doubles and fixtures for Brickworks crates.
#![forbid(unsafe_code)]
//!
//! # Modules
//!
//! - [`config`] - In-memory config store fake for testing without filesystem
//! - [`feedback`] - Recording audio and haptics ports
//! - [`sandbox`] - In-memory physics world with AABB contact detection
//! - [`scene`] - Brick builder (root, collider, studs, tubes)
//! - [`workbench`] - World + snap system + feedback rig driven per frame

pub mod config;
pub mod feedback;
pub mod sandbox;
pub mod scene;
pub mod workbench;

pub use config::InMemoryPrefsStore;
pub use feedback::{PlayedClip, Pulse, RecordingAudio, RecordingHaptics};
pub use sandbox::{SandboxJoint, SandboxVolume, SandboxWorld};
pub use scene::{BrickBuilder, BrickNodes, DEFAULT_CONNECTOR_HALF_EXTENT};
pub use workbench::{BuiltBrick, Workbench};
