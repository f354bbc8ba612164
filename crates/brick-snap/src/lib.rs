// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Stud/tube snapping for brick assemblies.
//!
//! A [`Plug`] (stud) and a [`Socket`] (tube) each own one collision volume.
//! When the physics engine reports contact between them the [`SnapSystem`]
//! accepts it synchronously (disabling both volumes so nothing can re-enter),
//! then at the end of the step moves the socket's brick so the two connector
//! origins coincide, welds the bricks with a fixed joint, locks every other
//! connector on both bricks, and plays a click plus a haptic pulse.
//!
//! The host engine is reached only through the traits in [`port`].
#![forbid(unsafe_code)]

pub mod config;
mod connector;
mod error;
pub mod port;
mod snap;
mod system;

pub use config::{ConfigValidationError, HapticPulse, SnapConfig};
pub use connector::{ConnectorRef, ConnectorRegistry, Plug, PlugId, Socket, SocketId};
pub use error::{SnapError, SnapSide};
pub use port::{
    AudioPort, ControllerId, ControllerRegistry, Feedback, HapticsPort, JointId, PhysicsPort,
    VolumeContact, VolumeMode,
};
pub use snap::{SnapEvent, SnapOp, SnapPhase};
pub use system::SnapSystem;
