// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Error types for connector registration and snap resolution.

use std::fmt;

use brick_core::NodeId;
use thiserror::Error;

use crate::config::ConfigValidationError;

/// Which half of a connector pair an error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SnapSide {
    /// The stud; its body stays put.
    Plug,
    /// The tube; its body moves onto the stud.
    Socket,
}

impl fmt::Display for SnapSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Plug => f.write_str("plug"),
            Self::Socket => f.write_str("socket"),
        }
    }
}

/// Failures surfaced by the snap system.
///
/// None of these reach the contact caller as a panic: registration errors are
/// returned to the scene builder, snap-time errors end up in a
/// [`crate::SnapEvent::Failed`] plus a `warn!` line.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SnapError {
    /// No ancestor of the connector's volume carries a rigid body.
    #[error("no rigid-body root above {side} volume {volume}")]
    RootNotFound {
        /// Side whose walk came up empty.
        side: SnapSide,
        /// The connector's collision volume.
        volume: NodeId,
    },
    /// A node involved in the snap has no world pose.
    #[error("no world pose for node {0}")]
    PoseUnavailable(NodeId),
    /// The physics port does not know this volume.
    #[error("volume {0} is not known to the physics port")]
    UnknownVolume(NodeId),
    /// A connector is already registered on this volume.
    #[error("volume {0} already hosts a connector")]
    DuplicateVolume(NodeId),
    /// Rejected configuration.
    #[error("invalid snap config: {0}")]
    InvalidConfig(#[from] ConfigValidationError),
}
