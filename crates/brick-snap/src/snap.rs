// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Per-snap state machine.
//!
//! One [`SnapOp`] exists for every accepted plug/socket contact. The owning
//! [`crate::SnapSystem`] advances it once per scheduler step:
//!
//! ```text
//! AwaitingEndOfStep ─▶ Resolving ─┬─▶ Correcting{elapsed} ─▶ Finalizing ─▶ Done
//!                                 ├─▶ Finalizing (instant)
//!                                 └─▶ Failed
//! ```
//!
//! The only step that can fail is root/pose resolution. Everything after it
//! is treated as succeeding.

use brick_core::math::Vec3;
use brick_core::NodeId;
use brick_geom::{Pose, SnapSpan};
use tracing::{debug, info, warn};

use crate::config::SnapConfig;
use crate::connector::{ConnectorRef, ConnectorRegistry, PlugId, SocketId};
use crate::error::{SnapError, SnapSide};
use crate::port::{Feedback, JointId, PhysicsPort, VolumeMode};

/// Where a snap currently is.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SnapPhase {
    /// Accepted this step; waits until the physics pass that reported the
    /// contact has finished.
    AwaitingEndOfStep,
    /// Looking up body roots and poses.
    Resolving,
    /// Animated approach with `elapsed` seconds accumulated.
    Correcting {
        /// Seconds since correction started.
        elapsed: f32,
    },
    /// Landing on the exact target, joining, saturating, feedback.
    Finalizing,
    /// Bricks are welded.
    Done,
    /// Resolution failed; the pair stays inert.
    Failed,
}

impl SnapPhase {
    /// True for `Done` and `Failed`.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Done | Self::Failed)
    }
}

/// Outcome reported by [`crate::SnapSystem::step`].
#[derive(Debug, Clone, PartialEq)]
pub enum SnapEvent {
    /// The socket's brick now sits on the plug's brick, welded.
    Joined {
        /// Plug that accepted the contact.
        plug: PlugId,
        /// Socket it bound to.
        socket: SocketId,
        /// Body root that stayed put.
        stationary: NodeId,
        /// Body root that was moved.
        moving: NodeId,
        /// Fixed joint linking the two roots.
        joint: JointId,
    },
    /// The snap was abandoned; both volumes stay disabled.
    Failed {
        /// Plug that accepted the contact.
        plug: PlugId,
        /// Socket it tried to bind.
        socket: SocketId,
        /// Why.
        error: SnapError,
    },
}

#[derive(Debug, Clone)]
struct SnapPlan {
    stationary: NodeId,
    moving: NodeId,
    span: SnapSpan,
    contact_point: Vec3,
    suppressed: Vec<(NodeId, VolumeMode)>,
}

/// One in-flight snap between an accepted plug and socket.
#[derive(Debug, Clone)]
pub struct SnapOp {
    plug: PlugId,
    socket: SocketId,
    plug_volume: NodeId,
    socket_volume: NodeId,
    stationary_root: Option<NodeId>,
    moving_root: Option<NodeId>,
    config: SnapConfig,
    phase: SnapPhase,
    plan: Option<SnapPlan>,
}

impl SnapOp {
    pub(crate) fn new(
        plug: PlugId,
        socket: SocketId,
        (plug_volume, stationary_root): (NodeId, Option<NodeId>),
        (socket_volume, moving_root): (NodeId, Option<NodeId>),
        config: SnapConfig,
    ) -> Self {
        Self {
            plug,
            socket,
            plug_volume,
            socket_volume,
            stationary_root,
            moving_root,
            config,
            phase: SnapPhase::AwaitingEndOfStep,
            plan: None,
        }
    }

    /// Plug side.
    pub fn plug(&self) -> PlugId {
        self.plug
    }

    /// Socket side.
    pub fn socket(&self) -> SocketId {
        self.socket
    }

    /// Current phase.
    pub fn phase(&self) -> SnapPhase {
        self.phase
    }

    /// Body roots this op holds exclusive use of.
    pub(crate) fn claimed_roots(&self) -> impl Iterator<Item = NodeId> {
        self.stationary_root.into_iter().chain(self.moving_root)
    }

    /// Runs phases until the op has to wait for the next step or ends.
    pub(crate) fn advance(
        &mut self,
        dt: f32,
        registry: &mut ConnectorRegistry,
        physics: &mut dyn PhysicsPort,
        feedback: &mut Feedback<'_>,
    ) -> Option<SnapEvent> {
        loop {
            match self.phase {
                SnapPhase::AwaitingEndOfStep => self.phase = SnapPhase::Resolving,
                SnapPhase::Resolving => match self.resolve(physics) {
                    Ok(plan) => {
                        debug!(
                            plug = %self.plug,
                            socket = %self.socket,
                            moving = %plan.moving,
                            stationary = %plan.stationary,
                            "snap resolved"
                        );
                        self.plan = Some(plan);
                        self.phase = if self.config.instant_snap_enabled {
                            SnapPhase::Finalizing
                        } else {
                            SnapPhase::Correcting { elapsed: 0.0 }
                        };
                    }
                    Err(error) => {
                        warn!(
                            plug = %self.plug,
                            socket = %self.socket,
                            %error,
                            "couldn't find brick with rigid body; snap abandoned"
                        );
                        self.phase = SnapPhase::Failed;
                        return Some(SnapEvent::Failed {
                            plug: self.plug,
                            socket: self.socket,
                            error,
                        });
                    }
                },
                SnapPhase::Correcting { elapsed } => {
                    let elapsed = elapsed + dt;
                    let duration = self.config.effective_duration();
                    if elapsed >= duration {
                        self.phase = SnapPhase::Finalizing;
                        continue;
                    }
                    if let Some(plan) = &self.plan {
                        physics.set_world_pose(plan.moving, plan.span.sample_eased(elapsed, duration));
                    }
                    self.phase = SnapPhase::Correcting { elapsed };
                    return None;
                }
                SnapPhase::Finalizing => {
                    let event = self.finalize(registry, physics, feedback);
                    self.phase = SnapPhase::Done;
                    return event;
                }
                SnapPhase::Done | SnapPhase::Failed => return None,
            }
        }
    }

    fn resolve(&self, physics: &mut dyn PhysicsPort) -> Result<SnapPlan, SnapError> {
        let stationary = self.stationary_root.ok_or(SnapError::RootNotFound {
            side: SnapSide::Plug,
            volume: self.plug_volume,
        })?;
        let moving = self.moving_root.ok_or(SnapError::RootNotFound {
            side: SnapSide::Socket,
            volume: self.socket_volume,
        })?;

        let pose = |node: NodeId| physics.world_pose(node).ok_or(SnapError::PoseUnavailable(node));
        let plug_pose = pose(self.plug_volume)?;
        let socket_pose = pose(self.socket_volume)?;
        let moving_start = pose(moving)?;
        let stationary_pose = pose(stationary)?;

        // Vector from tube to stud, added to wherever the moving brick is now.
        let offset = plug_pose.position().sub(&socket_pose.position());
        let target_rotation = if self.config.align_rotation_on_snap {
            stationary_pose.rotation()
        } else {
            moving_start.rotation()
        };
        let target = Pose::new(moving_start.position().add(&offset), target_rotation);

        // Nothing below can fail, so it is safe to start touching volumes.
        let suppressed: Vec<(NodeId, VolumeMode)> = physics
            .volumes_under(moving)
            .into_iter()
            .filter_map(|v| physics.volume_mode(v).map(|mode| (v, mode)))
            .collect();
        for (volume, _) in &suppressed {
            physics.set_volume_mode(*volume, VolumeMode::Overlap);
        }

        Ok(SnapPlan {
            stationary,
            moving,
            span: SnapSpan::new(moving_start, target),
            contact_point: plug_pose.position(),
            suppressed,
        })
    }

    fn finalize(
        &mut self,
        registry: &mut ConnectorRegistry,
        physics: &mut dyn PhysicsPort,
        feedback: &mut Feedback<'_>,
    ) -> Option<SnapEvent> {
        let plan = self.plan.take()?;

        // Authoritative landing; the approach above may be an ulp short.
        physics.set_world_pose(plan.moving, plan.span.target());

        for (volume, mode) in &plan.suppressed {
            physics.set_volume_mode(*volume, *mode);
        }
        physics.wake(plan.moving);

        let joint = physics.create_fixed_joint(plan.moving, plan.stationary);

        saturate_assembly(registry, physics, plan.stationary);
        saturate_assembly(registry, physics, plan.moving);

        let contact_point = physics
            .world_pose(self.plug_volume)
            .map_or(plan.contact_point, |p| p.position());
        self.play_feedback(contact_point, feedback);

        registry.mark_connected(ConnectorRef::Plug(self.plug));
        if let Some(socket) = registry.socket_mut(self.socket) {
            socket.set_connected(true);
        }

        info!(
            moving = %plan.moving,
            stationary = %plan.stationary,
            ?joint,
            "snap! bricks joined"
        );

        Some(SnapEvent::Joined {
            plug: self.plug,
            socket: self.socket,
            stationary: plan.stationary,
            moving: plan.moving,
            joint,
        })
    }

    fn play_feedback(&self, point: Vec3, feedback: &mut Feedback<'_>) {
        let fallback = self.config.fallback_sound.as_str();
        let clip = match self.config.snap_sound.as_deref() {
            Some(clip) => Some(clip),
            None if !fallback.is_empty() && feedback.audio.has_clip(fallback) => Some(fallback),
            None => None,
        };
        if let Some(clip) = clip {
            feedback.audio.play_clip_at_point(clip, point);
        }

        let pulse = self.config.haptics;
        for controller in feedback.controllers.active() {
            feedback
                .haptics
                .send_pulse(controller, pulse.strength, pulse.duration_secs);
        }
    }
}

/// Marks every connector below `root` used and disables its volume.
fn saturate_assembly(registry: &mut ConnectorRegistry, physics: &mut dyn PhysicsPort, root: NodeId) {
    for connector in registry.assembly(physics, root) {
        registry.mark_connected(connector);
        if let Some(volume) = registry.volume_of(connector) {
            physics.set_volume_enabled(volume, false);
        }
    }
}
