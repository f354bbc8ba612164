// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Ports to the host engine: physics, audio, haptics.
//!
//! The snap system never owns a physics world, mixer or controller stack. It
//! talks to them through these traits; adapters live with the host (and a
//! sandbox implementation lives in `brick-dry-tests`).

use brick_core::math::Vec3;
use brick_core::NodeId;
use brick_geom::Pose;

/// Upper bound on parent hops when looking for a body root. A deeper chain is
/// treated as a malformed hierarchy.
pub const MAX_HIERARCHY_DEPTH: usize = 256;

/// Collision response of a volume.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VolumeMode {
    /// Solid: generates contact response.
    Collide,
    /// Trigger: reports overlap, no response.
    Overlap,
}

/// Handle of a joint created through [`PhysicsPort::create_fixed_joint`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct JointId(pub u64);

/// Contact-begin notification between two collision volumes, as reported by
/// the physics engine. Order of `a`/`b` carries no meaning.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct VolumeContact {
    /// One volume.
    pub a: NodeId,
    /// The other volume.
    pub b: NodeId,
}

impl VolumeContact {
    /// Creates a contact between two volumes.
    pub const fn new(a: NodeId, b: NodeId) -> Self {
        Self { a, b }
    }
}

/// Physics/scene surface consumed by the snap system.
pub trait PhysicsPort {
    /// Parent of `node` in the scene hierarchy.
    fn parent_of(&self, node: NodeId) -> Option<NodeId>;
    /// True when `node` carries a rigid body.
    fn has_rigid_body(&self, node: NodeId) -> bool;
    /// Whether the volume currently takes part in collision. `None` when the
    /// volume is unknown.
    fn volume_enabled(&self, volume: NodeId) -> Option<bool>;
    /// Enables or disables a volume. Takes effect immediately: a disabled
    /// volume must not be reported in later contacts.
    fn set_volume_enabled(&mut self, volume: NodeId, enabled: bool);
    /// Current collision response of a volume.
    fn volume_mode(&self, volume: NodeId) -> Option<VolumeMode>;
    /// Switches a volume between solid and trigger response.
    fn set_volume_mode(&mut self, volume: NodeId, mode: VolumeMode);
    /// Every collision volume at or below `root`, including disabled ones.
    fn volumes_under(&self, root: NodeId) -> Vec<NodeId>;
    /// World pose of a node.
    fn world_pose(&self, node: NodeId) -> Option<Pose>;
    /// Moves a node (and its descendants) to a world pose.
    fn set_world_pose(&mut self, node: NodeId, pose: Pose);
    /// Wakes a dormant body.
    fn wake(&mut self, body: NodeId);
    /// Welds `moving` to `stationary`, locking their current relative pose.
    fn create_fixed_joint(&mut self, moving: NodeId, stationary: NodeId) -> JointId;
}

/// Fire-and-forget audio playback.
pub trait AudioPort {
    /// True when a clip resource with this name can be loaded.
    fn has_clip(&self, name: &str) -> bool;
    /// Plays a one-shot clip at a world position.
    fn play_clip_at_point(&mut self, clip: &str, position: Vec3);
}

/// Handle of an input controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ControllerId(pub u32);

/// Fire-and-forget haptic delivery.
pub trait HapticsPort {
    /// Sends one pulse to `controller`.
    fn send_pulse(&mut self, controller: ControllerId, strength: f32, duration_secs: f32);
}

/// Explicit list of controllers eligible for snap haptics.
///
/// The host keeps this current as controllers connect or toggle input; the
/// snap system only reads it.
#[derive(Debug, Clone, Default)]
pub struct ControllerRegistry {
    entries: Vec<(ControllerId, bool)>,
}

impl ControllerRegistry {
    /// Empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a controller or updates its active flag.
    pub fn register(&mut self, id: ControllerId, active: bool) {
        match self.entries.iter_mut().find(|(c, _)| *c == id) {
            Some(entry) => entry.1 = active,
            None => self.entries.push((id, active)),
        }
    }

    /// Marks a controller active or inactive. Unknown ids are ignored.
    pub fn set_active(&mut self, id: ControllerId, active: bool) {
        if let Some(entry) = self.entries.iter_mut().find(|(c, _)| *c == id) {
            entry.1 = active;
        }
    }

    /// Removes a controller.
    pub fn remove(&mut self, id: ControllerId) {
        self.entries.retain(|(c, _)| *c != id);
    }

    /// Controllers with input enabled, in registration order.
    pub fn active(&self) -> impl Iterator<Item = ControllerId> + '_ {
        self.entries
            .iter()
            .filter(|(_, active)| *active)
            .map(|(id, _)| *id)
    }
}

/// Feedback collaborators handed to each step.
pub struct Feedback<'a> {
    /// Audio output.
    pub audio: &'a mut dyn AudioPort,
    /// Haptic output.
    pub haptics: &'a mut dyn HapticsPort,
    /// Controllers to pulse.
    pub controllers: &'a ControllerRegistry,
}

/// Walks from `start` up the hierarchy to the first node carrying a rigid body
/// (including `start` itself).
pub fn resolve_body_root(physics: &dyn PhysicsPort, start: NodeId) -> Option<NodeId> {
    let mut cursor = Some(start);
    for _ in 0..MAX_HIERARCHY_DEPTH {
        let node = cursor?;
        if physics.has_rigid_body(node) {
            return Some(node);
        }
        cursor = physics.parent_of(node);
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn registry_reports_only_active_controllers() {
        let mut reg = ControllerRegistry::new();
        reg.register(ControllerId(1), true);
        reg.register(ControllerId(2), false);
        reg.register(ControllerId(3), true);
        reg.set_active(ControllerId(3), false);
        reg.register(ControllerId(2), true);
        assert_eq!(reg.active().collect::<Vec<_>>(), vec![ControllerId(1), ControllerId(2)]);
        reg.remove(ControllerId(1));
        assert_eq!(reg.active().collect::<Vec<_>>(), vec![ControllerId(2)]);
    }
}
