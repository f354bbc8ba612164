// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! In-memory physics world implementing [`PhysicsPort`].
//!
//! Nodes form a parent/child hierarchy with parent-relative poses. A root
//! node stores its world pose verbatim, so writing a pose to a body root and
//! reading it back is bit-exact. Contacts come from an all-pairs AABB sweep
//! over enabled volumes and are reported once, when a pair starts touching.

use std::collections::{BTreeMap, BTreeSet};

use brick_core::math::Vec3;
use brick_core::{make_node_id, NodeId};
use brick_geom::{Aabb, AabbTree, BroadPhase, Pose};
use brick_snap::port::MAX_HIERARCHY_DEPTH;
use brick_snap::{JointId, PhysicsPort, VolumeContact, VolumeMode};

#[derive(Debug, Clone)]
struct SandboxNode {
    parent: Option<NodeId>,
    local: Pose,
}

/// Collision volume state.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SandboxVolume {
    /// Takes part in contact detection.
    pub enabled: bool,
    /// Solid or trigger.
    pub mode: VolumeMode,
    /// Box half extents in the volume's local frame.
    pub half_extents: Vec3,
}

/// A weld created through the port.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SandboxJoint {
    /// Handle returned to the caller.
    pub id: JointId,
    /// Body that was moved into place.
    pub moving: NodeId,
    /// Body it is welded to.
    pub stationary: NodeId,
}

/// Scene plus physics state for tests.
#[derive(Debug, Default)]
pub struct SandboxWorld {
    nodes: BTreeMap<NodeId, SandboxNode>,
    // value: sleeping
    bodies: BTreeMap<NodeId, bool>,
    volumes: BTreeMap<NodeId, SandboxVolume>,
    joints: Vec<SandboxJoint>,
    touching: BTreeSet<(NodeId, NodeId)>,
    pose_writes: usize,
}

impl SandboxWorld {
    /// Empty world.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a node named `label`. Labels must be unique within a world.
    pub fn add_node(&mut self, label: &str, parent: Option<NodeId>, local: Pose) -> NodeId {
        let id = make_node_id(label);
        self.nodes.insert(id, SandboxNode { parent, local });
        id
    }

    /// Adds a root node carrying an awake rigid body at `pose`.
    pub fn add_body(&mut self, label: &str, pose: Pose) -> NodeId {
        let id = self.add_node(label, None, pose);
        self.bodies.insert(id, false);
        id
    }

    /// Adds an enabled box volume under `parent`.
    pub fn add_volume(
        &mut self,
        label: &str,
        parent: Option<NodeId>,
        local: Pose,
        half_extents: Vec3,
        mode: VolumeMode,
    ) -> NodeId {
        let id = self.add_node(label, parent, local);
        self.volumes.insert(
            id,
            SandboxVolume {
                enabled: true,
                mode,
                half_extents,
            },
        );
        id
    }

    /// Gives an existing node a rigid body.
    pub fn attach_rigid_body(&mut self, node: NodeId) {
        self.bodies.entry(node).or_insert(false);
    }

    /// Puts a body to sleep.
    pub fn put_to_sleep(&mut self, body: NodeId) {
        if let Some(sleeping) = self.bodies.get_mut(&body) {
            *sleeping = true;
        }
    }

    /// `Some(true)` while a body sleeps; `None` for nodes without a body.
    pub fn is_sleeping(&self, body: NodeId) -> Option<bool> {
        self.bodies.get(&body).copied()
    }

    /// Volume state.
    pub fn volume(&self, volume: NodeId) -> Option<SandboxVolume> {
        self.volumes.get(&volume).copied()
    }

    /// Every joint created so far, in creation order.
    pub fn joints(&self) -> &[SandboxJoint] {
        &self.joints
    }

    /// Number of `set_world_pose` calls received.
    pub fn pose_writes(&self) -> usize {
        self.pose_writes
    }

    /// Rigid-body root of `node`, as the physics engine sees it.
    fn body_of(&self, node: NodeId) -> Option<NodeId> {
        let mut cursor = Some(node);
        for _ in 0..MAX_HIERARCHY_DEPTH {
            let n = cursor?;
            if self.bodies.contains_key(&n) {
                return Some(n);
            }
            cursor = self.nodes.get(&n)?.parent;
        }
        None
    }

    fn is_under(&self, node: NodeId, root: NodeId) -> bool {
        let mut cursor = Some(node);
        for _ in 0..MAX_HIERARCHY_DEPTH {
            match cursor {
                Some(n) if n == root => return true,
                Some(n) => cursor = self.nodes.get(&n).and_then(|e| e.parent),
                None => return false,
            }
        }
        false
    }

    /// Runs the broad-phase and returns contact-begin events for pairs of
    /// enabled volumes that were not touching at the previous call. Volumes
    /// sharing a rigid body never contact each other.
    pub fn detect_contacts(&mut self) -> Vec<VolumeContact> {
        let mut tree = AabbTree::new();
        for (id, vol) in &self.volumes {
            if !vol.enabled {
                continue;
            }
            if let Some(pose) = self.world_pose(*id) {
                let local = Aabb::from_center_half_extents(Vec3::ZERO, vol.half_extents);
                tree.upsert(*id, local.transformed(&pose.to_mat4()));
            }
        }

        let current: BTreeSet<(NodeId, NodeId)> = tree
            .pairs()
            .into_iter()
            .filter(|(a, b)| match (self.body_of(*a), self.body_of(*b)) {
                (Some(x), Some(y)) => x != y,
                _ => true,
            })
            .collect();
        let began = current
            .difference(&self.touching)
            .map(|(a, b)| VolumeContact::new(*a, *b))
            .collect();
        self.touching = current;
        began
    }
}

impl PhysicsPort for SandboxWorld {
    fn parent_of(&self, node: NodeId) -> Option<NodeId> {
        self.nodes.get(&node).and_then(|n| n.parent)
    }

    fn has_rigid_body(&self, node: NodeId) -> bool {
        self.bodies.contains_key(&node)
    }

    fn volume_enabled(&self, volume: NodeId) -> Option<bool> {
        self.volumes.get(&volume).map(|v| v.enabled)
    }

    fn set_volume_enabled(&mut self, volume: NodeId, enabled: bool) {
        if let Some(v) = self.volumes.get_mut(&volume) {
            v.enabled = enabled;
        }
    }

    fn volume_mode(&self, volume: NodeId) -> Option<VolumeMode> {
        self.volumes.get(&volume).map(|v| v.mode)
    }

    fn set_volume_mode(&mut self, volume: NodeId, mode: VolumeMode) {
        if let Some(v) = self.volumes.get_mut(&volume) {
            v.mode = mode;
        }
    }

    fn volumes_under(&self, root: NodeId) -> Vec<NodeId> {
        self.volumes
            .keys()
            .copied()
            .filter(|v| self.is_under(*v, root))
            .collect()
    }

    fn world_pose(&self, node: NodeId) -> Option<Pose> {
        // Walk to the root collecting locals, then compose top-down.
        let mut chain = Vec::new();
        let mut cursor = Some(node);
        while let Some(n) = cursor {
            if chain.len() >= MAX_HIERARCHY_DEPTH {
                return None;
            }
            let entry = self.nodes.get(&n)?;
            chain.push(entry.local);
            cursor = entry.parent;
        }
        let mut pose = chain.pop()?;
        while let Some(local) = chain.pop() {
            pose = pose.compose(&local);
        }
        Some(pose)
    }

    fn set_world_pose(&mut self, node: NodeId, pose: Pose) {
        self.pose_writes += 1;
        let parent_world = self
            .nodes
            .get(&node)
            .and_then(|n| n.parent)
            .and_then(|p| self.world_pose(p));
        if let Some(entry) = self.nodes.get_mut(&node) {
            entry.local = match parent_world {
                Some(parent) => parent.inverse().compose(&pose),
                None => pose,
            };
        }
    }

    fn wake(&mut self, body: NodeId) {
        if let Some(sleeping) = self.bodies.get_mut(&body) {
            *sleeping = false;
        }
    }

    fn create_fixed_joint(&mut self, moving: NodeId, stationary: NodeId) -> JointId {
        let id = JointId(self.joints.len() as u64);
        self.joints.push(SandboxJoint {
            id,
            moving,
            stationary,
        });
        id
    }
}
