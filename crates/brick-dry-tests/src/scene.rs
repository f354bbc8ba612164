// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Brick builder for sandbox scenes.

use brick_core::math::{Quat, Vec3};
use brick_core::NodeId;
use brick_geom::Pose;
use brick_snap::VolumeMode;

use crate::sandbox::SandboxWorld;

/// Default half extent of stud and tube trigger boxes.
pub const DEFAULT_CONNECTOR_HALF_EXTENT: f32 = 0.06;

/// Node handles of a built brick.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BrickNodes {
    /// Root node (the rigid body unless built without one).
    pub root: NodeId,
    /// Solid collider, if requested.
    pub body_collider: Option<NodeId>,
    /// Stud volumes in declaration order.
    pub studs: Vec<NodeId>,
    /// Tube volumes in declaration order.
    pub tubes: Vec<NodeId>,
}

/// Declarative brick: a root, optional solid collider, studs and tubes.
///
/// Studs and tubes are parented under an intermediate `mesh` node so body
/// root resolution has to walk more than one hop.
#[derive(Debug, Clone)]
pub struct BrickBuilder {
    label: String,
    pose: Pose,
    rigid: bool,
    body_half_extents: Option<Vec3>,
    connector_half_extent: f32,
    studs: Vec<Vec3>,
    tubes: Vec<Vec3>,
}

impl BrickBuilder {
    /// Brick named `label` at the origin with a rigid body.
    pub fn new(label: &str) -> Self {
        Self {
            label: label.to_owned(),
            pose: Pose::identity(),
            rigid: true,
            body_half_extents: None,
            connector_half_extent: DEFAULT_CONNECTOR_HALF_EXTENT,
            studs: Vec::new(),
            tubes: Vec::new(),
        }
    }

    /// World position of the root.
    pub fn at(mut self, position: Vec3) -> Self {
        self.pose = self.pose.with_position(position);
        self
    }

    /// World rotation of the root.
    pub fn rotated(mut self, rotation: Quat) -> Self {
        self.pose = self.pose.with_rotation(rotation);
        self
    }

    /// Leaves the root without a rigid body.
    pub fn without_rigid_body(mut self) -> Self {
        self.rigid = false;
        self
    }

    /// Adds a solid box collider centred on the root.
    pub fn body_collider(mut self, half_extents: Vec3) -> Self {
        self.body_half_extents = Some(half_extents);
        self
    }

    /// Half extent of every stud/tube box.
    pub fn connector_size(mut self, half_extent: f32) -> Self {
        self.connector_half_extent = half_extent;
        self
    }

    /// Adds a stud at `local` (relative to the root).
    pub fn stud(mut self, local: Vec3) -> Self {
        self.studs.push(local);
        self
    }

    /// Adds a tube at `local` (relative to the root).
    pub fn tube(mut self, local: Vec3) -> Self {
        self.tubes.push(local);
        self
    }

    /// Materialises the brick in `world`.
    pub fn build(&self, world: &mut SandboxWorld) -> BrickNodes {
        let label = &self.label;
        let root = if self.rigid {
            world.add_body(label, self.pose)
        } else {
            world.add_node(label, None, self.pose)
        };
        let body_collider = self.body_half_extents.map(|he| {
            world.add_volume(
                &format!("{label}/collider"),
                Some(root),
                Pose::identity(),
                he,
                VolumeMode::Collide,
            )
        });
        let mesh = world.add_node(&format!("{label}/mesh"), Some(root), Pose::identity());
        let he = Vec3::new(
            self.connector_half_extent,
            self.connector_half_extent,
            self.connector_half_extent,
        );
        let studs = self
            .studs
            .iter()
            .enumerate()
            .map(|(i, local)| {
                world.add_volume(
                    &format!("{label}/stud{i}"),
                    Some(mesh),
                    Pose::at(*local),
                    he,
                    VolumeMode::Overlap,
                )
            })
            .collect();
        let tubes = self
            .tubes
            .iter()
            .enumerate()
            .map(|(i, local)| {
                world.add_volume(
                    &format!("{label}/tube{i}"),
                    Some(mesh),
                    Pose::at(*local),
                    he,
                    VolumeMode::Overlap,
                )
            })
            .collect();
        BrickNodes {
            root,
            body_collider,
            studs,
            tubes,
        }
    }
}
