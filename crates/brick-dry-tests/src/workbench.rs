// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! A sandbox world, a snap system and recording feedback wired together.

use brick_core::NodeId;
use brick_sched::FrameStep;
use brick_snap::{
    ControllerId, ControllerRegistry, Feedback, PlugId, SnapConfig, SnapError, SnapEvent,
    SnapSystem, SocketId,
};

use crate::feedback::{RecordingAudio, RecordingHaptics};
use crate::sandbox::SandboxWorld;
use crate::scene::{BrickBuilder, BrickNodes};

/// A brick registered with the snap system.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuiltBrick {
    /// Scene nodes.
    pub nodes: BrickNodes,
    /// One plug per stud, same order.
    pub plugs: Vec<PlugId>,
    /// One socket per tube, same order.
    pub sockets: Vec<SocketId>,
}

impl BuiltBrick {
    /// Body root node.
    pub fn root(&self) -> NodeId {
        self.nodes.root
    }
}

/// Test rig: one frame = contact detection, dispatch, snap step.
pub struct Workbench {
    /// Physics double.
    pub world: SandboxWorld,
    /// System under test.
    pub snaps: SnapSystem,
    /// Audio double.
    pub audio: RecordingAudio,
    /// Haptics double.
    pub haptics: RecordingHaptics,
    /// Controllers eligible for pulses.
    pub controllers: ControllerRegistry,
    /// Every event seen so far.
    pub events: Vec<SnapEvent>,
}

impl Workbench {
    /// Rig with `config` as the plug default, audio that knows the
    /// fallback clip, and one active controller.
    pub fn new(config: SnapConfig) -> Result<Self, SnapError> {
        let audio = RecordingAudio::with_clips([config.fallback_sound.clone()]);
        let mut controllers = ControllerRegistry::new();
        controllers.register(ControllerId(0), true);
        Ok(Self {
            world: SandboxWorld::new(),
            snaps: SnapSystem::new(config)?,
            audio,
            haptics: RecordingHaptics::new(),
            controllers,
            events: Vec::new(),
        })
    }

    /// Builds a brick and registers its studs as plugs (default config) and
    /// tubes as sockets.
    pub fn add_brick(&mut self, brick: &BrickBuilder) -> Result<BuiltBrick, SnapError> {
        let config = self.snaps.default_config().clone();
        self.add_brick_with(brick, &config)
    }

    /// Like [`Workbench::add_brick`] with an explicit plug config.
    pub fn add_brick_with(
        &mut self,
        brick: &BrickBuilder,
        plug_config: &SnapConfig,
    ) -> Result<BuiltBrick, SnapError> {
        let nodes = brick.build(&mut self.world);
        let plugs = nodes
            .studs
            .iter()
            .map(|v| {
                self.snaps
                    .register_plug_with(&self.world, *v, plug_config.clone())
            })
            .collect::<Result<Vec<_>, _>>()?;
        let sockets = nodes
            .tubes
            .iter()
            .map(|v| self.snaps.register_socket(&self.world, *v))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(BuiltBrick {
            nodes,
            plugs,
            sockets,
        })
    }

    /// Steps the snap system with the rig's feedback doubles.
    fn step_snaps(&mut self, dt: f32) -> Vec<SnapEvent> {
        let mut feedback = Feedback {
            audio: &mut self.audio,
            haptics: &mut self.haptics,
            controllers: &self.controllers,
        };
        self.snaps.step(dt, &mut self.world, &mut feedback)
    }

    /// Runs one frame and returns the events it produced.
    pub fn frame(&mut self, dt: f32) -> Vec<SnapEvent> {
        for contact in self.world.detect_contacts() {
            self.snaps.dispatch_contact(&contact, &mut self.world);
        }
        let events = self.step_snaps(dt);
        self.events.extend(events.iter().cloned());
        events
    }

    /// Runs `frames` frames.
    pub fn run_frames(&mut self, frames: usize, dt: f32) -> Vec<SnapEvent> {
        (0..frames).flat_map(|_| self.frame(dt)).collect()
    }
}

impl FrameStep for Workbench {
    fn step(&mut self, dt: f32) -> anyhow::Result<()> {
        self.frame(dt);
        Ok(())
    }
}
