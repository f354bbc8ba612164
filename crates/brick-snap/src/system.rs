// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Snap system: connector registration, contact acceptance, and the per-step
//! drive of in-flight snaps.

use std::collections::BTreeSet;

use brick_core::NodeId;
use tracing::{debug, error, instrument, trace};

use crate::config::SnapConfig;
use crate::connector::{ConnectorRef, ConnectorRegistry, Plug, PlugId, Socket, SocketId};
use crate::error::SnapError;
use crate::port::{resolve_body_root, Feedback, PhysicsPort, VolumeContact, VolumeMode};
use crate::snap::{SnapEvent, SnapOp, SnapPhase};

/// Owns every connector and every in-flight snap.
///
/// Contact callbacks ([`SnapSystem::on_contact`] /
/// [`SnapSystem::dispatch_contact`]) only accept or reject; all pose changes
/// happen inside [`SnapSystem::step`], which the host calls once the physics
/// pass for the step has completed.
#[derive(Debug)]
pub struct SnapSystem {
    default_config: SnapConfig,
    registry: ConnectorRegistry,
    in_flight: Vec<SnapOp>,
    busy_roots: BTreeSet<NodeId>,
    // Contacts turned away because a brick was mid-snap, as (plug, other volume).
    held: Vec<(PlugId, NodeId)>,
}

impl Default for SnapSystem {
    fn default() -> Self {
        Self {
            default_config: SnapConfig::default(),
            registry: ConnectorRegistry::default(),
            in_flight: Vec::new(),
            busy_roots: BTreeSet::new(),
            held: Vec::new(),
        }
    }
}

impl SnapSystem {
    /// Creates a system whose plugs default to `config`.
    pub fn new(config: SnapConfig) -> Result<Self, SnapError> {
        config.validate()?;
        Ok(Self {
            default_config: config,
            ..Self::default()
        })
    }

    /// Config new plugs get from [`SnapSystem::register_plug`].
    pub fn default_config(&self) -> &SnapConfig {
        &self.default_config
    }

    /// Read access to every connector.
    pub fn registry(&self) -> &ConnectorRegistry {
        &self.registry
    }

    /// Registers a plug on `volume` with the system's default config.
    pub fn register_plug(
        &mut self,
        physics: &dyn PhysicsPort,
        volume: NodeId,
    ) -> Result<PlugId, SnapError> {
        let config = self.default_config.clone();
        self.register_plug_with(physics, volume, config)
    }

    /// Registers a plug on `volume` with its own config.
    pub fn register_plug_with(
        &mut self,
        physics: &dyn PhysicsPort,
        volume: NodeId,
        config: SnapConfig,
    ) -> Result<PlugId, SnapError> {
        config.validate()?;
        self.check_volume(physics, volume)?;
        if physics.volume_mode(volume) != Some(VolumeMode::Overlap) {
            // Still registered: a solid stud can snap, it just also pushes.
            error!(%volume, "plug volume should be a trigger (overlap) volume");
        }
        let root = resolve_body_root(physics, volume);
        let id = self.registry.insert_plug(Plug::new(volume, root, config));
        debug!(plug = %id, %volume, root = ?root, "plug registered");
        Ok(id)
    }

    /// Registers a socket on `volume`.
    pub fn register_socket(
        &mut self,
        physics: &dyn PhysicsPort,
        volume: NodeId,
    ) -> Result<SocketId, SnapError> {
        self.check_volume(physics, volume)?;
        let root = resolve_body_root(physics, volume);
        let id = self.registry.insert_socket(Socket::new(volume, root));
        debug!(socket = %id, %volume, root = ?root, "socket registered");
        Ok(id)
    }

    fn check_volume(&self, physics: &dyn PhysicsPort, volume: NodeId) -> Result<(), SnapError> {
        if self.registry.contains_volume(volume) {
            return Err(SnapError::DuplicateVolume(volume));
        }
        if physics.volume_enabled(volume).is_none() {
            return Err(SnapError::UnknownVolume(volume));
        }
        Ok(())
    }

    /// Handles a contact reported on `plug`'s volume.
    ///
    /// Returns `true` when the contact was accepted and a snap is now
    /// scheduled for the end of this step. Acceptance disables both volumes
    /// before returning, so any later contact this step involving either of
    /// them is rejected.
    pub fn on_contact(
        &mut self,
        plug: PlugId,
        other_volume: NodeId,
        physics: &mut dyn PhysicsPort,
    ) -> bool {
        let Some(p) = self.registry.plug(plug) else {
            return false;
        };
        if p.is_connected() || physics.volume_enabled(p.volume()) != Some(true) {
            return false;
        }
        let Some(ConnectorRef::Socket(socket)) = self.registry.by_volume(other_volume) else {
            return false;
        };
        let Some(s) = self.registry.socket(socket) else {
            return false;
        };
        if s.is_connected() || physics.volume_enabled(s.volume()) != Some(true) {
            return false;
        }

        let plug_side = (p.volume(), p.body_root());
        let socket_side = (s.volume(), s.body_root());
        if let (Some(a), Some(b)) = (plug_side.1, socket_side.1) {
            if a == b {
                trace!(%plug, %socket, "contact inside one brick ignored");
                return false;
            }
        }
        if [plug_side.1, socket_side.1]
            .iter()
            .flatten()
            .any(|root| self.busy_roots.contains(root))
        {
            // Contact-begin fires once per touch, so keep the pair for a retry.
            trace!(%plug, %socket, "brick already mid-snap; contact held");
            if !self.held.contains(&(plug, other_volume)) {
                self.held.push((plug, other_volume));
            }
            return false;
        }

        // Re-entrancy guard: takes effect before anything else can observe it.
        physics.set_volume_enabled(plug_side.0, false);
        physics.set_volume_enabled(socket_side.0, false);

        let op = SnapOp::new(plug, socket, plug_side, socket_side, p.config().clone());
        self.busy_roots.extend(op.claimed_roots());
        self.in_flight.push(op);
        debug!(%plug, %socket, "snap scheduled for end of step");
        true
    }

    /// Routes a raw volume contact to [`SnapSystem::on_contact`] when exactly
    /// one side is a plug. Returns whether a snap was accepted.
    pub fn dispatch_contact(
        &mut self,
        contact: &VolumeContact,
        physics: &mut dyn PhysicsPort,
    ) -> bool {
        match (
            self.registry.by_volume(contact.a),
            self.registry.by_volume(contact.b),
        ) {
            (Some(ConnectorRef::Plug(plug)), _) if self.on_contact(plug, contact.b, physics) => {
                true
            }
            (_, Some(ConnectorRef::Plug(plug))) => self.on_contact(plug, contact.a, physics),
            _ => false,
        }
    }

    /// Advances every in-flight snap by `dt` seconds. Call once per step,
    /// after the physics pass and contact dispatch.
    ///
    /// Contacts that were held back because one of their bricks was busy are
    /// offered again once a snap releases its bricks; an accepted retry moves
    /// at the end of the next step.
    #[instrument(level = "trace", skip_all)]
    pub fn step(
        &mut self,
        dt: f32,
        physics: &mut dyn PhysicsPort,
        feedback: &mut Feedback<'_>,
    ) -> Vec<SnapEvent> {
        let dt = if dt.is_finite() { dt.max(0.0) } else { 0.0 };
        let mut events = Vec::new();
        for op in &mut self.in_flight {
            if let Some(event) = op.advance(dt, &mut self.registry, physics, feedback) {
                events.push(event);
            }
        }
        let busy = &mut self.busy_roots;
        let mut released = false;
        self.in_flight.retain(|op| {
            if op.phase().is_terminal() {
                for root in op.claimed_roots() {
                    busy.remove(&root);
                }
                released = true;
                false
            } else {
                true
            }
        });
        if released {
            for (plug, other_volume) in std::mem::take(&mut self.held) {
                if self.on_contact(plug, other_volume, physics) {
                    debug!(%plug, "held contact accepted");
                }
            }
        }
        events
    }

    /// Number of contacts waiting for a busy brick to settle.
    pub fn held_contacts(&self) -> usize {
        self.held.len()
    }

    /// Number of snaps not yet done or failed.
    pub fn in_flight(&self) -> usize {
        self.in_flight.len()
    }

    /// Phase of the snap `plug` is driving, if any.
    pub fn phase_of(&self, plug: PlugId) -> Option<SnapPhase> {
        self.in_flight
            .iter()
            .find(|op| op.plug() == plug)
            .map(SnapOp::phase)
    }
}
