// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Stud (plug) and tube (socket) connector state plus the registry that maps
//! volumes back to connectors.

use std::fmt;

use brick_core::NodeId;
use rustc_hash::FxHashMap;

use crate::config::SnapConfig;
use crate::port::PhysicsPort;

/// Handle of a registered plug.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PlugId(pub u32);

/// Handle of a registered socket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SocketId(pub u32);

impl fmt::Display for PlugId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "plug#{}", self.0)
    }
}

impl fmt::Display for SocketId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "socket#{}", self.0)
    }
}

/// Either kind of connector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ConnectorRef {
    /// A stud.
    Plug(PlugId),
    /// A tube.
    Socket(SocketId),
}

/// Female connector: remembers whether it has been used.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Socket {
    volume: NodeId,
    body_root: Option<NodeId>,
    connected: bool,
}

impl Socket {
    pub(crate) fn new(volume: NodeId, body_root: Option<NodeId>) -> Self {
        Self {
            volume,
            body_root,
            connected: false,
        }
    }

    /// Collision volume this socket owns.
    pub fn volume(&self) -> NodeId {
        self.volume
    }

    /// Rigid-body root resolved at registration.
    pub fn body_root(&self) -> Option<NodeId> {
        self.body_root
    }

    /// True once this socket took part in a snap or its assembly saturated.
    pub fn is_connected(&self) -> bool {
        self.connected
    }

    /// Unconditional set. Only the snap system calls this.
    pub fn set_connected(&mut self, value: bool) {
        self.connected = value;
    }
}

/// Male connector: carries the snap configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct Plug {
    volume: NodeId,
    body_root: Option<NodeId>,
    connected: bool,
    config: SnapConfig,
}

impl Plug {
    pub(crate) fn new(volume: NodeId, body_root: Option<NodeId>, config: SnapConfig) -> Self {
        Self {
            volume,
            body_root,
            connected: false,
            config,
        }
    }

    /// Collision volume this plug owns.
    pub fn volume(&self) -> NodeId {
        self.volume
    }

    /// Rigid-body root resolved at registration.
    pub fn body_root(&self) -> Option<NodeId> {
        self.body_root
    }

    /// True once this plug has been consumed.
    pub fn is_connected(&self) -> bool {
        self.connected
    }

    /// Snap behaviour for contacts this plug accepts.
    pub fn config(&self) -> &SnapConfig {
        &self.config
    }

    // Monotonic: there is no path back to false.
    pub(crate) fn mark_connected(&mut self) {
        self.connected = true;
    }
}

/// Arena of connectors with O(1) lookup by volume.
#[derive(Debug, Default)]
pub struct ConnectorRegistry {
    plugs: Vec<Plug>,
    sockets: Vec<Socket>,
    by_volume: FxHashMap<NodeId, ConnectorRef>,
}

impl ConnectorRegistry {
    /// True if a connector already owns `volume`.
    pub fn contains_volume(&self, volume: NodeId) -> bool {
        self.by_volume.contains_key(&volume)
    }

    pub(crate) fn insert_plug(&mut self, plug: Plug) -> PlugId {
        let id = PlugId(index_u32(self.plugs.len()));
        self.by_volume.insert(plug.volume, ConnectorRef::Plug(id));
        self.plugs.push(plug);
        id
    }

    pub(crate) fn insert_socket(&mut self, socket: Socket) -> SocketId {
        let id = SocketId(index_u32(self.sockets.len()));
        self.by_volume.insert(socket.volume, ConnectorRef::Socket(id));
        self.sockets.push(socket);
        id
    }

    /// Connector owning `volume`.
    pub fn by_volume(&self, volume: NodeId) -> Option<ConnectorRef> {
        self.by_volume.get(&volume).copied()
    }

    /// Plug by handle.
    pub fn plug(&self, id: PlugId) -> Option<&Plug> {
        self.plugs.get(id.0 as usize)
    }

    pub(crate) fn plug_mut(&mut self, id: PlugId) -> Option<&mut Plug> {
        self.plugs.get_mut(id.0 as usize)
    }

    /// Socket by handle.
    pub fn socket(&self, id: SocketId) -> Option<&Socket> {
        self.sockets.get(id.0 as usize)
    }

    pub(crate) fn socket_mut(&mut self, id: SocketId) -> Option<&mut Socket> {
        self.sockets.get_mut(id.0 as usize)
    }

    /// Every connector anywhere below `root` in the scene hierarchy.
    ///
    /// Connectors under a nested rigid body still count: the walk follows
    /// the node tree, not the nearest-body back-references.
    pub fn assembly(&self, physics: &dyn PhysicsPort, root: NodeId) -> Vec<ConnectorRef> {
        physics
            .volumes_under(root)
            .into_iter()
            .filter_map(|volume| self.by_volume(volume))
            .collect()
    }

    /// Volume of any connector.
    pub fn volume_of(&self, connector: ConnectorRef) -> Option<NodeId> {
        match connector {
            ConnectorRef::Plug(id) => self.plug(id).map(Plug::volume),
            ConnectorRef::Socket(id) => self.socket(id).map(Socket::volume),
        }
    }

    /// Connected flag of any connector.
    pub fn is_connected(&self, connector: ConnectorRef) -> Option<bool> {
        match connector {
            ConnectorRef::Plug(id) => self.plug(id).map(Plug::is_connected),
            ConnectorRef::Socket(id) => self.socket(id).map(Socket::is_connected),
        }
    }

    /// Marks a connector used.
    pub(crate) fn mark_connected(&mut self, connector: ConnectorRef) {
        match connector {
            ConnectorRef::Plug(id) => {
                if let Some(p) = self.plug_mut(id) {
                    p.mark_connected();
                }
            }
            ConnectorRef::Socket(id) => {
                if let Some(s) = self.socket_mut(id) {
                    s.set_connected(true);
                }
            }
        }
    }

    /// Number of registered plugs.
    pub fn plug_count(&self) -> usize {
        self.plugs.len()
    }

    /// Number of registered sockets.
    pub fn socket_count(&self) -> usize {
        self.sockets.len()
    }
}

fn index_u32(len: usize) -> u32 {
    // A scene with four billion studs is not a brick scene.
    u32::try_from(len).unwrap_or(u32::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;
    use brick_core::make_node_id;

    #[test]
    fn socket_flag_is_idempotent() {
        let mut s = Socket::new(make_node_id("tube"), None);
        assert!(!s.is_connected());
        s.set_connected(true);
        s.set_connected(true);
        assert!(s.is_connected());
    }

    #[test]
    fn volumes_map_back_to_connectors() {
        let brick = make_node_id("brick");
        let mut reg = ConnectorRegistry::default();
        let p = reg.insert_plug(Plug::new(
            make_node_id("brick/stud"),
            Some(brick),
            SnapConfig::default(),
        ));
        let orphan = reg.insert_socket(Socket::new(make_node_id("orphan"), None));

        assert_eq!(
            reg.by_volume(make_node_id("brick/stud")),
            Some(ConnectorRef::Plug(p))
        );
        assert_eq!(
            reg.by_volume(make_node_id("orphan")),
            Some(ConnectorRef::Socket(orphan))
        );
        assert_eq!(reg.by_volume(brick), None);
        reg.mark_connected(ConnectorRef::Socket(orphan));
        assert_eq!(reg.is_connected(ConnectorRef::Socket(orphan)), Some(true));
        assert_eq!(reg.is_connected(ConnectorRef::Plug(p)), Some(false));
    }
}
