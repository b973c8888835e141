use crate::config::RelayMode;
use crate::registry::{PeerRegistry, RoomIndex, unix_millis};
use crate::routing::ConnectionHandle;
use serde_json::Value;
use switchyard_core::{ClientMessage, PeerId, PeerSummary, RoomId, ServerMessage, SignalKind};
use tracing::{debug, error, info, warn};

/// Owns all signaling state and decides who hears about what.
///
/// Every method runs to completion without suspending, so a single owner
/// (the hub task) serializes all mutations of the registry and room index.
pub struct SignalRouter {
    mode: RelayMode,
    peers: PeerRegistry,
    rooms: RoomIndex,
}

impl SignalRouter {
    pub fn new(mode: RelayMode) -> Self {
        Self::with_parts(mode, PeerRegistry::new(), RoomIndex::new())
    }

    pub fn with_parts(mode: RelayMode, peers: PeerRegistry, rooms: RoomIndex) -> Self {
        Self { mode, peers, rooms }
    }

    pub fn mode(&self) -> RelayMode {
        self.mode
    }

    pub fn peers(&self) -> &PeerRegistry {
        &self.peers
    }

    pub fn rooms(&self) -> &RoomIndex {
        &self.rooms
    }

    pub fn peer_summaries(&self) -> Vec<PeerSummary> {
        self.peers.summaries()
    }

    /// Registers a new connection and tells the client its ID.
    pub fn connect(&mut self, connection: Box<dyn ConnectionHandle>) -> PeerId {
        let peer_id = self.peers.register(connection);
        info!("Peer connected: {}", peer_id);

        self.deliver(
            &peer_id,
            &ServerMessage::Welcome {
                data: peer_id.clone(),
            },
        );
        peer_id
    }

    /// Decodes one raw frame and dispatches it. Undecodable frames are dropped.
    pub fn handle_frame(&mut self, from: &PeerId, frame: &[u8]) {
        match ClientMessage::decode(frame) {
            Ok(msg) => self.dispatch(from, msg),
            Err(e) => warn!("Dropping malformed message from {}: {}", from, e),
        }
    }

    pub fn dispatch(&mut self, from: &PeerId, msg: ClientMessage) {
        match (self.mode, msg) {
            (RelayMode::Rooms, ClientMessage::JoinRoom { room_id }) => self.join_room(from, room_id),
            (RelayMode::Rooms, ClientMessage::LeaveRoom) => self.leave_room(from),
            (RelayMode::Rooms, ClientMessage::GetRoomPeers) => self.send_room_peers(from),
            (RelayMode::Contacts, ClientMessage::GetPeers) => self.send_peer_list(from),
            (_, ClientMessage::Signal { kind, to, data }) => self.relay(from, kind, &to, data),
            (_, ClientMessage::Unknown { kind }) => {
                warn!("Unknown message type '{}' from {}", kind, from)
            }
            (mode, msg) => debug!(
                "Ignoring '{}' from {}: not available in {} mode",
                msg.kind(),
                from,
                mode
            ),
        }
    }

    /// Moves the peer into `room_id`, leaving its current room first.
    pub fn join_room(&mut self, peer_id: &PeerId, room_id: RoomId) {
        let in_room = match self.peers.get(peer_id) {
            Some(peer) => peer.room_id().is_some(),
            None => return,
        };
        if in_room {
            self.leave_room(peer_id);
        }

        let Some(peer) = self.peers.get_mut(peer_id) else {
            return;
        };
        peer.enter_room(room_id.clone(), unix_millis());
        self.rooms.ensure_room(&room_id);
        self.rooms.add_member(&room_id, peer_id.clone());

        let others: Vec<PeerId> = self
            .rooms
            .members_of(&room_id)
            .into_iter()
            .filter(|id| id != peer_id)
            .collect();
        self.fan_out(&others, &ServerMessage::peer_joined(peer_id.clone()));

        self.send_room_peers(peer_id);
        info!(
            "Peer {} joined room '{}'. members={}",
            peer_id,
            room_id,
            self.rooms.member_count(&room_id)
        );
    }

    pub fn leave_room(&mut self, peer_id: &PeerId) {
        let Some(room_id) = self.peers.get_mut(peer_id).and_then(|p| p.leave_room()) else {
            return;
        };

        self.rooms.remove_member(&room_id, peer_id);

        let remaining = self.rooms.members_of(&room_id);
        self.fan_out(&remaining, &ServerMessage::peer_left(peer_id.clone()));
        info!("Peer {} left room '{}'", peer_id, room_id);
    }

    /// Replies with every other member of the sender's room.
    pub fn send_room_peers(&self, peer_id: &PeerId) {
        let Some(peer) = self.peers.get(peer_id) else {
            return;
        };

        let data = match peer.room_id() {
            Some(room_id) => self
                .rooms
                .members_of(room_id)
                .iter()
                .filter(|id| *id != peer_id)
                .filter_map(|id| self.peers.get(id))
                .map(|p| p.summary())
                .collect(),
            None => Vec::new(),
        };

        self.deliver(peer_id, &ServerMessage::RoomPeers { data });
    }

    /// Contacts mode: replies with every other registered peer.
    pub fn send_peer_list(&self, peer_id: &PeerId) {
        if !self.peers.contains(peer_id) {
            return;
        }

        let data = self
            .peers
            .iter()
            .filter(|p| p.id() != peer_id)
            .map(|p| p.summary())
            .collect();

        self.deliver(peer_id, &ServerMessage::PeerList { data });
    }

    /// Forwards an offer/answer/candidate to `to` without looking at `data`.
    pub fn relay(&mut self, from: &PeerId, kind: SignalKind, to: &str, data: Option<Value>) {
        let target = match to.parse::<PeerId>() {
            Ok(id) if self.peers.contains(&id) => id,
            _ => {
                warn!("Cannot forward {} from {} to '{}'", kind.as_str(), from, to);
                return;
            }
        };

        if self.mode == RelayMode::Contacts {
            self.record_contact(from, &target);
        }

        let msg = ServerMessage::signal(kind, from.clone(), data);
        if !self.deliver(&target, &msg) {
            warn!("Cannot forward {} from {} to {}", kind.as_str(), from, target);
        }
    }

    /// Cleanup for a closed connection: notify whoever should know, then
    /// forget the peer. Calling it for an unknown peer does nothing.
    pub fn disconnect(&mut self, peer_id: &PeerId) {
        if !self.peers.contains(peer_id) {
            return;
        }

        match self.mode {
            RelayMode::Rooms => self.leave_room(peer_id),
            RelayMode::Contacts => self.notify_contacts(peer_id),
        }

        self.peers.remove(peer_id);
        info!("Peer disconnected: {}", peer_id);
    }

    fn record_contact(&mut self, a: &PeerId, b: &PeerId) {
        if let Some(peer) = self.peers.get_mut(a) {
            peer.add_contact(b.clone());
        }
        if let Some(peer) = self.peers.get_mut(b) {
            peer.add_contact(a.clone());
        }
    }

    fn notify_contacts(&self, peer_id: &PeerId) {
        let Some(peer) = self.peers.get(peer_id) else {
            return;
        };

        let contacts: Vec<PeerId> = peer.contacts().iter().cloned().collect();
        self.fan_out(&contacts, &ServerMessage::peer_disconnected(peer_id.clone()));
    }

    fn deliver(&self, to: &PeerId, msg: &ServerMessage) -> bool {
        match msg.to_json() {
            Ok(frame) => self.deliver_frame(to, &frame),
            Err(e) => {
                error!("Failed to serialize message for {}: {}", to, e);
                false
            }
        }
    }

    /// Serializes once, then pushes to each target that is still connected.
    fn fan_out(&self, targets: &[PeerId], msg: &ServerMessage) {
        if targets.is_empty() {
            return;
        }

        let frame = match msg.to_json() {
            Ok(frame) => frame,
            Err(e) => {
                error!("Failed to serialize broadcast: {}", e);
                return;
            }
        };

        for target in targets {
            self.deliver_frame(target, &frame);
        }
    }

    fn deliver_frame(&self, to: &PeerId, frame: &str) -> bool {
        let Some(peer) = self.peers.get(to) else {
            debug!("Skipping send to unregistered peer {}", to);
            return false;
        };

        if !peer.is_open() {
            debug!("Skipping send to closed connection of {}", to);
            return false;
        }

        match peer.send(frame) {
            Ok(()) => true,
            Err(e) => {
                warn!("Failed to send to {}: {}", to, e);
                false
            }
        }
    }
}
