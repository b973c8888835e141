use crate::error::SendError;
use crate::registry::unix_millis;
use crate::routing::ConnectionHandle;
use std::collections::{HashMap, HashSet};
use switchyard_core::{PeerId, PeerSummary, RoomId};

/// A registered client.
pub struct Peer {
    id: PeerId,
    connection: Box<dyn ConnectionHandle>,
    room_id: Option<RoomId>,
    created_at: u64,
    joined_at: Option<u64>,
    contacts: HashSet<PeerId>,
}

impl Peer {
    fn new(id: PeerId, connection: Box<dyn ConnectionHandle>, created_at: u64) -> Self {
        Self {
            id,
            connection,
            room_id: None,
            created_at,
            joined_at: None,
            contacts: HashSet::new(),
        }
    }

    pub fn id(&self) -> &PeerId {
        &self.id
    }

    pub fn room_id(&self) -> Option<&RoomId> {
        self.room_id.as_ref()
    }

    pub fn created_at(&self) -> u64 {
        self.created_at
    }

    pub fn joined_at(&self) -> Option<u64> {
        self.joined_at
    }

    pub fn contacts(&self) -> &HashSet<PeerId> {
        &self.contacts
    }

    pub fn is_open(&self) -> bool {
        self.connection.is_open()
    }

    pub fn send(&self, frame: &str) -> Result<(), SendError> {
        self.connection.send(frame)
    }

    /// Time of the last join, or of registration if the peer never joined.
    pub fn summary(&self) -> PeerSummary {
        PeerSummary {
            id: self.id.clone(),
            timestamp: self.joined_at.unwrap_or(self.created_at),
        }
    }

    pub(crate) fn enter_room(&mut self, room_id: RoomId, at: u64) {
        self.room_id = Some(room_id);
        self.joined_at = Some(at);
    }

    pub(crate) fn leave_room(&mut self) -> Option<RoomId> {
        self.room_id.take()
    }

    pub(crate) fn add_contact(&mut self, peer_id: PeerId) {
        if peer_id != self.id {
            self.contacts.insert(peer_id);
        }
    }
}

/// Peer ID → peer entry. Lookups that miss are not errors; callers treat a
/// vanished peer as a no-op.
#[derive(Default)]
pub struct PeerRegistry {
    peers: HashMap<PeerId, Peer>,
}

impl PeerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocates an ID not held by any live peer and binds it to `connection`.
    pub fn register(&mut self, connection: Box<dyn ConnectionHandle>) -> PeerId {
        let mut id = PeerId::new();
        while self.peers.contains_key(&id) {
            id = PeerId::new();
        }

        self.peers
            .insert(id.clone(), Peer::new(id.clone(), connection, unix_millis()));
        id
    }

    pub fn get(&self, id: &PeerId) -> Option<&Peer> {
        self.peers.get(id)
    }

    pub fn get_mut(&mut self, id: &PeerId) -> Option<&mut Peer> {
        self.peers.get_mut(id)
    }

    pub fn remove(&mut self, id: &PeerId) -> Option<Peer> {
        self.peers.remove(id)
    }

    pub fn contains(&self, id: &PeerId) -> bool {
        self.peers.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.peers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.peers.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Peer> {
        self.peers.values()
    }

    pub fn summaries(&self) -> Vec<PeerSummary> {
        self.peers.values().map(Peer::summary).collect()
    }
}
