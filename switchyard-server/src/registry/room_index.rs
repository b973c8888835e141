use std::collections::{HashMap, HashSet};
use switchyard_core::{PeerId, RoomId};

/// Room ID → member IDs. A room exists only while it has members.
#[derive(Debug, Default)]
pub struct RoomIndex {
    rooms: HashMap<RoomId, HashSet<PeerId>>,
}

impl RoomIndex {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn ensure_room(&mut self, room_id: &RoomId) {
        self.rooms.entry(room_id.clone()).or_default();
    }

    pub fn add_member(&mut self, room_id: &RoomId, peer_id: PeerId) {
        self.rooms.entry(room_id.clone()).or_default().insert(peer_id);
    }

    /// Returns whether the peer was a member. Drops the room once empty.
    pub fn remove_member(&mut self, room_id: &RoomId, peer_id: &PeerId) -> bool {
        let Some(members) = self.rooms.get_mut(room_id) else {
            return false;
        };

        let removed = members.remove(peer_id);
        if members.is_empty() {
            self.rooms.remove(room_id);
        }
        removed
    }

    /// Snapshot of the member set; empty for unknown rooms.
    pub fn members_of(&self, room_id: &RoomId) -> Vec<PeerId> {
        self.rooms
            .get(room_id)
            .map(|members| members.iter().cloned().collect())
            .unwrap_or_default()
    }

    pub fn member_count(&self, room_id: &RoomId) -> usize {
        self.rooms.get(room_id).map_or(0, HashSet::len)
    }

    pub fn contains_room(&self, room_id: &RoomId) -> bool {
        self.rooms.contains_key(room_id)
    }

    pub fn len(&self) -> usize {
        self.rooms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rooms.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&RoomId, &HashSet<PeerId>)> {
        self.rooms.iter()
    }
}
