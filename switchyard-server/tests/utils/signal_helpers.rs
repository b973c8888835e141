use serde_json::{Value, json};
use switchyard_core::{PeerId, PeerSummary};

/// Timeout for a single expected server message (ms).
pub const RECV_TIMEOUT_MS: u64 = 5000;

/// How long a client waits to confirm nothing arrives (ms).
pub const SILENCE_WINDOW_MS: u64 = 300;

pub fn join_room(room: &str) -> Value {
    json!({ "type": "joinRoom", "roomId": room })
}

pub fn leave_room() -> Value {
    json!({ "type": "leaveRoom" })
}

pub fn get_room_peers() -> Value {
    json!({ "type": "getRoomPeers" })
}

pub fn get_peers() -> Value {
    json!({ "type": "getPeers" })
}

/// `offer` / `answer` / `iceCandidate` addressed to `to`.
pub fn signal(kind: &str, to: &PeerId, data: Value) -> Value {
    json!({ "type": kind, "to": to.to_string(), "data": data })
}

/// IDs from a peer listing, sorted so tests do not depend on set order.
pub fn peer_ids(summaries: &[PeerSummary]) -> Vec<PeerId> {
    let mut ids: Vec<PeerId> = summaries.iter().map(|s| s.id.clone()).collect();
    ids.sort_by_key(|id| id.to_string());
    ids
}

pub fn sorted(mut ids: Vec<PeerId>) -> Vec<PeerId> {
    ids.sort_by_key(|id| id.to_string());
    ids
}
