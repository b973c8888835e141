use crate::model::peer::PeerId;
use crate::model::room::RoomId;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// The three negotiation messages relayed verbatim between peers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SignalKind {
    Offer,
    Answer,
    IceCandidate,
}

impl SignalKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            SignalKind::Offer => "offer",
            SignalKind::Answer => "answer",
            SignalKind::IceCandidate => "iceCandidate",
        }
    }

    fn from_type(kind: &str) -> Option<Self> {
        match kind {
            "offer" => Some(SignalKind::Offer),
            "answer" => Some(SignalKind::Answer),
            "iceCandidate" => Some(SignalKind::IceCandidate),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PeerRef {
    pub peer_id: PeerId,
}

/// One entry of a `roomPeers` / `peerList` reply.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PeerSummary {
    pub id: PeerId,
    /// Unix time in milliseconds.
    pub timestamp: u64,
}

/// Everything the server ever writes to a client.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum ServerMessage {
    /// Sent once, right after the connection opens.
    #[serde(rename = "peerId")]
    Welcome { data: PeerId },
    PeerJoined { data: PeerRef },
    PeerLeft { data: PeerRef },
    /// Contacts mode replacement for `peerLeft`.
    PeerDisconnected { data: PeerRef },
    RoomPeers { data: Vec<PeerSummary> },
    /// Contacts mode reply to `getPeers`.
    PeerList { data: Vec<PeerSummary> },
    Offer {
        from: PeerId,
        #[serde(
            default,
            deserialize_with = "present",
            skip_serializing_if = "Option::is_none"
        )]
        data: Option<Value>,
    },
    Answer {
        from: PeerId,
        #[serde(
            default,
            deserialize_with = "present",
            skip_serializing_if = "Option::is_none"
        )]
        data: Option<Value>,
    },
    IceCandidate {
        from: PeerId,
        #[serde(
            default,
            deserialize_with = "present",
            skip_serializing_if = "Option::is_none"
        )]
        data: Option<Value>,
    },
}

/// `None` only when the key is absent; an explicit `null` stays `Some(Null)`.
fn present<'de, D>(deserializer: D) -> Result<Option<Value>, D::Error>
where
    D: Deserializer<'de>,
{
    Value::deserialize(deserializer).map(Some)
}

impl ServerMessage {
    pub fn signal(kind: SignalKind, from: PeerId, data: Option<Value>) -> Self {
        match kind {
            SignalKind::Offer => ServerMessage::Offer { from, data },
            SignalKind::Answer => ServerMessage::Answer { from, data },
            SignalKind::IceCandidate => ServerMessage::IceCandidate { from, data },
        }
    }

    pub fn peer_joined(peer_id: PeerId) -> Self {
        ServerMessage::PeerJoined {
            data: PeerRef { peer_id },
        }
    }

    pub fn peer_left(peer_id: PeerId) -> Self {
        ServerMessage::PeerLeft {
            data: PeerRef { peer_id },
        }
    }

    pub fn peer_disconnected(peer_id: PeerId) -> Self {
        ServerMessage::PeerDisconnected {
            data: PeerRef { peer_id },
        }
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum DecodeError {
    #[error("frame is not valid UTF-8: {0}")]
    Utf8(#[from] std::str::Utf8Error),

    #[error("frame is not a valid message: {0}")]
    Json(#[from] serde_json::Error),

    #[error("message has no string 'type'")]
    MissingType,

    #[error("'{kind}' message is missing '{field}'")]
    MissingField {
        kind: &'static str,
        field: &'static str,
    },
}

/// A decoded client request.
#[derive(Debug, Clone, PartialEq)]
pub enum ClientMessage {
    JoinRoom {
        room_id: RoomId,
    },
    LeaveRoom,
    GetRoomPeers,
    /// Contacts mode: list every other registered peer.
    GetPeers,
    /// `to` stays a raw string; an unparseable target is just an unknown peer.
    Signal {
        kind: SignalKind,
        to: String,
        data: Option<Value>,
    },
    Unknown {
        kind: String,
    },
}

impl ClientMessage {
    /// Decodes a transport frame. Binary frames go through the same path as
    /// text ones and must hold UTF-8 JSON.
    pub fn decode(frame: &[u8]) -> Result<Self, DecodeError> {
        let text = std::str::from_utf8(frame)?;
        Self::from_json(text)
    }

    /// Only `type` and the fields that type uses are looked at; anything
    /// else on the object is ignored.
    pub fn from_json(text: &str) -> Result<Self, DecodeError> {
        let mut fields: Map<String, Value> = serde_json::from_str(text)?;

        let kind = match fields.remove("type") {
            Some(Value::String(kind)) => kind,
            _ => return Err(DecodeError::MissingType),
        };

        if let Some(signal) = SignalKind::from_type(&kind) {
            let to = match fields.remove("to") {
                Some(Value::String(to)) => to,
                Some(Value::Null) | None => {
                    return Err(DecodeError::MissingField {
                        kind: signal.as_str(),
                        field: "to",
                    });
                }
                // Not an ID, so it will resolve to an unknown peer.
                Some(other) => other.to_string(),
            };
            return Ok(ClientMessage::Signal {
                kind: signal,
                to,
                data: fields.remove("data"),
            });
        }

        let msg = match kind.as_str() {
            "joinRoom" => match fields.remove("roomId") {
                Some(Value::String(room_id)) => ClientMessage::JoinRoom {
                    room_id: RoomId(room_id),
                },
                _ => {
                    return Err(DecodeError::MissingField {
                        kind: "joinRoom",
                        field: "roomId",
                    });
                }
            },
            "leaveRoom" => ClientMessage::LeaveRoom,
            "getRoomPeers" => ClientMessage::GetRoomPeers,
            "getPeers" => ClientMessage::GetPeers,
            _ => ClientMessage::Unknown { kind },
        };

        Ok(msg)
    }

    /// Wire name of the message, for logging.
    pub fn kind(&self) -> &str {
        match self {
            ClientMessage::JoinRoom { .. } => "joinRoom",
            ClientMessage::LeaveRoom => "leaveRoom",
            ClientMessage::GetRoomPeers => "getRoomPeers",
            ClientMessage::GetPeers => "getPeers",
            ClientMessage::Signal { kind, .. } => kind.as_str(),
            ClientMessage::Unknown { kind } => kind.as_str(),
        }
    }
}
