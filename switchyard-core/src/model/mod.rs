mod peer;
mod room;
mod signaling;

pub use peer::{PeerId, PeerIdParseError};
pub use room::RoomId;
pub use signaling::{
    ClientMessage, DecodeError, PeerRef, PeerSummary, ServerMessage, SignalKind,
};
