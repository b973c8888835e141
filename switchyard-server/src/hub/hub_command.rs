use crate::routing::ConnectionHandle;
use bytes::Bytes;
use switchyard_core::{PeerId, PeerSummary};
use tokio::sync::oneshot;

/// Commands sent to the hub by connection tasks and HTTP handlers.
pub enum HubCommand {
    /// A transport connection opened; register it and reply with its ID.
    Open {
        connection: Box<dyn ConnectionHandle>,
        reply: oneshot::Sender<PeerId>,
    },

    /// Raw inbound frame from an open connection.
    Frame { peer_id: PeerId, payload: Bytes },

    /// The connection closed or failed.
    Close { peer_id: PeerId },

    /// Read-only snapshot of every registered peer.
    ListPeers {
        reply: oneshot::Sender<Vec<PeerSummary>>,
    },
}
