use crate::error::SendError;

/// Outbound half of a client connection. The peer registry owns one per peer
/// and the router writes serialized frames through it.
///
/// Sends must not block: the router runs on the hub task and a slow client
/// must never hold up other peers.
pub trait ConnectionHandle: Send + Sync {
    /// Queue one text frame for the client.
    fn send(&self, frame: &str) -> Result<(), SendError>;

    /// `false` once the underlying transport has gone away.
    fn is_open(&self) -> bool;
}
