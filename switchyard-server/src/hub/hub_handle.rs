use crate::error::HubError;
use crate::hub::{Hub, HubCommand};
use crate::routing::{ConnectionHandle, SignalRouter};
use bytes::Bytes;
use switchyard_core::{PeerId, PeerSummary};
use tokio::sync::{mpsc, oneshot};

const COMMAND_BUFFER: usize = 256;

/// Cloneable front door to the hub task.
#[derive(Clone)]
pub struct HubHandle {
    command_tx: mpsc::Sender<HubCommand>,
}

impl HubHandle {
    /// Spawns the hub task that will own `router`.
    pub fn spawn(router: SignalRouter) -> Self {
        let (command_tx, command_rx) = mpsc::channel(COMMAND_BUFFER);
        tokio::spawn(Hub::new(router, command_rx).run());
        Self { command_tx }
    }

    pub async fn open(&self, connection: Box<dyn ConnectionHandle>) -> Result<PeerId, HubError> {
        let (reply, reply_rx) = oneshot::channel();
        self.send(HubCommand::Open { connection, reply }).await?;
        reply_rx.await.map_err(|_| HubError::Stopped)
    }

    pub async fn frame(&self, peer_id: PeerId, payload: Bytes) -> Result<(), HubError> {
        self.send(HubCommand::Frame { peer_id, payload }).await
    }

    pub async fn close(&self, peer_id: PeerId) -> Result<(), HubError> {
        self.send(HubCommand::Close { peer_id }).await
    }

    pub async fn list_peers(&self) -> Result<Vec<PeerSummary>, HubError> {
        let (reply, reply_rx) = oneshot::channel();
        self.send(HubCommand::ListPeers { reply }).await?;
        reply_rx.await.map_err(|_| HubError::Stopped)
    }

    async fn send(&self, cmd: HubCommand) -> Result<(), HubError> {
        self.command_tx
            .send(cmd)
            .await
            .map_err(|_| HubError::Stopped)
    }
}
