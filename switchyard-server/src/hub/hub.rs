use crate::hub::HubCommand;
use crate::routing::SignalRouter;
use tokio::sync::mpsc;
use tracing::{info, warn};

/// Single task owning the [`SignalRouter`]. Commands are applied one at a
/// time in arrival order.
pub struct Hub {
    router: SignalRouter,
    command_rx: mpsc::Receiver<HubCommand>,
}

impl Hub {
    pub fn new(router: SignalRouter, command_rx: mpsc::Receiver<HubCommand>) -> Self {
        Self { router, command_rx }
    }

    pub async fn run(mut self) {
        info!("Signaling hub started ({} mode)", self.router.mode());

        while let Some(cmd) = self.command_rx.recv().await {
            self.handle_command(cmd);
        }

        info!("Command channel closed. Shutting down hub.");
    }

    fn handle_command(&mut self, cmd: HubCommand) {
        match cmd {
            HubCommand::Open { connection, reply } => {
                let peer_id = self.router.connect(connection);

                if reply.send(peer_id.clone()).is_err() {
                    warn!("Connection for {} went away before registration finished", peer_id);
                    self.router.disconnect(&peer_id);
                }
            }

            HubCommand::Frame { peer_id, payload } => {
                self.router.handle_frame(&peer_id, &payload);
            }

            HubCommand::Close { peer_id } => {
                self.router.disconnect(&peer_id);
            }

            HubCommand::ListPeers { reply } => {
                let _ = reply.send(self.router.peer_summaries());
            }
        }
    }
}
