use anyhow::{Context, Result};
use std::net::SocketAddr;
use switchyard_server::{RelayMode, ServerConfig, serve_with_listener};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

use super::test_client::TestClient;

/// A real server on an ephemeral localhost port, stopped on drop.
pub struct TestServer {
    pub addr: SocketAddr,
    task: JoinHandle<()>,
}

impl TestServer {
    pub async fn spawn(mode: RelayMode) -> Result<Self> {
        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .context("Failed to bind test listener")?;
        let addr = listener.local_addr()?;

        let config = ServerConfig {
            mode,
            ..ServerConfig::default()
        };
        let task = tokio::spawn(async move {
            if let Err(e) = serve_with_listener(listener, config).await {
                tracing::error!("[TestServer] {:#}", e);
            }
        });

        Ok(Self { addr, task })
    }

    pub fn ws_url(&self) -> String {
        format!("ws://{}/ws", self.addr)
    }

    pub async fn connect(&self) -> Result<TestClient> {
        TestClient::connect(&self.ws_url()).await
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.task.abort();
    }
}
