use switchyard_server::RelayMode;

use crate::integration::init_tracing;
use crate::utils::TestServer;

#[tokio::test]
async fn test_peer_receives_id() {
    init_tracing();

    let server = TestServer::spawn(RelayMode::Rooms)
        .await
        .expect("Failed to start server");

    // connect() fails unless the first frame is the peerId greeting
    let mut a = server.connect().await.expect("Failed to connect client A");
    let b = server.connect().await.expect("Failed to connect client B");

    assert_ne!(a.peer_id, b.peer_id, "Peer IDs must be unique");

    // Nothing else is sent unprompted
    a.expect_silence().await.expect("Client A got an unsolicited message");

    a.close().await.expect("Failed to close client A");
    b.close().await.expect("Failed to close client B");
}
