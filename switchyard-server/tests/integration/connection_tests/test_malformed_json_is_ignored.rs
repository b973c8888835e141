use switchyard_core::ServerMessage;
use switchyard_server::RelayMode;

use crate::integration::init_tracing;
use crate::utils::{TestServer, get_room_peers};

#[tokio::test]
async fn test_malformed_json_is_ignored() {
    init_tracing();

    let server = TestServer::spawn(RelayMode::Rooms)
        .await
        .expect("Failed to start server");
    let mut client = server.connect().await.expect("Failed to connect");

    for garbage in ["{oops", "[]", "42", r#"{"roomId":"x"}"#, r#"{"type":"joinRoom"}"#] {
        client.send_text(garbage).await.expect("Failed to send");
    }
    client
        .send_text(r#"{"type":"teleport","to":"nowhere"}"#)
        .await
        .expect("Failed to send");

    client
        .expect_silence()
        .await
        .expect("Malformed input must not produce a reply");

    // Connection is still open and served
    client
        .send_json(get_room_peers())
        .await
        .expect("Failed to send getRoomPeers");
    let reply = client.recv().await.expect("No reply after malformed input");
    assert_eq!(reply, ServerMessage::RoomPeers { data: vec![] });

    // Fields the request does not use are not validated
    client
        .send_text(r#"{"type":"getRoomPeers","to":7,"roomId":false}"#)
        .await
        .expect("Failed to send getRoomPeers");
    let reply = client.recv().await.expect("Stray fields blocked the request");
    assert_eq!(reply, ServerMessage::RoomPeers { data: vec![] });

    client.close().await.expect("Failed to close client");
}
