use switchyard_core::ServerMessage;
use switchyard_server::RelayMode;

use crate::integration::init_tracing;
use crate::utils::{TestServer, get_room_peers, peer_ids, sorted};

#[tokio::test]
async fn test_two_peers_join_room() {
    init_tracing();

    let server = TestServer::spawn(RelayMode::Rooms)
        .await
        .expect("Failed to start server");
    let mut a = server.connect().await.expect("Failed to connect A");
    let mut b = server.connect().await.expect("Failed to connect B");
    let mut c = server.connect().await.expect("Failed to connect C");

    let first = a.join_room("x").await.expect("A failed to join");
    assert!(first.is_empty(), "First member sees an empty room");

    let second = b.join_room("x").await.expect("B failed to join");
    assert_eq!(peer_ids(&second), vec![a.peer_id.clone()]);
    assert_eq!(
        a.recv().await.expect("A missed peerJoined"),
        ServerMessage::peer_joined(b.peer_id.clone())
    );

    let third = c.join_room("x").await.expect("C failed to join");
    assert_eq!(
        peer_ids(&third),
        sorted(vec![a.peer_id.clone(), b.peer_id.clone()])
    );
    for member in [&mut a, &mut b] {
        assert_eq!(
            member.recv().await.expect("Member missed peerJoined"),
            ServerMessage::peer_joined(c.peer_id.clone())
        );
    }

    // Nobody hears about their own join
    c.expect_silence().await.expect("C must not be told about itself");

    a.send_json(get_room_peers()).await.expect("Failed to send");
    match a.recv().await.expect("No roomPeers reply") {
        ServerMessage::RoomPeers { data } => assert_eq!(
            peer_ids(&data),
            sorted(vec![b.peer_id.clone(), c.peer_id.clone()])
        ),
        other => panic!("Expected roomPeers, got {:?}", other),
    }

    a.close().await.expect("Failed to close A");
    b.close().await.expect("Failed to close B");
    c.close().await.expect("Failed to close C");
}
