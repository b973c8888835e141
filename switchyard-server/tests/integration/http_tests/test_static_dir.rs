use axum::body::Body;
use axum::http::{Request, StatusCode};
use http_body_util::BodyExt;
use switchyard_server::{AppState, HubHandle, RelayMode, SignalRouter, app};
use tower::ServiceExt;

use crate::integration::init_tracing;

#[tokio::test]
async fn test_static_dir() {
    init_tracing();

    let dir = std::env::temp_dir().join(format!("switchyard-static-{}", std::process::id()));
    std::fs::create_dir_all(&dir).expect("Failed to create static dir");
    std::fs::write(dir.join("index.html"), "<h1>switchyard</h1>").expect("Failed to write index");

    let hub = HubHandle::spawn(SignalRouter::new(RelayMode::Rooms));
    let router = app(AppState { hub: hub.clone() }, Some(&dir));

    let response = router
        .clone()
        .oneshot(
            Request::builder()
                .uri("/index.html")
                .body(Body::empty())
                .expect("Failed to build request"),
        )
        .await
        .expect("Request failed");
    assert_eq!(response.status(), StatusCode::OK);
    let body = response
        .into_body()
        .collect()
        .await
        .expect("Failed to read body")
        .to_bytes();
    assert_eq!(&body[..], b"<h1>switchyard</h1>");

    let missing = router
        .oneshot(
            Request::builder()
                .uri("/nope.txt")
                .body(Body::empty())
                .expect("Failed to build request"),
        )
        .await
        .expect("Request failed");
    assert_eq!(missing.status(), StatusCode::NOT_FOUND);

    // Without a static dir, unknown paths are plain 404s
    let bare = app(AppState { hub }, None)
        .oneshot(
            Request::builder()
                .uri("/index.html")
                .body(Body::empty())
                .expect("Failed to build request"),
        )
        .await
        .expect("Request failed");
    assert_eq!(bare.status(), StatusCode::NOT_FOUND);

    let _ = std::fs::remove_dir_all(&dir);
}
