//! Integration tests for error mapping
//!
//! Non-success statuses, undecodable bodies and transport failures must
//! surface as `HttpError` behind the request context.

use std::time::Duration;

use tasksync_core::domain::{ItemId, ItemPatch, OwnerId};
use tasksync_http::client::RestClient;
use tasksync_http::HttpError;
use wiremock::{
    matchers::{method, path},
    Mock, ResponseTemplate,
};

use crate::common;

#[tokio::test]
async fn test_not_found_maps_to_http_error() {
    let (server, client) = common::setup_todo_mock().await;
    common::mount_status(&server, "DELETE", 9, 404).await;

    let err = client
        .delete_todo(ItemId::new(9).unwrap())
        .await
        .unwrap_err();

    assert!(matches!(
        err.downcast_ref::<HttpError>(),
        Some(HttpError::NotFound(_))
    ));
    assert!(format!("{err:#}").starts_with("DELETE /todos/9 failed"));
}

#[tokio::test]
async fn test_server_error_keeps_status_and_body() {
    let (server, client) = common::setup_todo_mock().await;
    Mock::given(method("PATCH"))
        .and(path("/todos/2"))
        .respond_with(ResponseTemplate::new(503).set_body_string("maintenance"))
        .mount(&server)
        .await;

    let err = client
        .update_todo(ItemId::new(2).unwrap(), &ItemPatch::completed(true))
        .await
        .unwrap_err();

    match err.downcast_ref::<HttpError>() {
        Some(HttpError::ServerError { status, body }) => {
            assert_eq!(*status, 503);
            assert_eq!(body, "maintenance");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn test_client_error_maps_to_status() {
    let (server, client) = common::setup_todo_mock().await;
    Mock::given(method("POST"))
        .and(path("/todos"))
        .respond_with(ResponseTemplate::new(400))
        .mount(&server)
        .await;

    let err = client
        .create_todo(OwnerId::new(42).unwrap(), "x")
        .await
        .unwrap_err();

    assert!(matches!(
        err.downcast_ref::<HttpError>(),
        Some(HttpError::Status { status: 400, .. })
    ));
}

#[tokio::test]
async fn test_malformed_body_is_invalid_response() {
    let (server, client) = common::setup_todo_mock().await;
    common::mount_list(&server, serde_json::json!({"not": "a list"})).await;

    let err = client
        .list_todos(OwnerId::new(42).unwrap())
        .await
        .unwrap_err();

    assert!(matches!(
        err.downcast_ref::<HttpError>(),
        Some(HttpError::InvalidResponse(_))
    ));
}

#[tokio::test]
async fn test_zero_id_in_response_is_rejected() {
    let (server, client) = common::setup_todo_mock().await;
    common::mount_list(&server, serde_json::json!([common::todo_json(0, "x", false)])).await;

    let err = client
        .list_todos(OwnerId::new(42).unwrap())
        .await
        .unwrap_err();

    assert!(matches!(
        err.downcast_ref::<HttpError>(),
        Some(HttpError::InvalidResponse(_))
    ));
}

#[tokio::test]
async fn test_connection_refused_is_network_error() {
    // Reserve a free port, then close it so the connection is refused
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let port = listener.local_addr().unwrap().port();
    drop(listener);
    let uri = format!("http://127.0.0.1:{port}");
    let client = RestClient::with_timeout(&uri, Duration::from_secs(2)).unwrap();

    let err = client
        .delete_todo(ItemId::new(1).unwrap())
        .await
        .unwrap_err();

    assert!(matches!(
        err.downcast_ref::<HttpError>(),
        Some(HttpError::Network(_))
    ));
}
