//! Integration tests for the todo endpoints
//!
//! Verifies request shape (method, path, query, headers, body) and
//! response decoding against a wiremock-based mock server.

use tasksync_core::domain::{ItemId, ItemPatch, OwnerId};
use tasksync_core::ports::IRemoteStore;
use tasksync_http::client::JSON_CONTENT_TYPE;
use tasksync_http::store::HttpRemoteStore;
use wiremock::{
    matchers::{body_json, header, method, path},
    Mock, ResponseTemplate,
};

use crate::common;

fn owner() -> OwnerId {
    OwnerId::new(42).unwrap()
}

// ============================================================================
// List
// ============================================================================

#[tokio::test]
async fn test_list_todos_decodes_items() {
    let (server, client) = common::setup_todo_mock().await;
    common::mount_list(
        &server,
        serde_json::json!([
            common::todo_json(1, "Buy milk", false),
            common::todo_json(2, "Walk dog", true)
        ]),
    )
    .await;

    let items = client.list_todos(owner()).await.expect("List failed");

    assert_eq!(items.len(), 2);
    assert_eq!(items[0].id, ItemId::new(1).unwrap());
    assert_eq!(items[0].owner_id, owner());
    assert_eq!(items[0].title, "Buy milk");
    assert!(items[1].completed);
}

#[tokio::test]
async fn test_list_todos_empty() {
    let (server, client) = common::setup_todo_mock().await;
    common::mount_list(&server, serde_json::json!([])).await;

    let items = client.list_todos(owner()).await.expect("List failed");
    assert!(items.is_empty());
}

#[tokio::test]
async fn test_requests_carry_json_content_type() {
    let (server, client) = common::setup_todo_mock().await;
    Mock::given(method("GET"))
        .and(path("/todos"))
        .and(header("content-type", JSON_CONTENT_TYPE))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([])))
        .expect(1)
        .mount(&server)
        .await;

    client.list_todos(owner()).await.expect("List failed");
}

// ============================================================================
// Create
// ============================================================================

#[tokio::test]
async fn test_create_todo_sends_owner_and_title() {
    let (server, client) = common::setup_todo_mock().await;
    Mock::given(method("POST"))
        .and(path("/todos"))
        .and(body_json(serde_json::json!({
            "userId": 42,
            "title": "Buy milk",
            "completed": false
        })))
        .respond_with(
            ResponseTemplate::new(201).set_body_json(common::todo_json(7, "Buy milk", false)),
        )
        .expect(1)
        .mount(&server)
        .await;

    let item = client
        .create_todo(owner(), "Buy milk")
        .await
        .expect("Create failed");

    assert_eq!(item.id, ItemId::new(7).unwrap());
    assert_eq!(item.title, "Buy milk");
    assert!(!item.completed);
}

// ============================================================================
// Update
// ============================================================================

#[tokio::test]
async fn test_update_sends_only_patched_fields() {
    let (server, client) = common::setup_todo_mock().await;
    Mock::given(method("PATCH"))
        .and(path("/todos/3"))
        .and(body_json(serde_json::json!({"completed": true})))
        .respond_with(ResponseTemplate::new(200).set_body_json(common::todo_json(3, "x", true)))
        .expect(1)
        .mount(&server)
        .await;

    let item = client
        .update_todo(ItemId::new(3).unwrap(), &ItemPatch::completed(true))
        .await
        .expect("Update failed");

    assert!(item.completed);
}

#[tokio::test]
async fn test_update_title_returns_server_echo() {
    let (server, client) = common::setup_todo_mock().await;
    Mock::given(method("PATCH"))
        .and(path("/todos/3"))
        .and(body_json(serde_json::json!({"title": "Renamed"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(common::todo_json(
            3,
            "Renamed by server",
            false,
        )))
        .mount(&server)
        .await;

    let item = client
        .update_todo(ItemId::new(3).unwrap(), &ItemPatch::title("Renamed"))
        .await
        .expect("Update failed");

    assert_eq!(item.title, "Renamed by server");
}

// ============================================================================
// Delete
// ============================================================================

#[tokio::test]
async fn test_delete_accepts_any_success_status() {
    let (server, client) = common::setup_todo_mock().await;
    common::mount_status(&server, "DELETE", 4, 200).await;
    common::mount_status(&server, "DELETE", 5, 204).await;

    client
        .delete_todo(ItemId::new(4).unwrap())
        .await
        .expect("Delete with 200 failed");
    client
        .delete_todo(ItemId::new(5).unwrap())
        .await
        .expect("Delete with 204 failed");
}

// ============================================================================
// Store adapter
// ============================================================================

#[tokio::test]
async fn test_store_delegates_to_client() {
    let (server, client) = common::setup_todo_mock().await;
    common::mount_list(
        &server,
        serde_json::json!([common::todo_json(1, "Buy milk", false)]),
    )
    .await;
    common::mount_status(&server, "DELETE", 1, 200).await;

    let store = HttpRemoteStore::new(client);
    let items = store.list(owner()).await.expect("List failed");
    assert_eq!(items.len(), 1);

    store
        .delete(items[0].id)
        .await
        .expect("Delete failed");
}
