//! Shared test helpers for todo service integration tests
//!
//! Each helper mounts mock endpoints on a wiremock server. Clients are
//! pointed at the server's URI.

use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use tasksync_http::client::RestClient;

/// Starts a mock server and returns a client pointing at it
pub async fn setup_todo_mock() -> (MockServer, RestClient) {
    let server = MockServer::start().await;
    let client = RestClient::with_base_url(server.uri());
    (server, client)
}

pub fn todo_json(id: u64, title: &str, completed: bool) -> serde_json::Value {
    serde_json::json!({
        "id": id,
        "userId": 42,
        "title": title,
        "completed": completed
    })
}

/// Mounts `GET /todos?userId=42` returning `items`
pub async fn mount_list(server: &MockServer, items: serde_json::Value) {
    Mock::given(method("GET"))
        .and(path("/todos"))
        .and(query_param("userId", "42"))
        .respond_with(ResponseTemplate::new(200).set_body_json(items))
        .mount(server)
        .await;
}

/// Mounts `method` on `/todos/{id}` returning a bare status
#[allow(dead_code)]
pub async fn mount_status(server: &MockServer, verb: &str, id: u64, status: u16) {
    Mock::given(method(verb))
        .and(path(format!("/todos/{id}")))
        .respond_with(ResponseTemplate::new(status))
        .mount(server)
        .await;
}
