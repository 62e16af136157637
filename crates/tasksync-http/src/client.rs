//! REST client for the todo service
//!
//! Wraps `reqwest::Client` with base URL construction, the JSON content
//! type the service expects, and mapping of non-success statuses to
//! [`HttpError`].
//!
//! ## Endpoints
//!
//! | Operation | Request |
//! |-----------|---------|
//! | list      | `GET /todos?userId={owner}` |
//! | create    | `POST /todos` |
//! | update    | `PATCH /todos/{id}` |
//! | delete    | `DELETE /todos/{id}` |
//!
//! ## Usage
//!
//! ```rust,no_run
//! use tasksync_core::domain::OwnerId;
//! use tasksync_http::client::RestClient;
//!
//! # async fn example() -> anyhow::Result<()> {
//! let client = RestClient::new();
//! let items = client.list_todos(OwnerId::new(42)?).await?;
//! println!("{} items", items.len());
//! # Ok(())
//! # }
//! ```

use std::time::Duration;

use anyhow::{Context, Result};
use reqwest::header::CONTENT_TYPE;
use reqwest::{Client, Method, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::debug;
use url::Url;

use tasksync_core::config::{Config, DEFAULT_BASE_URL};
use tasksync_core::domain::{Item, ItemId, ItemPatch, OwnerId};

use crate::HttpError;

/// Content type sent with every request
pub const JSON_CONTENT_TYPE: &str = "application/json; charset=UTF-8";

/// Body of `POST /todos`
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct NewTodo<'a> {
    user_id: OwnerId,
    title: &'a str,
    completed: bool,
}

// ============================================================================
// RestClient
// ============================================================================

/// HTTP client for the `/todos` resource
#[derive(Debug, Clone)]
pub struct RestClient {
    client: Client,
    /// Base URL without a trailing slash
    base_url: String,
}

impl RestClient {
    /// Creates a client for the default service
    pub fn new() -> Self {
        Self::with_base_url(DEFAULT_BASE_URL)
    }

    /// Creates a client with a custom base URL (useful for testing)
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    /// Creates a client for `base_url` whose requests time out after `timeout`
    pub fn with_timeout(base_url: &str, timeout: Duration) -> Result<Self> {
        let parsed =
            Url::parse(base_url).with_context(|| format!("Invalid base URL: {base_url}"))?;
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .context("Failed to build HTTP client")?;
        Ok(Self {
            client,
            base_url: parsed.as_str().trim_end_matches('/').to_string(),
        })
    }

    /// Creates a client from the `remote` section of the configuration
    pub fn from_config(config: &Config) -> Result<Self> {
        Self::with_timeout(&config.remote.base_url, config.request_timeout())
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Creates a request builder for the given method and path
    ///
    /// Prepends the base URL and sets the JSON content type.
    pub fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let url = format!("{}{}", self.base_url, path);
        self.client
            .request(method, &url)
            .header(CONTENT_TYPE, JSON_CONTENT_TYPE)
    }

    /// Sends `builder` and turns any non-success status into an error
    async fn send(&self, builder: RequestBuilder) -> Result<Response, HttpError> {
        let response = builder.send().await?;
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response.text().await.unwrap_or_default();
        Err(HttpError::from_status(status, body))
    }

    /// Sends `builder` and decodes the JSON response body
    async fn send_json<T: DeserializeOwned>(
        &self,
        builder: RequestBuilder,
    ) -> Result<T, HttpError> {
        let bytes = self.send(builder).await?.bytes().await?;
        serde_json::from_slice(&bytes).map_err(|e| HttpError::InvalidResponse(e.to_string()))
    }

    fn with_body<B: Serialize>(
        builder: RequestBuilder,
        body: &B,
    ) -> Result<RequestBuilder, HttpError> {
        let bytes =
            serde_json::to_vec(body).map_err(|e| HttpError::InvalidResponse(e.to_string()))?;
        Ok(builder.body(bytes))
    }

    /// Lists every item owned by `owner`
    pub async fn list_todos(&self, owner: OwnerId) -> Result<Vec<Item>> {
        debug!(%owner, "Fetching todos");
        let builder = self
            .request(Method::GET, "/todos")
            .query(&[("userId", owner.as_u64())]);
        let items: Vec<Item> = self
            .send_json(builder)
            .await
            .with_context(|| format!("GET /todos?userId={owner} failed"))?;
        debug!(count = items.len(), "Fetched todos");
        Ok(items)
    }

    /// Creates an incomplete item titled `title`
    pub async fn create_todo(&self, owner: OwnerId, title: &str) -> Result<Item> {
        let body = NewTodo {
            user_id: owner,
            title,
            completed: false,
        };
        let builder = Self::with_body(self.request(Method::POST, "/todos"), &body)
            .context("Failed to encode POST /todos body")?;
        let item: Item = self
            .send_json(builder)
            .await
            .context("POST /todos failed")?;
        debug!(id = %item.id, "Created todo");
        Ok(item)
    }

    /// Sends the fields present in `patch` and returns the stored item
    pub async fn update_todo(&self, id: ItemId, patch: &ItemPatch) -> Result<Item> {
        let path = format!("/todos/{id}");
        let builder = Self::with_body(self.request(Method::PATCH, &path), patch)
            .with_context(|| format!("Failed to encode PATCH {path} body"))?;
        let item: Item = self
            .send_json(builder)
            .await
            .with_context(|| format!("PATCH {path} failed"))?;
        debug!(%id, "Updated todo");
        Ok(item)
    }

    /// Deletes the item; any success status counts
    pub async fn delete_todo(&self, id: ItemId) -> Result<()> {
        let path = format!("/todos/{id}");
        self.send(self.request(Method::DELETE, &path))
            .await
            .with_context(|| format!("DELETE {path} failed"))?;
        debug!(%id, "Deleted todo");
        Ok(())
    }
}

impl Default for RestClient {
    fn default() -> Self {
        Self::new()
    }
}
