//! HttpRemoteStore - IRemoteStore implementation over the REST client
//!
//! Delegates every port call to [`RestClient`]. Errors keep their
//! [`HttpError`](crate::HttpError) source and request context, so callers
//! can downcast when they need the status.

use anyhow::Result;

use tasksync_core::domain::{Item, ItemId, ItemPatch, OwnerId};
use tasksync_core::ports::IRemoteStore;

use crate::client::RestClient;

/// Remote store backed by the todo REST service
#[derive(Debug, Clone)]
pub struct HttpRemoteStore {
    client: RestClient,
}

impl HttpRemoteStore {
    pub fn new(client: RestClient) -> Self {
        Self { client }
    }

    pub fn client(&self) -> &RestClient {
        &self.client
    }
}

#[async_trait::async_trait]
impl IRemoteStore for HttpRemoteStore {
    async fn list(&self, owner: OwnerId) -> Result<Vec<Item>> {
        self.client.list_todos(owner).await
    }

    async fn create(&self, owner: OwnerId, title: &str) -> Result<Item> {
        self.client.create_todo(owner, title).await
    }

    async fn update(&self, id: ItemId, patch: &ItemPatch) -> Result<Item> {
        self.client.update_todo(id, patch).await
    }

    async fn delete(&self, id: ItemId) -> Result<()> {
        self.client.delete_todo(id).await
    }
}
