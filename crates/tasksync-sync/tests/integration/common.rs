//! Shared test helpers for engine integration tests
//!
//! [`ScriptedStore`] is an in-memory `IRemoteStore` whose behavior is set up
//! per test: failing ids, echo overrides, and gates that keep a call
//! outstanding until the test releases it.

use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use anyhow::{anyhow, bail};
use tokio::sync::Notify;

use tasksync_core::domain::{Item, ItemId, ItemPatch, OwnerId};
use tasksync_core::ports::IRemoteStore;
use tasksync_sync::engine::{EngineOptions, SyncEngine};

pub const OWNER: u64 = 42;

pub fn id(raw: u64) -> ItemId {
    ItemId::new(raw).unwrap()
}

pub fn owner() -> OwnerId {
    OwnerId::new(OWNER).unwrap()
}

pub fn item(raw: u64, title: &str, completed: bool) -> Item {
    Item {
        id: id(raw),
        owner_id: owner(),
        title: title.to_string(),
        completed,
    }
}

/// Call counters per store operation
#[derive(Debug, Default)]
pub struct Calls {
    pub list: AtomicUsize,
    pub create: AtomicUsize,
    pub update: AtomicUsize,
    pub delete: AtomicUsize,
}

impl Calls {
    pub fn list(&self) -> usize {
        self.list.load(Ordering::SeqCst)
    }

    pub fn create(&self) -> usize {
        self.create.load(Ordering::SeqCst)
    }

    pub fn update(&self) -> usize {
        self.update.load(Ordering::SeqCst)
    }

    pub fn delete(&self) -> usize {
        self.delete.load(Ordering::SeqCst)
    }

    pub fn total(&self) -> usize {
        self.list() + self.create() + self.update() + self.delete()
    }
}

/// In-memory store with per-test scripting
#[derive(Default)]
pub struct ScriptedStore {
    items: Mutex<Vec<Item>>,
    failing: Mutex<HashSet<ItemId>>,
    echoes: Mutex<HashMap<ItemId, Item>>,
    gates: Mutex<HashMap<ItemId, Arc<Notify>>>,
    create_gate: Mutex<Option<Arc<Notify>>>,
    fail_list: Mutex<bool>,
    fail_create: Mutex<bool>,
    next_id: AtomicUsize,
    pub calls: Calls,
}

impl ScriptedStore {
    pub fn new(items: Vec<Item>) -> Arc<Self> {
        let next = items.iter().map(|i| i.id.as_u64()).max().unwrap_or(0) as usize + 1;
        Arc::new(Self {
            items: Mutex::new(items),
            next_id: AtomicUsize::new(next),
            ..Default::default()
        })
    }

    /// Update and delete calls for `raw` fail
    pub fn fail(&self, raw: u64) {
        self.failing.lock().unwrap().insert(id(raw));
    }

    pub fn fail_list(&self) {
        *self.fail_list.lock().unwrap() = true;
    }

    pub fn fail_create(&self) {
        *self.fail_create.lock().unwrap() = true;
    }

    /// Update calls for `echo.id` return `echo` regardless of the patch
    pub fn echo(&self, echo: Item) {
        self.echoes.lock().unwrap().insert(echo.id, echo);
    }

    /// Calls for `raw` stay outstanding until the returned gate is notified
    pub fn gate(&self, raw: u64) -> Arc<Notify> {
        let gate = Arc::new(Notify::new());
        self.gates.lock().unwrap().insert(id(raw), gate.clone());
        gate
    }

    pub fn gate_create(&self) -> Arc<Notify> {
        let gate = Arc::new(Notify::new());
        *self.create_gate.lock().unwrap() = Some(gate.clone());
        gate
    }

    async fn wait_gate(&self, id: ItemId) {
        let gate = self.gates.lock().unwrap().get(&id).cloned();
        if let Some(gate) = gate {
            gate.notified().await;
        }
    }

    fn is_failing(&self, id: ItemId) -> bool {
        self.failing.lock().unwrap().contains(&id)
    }
}

#[async_trait::async_trait]
impl IRemoteStore for ScriptedStore {
    async fn list(&self, _owner: OwnerId) -> anyhow::Result<Vec<Item>> {
        self.calls.list.fetch_add(1, Ordering::SeqCst);
        if *self.fail_list.lock().unwrap() {
            bail!("GET /todos failed: connection refused");
        }
        Ok(self.items.lock().unwrap().clone())
    }

    async fn create(&self, owner: OwnerId, title: &str) -> anyhow::Result<Item> {
        self.calls.create.fetch_add(1, Ordering::SeqCst);
        let gate = self.create_gate.lock().unwrap().clone();
        if let Some(gate) = gate {
            gate.notified().await;
        }
        if *self.fail_create.lock().unwrap() {
            bail!("POST /todos failed: 500");
        }
        let raw = self.next_id.fetch_add(1, Ordering::SeqCst) as u64;
        let item = Item {
            id: ItemId::new(raw)?,
            owner_id: owner,
            title: title.to_string(),
            completed: false,
        };
        self.items.lock().unwrap().push(item.clone());
        Ok(item)
    }

    async fn update(&self, id: ItemId, patch: &ItemPatch) -> anyhow::Result<Item> {
        self.calls.update.fetch_add(1, Ordering::SeqCst);
        self.wait_gate(id).await;
        if self.is_failing(id) {
            bail!("PATCH /todos/{id} failed: 500");
        }
        if let Some(echo) = self.echoes.lock().unwrap().get(&id) {
            return Ok(echo.clone());
        }
        let mut items = self.items.lock().unwrap();
        let item = items
            .iter_mut()
            .find(|i| i.id == id)
            .ok_or_else(|| anyhow!("PATCH /todos/{id} failed: 404"))?;
        if let Some(title) = &patch.title {
            item.title = title.clone();
        }
        if let Some(completed) = patch.completed {
            item.completed = completed;
        }
        Ok(item.clone())
    }

    async fn delete(&self, id: ItemId) -> anyhow::Result<()> {
        self.calls.delete.fetch_add(1, Ordering::SeqCst);
        self.wait_gate(id).await;
        if self.is_failing(id) {
            bail!("DELETE /todos/{id} failed: 500");
        }
        self.items.lock().unwrap().retain(|i| i.id != id);
        Ok(())
    }
}

/// Builds an engine over `store` and runs the initial load
pub async fn loaded_engine(store: &Arc<ScriptedStore>) -> SyncEngine {
    loaded_engine_with(store, EngineOptions::default()).await
}

/// Like [`loaded_engine`], but refusing a second call on a busy id
pub async fn strict_engine(store: &Arc<ScriptedStore>) -> SyncEngine {
    let options = EngineOptions {
        reject_busy: true,
        ..EngineOptions::default()
    };
    loaded_engine_with(store, options).await
}

pub async fn loaded_engine_with(
    store: &Arc<ScriptedStore>,
    options: EngineOptions,
) -> SyncEngine {
    let engine = SyncEngine::with_options(store.clone(), owner(), options);
    engine.load().await.unwrap();
    engine
}

/// Yields to spawned tasks until `reached` holds
pub async fn wait_until(mut reached: impl FnMut() -> bool) {
    while !reached() {
        tokio::task::yield_now().await;
    }
}
