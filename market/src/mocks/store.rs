//! In-memory document store for testing.

use crate::traits::{Document, DocumentStore};
use anyhow::{anyhow, Result};
use async_trait::async_trait;
use serde_json::Value;
use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::sync::{watch, RwLock};

/// Types of failures that can be simulated.
#[derive(Debug, Clone)]
pub enum MockStoreFailure {
    /// Fail every call.
    All,
    /// Fail collection listings only.
    Reads,
    /// Fail only lookups in the named collection.
    OnCollection(String),
}

/// Which calls are currently held back.
#[derive(Debug, Default)]
struct Holds {
    all: bool,
    collections: HashSet<String>,
}

impl Holds {
    fn blocks(&self, collection: &str) -> bool {
        self.all || self.collections.contains(collection)
    }
}

#[derive(Debug)]
struct MockStoreInner {
    /// Documents per collection, in insertion order.
    collections: RwLock<HashMap<String, Vec<Document>>>,
    fail_mode: RwLock<Option<MockStoreFailure>>,
    /// Calls touching a held collection wait before touching storage.
    holds: watch::Sender<Holds>,
    list_calls: AtomicUsize,
    get_calls: AtomicUsize,
}

/// In-memory store shared between clones.
///
/// Calls can be made to fail (`set_fail_mode`) or to hang until released
/// (`hold` / `release`, or per collection with `hold_collection`), which lets
/// tests observe loading states and races.
#[derive(Debug, Clone)]
pub struct MockStore {
    inner: Arc<MockStoreInner>,
}

impl MockStore {
    pub fn new() -> Self {
        let (holds, _) = watch::channel(Holds::default());
        Self {
            inner: Arc::new(MockStoreInner {
                collections: RwLock::new(HashMap::new()),
                fail_mode: RwLock::new(None),
                holds,
                list_calls: AtomicUsize::new(0),
                get_calls: AtomicUsize::new(0),
            }),
        }
    }

    /// Insert or replace a document. Replacing keeps its original position.
    pub async fn insert(&self, collection: &str, id: &str, fields: Value) {
        let doc = Document::from_value(id, fields);
        let mut collections = self.inner.collections.write().await;
        let docs = collections.entry(collection.to_string()).or_default();
        match docs.iter_mut().find(|d| d.id == id) {
            Some(existing) => *existing = doc,
            None => docs.push(doc),
        }
    }

    pub async fn remove(&self, collection: &str, id: &str) {
        if let Some(docs) = self.inner.collections.write().await.get_mut(collection) {
            docs.retain(|d| d.id != id);
        }
    }

    /// Set failure mode for testing error handling.
    pub async fn set_fail_mode(&self, mode: Option<MockStoreFailure>) {
        *self.inner.fail_mode.write().await = mode;
    }

    /// Make subsequent calls wait until [`MockStore::release`].
    pub fn hold(&self) {
        self.inner.holds.send_modify(|holds| holds.all = true);
    }

    /// Make calls on one collection wait; other collections are unaffected.
    pub fn hold_collection(&self, collection: &str) {
        self.inner.holds.send_modify(|holds| {
            holds.collections.insert(collection.to_string());
        });
    }

    /// Let calls on one collection proceed, unless everything is held.
    pub fn release_collection(&self, collection: &str) {
        self.inner.holds.send_modify(|holds| {
            holds.collections.remove(collection);
        });
    }

    /// Lift every hold; held and future calls proceed.
    pub fn release(&self) {
        self.inner.holds.send_replace(Holds::default());
    }

    pub fn list_calls(&self) -> usize {
        self.inner.list_calls.load(Ordering::SeqCst)
    }

    pub fn get_calls(&self) -> usize {
        self.inner.get_calls.load(Ordering::SeqCst)
    }

    async fn wait_for_gate(&self, collection: &str) {
        let mut rx = self.inner.holds.subscribe();
        // The sender lives in `inner`, so the channel cannot close here.
        let _ = rx.wait_for(|holds| !holds.blocks(collection)).await;
    }

    async fn should_fail(&self, is_listing: bool, collection: &str) -> bool {
        let mode = self.inner.fail_mode.read().await;
        match &*mode {
            None => false,
            Some(MockStoreFailure::All) => true,
            Some(MockStoreFailure::Reads) => is_listing,
            Some(MockStoreFailure::OnCollection(c)) => c == collection,
        }
    }
}

impl Default for MockStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl DocumentStore for MockStore {
    async fn list_all(&self, collection: &str) -> Result<Vec<Document>> {
        self.inner.list_calls.fetch_add(1, Ordering::SeqCst);
        self.wait_for_gate(collection).await;
        if self.should_fail(true, collection).await {
            return Err(anyhow!("MockStore: simulated list failure on '{collection}'"));
        }

        let collections = self.inner.collections.read().await;
        Ok(collections.get(collection).cloned().unwrap_or_default())
    }

    async fn get_by_id(&self, collection: &str, id: &str) -> Result<Option<Document>> {
        self.inner.get_calls.fetch_add(1, Ordering::SeqCst);
        self.wait_for_gate(collection).await;
        if self.should_fail(false, collection).await {
            return Err(anyhow!("MockStore: simulated lookup failure on '{collection}'"));
        }

        let collections = self.inner.collections.read().await;
        Ok(collections
            .get(collection)
            .and_then(|docs| docs.iter().find(|d| d.id == id))
            .cloned())
    }
}
