//! Document store backed by a JSON file.
//!
//! Layout: a top-level object keyed by collection name. A collection is
//! either an object mapping document ids to field objects, or an array of
//! field objects each carrying its own `"id"`.
//!
//! ```json
//! {
//!   "auctions": { "a1": { "itemName": "Wheat", "auctionEndDate": "2030-01-01" } },
//!   "users": [ { "id": "u1", "role": "buyer" } ]
//! }
//! ```
//!
//! The file is re-read on every call so a retry observes edits.

use std::path::PathBuf;

use anyhow::{anyhow, Context, Result};
use async_trait::async_trait;
use serde_json::Value;
use tracing::debug;

use crate::traits::{Document, DocumentStore};

#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    async fn read_root(&self) -> Result<Value> {
        let bytes = tokio::fs::read(&self.path)
            .await
            .with_context(|| format!("Failed to read store file {}", self.path.display()))?;
        serde_json::from_slice(&bytes)
            .with_context(|| format!("Store file {} is not valid JSON", self.path.display()))
    }

    async fn read_collection(&self, collection: &str) -> Result<Vec<Document>> {
        let root = self.read_root().await?;
        let Some(value) = root.get(collection) else {
            debug!(
                "Collection '{}' absent from {}",
                collection,
                self.path.display()
            );
            return Ok(Vec::new());
        };
        collection_documents(collection, value)
    }
}

fn collection_documents(collection: &str, value: &Value) -> Result<Vec<Document>> {
    match value {
        Value::Object(map) => Ok(map
            .iter()
            .map(|(id, fields)| Document::from_value(id.clone(), fields.clone()))
            .collect()),
        Value::Array(items) => items
            .iter()
            .enumerate()
            .map(|(index, fields)| {
                let id = fields
                    .get("id")
                    .and_then(Value::as_str)
                    .ok_or_else(|| anyhow!("{collection}[{index}] has no string \"id\""))?;
                let mut doc = Document::from_value(id, fields.clone());
                doc.fields.remove("id");
                Ok(doc)
            })
            .collect(),
        other => Err(anyhow!(
            "Collection '{collection}' must be an object or array, found {other}"
        )),
    }
}

#[async_trait]
impl DocumentStore for JsonFileStore {
    async fn list_all(&self, collection: &str) -> Result<Vec<Document>> {
        self.read_collection(collection).await
    }

    async fn get_by_id(&self, collection: &str, id: &str) -> Result<Option<Document>> {
        let docs = self.read_collection(collection).await?;
        Ok(docs.into_iter().find(|doc| doc.id == id))
    }
}
