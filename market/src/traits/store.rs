//! Document store abstraction for listing and profile lookups.

use anyhow::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A schemaless document as returned by the store: its id plus raw fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    pub id: String,
    pub fields: Map<String, Value>,
}

impl Document {
    pub fn new(id: impl Into<String>, fields: Map<String, Value>) -> Self {
        Self {
            id: id.into(),
            fields,
        }
    }

    /// Build a document from a JSON value; non-object values yield no fields.
    pub fn from_value(id: impl Into<String>, value: Value) -> Self {
        let fields = match value {
            Value::Object(map) => map,
            _ => Map::new(),
        };
        Self::new(id, fields)
    }

    pub fn get(&self, field: &str) -> Option<&Value> {
        self.fields.get(field)
    }

    /// String value of a field, if present and actually a string.
    pub fn get_str(&self, field: &str) -> Option<&str> {
        self.fields.get(field).and_then(Value::as_str)
    }
}

/// Read-only access to a document store.
///
/// The browsing core only ever reads whole collections or single documents
/// by id, so that is all this capability exposes. Implementations are
/// injected; there is no process-wide store handle.
#[async_trait]
pub trait DocumentStore: Send + Sync + Clone {
    /// Fetch every document in `collection`, in store order.
    async fn list_all(&self, collection: &str) -> Result<Vec<Document>>;

    /// Fetch a single document by id.
    ///
    /// Returns `None` if the document does not exist.
    async fn get_by_id(&self, collection: &str, id: &str) -> Result<Option<Document>>;
}
