//! The document-store seam.
//!
//! All durable state lives behind [`DocumentStore`], injected into the
//! repositories as an `Arc<dyn DocumentStore>`. Production runs on
//! [`PgStore`]; tests run the same code paths over [`MemoryStore`].

pub mod memory;
pub mod postgres;

pub use memory::MemoryStore;
pub use postgres::PgStore;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use thiserror::Error;
use uuid::Uuid;

use crate::common::time;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("document not found")]
    NotFound,

    #[error("numeric guard rejected the update (current value {current})")]
    Guard { current: i64 },

    #[error("malformed document: {0}")]
    Malformed(String),

    #[error("store backend failure")]
    Backend(#[from] sqlx::Error),
}

/// A single document as the store hands it back: the payload plus the
/// store-owned id and timestamps.
#[derive(Debug, Clone)]
pub struct StoredDocument {
    pub id: Uuid,
    pub data: Map<String, Value>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl StoredDocument {
    /// The payload as a JSON object with `id`, `createdAt` and `updatedAt`
    /// merged in. Store-native timestamp shapes inside the payload are
    /// normalized here, once, instead of at every read site.
    pub fn to_object(&self) -> Map<String, Value> {
        let mut object = self.data.clone();
        time::normalize_timestamp_fields(&mut object);
        object.insert("id".into(), Value::String(self.id.to_string()));
        object.insert("createdAt".into(), Value::String(self.created_at.to_rfc3339()));
        object.insert("updatedAt".into(), Value::String(self.updated_at.to_rfc3339()));
        object
    }

    /// Deserializes the merged object as a typed model.
    pub fn decode<T: DeserializeOwned>(&self) -> Result<T, StoreError> {
        serde_json::from_value(Value::Object(self.to_object()))
            .map_err(|e| StoreError::Malformed(e.to_string()))
    }
}

/// Narrows a `json!` literal to the field map the store persists.
pub fn object(value: Value) -> Result<Map<String, Value>, StoreError> {
    match value {
        Value::Object(map) => Ok(map),
        other => Err(StoreError::Malformed(format!("expected an object, got {other}"))),
    }
}

/// Drops the store-owned keys from caller-supplied payloads. Ids and
/// timestamps are never writable through a document body.
pub fn strip_reserved(fields: &mut Map<String, Value>) {
    fields.remove("id");
    fields.remove("createdAt");
    fields.remove("updatedAt");
}

#[async_trait]
pub trait DocumentStore: Send + Sync {
    async fn insert(
        &self,
        collection: &str,
        fields: Map<String, Value>,
    ) -> Result<StoredDocument, StoreError>;

    async fn get(&self, collection: &str, id: Uuid) -> Result<Option<StoredDocument>, StoreError>;

    async fn list(&self, collection: &str) -> Result<Vec<StoredDocument>, StoreError>;

    async fn find_eq(
        &self,
        collection: &str,
        field: &str,
        value: Value,
    ) -> Result<Vec<StoredDocument>, StoreError>;

    /// Merge-patches the document. Fails with [`StoreError::NotFound`] when
    /// the document does not exist.
    async fn update(
        &self,
        collection: &str,
        id: Uuid,
        fields: Map<String, Value>,
    ) -> Result<StoredDocument, StoreError>;

    async fn delete(&self, collection: &str, id: Uuid) -> Result<bool, StoreError>;

    /// Atomically adds `delta` to an integer field and returns the new value.
    /// Fails with [`StoreError::Guard`] when the result would drop below
    /// `floor`; the read, the check and the write are one step, so concurrent
    /// callers cannot race a stale value past the guard.
    async fn adjust_number(
        &self,
        collection: &str,
        id: Uuid,
        field: &str,
        delta: i64,
        floor: i64,
    ) -> Result<i64, StoreError>;
}
