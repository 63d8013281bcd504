use std::sync::Arc;

use serde_json::{Map, Value};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    store::{DocumentStore, StoredDocument},
};

/// Repository for the schemaless collections (beneficiaries, departments,
/// donations, grants, projects, programs, staff, partners). Records are
/// echoed back as plain JSON objects with normalized timestamps; the only
/// structural requirement, a non-empty name, is enforced at the handler.
#[derive(Clone)]
pub struct RegistryRepository {
    store: Arc<dyn DocumentStore>,
}

impl RegistryRepository {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }

    pub async fn insert(
        &self,
        collection: &str,
        fields: Map<String, Value>,
    ) -> Result<Map<String, Value>, AppError> {
        let doc = self.store.insert(collection, fields).await?;
        Ok(doc.to_object())
    }

    pub async fn get(
        &self,
        collection: &str,
        id: Uuid,
    ) -> Result<Option<Map<String, Value>>, AppError> {
        let doc = self.store.get(collection, id).await?;
        Ok(doc.as_ref().map(StoredDocument::to_object))
    }

    pub async fn list(&self, collection: &str) -> Result<Vec<Map<String, Value>>, AppError> {
        let docs = self.store.list(collection).await?;
        Ok(docs.iter().map(StoredDocument::to_object).collect())
    }

    pub async fn update(
        &self,
        collection: &str,
        id: Uuid,
        fields: Map<String, Value>,
    ) -> Result<Map<String, Value>, AppError> {
        let doc = self.store.update(collection, id, fields).await?;
        Ok(doc.to_object())
    }

    pub async fn delete(&self, collection: &str, id: Uuid) -> Result<bool, AppError> {
        Ok(self.store.delete(collection, id).await?)
    }
}
