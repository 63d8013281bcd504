use std::collections::HashMap;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use async_trait::async_trait;
use chrono::Utc;
use serde_json::{Map, Value};
use uuid::Uuid;

use super::{DocumentStore, StoreError, StoredDocument};

type Collections = HashMap<String, Vec<StoredDocument>>;

/// In-process store used by the test suite and local experiments. A single
/// RwLock guards all collections, which makes `adjust_number` a true
/// check-and-set.
#[derive(Default)]
pub struct MemoryStore {
    collections: RwLock<Collections>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> RwLockReadGuard<'_, Collections> {
        self.collections.read().unwrap_or_else(|e| e.into_inner())
    }

    fn write(&self) -> RwLockWriteGuard<'_, Collections> {
        self.collections.write().unwrap_or_else(|e| e.into_inner())
    }
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn insert(
        &self,
        collection: &str,
        fields: Map<String, Value>,
    ) -> Result<StoredDocument, StoreError> {
        let now = Utc::now();
        let doc = StoredDocument {
            id: Uuid::new_v4(),
            data: fields,
            created_at: now,
            updated_at: now,
        };
        self.write()
            .entry(collection.to_string())
            .or_default()
            .push(doc.clone());
        Ok(doc)
    }

    async fn get(&self, collection: &str, id: Uuid) -> Result<Option<StoredDocument>, StoreError> {
        Ok(self
            .read()
            .get(collection)
            .and_then(|docs| docs.iter().find(|d| d.id == id).cloned()))
    }

    async fn list(&self, collection: &str) -> Result<Vec<StoredDocument>, StoreError> {
        Ok(self.read().get(collection).cloned().unwrap_or_default())
    }

    async fn find_eq(
        &self,
        collection: &str,
        field: &str,
        value: Value,
    ) -> Result<Vec<StoredDocument>, StoreError> {
        Ok(self
            .read()
            .get(collection)
            .map(|docs| {
                docs.iter()
                    .filter(|d| d.data.get(field) == Some(&value))
                    .cloned()
                    .collect()
            })
            .unwrap_or_default())
    }

    async fn update(
        &self,
        collection: &str,
        id: Uuid,
        fields: Map<String, Value>,
    ) -> Result<StoredDocument, StoreError> {
        let mut collections = self.write();
        let doc = collections
            .get_mut(collection)
            .and_then(|docs| docs.iter_mut().find(|d| d.id == id))
            .ok_or(StoreError::NotFound)?;

        for (key, value) in fields {
            doc.data.insert(key, value);
        }
        doc.updated_at = Utc::now();
        Ok(doc.clone())
    }

    async fn delete(&self, collection: &str, id: Uuid) -> Result<bool, StoreError> {
        let mut collections = self.write();
        let Some(docs) = collections.get_mut(collection) else {
            return Ok(false);
        };
        let before = docs.len();
        docs.retain(|d| d.id != id);
        Ok(docs.len() < before)
    }

    async fn adjust_number(
        &self,
        collection: &str,
        id: Uuid,
        field: &str,
        delta: i64,
        floor: i64,
    ) -> Result<i64, StoreError> {
        let mut collections = self.write();
        let doc = collections
            .get_mut(collection)
            .and_then(|docs| docs.iter_mut().find(|d| d.id == id))
            .ok_or(StoreError::NotFound)?;

        let current = doc
            .data
            .get(field)
            .and_then(Value::as_i64)
            .ok_or_else(|| StoreError::Malformed(format!("field '{field}' is not an integer")))?;

        let next = current + delta;
        if next < floor {
            return Err(StoreError::Guard { current });
        }

        doc.data.insert(field.to_string(), Value::from(next));
        doc.updated_at = Utc::now();
        Ok(next)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn fields(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            _ => panic!("expected an object"),
        }
    }

    #[tokio::test]
    async fn update_merges_and_bumps_updated_at() {
        let store = MemoryStore::new();
        let doc = store
            .insert("resources", fields(json!({ "name": "Tarps", "quantity": 5 })))
            .await
            .unwrap();

        let updated = store
            .update("resources", doc.id, fields(json!({ "quantity": 9 })))
            .await
            .unwrap();

        assert_eq!(updated.data["name"], json!("Tarps"));
        assert_eq!(updated.data["quantity"], json!(9));
        assert!(updated.updated_at >= doc.updated_at);
    }

    #[tokio::test]
    async fn adjust_number_enforces_the_floor() {
        let store = MemoryStore::new();
        let doc = store
            .insert("resources", fields(json!({ "quantity": 10 })))
            .await
            .unwrap();

        assert_eq!(
            store.adjust_number("resources", doc.id, "quantity", -6, 0).await.unwrap(),
            4
        );

        match store.adjust_number("resources", doc.id, "quantity", -6, 0).await {
            Err(StoreError::Guard { current }) => assert_eq!(current, 4),
            other => panic!("expected a guard failure, got {other:?}"),
        }

        // The failed attempt left the document untouched.
        let doc = store.get("resources", doc.id).await.unwrap().unwrap();
        assert_eq!(doc.data["quantity"], json!(4));
    }

    #[tokio::test]
    async fn adjust_number_on_a_missing_document_is_not_found() {
        let store = MemoryStore::new();
        assert!(matches!(
            store.adjust_number("resources", Uuid::new_v4(), "quantity", -1, 0).await,
            Err(StoreError::NotFound)
        ));
    }
}
