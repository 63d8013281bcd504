use std::sync::Arc;

use rust_decimal::Decimal;
use serde_json::{json, Map, Value};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::resource::Resource,
    store::{self, DocumentStore, StoreError},
};

const COLLECTION: &str = "resources";

#[derive(Clone)]
pub struct ResourceRepository {
    store: Arc<dyn DocumentStore>,
}

impl ResourceRepository {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }

    pub async fn create(
        &self,
        name: &str,
        category: &str,
        quantity: i64,
        unit: &str,
        unit_value: Decimal,
    ) -> Result<Resource, AppError> {
        let fields = store::object(json!({
            "name": name,
            "category": category,
            "quantity": quantity,
            "unit": unit,
            "unitValue": unit_value,
        }))?;
        let doc = self.store.insert(COLLECTION, fields).await?;
        Ok(doc.decode()?)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Resource>, AppError> {
        let doc = self.store.get(COLLECTION, id).await?;
        Ok(doc.map(|doc| doc.decode()).transpose()?)
    }

    pub async fn list(&self) -> Result<Vec<Resource>, AppError> {
        let docs = self.store.list(COLLECTION).await?;
        Ok(docs.iter().map(|doc| doc.decode()).collect::<Result<_, _>>()?)
    }

    pub async fn update(&self, id: Uuid, fields: Map<String, Value>) -> Result<Resource, AppError> {
        let doc = self.store.update(COLLECTION, id, fields).await?;
        Ok(doc.decode()?)
    }

    pub async fn delete(&self, id: Uuid) -> Result<bool, AppError> {
        Ok(self.store.delete(COLLECTION, id).await?)
    }

    /// Guarded, atomic quantity change. The raw [`StoreError`] is exposed so
    /// the ledger can turn a guard failure into an insufficient-stock
    /// conflict carrying the live quantity.
    pub async fn adjust_quantity(&self, id: Uuid, delta: i64) -> Result<i64, StoreError> {
        self.store.adjust_number(COLLECTION, id, "quantity", delta, 0).await
    }
}
