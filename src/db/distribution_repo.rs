use std::sync::Arc;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde_json::{json, Map, Value};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::distribution::{Distribution, DistributionStatus},
    store::{self, DocumentStore},
};

const COLLECTION: &str = "distributions";

#[derive(Clone)]
pub struct DistributionRepository {
    store: Arc<dyn DocumentStore>,
}

impl DistributionRepository {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }

    #[allow(clippy::too_many_arguments)]
    pub async fn create(
        &self,
        resource_id: Uuid,
        resource_name: &str,
        quantity: i64,
        unit_value: Decimal,
        total_value: Decimal,
        recipient: &str,
        location: &str,
        notes: Option<&str>,
        date: Option<NaiveDate>,
    ) -> Result<Distribution, AppError> {
        let fields = store::object(json!({
            "resourceId": resource_id,
            "resourceName": resource_name,
            "quantity": quantity,
            "unitValue": unit_value,
            "totalValue": total_value,
            "recipient": recipient,
            "location": location,
            "notes": notes,
            "status": DistributionStatus::Pending,
            "date": date,
        }))?;
        let doc = self.store.insert(COLLECTION, fields).await?;
        Ok(doc.decode()?)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Distribution>, AppError> {
        let doc = self.store.get(COLLECTION, id).await?;
        Ok(doc.map(|doc| doc.decode()).transpose()?)
    }

    pub async fn list(&self) -> Result<Vec<Distribution>, AppError> {
        let docs = self.store.list(COLLECTION).await?;
        Ok(docs.iter().map(|doc| doc.decode()).collect::<Result<_, _>>()?)
    }

    pub async fn update(
        &self,
        id: Uuid,
        fields: Map<String, Value>,
    ) -> Result<Distribution, AppError> {
        let doc = self.store.update(COLLECTION, id, fields).await?;
        Ok(doc.decode()?)
    }

    pub async fn delete(&self, id: Uuid) -> Result<bool, AppError> {
        Ok(self.store.delete(COLLECTION, id).await?)
    }
}
