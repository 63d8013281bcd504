use std::sync::Arc;

use serde_json::json;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::category::Category,
    store::{self, DocumentStore},
};

const COLLECTION: &str = "categories";

#[derive(Clone)]
pub struct CategoryRepository {
    store: Arc<dyn DocumentStore>,
}

impl CategoryRepository {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }

    pub async fn create(&self, name: &str) -> Result<Category, AppError> {
        let fields = store::object(json!({ "name": name }))?;
        let doc = self.store.insert(COLLECTION, fields).await?;
        Ok(doc.decode()?)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Category>, AppError> {
        let doc = self.store.get(COLLECTION, id).await?;
        Ok(doc.map(|doc| doc.decode()).transpose()?)
    }

    /// Name match is case-insensitive; "Seeds" and "seeds" are one category.
    pub async fn find_by_name(&self, name: &str) -> Result<Option<Category>, AppError> {
        let categories = self.list().await?;
        Ok(categories.into_iter().find(|c| c.name.eq_ignore_ascii_case(name)))
    }

    pub async fn list(&self) -> Result<Vec<Category>, AppError> {
        let docs = self.store.list(COLLECTION).await?;
        Ok(docs.iter().map(|doc| doc.decode()).collect::<Result<_, _>>()?)
    }

    pub async fn delete(&self, id: Uuid) -> Result<bool, AppError> {
        Ok(self.store.delete(COLLECTION, id).await?)
    }
}
