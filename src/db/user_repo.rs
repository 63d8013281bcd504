use std::sync::Arc;

use serde_json::{json, Value};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::auth::User,
    store::{self, DocumentStore},
};

const COLLECTION: &str = "users";

// The user repository, responsible for all reads and writes against the
// `users` collection.
#[derive(Clone)]
pub struct UserRepository {
    store: Arc<dyn DocumentStore>,
}

impl UserRepository {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }

    pub async fn find_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        let docs = self
            .store
            .find_eq(COLLECTION, "email", Value::String(email.to_string()))
            .await?;
        Ok(docs.first().map(|doc| doc.decode()).transpose()?)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, AppError> {
        let doc = self.store.get(COLLECTION, id).await?;
        Ok(doc.map(|doc| doc.decode()).transpose()?)
    }

    pub async fn list(&self) -> Result<Vec<User>, AppError> {
        let docs = self.store.list(COLLECTION).await?;
        Ok(docs.iter().map(|doc| doc.decode()).collect::<Result<_, _>>()?)
    }

    /// New accounts start without a role; an administrator assigns one later.
    pub async fn create_user(
        &self,
        email: &str,
        name: &str,
        password_hash: &str,
    ) -> Result<User, AppError> {
        let fields = store::object(json!({
            "email": email,
            "name": name,
            "passwordHash": password_hash,
            "role": Value::Null,
        }))?;
        let doc = self.store.insert(COLLECTION, fields).await?;
        Ok(doc.decode()?)
    }

    pub async fn set_role(&self, id: Uuid, role: &str) -> Result<User, AppError> {
        let fields = store::object(json!({ "role": role }))?;
        let doc = self.store.update(COLLECTION, id, fields).await?;
        Ok(doc.decode()?)
    }
}
