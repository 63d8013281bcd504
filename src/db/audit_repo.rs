use std::sync::Arc;

use serde_json::json;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::{audit::AuditLog, auth::User},
    store::{self, DocumentStore},
};

const COLLECTION: &str = "auditLogs";

#[derive(Clone)]
pub struct AuditRepository {
    store: Arc<dyn DocumentStore>,
}

impl AuditRepository {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }

    pub async fn record(
        &self,
        actor: &User,
        action: &str,
        collection: &str,
        target_id: Option<Uuid>,
        detail: Option<String>,
    ) -> Result<(), AppError> {
        let fields = store::object(json!({
            "actorId": actor.id,
            "actorEmail": actor.email,
            "action": action,
            "collection": collection,
            "targetId": target_id,
            "detail": detail,
        }))?;
        self.store.insert(COLLECTION, fields).await?;
        Ok(())
    }

    pub async fn list(&self) -> Result<Vec<AuditLog>, AppError> {
        let docs = self.store.list(COLLECTION).await?;
        Ok(docs.iter().map(|doc| doc.decode()).collect::<Result<_, _>>()?)
    }
}
