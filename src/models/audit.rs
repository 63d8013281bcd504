// src/models/audit.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// One entry in the `auditLogs` collection. Written on every mutating
/// endpoint; failures to write are logged and never fail the request.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AuditLog {
    pub id: Uuid,

    pub actor_id: Uuid,
    pub actor_email: String,

    #[schema(example = "distribution.create")]
    pub action: String,

    #[schema(example = "distributions")]
    pub collection: String,

    pub target_id: Option<Uuid>,
    pub detail: Option<String>,

    pub created_at: DateTime<Utc>,
}
