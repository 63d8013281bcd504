// src/models/distribution.rs

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum DistributionStatus {
    Pending,
    Completed,
    Cancelled,
}

/// A quantity of a resource handed out to a recipient. Name, unit value and
/// total value are snapshots taken at creation time, so later resource edits
/// do not rewrite history. The quantity is immutable once recorded; only the
/// workflow status moves.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Distribution {
    pub id: Uuid,

    pub resource_id: Uuid,
    pub resource_name: String,

    #[schema(example = 4)]
    pub quantity: i64,

    pub unit_value: Decimal,
    pub total_value: Decimal,

    #[schema(example = "Kibera relief point")]
    pub recipient: String,

    #[schema(example = "Nairobi")]
    pub location: String,

    pub notes: Option<String>,

    pub status: DistributionStatus,

    /// The day the handout took place, when known. Distinct from the record's
    /// own timestamps.
    pub date: Option<NaiveDate>,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Aggregate fold over the distributions collection.
#[derive(Debug, Clone, Default, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DistributionStats {
    pub total_distributions: u64,
    pub value_distributed: Decimal,
    pub quantities_distributed: i64,
    pub pending_distributions: u64,
}
