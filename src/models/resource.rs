// src/models/resource.rs

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// A stock-keeping unit. The quantity is mutated only by distribution
/// recording (guarded decrement) or a direct administrative edit; it can
/// never be driven below zero.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Resource {
    pub id: Uuid,

    #[schema(example = "Maize seed 10kg")]
    pub name: String,

    /// Free-form, but expected to match a category name.
    #[schema(example = "Seeds")]
    pub category: String,

    #[schema(example = 40)]
    pub quantity: i64,

    #[schema(example = "bags")]
    pub unit: String,

    pub unit_value: Decimal,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
