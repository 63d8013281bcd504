// src/models/category.rs

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub id: Uuid,

    #[schema(example = "Seeds")]
    pub name: String,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Derived per-category usage view; computed on demand, never persisted.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CategoryStat {
    pub category: String,

    /// Current stock value: sum of quantity × unit value over the category's
    /// resources.
    pub total_value: Decimal,
    pub resource_count: u64,
    pub total_quantity: i64,

    /// Sum of distributed quantities attributed to the category.
    pub used_quantity: i64,
    pub remaining_quantity: i64,

    /// `round(100 × used / (used + remaining))`, 0 when nothing was ever in
    /// play. Always within [0, 100].
    pub usage_percent: u8,
}

impl CategoryStat {
    pub fn empty(category: String) -> Self {
        Self {
            category,
            total_value: Decimal::ZERO,
            resource_count: 0,
            total_quantity: 0,
            used_quantity: 0,
            remaining_quantity: 0,
            usage_percent: 0,
        }
    }
}
