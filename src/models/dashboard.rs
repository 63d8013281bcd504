// src/models/dashboard.rs

use rust_decimal::Decimal;
use serde::Serialize;
use utoipa::ToSchema;

// The cards at the top of the landing page.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSummary {
    pub total_resources: u64,
    pub low_stock_resources: u64,
    pub out_of_stock_resources: u64,
    pub total_distributions: u64,
    pub pending_distributions: u64,
    pub value_distributed: Decimal,
    pub quantities_distributed: i64,
}
