// src/handlers/dashboard.rs

use axum::{extract::State, Json};

use crate::{
    common::error::AppError,
    config::AppState,
    middleware::access::{AreaOverview, RequireArea},
    models::dashboard::DashboardSummary,
};

const LOW_STOCK_THRESHOLD: i64 = 10;

// GET /api/dashboard/summary
#[utoipa::path(
    get,
    path = "/api/dashboard/summary",
    tag = "Dashboard",
    responses(
        (status = 200, description = "Stock health and distribution figures for the landing page", body = DashboardSummary),
        (status = 401, description = "Not authenticated"),
        (status = 403, description = "No role assigned")
    ),
    security(("api_jwt" = []))
)]
pub async fn get_summary(
    State(app_state): State<AppState>,
    _guard: RequireArea<AreaOverview>,
) -> Result<Json<DashboardSummary>, AppError> {
    let ledger = &app_state.ledger_service;

    let resources = ledger.list_resources().await?;
    let low_stock = ledger.low_stock(LOW_STOCK_THRESHOLD).await?;
    let out_of_stock = ledger.out_of_stock().await?;
    let stats = ledger.distribution_stats(None).await?;

    Ok(Json(DashboardSummary {
        total_resources: resources.len() as u64,
        low_stock_resources: low_stock.len() as u64,
        out_of_stock_resources: out_of_stock.len() as u64,
        total_distributions: stats.total_distributions,
        pending_distributions: stats.pending_distributions,
        value_distributed: stats.value_distributed,
        quantities_distributed: stats.quantities_distributed,
    }))
}
