// src/handlers/audit.rs

use axum::{extract::State, Json};

use crate::{
    common::error::AppError,
    config::AppState,
    middleware::access::{AreaAdmin, RequireArea},
    models::audit::AuditLog,
};

#[utoipa::path(
    get,
    path = "/api/audit-logs",
    tag = "Admin",
    responses((status = 200, description = "All recorded audit entries", body = Vec<AuditLog>)),
    security(("api_jwt" = []))
)]
pub async fn list_audit_logs(
    State(app_state): State<AppState>,
    _guard: RequireArea<AreaAdmin>,
) -> Result<Json<Vec<AuditLog>>, AppError> {
    Ok(Json(app_state.audit_repo.list().await?))
}
