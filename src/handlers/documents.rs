// src/handlers/documents.rs

use axum::{
    extract::{Path, State},
    http::header,
    response::IntoResponse,
};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    config::AppState,
    middleware::access::{AreaDistributions, RequireArea},
};

// GET /api/distributions/{id}/receipt
#[utoipa::path(
    get,
    path = "/api/distributions/{id}/receipt",
    tag = "Distributions",
    params(("id" = Uuid, Path, description = "Distribution id")),
    responses(
        (status = 200, description = "The receipt as a PDF"),
        (status = 404, description = "Distribution not found")
    ),
    security(("api_jwt" = []))
)]
pub async fn distribution_receipt(
    State(app_state): State<AppState>,
    _guard: RequireArea<AreaDistributions>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let pdf = app_state.report_service.distribution_receipt(id).await?;
    Ok(([(header::CONTENT_TYPE, "application/pdf")], pdf))
}
