// src/handlers/distributions.rs

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use chrono::NaiveDate;
use serde::Deserialize;
use serde_json::{json, Value};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

use crate::{
    common::error::AppError,
    config::AppState,
    middleware::{
        access::{AreaDistributions, RequireArea},
        auth::AuthenticatedUser,
    },
    models::distribution::{Distribution, DistributionStats, DistributionStatus},
};

// ---
// Payload: CreateDistributionPayload
// ---
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateDistributionPayload {
    pub resource_id: Uuid,

    #[validate(range(min = 1, message = "Quantity must be a positive integer."))]
    pub quantity: i64,

    #[validate(length(min = 1, message = "The recipient is required."))]
    pub recipient: String,

    #[validate(length(min = 1, message = "The location is required."))]
    pub location: String,

    pub notes: Option<String>,

    /// The handout date, `YYYY-MM-DD`.
    pub date: Option<NaiveDate>,
}

#[utoipa::path(
    post,
    path = "/api/distributions",
    tag = "Distributions",
    request_body = CreateDistributionPayload,
    responses(
        (status = 201, description = "Distribution recorded and stock decremented", body = Distribution),
        (status = 404, description = "Resource not found"),
        (status = 409, description = "Insufficient stock")
    ),
    security(("api_jwt" = []))
)]
pub async fn create_distribution(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    _guard: RequireArea<AreaDistributions>,
    Json(payload): Json<CreateDistributionPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;

    let distribution = app_state
        .ledger_service
        .record_distribution(
            payload.resource_id,
            payload.quantity,
            &payload.recipient,
            &payload.location,
            payload.notes.as_deref(),
            payload.date,
        )
        .await?;

    if let Err(e) = app_state
        .audit_repo
        .record(
            &user,
            "distribution.create",
            "distributions",
            Some(distribution.id),
            Some(format!("{} x {}", distribution.quantity, distribution.resource_name)),
        )
        .await
    {
        tracing::warn!("audit log write failed: {e}");
    }

    Ok((StatusCode::CREATED, Json(distribution)))
}

#[utoipa::path(
    get,
    path = "/api/distributions",
    tag = "Distributions",
    responses((status = 200, description = "All distributions", body = Vec<Distribution>)),
    security(("api_jwt" = []))
)]
pub async fn list_distributions(
    State(app_state): State<AppState>,
    _guard: RequireArea<AreaDistributions>,
) -> Result<Json<Vec<Distribution>>, AppError> {
    Ok(Json(app_state.ledger_service.list_distributions().await?))
}

#[utoipa::path(
    get,
    path = "/api/distributions/{id}",
    tag = "Distributions",
    params(("id" = Uuid, Path, description = "Distribution id")),
    responses(
        (status = 200, description = "The distribution", body = Distribution),
        (status = 404, description = "Distribution not found")
    ),
    security(("api_jwt" = []))
)]
pub async fn get_distribution(
    State(app_state): State<AppState>,
    _guard: RequireArea<AreaDistributions>,
    Path(id): Path<Uuid>,
) -> Result<Json<Distribution>, AppError> {
    Ok(Json(app_state.ledger_service.get_distribution(id).await?))
}

// Quantities and snapshots are immutable once recorded; only the workflow
// status moves.
#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateDistributionPayload {
    pub status: DistributionStatus,
}

#[utoipa::path(
    put,
    path = "/api/distributions/{id}",
    tag = "Distributions",
    request_body = UpdateDistributionPayload,
    params(("id" = Uuid, Path, description = "Distribution id")),
    responses(
        (status = 200, description = "Status updated", body = Distribution),
        (status = 404, description = "Distribution not found")
    ),
    security(("api_jwt" = []))
)]
pub async fn update_distribution(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    _guard: RequireArea<AreaDistributions>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateDistributionPayload>,
) -> Result<Json<Distribution>, AppError> {
    let distribution = app_state
        .ledger_service
        .set_distribution_status(id, payload.status)
        .await?;

    if let Err(e) = app_state
        .audit_repo
        .record(&user, "distribution.status", "distributions", Some(id), None)
        .await
    {
        tracing::warn!("audit log write failed: {e}");
    }

    Ok(Json(distribution))
}

#[utoipa::path(
    delete,
    path = "/api/distributions/{id}",
    tag = "Distributions",
    params(("id" = Uuid, Path, description = "Distribution id")),
    responses(
        (status = 200, description = "Distribution deleted"),
        (status = 404, description = "Distribution not found")
    ),
    security(("api_jwt" = []))
)]
pub async fn delete_distribution(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    _guard: RequireArea<AreaDistributions>,
    Path(id): Path<Uuid>,
) -> Result<Json<Value>, AppError> {
    app_state.ledger_service.delete_distribution(id).await?;

    if let Err(e) = app_state
        .audit_repo
        .record(&user, "distribution.delete", "distributions", Some(id), None)
        .await
    {
        tracing::warn!("audit log write failed: {e}");
    }

    Ok(Json(json!({ "id": id })))
}

#[derive(Debug, Deserialize, IntoParams)]
pub struct DistributionStatsQuery {
    /// Restrict the fold to one category.
    pub category: Option<String>,
}

#[utoipa::path(
    get,
    path = "/api/distributions/stats",
    tag = "Distributions",
    params(DistributionStatsQuery),
    responses((status = 200, description = "Aggregate distribution figures", body = DistributionStats)),
    security(("api_jwt" = []))
)]
pub async fn distribution_stats(
    State(app_state): State<AppState>,
    _guard: RequireArea<AreaDistributions>,
    Query(query): Query<DistributionStatsQuery>,
) -> Result<Json<DistributionStats>, AppError> {
    let stats = app_state
        .ledger_service
        .distribution_stats(query.category.as_deref())
        .await?;
    Ok(Json(stats))
}
