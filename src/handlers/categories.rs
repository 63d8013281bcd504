// src/handlers/categories.rs

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use serde_json::{json, Value};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

use crate::{
    common::error::AppError,
    config::AppState,
    middleware::{
        access::{AreaResources, RequireArea},
        auth::AuthenticatedUser,
    },
    models::category::{Category, CategoryStat},
};

// ---
// Payload: CreateCategoryPayload
// ---
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateCategoryPayload {
    #[validate(length(min = 1, message = "The name is required."))]
    #[schema(example = "Seeds")]
    pub name: String,
}

#[utoipa::path(
    post,
    path = "/api/categories",
    tag = "Inventory",
    request_body = CreateCategoryPayload,
    responses(
        (status = 201, description = "Category created", body = Category),
        (status = 409, description = "A category with that name already exists")
    ),
    security(("api_jwt" = []))
)]
pub async fn create_category(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    _guard: RequireArea<AreaResources>,
    Json(payload): Json<CreateCategoryPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;

    let category = app_state.ledger_service.create_category(payload.name.trim()).await?;

    if let Err(e) = app_state
        .audit_repo
        .record(&user, "category.create", "categories", Some(category.id), None)
        .await
    {
        tracing::warn!("audit log write failed: {e}");
    }

    Ok((StatusCode::CREATED, Json(category)))
}

#[utoipa::path(
    get,
    path = "/api/categories",
    tag = "Inventory",
    responses((status = 200, description = "All categories", body = Vec<Category>)),
    security(("api_jwt" = []))
)]
pub async fn list_categories(
    State(app_state): State<AppState>,
    _guard: RequireArea<AreaResources>,
) -> Result<Json<Vec<Category>>, AppError> {
    Ok(Json(app_state.ledger_service.list_categories().await?))
}

#[utoipa::path(
    delete,
    path = "/api/categories/{id}",
    tag = "Inventory",
    params(("id" = Uuid, Path, description = "Category id")),
    responses(
        (status = 200, description = "Category deleted"),
        (status = 404, description = "Category not found"),
        (status = 409, description = "Category still referenced by resources")
    ),
    security(("api_jwt" = []))
)]
pub async fn delete_category(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    _guard: RequireArea<AreaResources>,
    Path(id): Path<Uuid>,
) -> Result<Json<Value>, AppError> {
    let category = app_state.ledger_service.delete_category(id).await?;

    if let Err(e) = app_state
        .audit_repo
        .record(&user, "category.delete", "categories", Some(id), Some(category.name))
        .await
    {
        tracing::warn!("audit log write failed: {e}");
    }

    Ok(Json(json!({ "id": id })))
}

#[derive(Debug, Deserialize, IntoParams)]
pub struct CategoryStatsQuery {
    /// Maximum number of rows; defaults to 10.
    pub limit: Option<usize>,
    /// Restrict to one category.
    pub category: Option<String>,
}

#[utoipa::path(
    get,
    path = "/api/categories/stats",
    tag = "Inventory",
    params(CategoryStatsQuery),
    responses((status = 200, description = "Per-category usage", body = Vec<CategoryStat>)),
    security(("api_jwt" = []))
)]
pub async fn category_stats(
    State(app_state): State<AppState>,
    _guard: RequireArea<AreaResources>,
    Query(query): Query<CategoryStatsQuery>,
) -> Result<Json<Vec<CategoryStat>>, AppError> {
    let limit = query.limit.unwrap_or(10);
    let stats = app_state
        .ledger_service
        .category_stats(limit, query.category.as_deref())
        .await?;
    Ok(Json(stats))
}
