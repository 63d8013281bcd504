// src/handlers/resources.rs

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use rust_decimal::Decimal;
use serde::Deserialize;
use serde_json::{json, Map, Value};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

use crate::{
    common::error::{field_error, AppError},
    config::AppState,
    middleware::{
        access::{AreaResources, RequireArea},
        auth::AuthenticatedUser,
    },
    models::resource::Resource,
};

fn ensure_not_negative(field: &'static str, value: Decimal) -> Result<(), AppError> {
    if value.is_sign_negative() {
        return Err(field_error(field, "range", "The value cannot be negative."));
    }
    Ok(())
}

// ---
// Payload: CreateResourcePayload
// ---
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateResourcePayload {
    #[validate(length(min = 1, message = "The name is required."))]
    pub name: String,

    #[validate(length(min = 1, message = "The category is required."))]
    pub category: String,

    #[validate(range(min = 0, message = "Quantity cannot be negative."))]
    pub quantity: i64,

    #[validate(length(min = 1, message = "The unit is required."))]
    pub unit: String,

    pub unit_value: Decimal,
}

#[utoipa::path(
    post,
    path = "/api/resources",
    tag = "Inventory",
    request_body = CreateResourcePayload,
    responses((status = 201, description = "Resource created", body = Resource)),
    security(("api_jwt" = []))
)]
pub async fn create_resource(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    _guard: RequireArea<AreaResources>,
    Json(payload): Json<CreateResourcePayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;
    ensure_not_negative("unitValue", payload.unit_value)?;

    let resource = app_state
        .ledger_service
        .create_resource(
            &payload.name,
            &payload.category,
            payload.quantity,
            &payload.unit,
            payload.unit_value,
        )
        .await?;

    if let Err(e) = app_state
        .audit_repo
        .record(&user, "resource.create", "resources", Some(resource.id), None)
        .await
    {
        tracing::warn!("audit log write failed: {e}");
    }

    Ok((StatusCode::CREATED, Json(resource)))
}

#[utoipa::path(
    get,
    path = "/api/resources",
    tag = "Inventory",
    responses((status = 200, description = "All resources", body = Vec<Resource>)),
    security(("api_jwt" = []))
)]
pub async fn list_resources(
    State(app_state): State<AppState>,
    _guard: RequireArea<AreaResources>,
) -> Result<Json<Vec<Resource>>, AppError> {
    Ok(Json(app_state.ledger_service.list_resources().await?))
}

#[utoipa::path(
    get,
    path = "/api/resources/{id}",
    tag = "Inventory",
    params(("id" = Uuid, Path, description = "Resource id")),
    responses(
        (status = 200, description = "The resource", body = Resource),
        (status = 404, description = "Resource not found")
    ),
    security(("api_jwt" = []))
)]
pub async fn get_resource(
    State(app_state): State<AppState>,
    _guard: RequireArea<AreaResources>,
    Path(id): Path<Uuid>,
) -> Result<Json<Resource>, AppError> {
    Ok(Json(app_state.ledger_service.get_resource(id).await?))
}

// ---
// Payload: UpdateResourcePayload — a partial, administrative edit.
// ---
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateResourcePayload {
    #[validate(length(min = 1, message = "The name cannot be empty."))]
    pub name: Option<String>,

    #[validate(length(min = 1, message = "The category cannot be empty."))]
    pub category: Option<String>,

    #[validate(range(min = 0, message = "Quantity cannot be negative."))]
    pub quantity: Option<i64>,

    #[validate(length(min = 1, message = "The unit cannot be empty."))]
    pub unit: Option<String>,

    pub unit_value: Option<Decimal>,
}

#[utoipa::path(
    put,
    path = "/api/resources/{id}",
    tag = "Inventory",
    request_body = UpdateResourcePayload,
    params(("id" = Uuid, Path, description = "Resource id")),
    responses(
        (status = 200, description = "Resource updated", body = Resource),
        (status = 404, description = "Resource not found")
    ),
    security(("api_jwt" = []))
)]
pub async fn update_resource(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    _guard: RequireArea<AreaResources>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateResourcePayload>,
) -> Result<Json<Resource>, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;
    if let Some(unit_value) = payload.unit_value {
        ensure_not_negative("unitValue", unit_value)?;
    }

    let mut fields = Map::new();
    if let Some(name) = payload.name {
        fields.insert("name".into(), Value::String(name));
    }
    if let Some(category) = payload.category {
        fields.insert("category".into(), Value::String(category));
    }
    if let Some(quantity) = payload.quantity {
        fields.insert("quantity".into(), Value::from(quantity));
    }
    if let Some(unit) = payload.unit {
        fields.insert("unit".into(), Value::String(unit));
    }
    if let Some(unit_value) = payload.unit_value {
        fields.insert("unitValue".into(), json!(unit_value));
    }

    let resource = app_state.ledger_service.update_resource(id, fields).await?;

    if let Err(e) = app_state
        .audit_repo
        .record(&user, "resource.update", "resources", Some(id), None)
        .await
    {
        tracing::warn!("audit log write failed: {e}");
    }

    Ok(Json(resource))
}

#[utoipa::path(
    delete,
    path = "/api/resources/{id}",
    tag = "Inventory",
    params(("id" = Uuid, Path, description = "Resource id")),
    responses(
        (status = 200, description = "Resource deleted"),
        (status = 404, description = "Resource not found")
    ),
    security(("api_jwt" = []))
)]
pub async fn delete_resource(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    _guard: RequireArea<AreaResources>,
    Path(id): Path<Uuid>,
) -> Result<Json<Value>, AppError> {
    app_state.ledger_service.delete_resource(id).await?;

    if let Err(e) = app_state
        .audit_repo
        .record(&user, "resource.delete", "resources", Some(id), None)
        .await
    {
        tracing::warn!("audit log write failed: {e}");
    }

    Ok(Json(json!({ "id": id })))
}

#[derive(Debug, Deserialize, IntoParams)]
pub struct LowStockQuery {
    /// Inclusive upper bound; defaults to 10.
    pub threshold: Option<i64>,
}

#[utoipa::path(
    get,
    path = "/api/resources/low-stock",
    tag = "Inventory",
    params(LowStockQuery),
    responses((status = 200, description = "Resources running low", body = Vec<Resource>)),
    security(("api_jwt" = []))
)]
pub async fn low_stock(
    State(app_state): State<AppState>,
    _guard: RequireArea<AreaResources>,
    Query(query): Query<LowStockQuery>,
) -> Result<Json<Vec<Resource>>, AppError> {
    let threshold = query.threshold.unwrap_or(10);
    Ok(Json(app_state.ledger_service.low_stock(threshold).await?))
}

#[utoipa::path(
    get,
    path = "/api/resources/out-of-stock",
    tag = "Inventory",
    responses((status = 200, description = "Depleted resources", body = Vec<Resource>)),
    security(("api_jwt" = []))
)]
pub async fn out_of_stock(
    State(app_state): State<AppState>,
    _guard: RequireArea<AreaResources>,
) -> Result<Json<Vec<Resource>>, AppError> {
    Ok(Json(app_state.ledger_service.out_of_stock().await?))
}
