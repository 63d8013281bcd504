// src/handlers/registry.rs
//
// CRUD for the schemaless collections: a non-empty name is the only
// structural requirement, the rest is whatever fields the screen sends.
// Each collection maps to the feature area that owns its screen.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde_json::{json, Map, Value};
use uuid::Uuid;

use crate::{
    common::error::{field_error, AppError},
    config::AppState,
    middleware::{access::ensure_area, auth::AuthenticatedUser},
    models::access::FeatureArea,
    store,
};

const REGISTRY_AREAS: &[(&str, FeatureArea)] = &[
    ("beneficiaries", FeatureArea::Beneficiaries),
    ("departments", FeatureArea::Admin),
    ("donations", FeatureArea::Donations),
    ("grants", FeatureArea::Grants),
    ("projects", FeatureArea::Projects),
    ("programs", FeatureArea::Projects),
    ("staff", FeatureArea::Admin),
    ("partners", FeatureArea::Donations),
];

fn collection_area(collection: &str) -> Result<FeatureArea, AppError> {
    REGISTRY_AREAS
        .iter()
        .find(|(name, _)| *name == collection)
        .map(|(_, area)| *area)
        .ok_or_else(|| AppError::UnknownCollection(collection.to_string()))
}

fn record_fields(payload: Value) -> Result<Map<String, Value>, AppError> {
    let Value::Object(mut fields) = payload else {
        return Err(field_error("body", "invalid", "The request body must be a JSON object."));
    };
    store::strip_reserved(&mut fields);
    Ok(fields)
}

fn require_name(fields: &Map<String, Value>) -> Result<(), AppError> {
    match fields.get("name").and_then(Value::as_str) {
        Some(name) if !name.trim().is_empty() => Ok(()),
        _ => Err(field_error("name", "required", "The name is required.")),
    }
}

#[utoipa::path(
    post,
    path = "/api/records/{collection}",
    tag = "Registry",
    params(("collection" = String, Path, description = "Registry collection name")),
    responses(
        (status = 201, description = "Record created; the response echoes the generated id"),
        (status = 404, description = "Unknown collection")
    ),
    security(("api_jwt" = []))
)]
pub async fn create_record(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    Path(collection): Path<String>,
    Json(payload): Json<Value>,
) -> Result<impl IntoResponse, AppError> {
    let area = collection_area(&collection)?;
    ensure_area(&user, area)?;

    let fields = record_fields(payload)?;
    require_name(&fields)?;

    let record = app_state.registry_repo.insert(&collection, fields).await?;
    let record_id = record.get("id").and_then(Value::as_str).and_then(|s| s.parse().ok());

    if let Err(e) = app_state
        .audit_repo
        .record(&user, "record.create", &collection, record_id, None)
        .await
    {
        tracing::warn!("audit log write failed: {e}");
    }

    Ok((StatusCode::CREATED, Json(Value::Object(record))))
}

#[utoipa::path(
    get,
    path = "/api/records/{collection}",
    tag = "Registry",
    params(("collection" = String, Path, description = "Registry collection name")),
    responses(
        (status = 200, description = "All records in the collection"),
        (status = 404, description = "Unknown collection")
    ),
    security(("api_jwt" = []))
)]
pub async fn list_records(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    Path(collection): Path<String>,
) -> Result<Json<Vec<Value>>, AppError> {
    let area = collection_area(&collection)?;
    ensure_area(&user, area)?;

    let records = app_state.registry_repo.list(&collection).await?;
    Ok(Json(records.into_iter().map(Value::Object).collect()))
}

#[utoipa::path(
    get,
    path = "/api/records/{collection}/{id}",
    tag = "Registry",
    params(
        ("collection" = String, Path, description = "Registry collection name"),
        ("id" = Uuid, Path, description = "Record id")
    ),
    responses(
        (status = 200, description = "The record"),
        (status = 404, description = "Unknown collection or record")
    ),
    security(("api_jwt" = []))
)]
pub async fn get_record(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    Path((collection, id)): Path<(String, Uuid)>,
) -> Result<Json<Value>, AppError> {
    let area = collection_area(&collection)?;
    ensure_area(&user, area)?;

    let record = app_state
        .registry_repo
        .get(&collection, id)
        .await?
        .ok_or(AppError::NotFound("record"))?;
    Ok(Json(Value::Object(record)))
}

#[utoipa::path(
    put,
    path = "/api/records/{collection}/{id}",
    tag = "Registry",
    params(
        ("collection" = String, Path, description = "Registry collection name"),
        ("id" = Uuid, Path, description = "Record id")
    ),
    responses(
        (status = 200, description = "Record updated"),
        (status = 404, description = "Unknown collection or record")
    ),
    security(("api_jwt" = []))
)]
pub async fn update_record(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    Path((collection, id)): Path<(String, Uuid)>,
    Json(payload): Json<Value>,
) -> Result<Json<Value>, AppError> {
    let area = collection_area(&collection)?;
    ensure_area(&user, area)?;

    let fields = record_fields(payload)?;
    if let Some(name) = fields.get("name") {
        if name.as_str().is_none_or(|n| n.trim().is_empty()) {
            return Err(field_error("name", "required", "The name cannot be emptied."));
        }
    }

    let record = app_state.registry_repo.update(&collection, id, fields).await?;

    if let Err(e) = app_state
        .audit_repo
        .record(&user, "record.update", &collection, Some(id), None)
        .await
    {
        tracing::warn!("audit log write failed: {e}");
    }

    Ok(Json(Value::Object(record)))
}

#[utoipa::path(
    delete,
    path = "/api/records/{collection}/{id}",
    tag = "Registry",
    params(
        ("collection" = String, Path, description = "Registry collection name"),
        ("id" = Uuid, Path, description = "Record id")
    ),
    responses(
        (status = 200, description = "Record deleted"),
        (status = 404, description = "Unknown collection or record")
    ),
    security(("api_jwt" = []))
)]
pub async fn delete_record(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    Path((collection, id)): Path<(String, Uuid)>,
) -> Result<Json<Value>, AppError> {
    let area = collection_area(&collection)?;
    ensure_area(&user, area)?;

    if !app_state.registry_repo.delete(&collection, id).await? {
        return Err(AppError::NotFound("record"));
    }

    if let Err(e) = app_state
        .audit_repo
        .record(&user, "record.delete", &collection, Some(id), None)
        .await
    {
        tracing::warn!("audit log write failed: {e}");
    }

    Ok(Json(json!({ "id": id })))
}
