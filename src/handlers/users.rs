// src/handlers/users.rs

use axum::{
    extract::{Path, State},
    Json,
};
use serde::Deserialize;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::{
    common::error::AppError,
    config::AppState,
    middleware::{
        access::{AreaAdmin, RequireArea},
        auth::AuthenticatedUser,
    },
    models::auth::User,
};

#[utoipa::path(
    get,
    path = "/api/users/me",
    tag = "Users",
    responses((status = 200, description = "The authenticated user", body = User)),
    security(("api_jwt" = []))
)]
pub async fn get_me(AuthenticatedUser(user): AuthenticatedUser) -> Json<User> {
    Json(user)
}

#[utoipa::path(
    get,
    path = "/api/users",
    tag = "Users",
    responses((status = 200, description = "All user accounts", body = Vec<User>)),
    security(("api_jwt" = []))
)]
pub async fn list_users(
    State(app_state): State<AppState>,
    _guard: RequireArea<AreaAdmin>,
) -> Result<Json<Vec<User>>, AppError> {
    Ok(Json(app_state.user_repo.list().await?))
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct AssignRolePayload {
    #[validate(length(min = 1, message = "The role is required."))]
    #[schema(example = "programs lead")]
    pub role: String,
}

#[utoipa::path(
    put,
    path = "/api/users/{id}/role",
    tag = "Users",
    request_body = AssignRolePayload,
    params(("id" = Uuid, Path, description = "User id")),
    responses(
        (status = 200, description = "Role assigned", body = User),
        (status = 404, description = "User not found")
    ),
    security(("api_jwt" = []))
)]
pub async fn assign_role(
    State(app_state): State<AppState>,
    AuthenticatedUser(actor): AuthenticatedUser,
    _guard: RequireArea<AreaAdmin>,
    Path(id): Path<Uuid>,
    Json(payload): Json<AssignRolePayload>,
) -> Result<Json<User>, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;

    app_state
        .user_repo
        .find_by_id(id)
        .await?
        .ok_or(AppError::NotFound("user"))?;

    let user = app_state.user_repo.set_role(id, &payload.role).await?;

    if let Err(e) = app_state
        .audit_repo
        .record(&actor, "user.role.assign", "users", Some(id), Some(payload.role.clone()))
        .await
    {
        tracing::warn!("audit log write failed: {e}");
    }

    Ok(Json(user))
}
