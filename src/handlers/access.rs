// src/handlers/access.rs
//
// AccessPolicy answers for the UI: which areas the current role may see, and
// whether a navigation route is reachable. The UI asks before rendering;
// the API guards enforce the same table regardless.

use axum::{extract::Query, Json};
use serde::Deserialize;
use serde_json::{json, Value};
use utoipa::IntoParams;

use crate::{
    common::error::AppError,
    middleware::auth::AuthenticatedUser,
    models::access::Role,
    services::access_policy::AccessPolicy,
};

#[utoipa::path(
    get,
    path = "/api/access/areas",
    tag = "Access",
    responses(
        (status = 200, description = "The resolved role and its allowed areas"),
        (status = 403, description = "No role assigned")
    ),
    security(("api_jwt" = []))
)]
pub async fn my_areas(
    AuthenticatedUser(user): AuthenticatedUser,
) -> Result<Json<Value>, AppError> {
    let label = user.role.as_deref().ok_or(AppError::RoleMissing)?;
    let role = Role::from_label(label);
    Ok(Json(json!({
        "role": role.label(),
        "areas": AccessPolicy::allowed_areas(role),
    })))
}

#[derive(Debug, Deserialize, IntoParams)]
pub struct RouteQuery {
    /// A UI route path, e.g. `/admin/settings`.
    pub path: String,
}

#[utoipa::path(
    get,
    path = "/api/access/route",
    tag = "Access",
    params(RouteQuery),
    responses((status = 200, description = "Whether the current role may open the route")),
    security(("api_jwt" = []))
)]
pub async fn check_route(
    AuthenticatedUser(user): AuthenticatedUser,
    Query(query): Query<RouteQuery>,
) -> Json<Value> {
    // A user without a role can still reach the public routes, nothing else.
    let allowed = match user.role.as_deref() {
        Some(label) => AccessPolicy::can_access_route(Role::from_label(label), &query.path),
        None => AccessPolicy::is_public_route(&query.path),
    };
    Json(json!({ "path": query.path, "allowed": allowed }))
}
