// src/middleware/access.rs

use axum::{extract::FromRequestParts, http::request::Parts};
use std::marker::PhantomData;

use crate::{
    common::error::AppError,
    models::{
        access::{FeatureArea, Role},
        auth::User,
    },
    services::access_policy::AccessPolicy,
};

/// 1. The trait describing a feature area a handler can require.
pub trait AreaDef: Send + Sync + 'static {
    fn area() -> FeatureArea;
}

/// 2. The extractor (guard). Stating it as a handler argument is the whole
/// check: `_guard: RequireArea<AreaAdmin>`.
pub struct RequireArea<T>(pub PhantomData<T>);

impl<T, S> FromRequestParts<S> for RequireArea<T>
where
    T: AreaDef,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let user = parts.extensions.get::<User>().ok_or(AppError::InvalidToken)?;
        ensure_area(user, T::area())?;
        Ok(RequireArea(PhantomData))
    }
}

/// Runtime form of the same check, for routes whose area depends on request
/// data (the registry collections). A user without a role is blocked before
/// the matrix is even consulted.
pub fn ensure_area(user: &User, area: FeatureArea) -> Result<(), AppError> {
    let role = user.role.as_deref().ok_or(AppError::RoleMissing)?;
    if AccessPolicy::can_access_area(Role::from_label(role), area) {
        Ok(())
    } else {
        Err(AppError::AreaForbidden(area.name()))
    }
}

// ---
// AREA MARKER TYPES
// ---

pub struct AreaOverview;
impl AreaDef for AreaOverview {
    fn area() -> FeatureArea {
        FeatureArea::Overview
    }
}

pub struct AreaResources;
impl AreaDef for AreaResources {
    fn area() -> FeatureArea {
        FeatureArea::Resources
    }
}

pub struct AreaDistributions;
impl AreaDef for AreaDistributions {
    fn area() -> FeatureArea {
        FeatureArea::Distributions
    }
}

pub struct AreaAdmin;
impl AreaDef for AreaAdmin {
    fn area() -> FeatureArea {
        FeatureArea::Admin
    }
}
