// src/routes.rs

use axum::{
    middleware as axum_middleware,
    routing::{delete, get, post, put},
    Router,
};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::{config::AppState, docs::ApiDoc, handlers, middleware::auth::auth_guard};

/// Builds the full application router over the given state.
pub fn create_router(app_state: AppState) -> Router {
    // Public authentication routes
    let auth_routes = Router::new()
        .route("/register", post(handlers::auth::register))
        .route("/login", post(handlers::auth::login));

    let user_routes = Router::new()
        .route("/", get(handlers::users::list_users))
        .route("/me", get(handlers::users::get_me))
        .route("/{id}/role", put(handlers::users::assign_role));

    let resource_routes = Router::new()
        .route(
            "/",
            post(handlers::resources::create_resource).get(handlers::resources::list_resources),
        )
        .route("/low-stock", get(handlers::resources::low_stock))
        .route("/out-of-stock", get(handlers::resources::out_of_stock))
        .route(
            "/{id}",
            get(handlers::resources::get_resource)
                .put(handlers::resources::update_resource)
                .delete(handlers::resources::delete_resource),
        );

    let distribution_routes = Router::new()
        .route(
            "/",
            post(handlers::distributions::create_distribution)
                .get(handlers::distributions::list_distributions),
        )
        .route("/stats", get(handlers::distributions::distribution_stats))
        .route(
            "/{id}",
            get(handlers::distributions::get_distribution)
                .put(handlers::distributions::update_distribution)
                .delete(handlers::distributions::delete_distribution),
        )
        .route("/{id}/receipt", get(handlers::documents::distribution_receipt));

    let category_routes = Router::new()
        .route(
            "/",
            post(handlers::categories::create_category).get(handlers::categories::list_categories),
        )
        .route("/stats", get(handlers::categories::category_stats))
        .route("/{id}", delete(handlers::categories::delete_category));

    let registry_routes = Router::new()
        .route(
            "/{collection}",
            post(handlers::registry::create_record).get(handlers::registry::list_records),
        )
        .route(
            "/{collection}/{id}",
            get(handlers::registry::get_record)
                .put(handlers::registry::update_record)
                .delete(handlers::registry::delete_record),
        );

    let access_routes = Router::new()
        .route("/areas", get(handlers::access::my_areas))
        .route("/route", get(handlers::access::check_route));

    let dashboard_routes = Router::new().route("/summary", get(handlers::dashboard::get_summary));

    let audit_routes = Router::new().route("/", get(handlers::audit::list_audit_logs));

    // Everything below the auth guard requires a valid bearer token.
    let guarded = Router::new()
        .nest("/api/users", user_routes)
        .nest("/api/resources", resource_routes)
        .nest("/api/distributions", distribution_routes)
        .nest("/api/categories", category_routes)
        .nest("/api/records", registry_routes)
        .nest("/api/access", access_routes)
        .nest("/api/dashboard", dashboard_routes)
        .nest("/api/audit-logs", audit_routes)
        .layer(axum_middleware::from_fn_with_state(app_state.clone(), auth_guard));

    Router::new()
        .route("/api/health", get(|| async { "OK" }))
        .nest("/api/auth", auth_routes)
        .merge(guarded)
        .merge(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .with_state(app_state)
}
