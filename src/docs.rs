// src/docs.rs

use utoipa::openapi::security::{Http, HttpAuthScheme, SecurityScheme};
use utoipa::OpenApi;

use crate::handlers;
use crate::models;

#[derive(OpenApi)]
#[openapi(
    paths(
        // --- Auth ---
        handlers::auth::register,
        handlers::auth::login,

        // --- Users ---
        handlers::users::get_me,
        handlers::users::list_users,
        handlers::users::assign_role,

        // --- Inventory ---
        handlers::resources::create_resource,
        handlers::resources::list_resources,
        handlers::resources::get_resource,
        handlers::resources::update_resource,
        handlers::resources::delete_resource,
        handlers::resources::low_stock,
        handlers::resources::out_of_stock,
        handlers::categories::create_category,
        handlers::categories::list_categories,
        handlers::categories::delete_category,
        handlers::categories::category_stats,

        // --- Distributions ---
        handlers::distributions::create_distribution,
        handlers::distributions::list_distributions,
        handlers::distributions::get_distribution,
        handlers::distributions::update_distribution,
        handlers::distributions::delete_distribution,
        handlers::distributions::distribution_stats,
        handlers::documents::distribution_receipt,

        // --- Registry ---
        handlers::registry::create_record,
        handlers::registry::list_records,
        handlers::registry::get_record,
        handlers::registry::update_record,
        handlers::registry::delete_record,

        // --- Access ---
        handlers::access::my_areas,
        handlers::access::check_route,

        // --- Dashboard / Admin ---
        handlers::dashboard::get_summary,
        handlers::audit::list_audit_logs,
    ),
    components(
        schemas(
            // --- Access ---
            models::access::Role,
            models::access::FeatureArea,

            // --- Auth ---
            models::auth::User,
            models::auth::RegisterUserPayload,
            models::auth::LoginUserPayload,
            models::auth::AuthResponse,
            handlers::users::AssignRolePayload,

            // --- Inventory ---
            models::resource::Resource,
            models::category::Category,
            models::category::CategoryStat,
            handlers::resources::CreateResourcePayload,
            handlers::resources::UpdateResourcePayload,
            handlers::categories::CreateCategoryPayload,

            // --- Distributions ---
            models::distribution::Distribution,
            models::distribution::DistributionStatus,
            models::distribution::DistributionStats,
            handlers::distributions::CreateDistributionPayload,
            handlers::distributions::UpdateDistributionPayload,

            // --- Dashboard / Admin ---
            models::dashboard::DashboardSummary,
            models::audit::AuditLog,
        )
    ),
    tags(
        (name = "Auth", description = "Registration and login"),
        (name = "Users", description = "Accounts and role assignment"),
        (name = "Access", description = "Role-to-area policy answers"),
        (name = "Inventory", description = "Resources, categories and stock health"),
        (name = "Distributions", description = "Handout records and the stock ledger"),
        (name = "Registry", description = "Schemaless operational collections"),
        (name = "Dashboard", description = "Landing-page figures"),
        (name = "Admin", description = "Audit trail")
    ),
    modifiers(&SecurityAddon)
)]
pub struct ApiDoc;

struct SecurityAddon;

impl utoipa::Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "api_jwt",
            SecurityScheme::Http(Http::new(HttpAuthScheme::Bearer)),
        );
    }
}
