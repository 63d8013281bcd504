// src/services/access_policy.rs

//! The access matrix.
//!
//! Deliberately data, not rules: the tables below are the single reviewable
//! source of truth for which role sees which area, and the tests pin them
//! down fact by fact. Lookups are total; an unrecognized role falls back to
//! the default set instead of failing. That fail-open default is a product
//! decision carried over from the existing system, recorded in DESIGN.md.

use crate::models::access::{FeatureArea, Role};
use FeatureArea::*;

const ALL_AREAS: &[FeatureArea] = &[
    Overview,
    Beneficiaries,
    Resources,
    Distributions,
    Donations,
    Grants,
    Projects,
    Finance,
    Reports,
    Admin,
];

const EXECUTIVE_DIRECTOR_AREAS: &[FeatureArea] = &[
    Overview,
    Beneficiaries,
    Resources,
    Distributions,
    Donations,
    Grants,
    Projects,
    Finance,
    Reports,
];

const FINANCE_LEAD_AREAS: &[FeatureArea] = &[Overview, Finance, Donations, Grants, Reports];

const PROGRAMS_LEAD_AREAS: &[FeatureArea] =
    &[Overview, Beneficiaries, Resources, Distributions, Projects, Reports];

const FIELD_OFFICER_AREAS: &[FeatureArea] = &[Overview, Beneficiaries, Distributions];

const BOARD_AREAS: &[FeatureArea] = &[Overview, Finance, Reports];

const DEFAULT_AREAS: &[FeatureArea] =
    &[Overview, Beneficiaries, Resources, Distributions, Reports];

/// UI route prefixes and the area each belongs to.
const ROUTE_AREAS: &[(&str, FeatureArea)] = &[
    ("/dashboard", Overview),
    ("/login", Overview),
    ("/unauthorized", Overview),
    ("/beneficiaries", Beneficiaries),
    ("/resources", Resources),
    ("/inventory", Resources),
    ("/categories", Resources),
    ("/distributions", Distributions),
    ("/donations", Donations),
    ("/partners", Donations),
    ("/grants", Grants),
    ("/projects", Projects),
    ("/programs", Projects),
    ("/finance", Finance),
    ("/reports", Reports),
    ("/admin", Admin),
    ("/staff", Admin),
    ("/departments", Admin),
    ("/users", Admin),
    ("/audit-logs", Admin),
];

pub struct AccessPolicy;

impl AccessPolicy {
    /// Total over every role; never empty, never fails.
    pub fn allowed_areas(role: Role) -> &'static [FeatureArea] {
        match role {
            Role::SystemAdmin => ALL_AREAS,
            Role::ExecutiveDirector => EXECUTIVE_DIRECTOR_AREAS,
            Role::FinanceLead => FINANCE_LEAD_AREAS,
            Role::ProgramsLead => PROGRAMS_LEAD_AREAS,
            Role::FieldOfficer => FIELD_OFFICER_AREAS,
            Role::Board => BOARD_AREAS,
            Role::Default => DEFAULT_AREAS,
        }
    }

    pub fn can_access_area(role: Role, area: FeatureArea) -> bool {
        Self::allowed_areas(role).contains(&area)
    }

    /// Routes every principal may reach: the landing page, login and the
    /// unauthorized-access page.
    pub fn is_public_route(path: &str) -> bool {
        matches!(normalize(path), "" | "/" | "/dashboard" | "/login" | "/unauthorized")
    }

    /// Route-level check for UI navigation.
    pub fn can_access_route(role: Role, path: &str) -> bool {
        Self::is_public_route(path) || Self::can_access_area(role, Self::route_area(path))
    }

    /// Maps a route path to its feature area. Unmapped routes inherit the
    /// area of a known first segment, and anything else lands on the
    /// overview area.
    pub fn route_area(path: &str) -> FeatureArea {
        let path = normalize(path);
        if let Some((_, area)) = ROUTE_AREAS.iter().find(|(route, _)| *route == path) {
            return *area;
        }
        let first = path.trim_start_matches('/').split('/').next().unwrap_or("");
        ROUTE_AREAS
            .iter()
            .find(|(route, _)| route.trim_start_matches('/') == first)
            .map(|(_, area)| *area)
            .unwrap_or(Overview)
    }
}

fn normalize(path: &str) -> &str {
    let path = path.split('?').next().unwrap_or(path);
    if path.len() > 1 { path.trim_end_matches('/') } else { path }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EVERY_ROLE: &[Role] = &[
        Role::SystemAdmin,
        Role::ExecutiveDirector,
        Role::FinanceLead,
        Role::ProgramsLead,
        Role::FieldOfficer,
        Role::Board,
        Role::Default,
    ];

    #[test]
    fn every_role_has_a_non_empty_area_set() {
        for role in EVERY_ROLE {
            assert!(
                !AccessPolicy::allowed_areas(*role).is_empty(),
                "{role:?} has no areas"
            );
            assert!(
                AccessPolicy::can_access_area(*role, Overview),
                "{role:?} cannot reach the overview"
            );
        }
    }

    #[test]
    fn unknown_roles_resolve_to_the_default_set() {
        for label in ["", "gardener", "FINANCE", "admin " , "volunteer"] {
            assert_eq!(
                AccessPolicy::allowed_areas(Role::from_label(label)),
                AccessPolicy::allowed_areas(Role::Default),
                "label {label:?}"
            );
        }
    }

    #[test]
    fn role_lookup_is_case_insensitive() {
        assert_eq!(Role::from_label("Finance Lead"), Role::FinanceLead);
        assert_eq!(Role::from_label("  SYSTEM ADMIN  "), Role::SystemAdmin);
        assert_eq!(Role::from_label("board"), Role::Board);
    }

    #[test]
    fn the_matrix_facts_hold() {
        assert!(AccessPolicy::can_access_area(Role::SystemAdmin, Admin));
        assert!(AccessPolicy::can_access_area(Role::FinanceLead, Finance));
        assert!(!AccessPolicy::can_access_area(Role::FinanceLead, Distributions));
        assert!(AccessPolicy::can_access_area(Role::ProgramsLead, Distributions));
        assert!(!AccessPolicy::can_access_area(Role::ProgramsLead, Finance));
        assert!(AccessPolicy::can_access_area(Role::FieldOfficer, Beneficiaries));
        assert!(!AccessPolicy::can_access_area(Role::FieldOfficer, Admin));
        assert!(AccessPolicy::can_access_area(Role::Board, Finance));
        assert!(!AccessPolicy::can_access_area(Role::Board, Admin));
        assert!(!AccessPolicy::can_access_area(Role::Default, Finance));
        assert!(!AccessPolicy::can_access_area(Role::Default, Admin));
        assert!(!AccessPolicy::can_access_area(Role::ExecutiveDirector, Admin));
    }

    #[test]
    fn special_routes_are_reachable_for_every_role() {
        for role in EVERY_ROLE {
            for route in ["/", "/dashboard", "/login", "/unauthorized"] {
                assert!(
                    AccessPolicy::can_access_route(*role, route),
                    "{role:?} blocked from {route}"
                );
            }
        }
    }

    #[test]
    fn board_cannot_reach_the_admin_route() {
        assert!(!AccessPolicy::can_access_route(Role::Board, "/admin"));
        assert!(!AccessPolicy::can_access_route(Role::Board, "/admin/settings"));
    }

    #[test]
    fn unmapped_routes_inherit_by_first_segment_or_default_to_overview() {
        assert_eq!(AccessPolicy::route_area("/resources/1b2c/edit"), Resources);
        assert_eq!(AccessPolicy::route_area("/staff/new"), Admin);
        assert_eq!(AccessPolicy::route_area("/somewhere-new"), Overview);
        assert_eq!(AccessPolicy::route_area("/distributions?page=2"), Distributions);
        assert_eq!(AccessPolicy::route_area("/grants/"), Grants);
    }

    #[test]
    fn lookups_are_deterministic() {
        for role in EVERY_ROLE {
            assert_eq!(
                AccessPolicy::allowed_areas(*role),
                AccessPolicy::allowed_areas(*role)
            );
        }
    }
}
