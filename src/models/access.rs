// src/models/access.rs

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// A user's job function. Role labels on user documents are free-form
/// strings; lookup is case-insensitive and anything unrecognized resolves to
/// [`Role::Default`], so resolution is total and never fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
pub enum Role {
    #[serde(rename = "system admin")]
    SystemAdmin,
    #[serde(rename = "executive director")]
    ExecutiveDirector,
    #[serde(rename = "finance lead")]
    FinanceLead,
    #[serde(rename = "programs lead")]
    ProgramsLead,
    #[serde(rename = "field officer")]
    FieldOfficer,
    #[serde(rename = "board")]
    Board,
    #[serde(rename = "default")]
    Default,
}

impl Role {
    pub fn from_label(label: &str) -> Role {
        match label.trim().to_lowercase().as_str() {
            "system admin" => Role::SystemAdmin,
            "executive director" => Role::ExecutiveDirector,
            "finance lead" => Role::FinanceLead,
            "programs lead" => Role::ProgramsLead,
            "field officer" => Role::FieldOfficer,
            "board" => Role::Board,
            _ => Role::Default,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Role::SystemAdmin => "system admin",
            Role::ExecutiveDirector => "executive director",
            Role::FinanceLead => "finance lead",
            Role::ProgramsLead => "programs lead",
            Role::FieldOfficer => "field officer",
            Role::Board => "board",
            Role::Default => "default",
        }
    }
}

/// A navigable section of the dashboard. Membership in a role's allowed set
/// is the sole authorization primitive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum FeatureArea {
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
}

impl FeatureArea {
    pub fn name(&self) -> &'static str {
        match self {
            FeatureArea::Overview => "overview",
            FeatureArea::Beneficiaries => "beneficiaries",
            FeatureArea::Resources => "resources",
            FeatureArea::Distributions => "distributions",
            FeatureArea::Donations => "donations",
            FeatureArea::Grants => "grants",
            FeatureArea::Projects => "projects",
            FeatureArea::Finance => "finance",
            FeatureArea::Reports => "reports",
            FeatureArea::Admin => "admin",
        }
    }
}
