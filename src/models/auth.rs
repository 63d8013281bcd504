// src/models/auth.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

// A user as read from the `users` collection.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: Uuid,

    #[schema(example = "asha@angaza.org")]
    pub email: String,

    #[schema(example = "Asha Mwangi")]
    pub name: String,

    // Never serialized into responses.
    #[serde(skip_serializing)]
    #[schema(ignore)]
    pub password_hash: String,

    /// Absent until an administrator assigns one. A user without a role is a
    /// distinguishable state: authentication succeeds, every gated surface
    /// stays closed.
    #[serde(default)]
    #[schema(example = "programs lead")]
    pub role: Option<String>,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// Payload for account registration.
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct RegisterUserPayload {
    #[validate(email(message = "The e-mail address is invalid."))]
    pub email: String,

    #[validate(length(min = 6, message = "The password must be at least 6 characters."))]
    pub password: String,

    #[validate(length(min = 1, message = "The name is required."))]
    pub name: String,
}

// Payload for login.
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct LoginUserPayload {
    #[validate(email(message = "The e-mail address is invalid."))]
    pub email: String,

    #[validate(length(min = 6, message = "The password must be at least 6 characters."))]
    pub password: String,
}

// Authentication response carrying the token.
#[derive(Debug, Serialize, ToSchema)]
pub struct AuthResponse {
    pub token: String,
}

// Claims carried inside the JWT. The role deliberately is not a claim: it is
// re-read from the user document on every request, so a role change takes
// effect without re-issuing tokens.
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: Uuid,
    pub exp: usize,
    pub iat: usize,
}
