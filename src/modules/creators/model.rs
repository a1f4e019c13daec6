use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

use crate::utils::address::validate_address;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Creator {
    pub address: String,
    pub username: Option<String>,
    pub name: Option<String>,
    pub bio: Option<String>,
    pub profile_image: Option<String>,
    pub cover_image: Option<String>,
    pub avatar_url: Option<String>,
    pub email: Option<String>,
    pub socials: Option<serde_json::Value>,
    pub payout_token: Option<String>,
    pub contract_address: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpsertCreatorDto {
    #[validate(custom(function = validate_address))]
    pub address: String,
    #[validate(length(min = 3, max = 30))]
    pub username: Option<String>,
    #[validate(length(min = 1, max = 100))]
    pub name: Option<String>,
    #[validate(length(max = 1000))]
    pub bio: Option<String>,
    #[validate(url)]
    pub profile_image: Option<String>,
    #[validate(url)]
    pub cover_image: Option<String>,
    #[validate(url)]
    pub avatar_url: Option<String>,
    #[validate(email)]
    pub email: Option<String>,
    pub socials: Option<serde_json::Value>,
    pub payout_token: Option<String>,
    #[validate(custom(function = validate_address))]
    pub contract_address: Option<String>,
}

#[derive(Debug, Deserialize, ToSchema, utoipa::IntoParams)]
pub struct CreatorFilterParams {
    /// Exact wallet lookup; responds with the profile or an empty object.
    pub address: Option<String>,
    /// Username availability check; responds with `{ "available": bool }`.
    pub username: Option<String>,
    /// Case-insensitive search over name, username and bio.
    pub q: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct UsernameAvailability {
    pub available: bool,
}

/// Category and hashtag selections, stored inside the creator's `socials`
/// JSON under a `taxonomy` key.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct Taxonomy {
    #[validate(length(max = 20))]
    pub category_ids: Vec<String>,
    #[validate(length(max = 50))]
    pub hashtag_ids: Vec<String>,
}
