use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::utils::address::{validate_address, validate_tx_hash};

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Membership {
    pub id: Uuid,
    pub subscriber_address: String,
    pub creator_address: String,
    pub tier_id: String,
    pub expires_at: DateTime<Utc>,
    pub tx_hash: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Renewal hits the same (subscriber, creator) pair and replaces the row.
/// `expiry` is a unix timestamp in seconds.
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateMembershipDto {
    #[validate(custom(function = validate_address))]
    pub subscriber_address: String,
    #[validate(custom(function = validate_address))]
    pub creator_address: String,
    #[validate(length(min = 1, max = 64))]
    pub tier_id: String,
    #[validate(range(min = 1))]
    pub expiry: i64,
    #[validate(custom(function = validate_tx_hash))]
    pub tx_hash: Option<String>,
}

#[derive(Debug, Deserialize, ToSchema, utoipa::IntoParams)]
pub struct MembershipFilterParams {
    pub subscriber: Option<String>,
    pub creator: Option<String>,
}

#[derive(Debug, Deserialize, ToSchema, utoipa::IntoParams)]
pub struct AudienceParams {
    pub creator: String,
}

/// A subscriber row joined with their profile and tier name for the
/// creator-facing audience view.
#[derive(Debug, Serialize, FromRow, ToSchema)]
pub struct AudienceMember {
    pub subscriber_address: String,
    pub username: Option<String>,
    pub name: Option<String>,
    pub avatar_url: Option<String>,
    pub tier_id: String,
    pub tier_name: Option<String>,
    pub expires_at: DateTime<Utc>,
    pub active: bool,
}
