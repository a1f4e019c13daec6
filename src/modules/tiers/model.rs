use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::utils::address::validate_address;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Tier {
    pub id: Uuid,
    pub creator_address: String,
    pub name: String,
    pub price: f64,
    pub description: Option<String>,
    pub perks: Option<serde_json::Value>,
    pub image: Option<String>,
    pub active: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateTierDto {
    #[validate(custom(function = validate_address))]
    pub creator: String,
    #[validate(length(min = 1, max = 100))]
    pub name: String,
    #[validate(range(min = 0.0))]
    pub price: f64,
    #[validate(length(max = 1000))]
    pub description: Option<String>,
    pub perks: Option<serde_json::Value>,
    #[validate(url)]
    pub image: Option<String>,
    pub active: Option<bool>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateTierDto {
    #[validate(custom(function = validate_address))]
    pub creator: String,
    #[validate(length(min = 1, max = 100))]
    pub name: Option<String>,
    #[validate(range(min = 0.0))]
    pub price: Option<f64>,
    #[validate(length(max = 1000))]
    pub description: Option<String>,
    pub perks: Option<serde_json::Value>,
    #[validate(url)]
    pub image: Option<String>,
    pub active: Option<bool>,
}

#[derive(Debug, Deserialize, ToSchema, utoipa::IntoParams)]
pub struct TierFilterParams {
    pub creator: Option<String>,
}

#[derive(Debug, Deserialize, ToSchema, utoipa::IntoParams)]
pub struct DeleteTierParams {
    pub creator: String,
}
