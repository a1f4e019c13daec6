use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::utils::address::validate_address;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Post {
    pub id: Uuid,
    pub creator_address: String,
    pub title: String,
    pub content: String,
    pub image: Option<String>,
    pub video_url: Option<String>,
    pub min_tier: i32,
    pub likes: i32,
    pub is_public: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreatePostDto {
    #[validate(custom(function = validate_address))]
    pub creator_address: String,
    #[validate(length(min = 1, max = 200))]
    pub title: String,
    #[validate(length(min = 1))]
    pub content: String,
    #[validate(url)]
    pub image: Option<String>,
    #[validate(url)]
    pub video_url: Option<String>,
    #[validate(range(min = 0))]
    pub min_tier: Option<i32>,
    pub is_public: Option<bool>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdatePostDto {
    #[validate(custom(function = validate_address))]
    pub creator_address: String,
    #[validate(length(min = 1, max = 200))]
    pub title: Option<String>,
    #[validate(length(min = 1))]
    pub content: Option<String>,
    #[validate(url)]
    pub image: Option<String>,
    #[validate(url)]
    pub video_url: Option<String>,
    #[validate(range(min = 0))]
    pub min_tier: Option<i32>,
    pub is_public: Option<bool>,
}

#[derive(Debug, Deserialize, ToSchema, utoipa::IntoParams)]
pub struct PostFilterParams {
    /// Creator whose posts to list. Without it the global public feed is
    /// returned.
    pub address: Option<String>,
    /// Self-reported viewer for public preview; ignored when the request
    /// carries a valid bearer token.
    pub viewer: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Comment {
    pub id: Uuid,
    pub post_id: Uuid,
    pub user_address: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateCommentDto {
    #[validate(custom(function = validate_address))]
    pub user_address: String,
    #[validate(length(min = 1, max = 2000))]
    pub content: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct LikeResponse {
    pub likes: i32,
}
