use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::modules::creators::model::{
    Creator, Taxonomy, UpsertCreatorDto, UsernameAvailability,
};
use crate::modules::memberships::model::{AudienceMember, CreateMembershipDto, Membership};
use crate::modules::posts::model::{
    Comment, CreateCommentDto, CreatePostDto, LikeResponse, Post, UpdatePostDto,
};
use crate::modules::stats::model::{CreatorStats, RevenueMonth, StatsChecklist};
use crate::modules::tiers::model::{CreateTierDto, Tier, UpdateTierDto};
use crate::modules::tips::model::{CreateTipDto, Tip};
use crate::utils::errors::FieldError;

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::modules::creators::controller::get_creators,
        crate::modules::creators::controller::upsert_creator,
        crate::modules::creators::controller::get_taxonomy,
        crate::modules::creators::controller::update_taxonomy,
        crate::modules::posts::controller::get_posts,
        crate::modules::posts::controller::create_post,
        crate::modules::posts::controller::update_post,
        crate::modules::posts::controller::delete_post,
        crate::modules::posts::controller::like_post,
        crate::modules::posts::controller::get_comments,
        crate::modules::posts::controller::create_comment,
        crate::modules::tiers::controller::get_tiers,
        crate::modules::tiers::controller::create_tier,
        crate::modules::tiers::controller::update_tier,
        crate::modules::tiers::controller::delete_tier,
        crate::modules::memberships::controller::get_memberships,
        crate::modules::memberships::controller::create_membership,
        crate::modules::memberships::controller::get_audience,
        crate::modules::stats::controller::get_stats,
        crate::modules::tips::controller::get_tips,
        crate::modules::tips::controller::create_tip,
    ),
    components(
        schemas(
            Creator,
            UpsertCreatorDto,
            UsernameAvailability,
            Taxonomy,
            Post,
            CreatePostDto,
            UpdatePostDto,
            Comment,
            CreateCommentDto,
            LikeResponse,
            Tier,
            CreateTierDto,
            UpdateTierDto,
            Membership,
            CreateMembershipDto,
            AudienceMember,
            CreatorStats,
            RevenueMonth,
            StatsChecklist,
            Tip,
            CreateTipDto,
            FieldError,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Creators", description = "Creator profile and taxonomy endpoints"),
        (name = "Posts", description = "Gated posts, likes and comments"),
        (name = "Tiers", description = "Subscription tier management"),
        (name = "Memberships", description = "Subscription state and audience views"),
        (name = "Stats", description = "Creator dashboard aggregations"),
        (name = "Tips", description = "One-off stablecoin tips")
    ),
    info(
        title = "Backr API",
        version = "0.1.0",
        description = "A creator-monetization REST API built with Rust, Axum, and PostgreSQL, with wallet-based JWT authentication and membership-gated content.",
        contact(
            name = "API Support",
            email = "support@backr.xyz"
        ),
        license(
            name = "MIT"
        )
    )
)]
pub struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            )
        }
    }
}
