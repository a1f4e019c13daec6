use backr::config::chain::ChainConfig;
use backr::config::cors::CorsConfig;
use backr::config::jwt::JwtConfig;
use backr::config::rate_limit::RateLimitConfig;
use backr::router::init_router;
use backr::state::AppState;
use backr::utils::jwt::create_access_token;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

#[allow(dead_code)]
pub const CREATOR_ADDRESS: &str = "0xcccccccccccccccccccccccccccccccccccccccc";
#[allow(dead_code)]
pub const SUPPORTER_ADDRESS: &str = "0xaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaa";
#[allow(dead_code)]
pub const STRANGER_ADDRESS: &str = "0xbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbb";

#[allow(dead_code)]
pub fn setup_test_app(pool: PgPool) -> axum::Router {
    dotenvy::dotenv().ok();
    let state = AppState {
        db: pool,
        jwt_config: JwtConfig::from_env(),
        cors_config: CorsConfig::from_env(),
        rate_limit_config: RateLimitConfig::from_env(),
        chain_config: ChainConfig::from_env(),
    };
    init_router(state)
}

/// Mints a bearer token for the given wallet address. The identity provider
/// is external to the API, so tests sign tokens directly with the configured
/// secret.
#[allow(dead_code)]
pub fn make_token(address: &str) -> String {
    dotenvy::dotenv().ok();
    create_access_token(address, &JwtConfig::from_env()).unwrap()
}

#[allow(dead_code)]
pub async fn seed_creator(pool: &PgPool, address: &str) {
    sqlx::query("INSERT INTO creators (address, username, name) VALUES ($1, $2, $3)")
        .bind(address)
        .bind(format!("user_{}", Uuid::new_v4().simple()))
        .bind("Test Creator")
        .execute(pool)
        .await
        .unwrap();
}

#[allow(dead_code)]
pub async fn seed_post(pool: &PgPool, creator: &str, title: &str, is_public: bool) -> Uuid {
    sqlx::query_scalar::<_, Uuid>(
        r#"
        INSERT INTO posts (creator_address, title, content, image, video_url, is_public)
        VALUES ($1, $2, 'members-only body', 'https://cdn.example.com/a.png',
                'https://cdn.example.com/a.mp4', $3)
        RETURNING id
        "#,
    )
    .bind(creator)
    .bind(title)
    .bind(is_public)
    .fetch_one(pool)
    .await
    .unwrap()
}

#[allow(dead_code)]
pub async fn seed_membership(
    pool: &PgPool,
    subscriber: &str,
    creator: &str,
    expires_at: DateTime<Utc>,
) {
    sqlx::query(
        r#"
        INSERT INTO memberships (subscriber_address, creator_address, tier_id, expires_at)
        VALUES ($1, $2, '1', $3)
        "#,
    )
    .bind(subscriber)
    .bind(creator)
    .bind(expires_at)
    .execute(pool)
    .await
    .unwrap();
}
