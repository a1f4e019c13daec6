use sqlx::PgPool;
use tracing::instrument;

use crate::utils::address::normalize_address;
use crate::utils::errors::AppError;

use super::model::{Creator, Taxonomy, UpsertCreatorDto};

pub struct CreatorService;

impl CreatorService {
    #[instrument(skip(db))]
    pub async fn get_by_address(db: &PgPool, address: &str) -> Result<Option<Creator>, AppError> {
        let creator = sqlx::query_as::<_, Creator>(
            r#"
            SELECT address, username, name, bio, profile_image, cover_image, avatar_url,
                   email, socials, payout_token, contract_address, created_at, updated_at
            FROM creators
            WHERE LOWER(address) = LOWER($1)
            "#,
        )
        .bind(address)
        .fetch_optional(db)
        .await?;

        Ok(creator)
    }

    #[instrument(skip(db))]
    pub async fn is_username_available(db: &PgPool, username: &str) -> Result<bool, AppError> {
        let taken = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM creators WHERE LOWER(username) = LOWER($1))",
        )
        .bind(username)
        .fetch_one(db)
        .await?;

        Ok(!taken)
    }

    #[instrument(skip(db))]
    pub async fn search(db: &PgPool, query: &str) -> Result<Vec<Creator>, AppError> {
        let pattern = format!("%{}%", query);
        let creators = sqlx::query_as::<_, Creator>(
            r#"
            SELECT address, username, name, bio, profile_image, cover_image, avatar_url,
                   email, socials, payout_token, contract_address, created_at, updated_at
            FROM creators
            WHERE name ILIKE $1 OR username ILIKE $1 OR bio ILIKE $1
            ORDER BY created_at DESC
            "#,
        )
        .bind(pattern)
        .fetch_all(db)
        .await?;

        Ok(creators)
    }

    #[instrument(skip(db))]
    pub async fn get_all(db: &PgPool) -> Result<Vec<Creator>, AppError> {
        let creators = sqlx::query_as::<_, Creator>(
            r#"
            SELECT address, username, name, bio, profile_image, cover_image, avatar_url,
                   email, socials, payout_token, contract_address, created_at, updated_at
            FROM creators
            ORDER BY created_at DESC
            "#,
        )
        .fetch_all(db)
        .await?;

        Ok(creators)
    }

    /// Upserts the profile keyed by wallet address. An email already linked
    /// to a different wallet, or a username held by someone else, is a 409.
    #[instrument(skip(db))]
    pub async fn upsert_creator(db: &PgPool, dto: UpsertCreatorDto) -> Result<Creator, AppError> {
        let address = normalize_address(&dto.address);

        if let Some(email) = &dto.email {
            let holder = sqlx::query_scalar::<_, String>(
                "SELECT address FROM creators WHERE LOWER(email) = LOWER($1)",
            )
            .bind(email)
            .fetch_optional(db)
            .await?;

            if let Some(holder) = holder
                && holder != address
            {
                return Err(AppError::conflict(
                    "Email is already linked to another wallet".to_string(),
                ));
            }
        }

        let creator = sqlx::query_as::<_, Creator>(
            r#"
            INSERT INTO creators (address, username, name, bio, profile_image, cover_image,
                                  avatar_url, email, socials, payout_token, contract_address)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            ON CONFLICT (address)
            DO UPDATE SET
                username = COALESCE(EXCLUDED.username, creators.username),
                name = COALESCE(EXCLUDED.name, creators.name),
                bio = COALESCE(EXCLUDED.bio, creators.bio),
                profile_image = COALESCE(EXCLUDED.profile_image, creators.profile_image),
                cover_image = COALESCE(EXCLUDED.cover_image, creators.cover_image),
                avatar_url = COALESCE(EXCLUDED.avatar_url, creators.avatar_url),
                email = COALESCE(EXCLUDED.email, creators.email),
                socials = COALESCE(EXCLUDED.socials, creators.socials),
                payout_token = COALESCE(EXCLUDED.payout_token, creators.payout_token),
                contract_address = COALESCE(EXCLUDED.contract_address, creators.contract_address),
                updated_at = NOW()
            RETURNING address, username, name, bio, profile_image, cover_image, avatar_url,
                      email, socials, payout_token, contract_address, created_at, updated_at
            "#,
        )
        .bind(&address)
        .bind(&dto.username)
        .bind(&dto.name)
        .bind(&dto.bio)
        .bind(&dto.profile_image)
        .bind(&dto.cover_image)
        .bind(&dto.avatar_url)
        .bind(&dto.email)
        .bind(&dto.socials)
        .bind(&dto.payout_token)
        .bind(dto.contract_address.as_deref().map(normalize_address))
        .fetch_one(db)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(db_err) = &e
                && db_err.is_unique_violation()
            {
                return AppError::conflict("Username is already taken".to_string());
            }
            AppError::from(e)
        })?;

        Ok(creator)
    }

    /// Reads the taxonomy stored under `socials.taxonomy`; absent or
    /// malformed data yields empty lists.
    #[instrument(skip(db))]
    pub async fn get_taxonomy(db: &PgPool, address: &str) -> Result<Taxonomy, AppError> {
        let creator = Self::get_by_address(db, address)
            .await?
            .ok_or_else(|| AppError::not_found(anyhow::anyhow!("Creator not found")))?;

        let taxonomy = creator
            .socials
            .as_ref()
            .and_then(|s| s.get("taxonomy"))
            .and_then(|t| serde_json::from_value(t.clone()).ok())
            .unwrap_or(Taxonomy {
                category_ids: Vec::new(),
                hashtag_ids: Vec::new(),
            });

        Ok(taxonomy)
    }

    /// Merges the taxonomy into `socials` without disturbing other keys.
    #[instrument(skip(db))]
    pub async fn update_taxonomy(
        db: &PgPool,
        address: &str,
        taxonomy: Taxonomy,
    ) -> Result<Taxonomy, AppError> {
        let value = serde_json::to_value(&taxonomy)?;

        let updated = sqlx::query_scalar::<_, i64>(
            r#"
            WITH updated AS (
                UPDATE creators
                SET socials = jsonb_set(COALESCE(socials, '{}'::jsonb), '{taxonomy}', $2, true),
                    updated_at = NOW()
                WHERE LOWER(address) = LOWER($1)
                RETURNING 1
            )
            SELECT COUNT(*) FROM updated
            "#,
        )
        .bind(address)
        .bind(&value)
        .fetch_one(db)
        .await?;

        if updated == 0 {
            return Err(AppError::not_found(anyhow::anyhow!("Creator not found")));
        }

        Ok(taxonomy)
    }
}
