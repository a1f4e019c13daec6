use sqlx::PgPool;
use tracing::instrument;
use uuid::Uuid;

use crate::utils::address::normalize_address;
use crate::utils::errors::AppError;

use super::model::{CreateTierDto, Tier, UpdateTierDto};

pub struct TierService;

impl TierService {
    #[instrument(skip(db))]
    pub async fn get_by_creator(db: &PgPool, creator_address: &str) -> Result<Vec<Tier>, AppError> {
        let tiers = sqlx::query_as::<_, Tier>(
            r#"
            SELECT id, creator_address, name, price, description, perks, image, active, created_at
            FROM tiers
            WHERE LOWER(creator_address) = LOWER($1)
            ORDER BY price ASC
            "#,
        )
        .bind(creator_address)
        .fetch_all(db)
        .await?;

        Ok(tiers)
    }

    #[instrument(skip(db))]
    pub async fn get_by_id(db: &PgPool, id: Uuid) -> Result<Tier, AppError> {
        let tier = sqlx::query_as::<_, Tier>(
            r#"
            SELECT id, creator_address, name, price, description, perks, image, active, created_at
            FROM tiers
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(db)
        .await?;

        tier.ok_or_else(|| AppError::not_found(anyhow::anyhow!("Tier not found")))
    }

    #[instrument(skip(db))]
    pub async fn create_tier(db: &PgPool, dto: CreateTierDto) -> Result<Tier, AppError> {
        let tier = sqlx::query_as::<_, Tier>(
            r#"
            INSERT INTO tiers (creator_address, name, price, description, perks, image, active)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING id, creator_address, name, price, description, perks, image, active, created_at
            "#,
        )
        .bind(normalize_address(&dto.creator))
        .bind(&dto.name)
        .bind(dto.price)
        .bind(&dto.description)
        .bind(&dto.perks)
        .bind(&dto.image)
        .bind(dto.active.unwrap_or(true))
        .fetch_one(db)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(db_err) = &e
                && db_err.is_foreign_key_violation()
            {
                return AppError::bad_request(anyhow::anyhow!("Creator does not exist"));
            }
            AppError::from(e)
        })?;

        Ok(tier)
    }

    #[instrument(skip(db))]
    pub async fn update_tier(db: &PgPool, id: Uuid, dto: UpdateTierDto) -> Result<Tier, AppError> {
        let tier = sqlx::query_as::<_, Tier>(
            r#"
            UPDATE tiers
            SET name = COALESCE($2, name),
                price = COALESCE($3, price),
                description = COALESCE($4, description),
                perks = COALESCE($5, perks),
                image = COALESCE($6, image),
                active = COALESCE($7, active)
            WHERE id = $1
            RETURNING id, creator_address, name, price, description, perks, image, active, created_at
            "#,
        )
        .bind(id)
        .bind(&dto.name)
        .bind(dto.price)
        .bind(&dto.description)
        .bind(&dto.perks)
        .bind(&dto.image)
        .bind(dto.active)
        .fetch_one(db)
        .await?;

        Ok(tier)
    }

    #[instrument(skip(db))]
    pub async fn delete_tier(db: &PgPool, id: Uuid, creator_address: &str) -> Result<(), AppError> {
        let deleted = sqlx::query(
            "DELETE FROM tiers WHERE id = $1 AND LOWER(creator_address) = LOWER($2)",
        )
        .bind(id)
        .bind(creator_address)
        .execute(db)
        .await?;

        if deleted.rows_affected() == 0 {
            return Err(AppError::not_found(anyhow::anyhow!("Tier not found")));
        }

        Ok(())
    }
}
