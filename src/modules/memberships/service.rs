use chrono::DateTime;
use sqlx::PgPool;
use tracing::instrument;

use crate::utils::address::normalize_address;
use crate::utils::errors::AppError;

use super::model::{AudienceMember, CreateMembershipDto, Membership, MembershipFilterParams};

pub struct MembershipService;

impl MembershipService {
    /// Upserts a membership for the (subscriber, creator) pair. Renewals
    /// replace the existing row instead of accumulating duplicates.
    #[instrument(skip(db))]
    pub async fn upsert_membership(
        db: &PgPool,
        dto: CreateMembershipDto,
    ) -> Result<Membership, AppError> {
        let expires_at = DateTime::from_timestamp(dto.expiry, 0)
            .ok_or_else(|| AppError::bad_request(anyhow::anyhow!("expiry is out of range")))?;

        let membership = sqlx::query_as::<_, Membership>(
            r#"
            INSERT INTO memberships (subscriber_address, creator_address, tier_id, expires_at, tx_hash)
            VALUES ($1, $2, $3, $4, $5)
            ON CONFLICT (subscriber_address, creator_address)
            DO UPDATE SET
                tier_id = EXCLUDED.tier_id,
                expires_at = EXCLUDED.expires_at,
                tx_hash = EXCLUDED.tx_hash,
                updated_at = NOW()
            RETURNING id, subscriber_address, creator_address, tier_id, expires_at,
                      tx_hash, created_at, updated_at
            "#,
        )
        .bind(normalize_address(&dto.subscriber_address))
        .bind(normalize_address(&dto.creator_address))
        .bind(&dto.tier_id)
        .bind(expires_at)
        .bind(&dto.tx_hash)
        .fetch_one(db)
        .await?;

        Ok(membership)
    }

    /// All memberships held by a subscriber, active or not. Policy code
    /// filters on expiry itself so it controls the clock.
    #[instrument(skip(db))]
    pub async fn get_by_subscriber(
        db: &PgPool,
        subscriber_address: &str,
    ) -> Result<Vec<Membership>, AppError> {
        let memberships = sqlx::query_as::<_, Membership>(
            r#"
            SELECT id, subscriber_address, creator_address, tier_id, expires_at,
                   tx_hash, created_at, updated_at
            FROM memberships
            WHERE LOWER(subscriber_address) = LOWER($1)
            ORDER BY created_at DESC
            "#,
        )
        .bind(subscriber_address)
        .fetch_all(db)
        .await?;

        Ok(memberships)
    }

    #[instrument(skip(db))]
    pub async fn get_memberships(
        db: &PgPool,
        filters: MembershipFilterParams,
    ) -> Result<Vec<Membership>, AppError> {
        let memberships = sqlx::query_as::<_, Membership>(
            r#"
            SELECT id, subscriber_address, creator_address, tier_id, expires_at,
                   tx_hash, created_at, updated_at
            FROM memberships
            WHERE ($1::text IS NULL OR LOWER(subscriber_address) = LOWER($1))
              AND ($2::text IS NULL OR LOWER(creator_address) = LOWER($2))
            ORDER BY created_at DESC
            "#,
        )
        .bind(&filters.subscriber)
        .bind(&filters.creator)
        .fetch_all(db)
        .await?;

        Ok(memberships)
    }

    /// Subscriber list for a creator, joined with profiles and tier names.
    #[instrument(skip(db))]
    pub async fn get_audience(
        db: &PgPool,
        creator_address: &str,
    ) -> Result<Vec<AudienceMember>, AppError> {
        let audience = sqlx::query_as::<_, AudienceMember>(
            r#"
            SELECT
                m.subscriber_address,
                c.username,
                c.name,
                c.avatar_url,
                m.tier_id,
                t.name AS tier_name,
                m.expires_at,
                (m.expires_at > NOW()) AS active
            FROM memberships m
            LEFT JOIN creators c ON c.address = m.subscriber_address
            LEFT JOIN tiers t ON t.id::text = m.tier_id
            WHERE LOWER(m.creator_address) = LOWER($1)
            ORDER BY m.expires_at DESC
            "#,
        )
        .bind(creator_address)
        .fetch_all(db)
        .await?;

        Ok(audience)
    }
}
