use sqlx::PgPool;
use tracing::instrument;

use crate::utils::address::normalize_address;
use crate::utils::errors::AppError;

use super::model::{CreateTipDto, Tip, TipFilterParams};

pub struct TipService;

impl TipService {
    /// `default_currency` comes from the chain config; the payload may
    /// override it per tip.
    #[instrument(skip(db))]
    pub async fn create_tip(
        db: &PgPool,
        dto: CreateTipDto,
        default_currency: &str,
    ) -> Result<Tip, AppError> {
        let currency = dto.currency.as_deref().unwrap_or(default_currency);

        let tip = sqlx::query_as::<_, Tip>(
            r#"
            INSERT INTO tips (sender, receiver, amount, currency, message, tx_hash)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id, sender, receiver, amount, currency, message, tx_hash, created_at
            "#,
        )
        .bind(normalize_address(&dto.sender))
        .bind(normalize_address(&dto.receiver))
        .bind(&dto.amount)
        .bind(currency)
        .bind(&dto.message)
        .bind(&dto.tx_hash)
        .fetch_one(db)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(db_err) = &e
                && db_err.is_foreign_key_violation()
            {
                return AppError::bad_request(anyhow::anyhow!("Receiver does not exist"));
            }
            AppError::from(e)
        })?;

        Ok(tip)
    }

    #[instrument(skip(db))]
    pub async fn get_tips(db: &PgPool, filters: TipFilterParams) -> Result<Vec<Tip>, AppError> {
        let tips = sqlx::query_as::<_, Tip>(
            r#"
            SELECT id, sender, receiver, amount, currency, message, tx_hash, created_at
            FROM tips
            WHERE ($1::text IS NULL OR LOWER(receiver) = LOWER($1))
              AND ($2::text IS NULL OR LOWER(sender) = LOWER($2))
            ORDER BY created_at DESC
            "#,
        )
        .bind(&filters.receiver)
        .bind(&filters.sender)
        .fetch_all(db)
        .await?;

        Ok(tips)
    }
}
