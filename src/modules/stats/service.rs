use chrono::{Datelike, Utc};
use sqlx::PgPool;
use tracing::instrument;

use crate::utils::errors::AppError;

use super::model::{CreatorStats, RevenueMonth, StatsChecklist};

const MONTHS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

pub struct StatsService;

impl StatsService {
    /// Aggregates the creator dashboard figures. Expired memberships are
    /// excluded everywhere; revenue counts each active member once at the
    /// price of the tier their `tier_id` resolves to.
    #[instrument(skip(db))]
    pub async fn get_creator_stats(
        db: &PgPool,
        creator_address: &str,
    ) -> Result<CreatorStats, AppError> {
        let active_members = sqlx::query_scalar::<_, i64>(
            r#"
            SELECT COUNT(*)
            FROM memberships
            WHERE LOWER(creator_address) = LOWER($1) AND expires_at > NOW()
            "#,
        )
        .bind(creator_address)
        .fetch_one(db)
        .await?;

        let total_revenue = sqlx::query_scalar::<_, f64>(
            r#"
            SELECT COALESCE(SUM(t.price), 0)::float8
            FROM memberships m
            JOIN tiers t ON t.id::text = m.tier_id
            WHERE LOWER(m.creator_address) = LOWER($1) AND m.expires_at > NOW()
            "#,
        )
        .bind(creator_address)
        .fetch_one(db)
        .await?;

        let top_tier_members = sqlx::query_scalar::<_, i64>(
            r#"
            SELECT COUNT(*)
            FROM memberships m
            JOIN tiers t ON t.id::text = m.tier_id
            WHERE LOWER(m.creator_address) = LOWER($1)
              AND m.expires_at > NOW()
              AND t.id = (
                  SELECT id FROM tiers
                  WHERE LOWER(creator_address) = LOWER($1)
                  ORDER BY price DESC, created_at ASC
                  LIMIT 1
              )
            "#,
        )
        .bind(creator_address)
        .fetch_one(db)
        .await?;

        let has_tiers = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM tiers WHERE LOWER(creator_address) = LOWER($1))",
        )
        .bind(creator_address)
        .fetch_one(db)
        .await?;

        let profile = sqlx::query_as::<_, (Option<String>, Option<String>)>(
            "SELECT name, contract_address FROM creators WHERE LOWER(address) = LOWER($1)",
        )
        .bind(creator_address)
        .fetch_optional(db)
        .await?;

        let (name, contract_address) = profile.unwrap_or((None, None));

        let posts_count = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM posts WHERE LOWER(creator_address) = LOWER($1)",
        )
        .bind(creator_address)
        .fetch_one(db)
        .await?;

        let likes_this_week = sqlx::query_scalar::<_, i64>(
            r#"
            SELECT COALESCE(SUM(likes), 0)
            FROM posts
            WHERE LOWER(creator_address) = LOWER($1)
              AND created_at > NOW() - INTERVAL '7 days'
            "#,
        )
        .bind(creator_address)
        .fetch_one(db)
        .await?;

        Ok(CreatorStats {
            contract_address: contract_address.clone(),
            total_revenue,
            monthly_recurring: total_revenue,
            active_members,
            history: revenue_history(total_revenue),
            checklist: StatsChecklist {
                profile_set: name.is_some(),
                is_deployed: contract_address.is_some(),
                has_tiers,
                has_posts: posts_count > 0,
            },
            total_backrs: active_members,
            active_discussions: posts_count,
            likes_this_week,
            top_tier_members,
        })
    }
}

/// Six-month chart series ending at the current month. Settlement is
/// on-chain, so only the current month carries the recurring total.
fn revenue_history(total_revenue: f64) -> Vec<RevenueMonth> {
    let current = Utc::now().month0() as usize;

    (0..6)
        .rev()
        .map(|back| {
            let month = (current + 12 - back) % 12;
            let revenue = if back == 0 { total_revenue } else { 0.0 };

            RevenueMonth {
                name: MONTHS[month].to_string(),
                revenue: (revenue * 100.0).round() / 100.0,
            }
        })
        .collect()
}
