use axum::{
    Json,
    extract::{Query, State},
};
use tracing::instrument;

use crate::modules::stats::model::{CreatorStats, StatsParams};
use crate::modules::stats::service::StatsService;
use crate::state::AppState;
use crate::utils::errors::AppError;

#[utoipa::path(
    get,
    path = "/api/stats",
    params(StatsParams),
    responses(
        (status = 200, description = "Dashboard aggregation for the creator", body = CreatorStats),
        (status = 400, description = "Creator address missing")
    ),
    tag = "Stats"
)]
#[instrument(skip(state))]
pub async fn get_stats(
    State(state): State<AppState>,
    Query(params): Query<StatsParams>,
) -> Result<Json<CreatorStats>, AppError> {
    let creator = params
        .creator_address()
        .ok_or_else(|| AppError::bad_request(anyhow::anyhow!("Creator address required")))?;

    let stats = StatsService::get_creator_stats(&state.db, creator).await?;

    Ok(Json(stats))
}
