use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use tracing::instrument;
use uuid::Uuid;

use crate::middleware::auth::AuthUser;
use crate::modules::tiers::model::{
    CreateTierDto, DeleteTierParams, Tier, TierFilterParams, UpdateTierDto,
};
use crate::modules::tiers::service::TierService;
use crate::state::AppState;
use crate::utils::access::check_authorization;
use crate::utils::errors::AppError;
use crate::validator::ValidatedJson;

#[utoipa::path(
    get,
    path = "/api/tiers",
    params(TierFilterParams),
    responses(
        (status = 200, description = "Tiers for the creator, cheapest first", body = Vec<Tier>)
    ),
    tag = "Tiers"
)]
#[instrument(skip(state))]
pub async fn get_tiers(
    State(state): State<AppState>,
    Query(filters): Query<TierFilterParams>,
) -> Result<Json<Vec<Tier>>, AppError> {
    let tiers = match &filters.creator {
        Some(creator) => TierService::get_by_creator(&state.db, creator).await?,
        None => Vec::new(),
    };

    Ok(Json(tiers))
}

#[utoipa::path(
    post,
    path = "/api/tiers",
    request_body = CreateTierDto,
    responses(
        (status = 201, description = "Tier created", body = Tier),
        (status = 400, description = "Invalid input"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden")
    ),
    tag = "Tiers",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, auth_user))]
pub async fn create_tier(
    State(state): State<AppState>,
    auth_user: AuthUser,
    ValidatedJson(dto): ValidatedJson<CreateTierDto>,
) -> Result<(StatusCode, Json<Tier>), AppError> {
    if !check_authorization(auth_user.address(), &dto.creator) {
        return Err(AppError::forbidden(
            "Cannot create tiers for another creator".to_string(),
        ));
    }

    let tier = TierService::create_tier(&state.db, dto).await?;

    Ok((StatusCode::CREATED, Json(tier)))
}

#[utoipa::path(
    put,
    path = "/api/tiers/{id}",
    params(("id" = Uuid, Path, description = "Tier ID")),
    request_body = UpdateTierDto,
    responses(
        (status = 200, description = "Tier updated", body = Tier),
        (status = 400, description = "Invalid input"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "Tier not found")
    ),
    tag = "Tiers",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, auth_user))]
pub async fn update_tier(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<Uuid>,
    ValidatedJson(dto): ValidatedJson<UpdateTierDto>,
) -> Result<Json<Tier>, AppError> {
    let existing = TierService::get_by_id(&state.db, id).await?;

    if !check_authorization(auth_user.address(), &existing.creator_address)
        || !check_authorization(&dto.creator, &existing.creator_address)
    {
        return Err(AppError::forbidden(
            "Cannot modify another creator's tier".to_string(),
        ));
    }

    let tier = TierService::update_tier(&state.db, id, dto).await?;

    Ok(Json(tier))
}

#[utoipa::path(
    delete,
    path = "/api/tiers/{id}",
    params(
        ("id" = Uuid, Path, description = "Tier ID"),
        DeleteTierParams
    ),
    responses(
        (status = 204, description = "Tier deleted"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "Tier not found")
    ),
    tag = "Tiers",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, auth_user))]
pub async fn delete_tier(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<Uuid>,
    Query(params): Query<DeleteTierParams>,
) -> Result<StatusCode, AppError> {
    if !check_authorization(auth_user.address(), &params.creator) {
        return Err(AppError::forbidden(
            "Cannot delete another creator's tier".to_string(),
        ));
    }

    TierService::delete_tier(&state.db, id, &params.creator).await?;

    Ok(StatusCode::NO_CONTENT)
}
