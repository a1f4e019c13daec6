use axum::{
    Json,
    extract::{Query, State},
    http::StatusCode,
};
use tracing::instrument;

use crate::middleware::auth::AuthUser;
use crate::modules::tips::model::{CreateTipDto, Tip, TipFilterParams};
use crate::modules::tips::service::TipService;
use crate::state::AppState;
use crate::utils::access::check_authorization;
use crate::utils::errors::AppError;
use crate::validator::ValidatedJson;

#[utoipa::path(
    get,
    path = "/api/tips",
    params(TipFilterParams),
    responses(
        (status = 200, description = "Tips, optionally filtered by sender or receiver", body = Vec<Tip>)
    ),
    tag = "Tips"
)]
#[instrument(skip(state))]
pub async fn get_tips(
    State(state): State<AppState>,
    Query(filters): Query<TipFilterParams>,
) -> Result<Json<Vec<Tip>>, AppError> {
    let tips = TipService::get_tips(&state.db, filters).await?;

    Ok(Json(tips))
}

#[utoipa::path(
    post,
    path = "/api/tips",
    request_body = CreateTipDto,
    responses(
        (status = 201, description = "Tip recorded", body = Tip),
        (status = 400, description = "Invalid input"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden")
    ),
    tag = "Tips",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, auth_user))]
pub async fn create_tip(
    State(state): State<AppState>,
    auth_user: AuthUser,
    ValidatedJson(dto): ValidatedJson<CreateTipDto>,
) -> Result<(StatusCode, Json<Tip>), AppError> {
    if !check_authorization(auth_user.address(), &dto.sender) {
        return Err(AppError::forbidden(
            "Cannot record a tip for another sender".to_string(),
        ));
    }

    let tip =
        TipService::create_tip(&state.db, dto, &state.chain_config.stablecoin_symbol).await?;

    Ok((StatusCode::CREATED, Json(tip)))
}
