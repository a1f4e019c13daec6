use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use serde_json::json;
use tracing::instrument;
use validator::Validate;

use crate::middleware::auth::AuthUser;
use crate::modules::creators::model::{
    Creator, CreatorFilterParams, Taxonomy, UpsertCreatorDto, UsernameAvailability,
};
use crate::modules::creators::service::CreatorService;
use crate::state::AppState;
use crate::utils::access::check_authorization;
use crate::utils::errors::AppError;
use crate::validator::ValidatedJson;

/// One endpoint, three lookup shapes. `address` answers with the profile or
/// an empty object, `username` with an availability flag, `q` with a search
/// result list; no parameters lists every creator.
#[utoipa::path(
    get,
    path = "/api/creators",
    params(CreatorFilterParams),
    responses(
        (status = 200, description = "Profile, availability flag, or creator list")
    ),
    tag = "Creators"
)]
#[instrument(skip(state))]
pub async fn get_creators(
    State(state): State<AppState>,
    Query(filters): Query<CreatorFilterParams>,
) -> Result<Json<serde_json::Value>, AppError> {
    if let Some(address) = &filters.address {
        let creator = CreatorService::get_by_address(&state.db, address).await?;
        return Ok(Json(match creator {
            Some(c) => serde_json::to_value(c)?,
            None => json!({}),
        }));
    }

    if let Some(username) = &filters.username {
        let available = CreatorService::is_username_available(&state.db, username).await?;
        return Ok(Json(serde_json::to_value(UsernameAvailability {
            available,
        })?));
    }

    if let Some(q) = &filters.q {
        let creators = CreatorService::search(&state.db, q).await?;
        return Ok(Json(serde_json::to_value(creators)?));
    }

    let creators = CreatorService::get_all(&state.db).await?;
    Ok(Json(serde_json::to_value(creators)?))
}

#[utoipa::path(
    post,
    path = "/api/creators",
    request_body = UpsertCreatorDto,
    responses(
        (status = 200, description = "Profile created or updated", body = Creator),
        (status = 400, description = "Invalid input"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden"),
        (status = 409, description = "Email or username already taken")
    ),
    tag = "Creators",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, auth_user))]
pub async fn upsert_creator(
    State(state): State<AppState>,
    auth_user: AuthUser,
    ValidatedJson(dto): ValidatedJson<UpsertCreatorDto>,
) -> Result<Json<Creator>, AppError> {
    if !check_authorization(auth_user.address(), &dto.address) {
        return Err(AppError::forbidden(
            "Cannot modify another creator's profile".to_string(),
        ));
    }

    let creator = CreatorService::upsert_creator(&state.db, dto).await?;

    Ok(Json(creator))
}

#[utoipa::path(
    get,
    path = "/api/creators/{address}/taxonomy",
    params(("address" = String, Path, description = "Creator wallet address")),
    responses(
        (status = 200, description = "Category and hashtag selections", body = Taxonomy),
        (status = 404, description = "Creator not found")
    ),
    tag = "Creators"
)]
#[instrument(skip(state))]
pub async fn get_taxonomy(
    State(state): State<AppState>,
    Path(address): Path<String>,
) -> Result<Json<Taxonomy>, AppError> {
    let taxonomy = CreatorService::get_taxonomy(&state.db, &address).await?;

    Ok(Json(taxonomy))
}

#[utoipa::path(
    patch,
    path = "/api/creators/{address}/taxonomy",
    params(("address" = String, Path, description = "Creator wallet address")),
    request_body = Taxonomy,
    responses(
        (status = 200, description = "Taxonomy updated", body = Taxonomy),
        (status = 400, description = "Invalid input"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "Creator not found")
    ),
    tag = "Creators",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, auth_user))]
pub async fn update_taxonomy(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(address): Path<String>,
    Json(taxonomy): Json<Taxonomy>,
) -> Result<(StatusCode, Json<Taxonomy>), AppError> {
    taxonomy.validate().map_err(|e| AppError::validation(&e))?;

    if !check_authorization(auth_user.address(), &address) {
        return Err(AppError::forbidden(
            "Cannot modify another creator's taxonomy".to_string(),
        ));
    }

    let taxonomy = CreatorService::update_taxonomy(&state.db, &address, taxonomy).await?;

    Ok((StatusCode::OK, Json(taxonomy)))
}
