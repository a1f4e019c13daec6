use axum::{
    Json,
    extract::{Query, State},
    http::StatusCode,
};
use tracing::instrument;

use crate::middleware::auth::AuthUser;
use crate::modules::memberships::model::{
    AudienceMember, AudienceParams, CreateMembershipDto, Membership, MembershipFilterParams,
};
use crate::modules::memberships::service::MembershipService;
use crate::state::AppState;
use crate::utils::access::check_authorization;
use crate::utils::errors::AppError;
use crate::validator::ValidatedJson;

#[utoipa::path(
    get,
    path = "/api/memberships",
    params(MembershipFilterParams),
    responses(
        (status = 200, description = "List of memberships", body = Vec<Membership>)
    ),
    tag = "Memberships"
)]
#[instrument(skip(state))]
pub async fn get_memberships(
    State(state): State<AppState>,
    Query(filters): Query<MembershipFilterParams>,
) -> Result<Json<Vec<Membership>>, AppError> {
    let memberships = MembershipService::get_memberships(&state.db, filters).await?;

    Ok(Json(memberships))
}

#[utoipa::path(
    post,
    path = "/api/memberships",
    request_body = CreateMembershipDto,
    responses(
        (status = 201, description = "Membership created or renewed", body = Membership),
        (status = 400, description = "Invalid input"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden")
    ),
    tag = "Memberships",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, auth_user))]
pub async fn create_membership(
    State(state): State<AppState>,
    auth_user: AuthUser,
    ValidatedJson(dto): ValidatedJson<CreateMembershipDto>,
) -> Result<(StatusCode, Json<Membership>), AppError> {
    if !check_authorization(auth_user.address(), &dto.subscriber_address) {
        return Err(AppError::forbidden(
            "Cannot create a membership for another subscriber".to_string(),
        ));
    }

    let membership = MembershipService::upsert_membership(&state.db, dto).await?;

    Ok((StatusCode::CREATED, Json(membership)))
}

#[utoipa::path(
    get,
    path = "/api/audience",
    params(AudienceParams),
    responses(
        (status = 200, description = "Subscribers with profiles and tier names", body = Vec<AudienceMember>),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden")
    ),
    tag = "Memberships",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, auth_user))]
pub async fn get_audience(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Query(params): Query<AudienceParams>,
) -> Result<Json<Vec<AudienceMember>>, AppError> {
    if !check_authorization(auth_user.address(), &params.creator) {
        return Err(AppError::forbidden(
            "Only the creator can view their audience".to_string(),
        ));
    }

    let audience = MembershipService::get_audience(&state.db, &params.creator).await?;

    Ok(Json(audience))
}
