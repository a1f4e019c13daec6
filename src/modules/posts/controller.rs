use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use tracing::instrument;
use uuid::Uuid;

use crate::middleware::auth::{AuthUser, MaybeAuthUser};
use crate::modules::posts::model::{
    Comment, CreateCommentDto, CreatePostDto, LikeResponse, Post, PostFilterParams, UpdatePostDto,
};
use crate::modules::posts::service::PostService;
use crate::state::AppState;
use crate::utils::access::{check_authorization, has_active_access, resolve_viewer, sanitize_post};
use crate::utils::errors::AppError;
use crate::validator::ValidatedJson;

/// Every post leaving this module passes through the sanitizer. A creator
/// listing evaluates full membership access once for the resolved viewer;
/// the global feed gates on `is_public` alone.
#[utoipa::path(
    get,
    path = "/api/posts",
    params(PostFilterParams),
    responses(
        (status = 200, description = "Posts, gated fields stripped for unentitled viewers", body = Vec<Post>)
    ),
    tag = "Posts"
)]
#[instrument(skip(state, auth))]
pub async fn get_posts(
    State(state): State<AppState>,
    auth: MaybeAuthUser,
    Query(filters): Query<PostFilterParams>,
) -> Result<Json<Vec<Post>>, AppError> {
    let viewer = resolve_viewer(&auth, filters.viewer.as_deref());

    let posts = match &filters.address {
        Some(creator) => {
            let has_access = has_active_access(&state.db, viewer.as_deref(), creator).await;
            PostService::get_by_creator(&state.db, creator)
                .await?
                .into_iter()
                .map(|post| sanitize_post(post, has_access))
                .collect()
        }
        None => PostService::get_feed(&state.db)
            .await?
            .into_iter()
            .map(|post| sanitize_post(post, false))
            .collect(),
    };

    Ok(Json(posts))
}

#[utoipa::path(
    post,
    path = "/api/posts",
    request_body = CreatePostDto,
    responses(
        (status = 201, description = "Post created", body = Post),
        (status = 400, description = "Invalid input"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden")
    ),
    tag = "Posts",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, auth_user))]
pub async fn create_post(
    State(state): State<AppState>,
    auth_user: AuthUser,
    ValidatedJson(dto): ValidatedJson<CreatePostDto>,
) -> Result<(StatusCode, Json<Post>), AppError> {
    if !check_authorization(auth_user.address(), &dto.creator_address) {
        return Err(AppError::forbidden(
            "Cannot create posts for another creator".to_string(),
        ));
    }

    let post = PostService::create_post(&state.db, dto).await?;

    Ok((StatusCode::CREATED, Json(post)))
}

#[utoipa::path(
    put,
    path = "/api/posts/{id}",
    params(("id" = Uuid, Path, description = "Post ID")),
    request_body = UpdatePostDto,
    responses(
        (status = 200, description = "Post updated", body = Post),
        (status = 400, description = "Invalid input"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "Post not found")
    ),
    tag = "Posts",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, auth_user))]
pub async fn update_post(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<Uuid>,
    ValidatedJson(dto): ValidatedJson<UpdatePostDto>,
) -> Result<Json<Post>, AppError> {
    let existing = PostService::get_by_id(&state.db, id).await?;

    // Ownership is judged against the stored row, not the payload.
    if !check_authorization(auth_user.address(), &existing.creator_address)
        || !check_authorization(&dto.creator_address, &existing.creator_address)
    {
        return Err(AppError::forbidden(
            "Cannot modify another creator's post".to_string(),
        ));
    }

    let post = PostService::update_post(&state.db, id, dto).await?;

    Ok(Json(post))
}

#[utoipa::path(
    delete,
    path = "/api/posts/{id}",
    params(("id" = Uuid, Path, description = "Post ID")),
    responses(
        (status = 204, description = "Post deleted"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "Post not found")
    ),
    tag = "Posts",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, auth_user))]
pub async fn delete_post(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    let existing = PostService::get_by_id(&state.db, id).await?;

    if !check_authorization(auth_user.address(), &existing.creator_address) {
        return Err(AppError::forbidden(
            "Cannot delete another creator's post".to_string(),
        ));
    }

    PostService::delete_post(&state.db, id).await?;

    Ok(StatusCode::NO_CONTENT)
}

/// Liking only requires an authenticated principal; any supporter can like
/// any post.
#[utoipa::path(
    post,
    path = "/api/posts/{id}/like",
    params(("id" = Uuid, Path, description = "Post ID")),
    responses(
        (status = 200, description = "Updated like count", body = LikeResponse),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Post not found")
    ),
    tag = "Posts",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, _auth_user))]
pub async fn like_post(
    State(state): State<AppState>,
    _auth_user: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<LikeResponse>, AppError> {
    let likes = PostService::like_post(&state.db, id).await?;

    Ok(Json(LikeResponse { likes }))
}

#[utoipa::path(
    get,
    path = "/api/posts/{id}/comments",
    params(("id" = Uuid, Path, description = "Post ID")),
    responses(
        (status = 200, description = "Comments on the post", body = Vec<Comment>)
    ),
    tag = "Posts"
)]
#[instrument(skip(state))]
pub async fn get_comments(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Vec<Comment>>, AppError> {
    let comments = PostService::get_comments(&state.db, id).await?;

    Ok(Json(comments))
}

#[utoipa::path(
    post,
    path = "/api/posts/{id}/comments",
    params(("id" = Uuid, Path, description = "Post ID")),
    request_body = CreateCommentDto,
    responses(
        (status = 201, description = "Comment created", body = Comment),
        (status = 400, description = "Invalid input"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "Post not found")
    ),
    tag = "Posts",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, auth_user))]
pub async fn create_comment(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<Uuid>,
    ValidatedJson(dto): ValidatedJson<CreateCommentDto>,
) -> Result<(StatusCode, Json<Comment>), AppError> {
    if !check_authorization(auth_user.address(), &dto.user_address) {
        return Err(AppError::forbidden(
            "Cannot comment as another user".to_string(),
        ));
    }

    let comment = PostService::create_comment(&state.db, id, dto).await?;

    Ok((StatusCode::CREATED, Json(comment)))
}
