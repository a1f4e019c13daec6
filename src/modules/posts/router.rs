use axum::{
    Router,
    routing::{get, post, put},
};

use crate::state::AppState;

use super::controller::{
    create_comment, create_post, delete_post, get_comments, get_posts, like_post, update_post,
};

pub fn init_posts_router() -> Router<AppState> {
    Router::new()
        .route("/", get(get_posts).post(create_post))
        .route("/{id}", put(update_post).delete(delete_post))
        .route("/{id}/like", post(like_post))
        .route("/{id}/comments", get(get_comments).post(create_comment))
}
