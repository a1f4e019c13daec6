use axum::{
    Router,
    routing::{get, put},
};

use crate::state::AppState;

use super::controller::{create_tier, delete_tier, get_tiers, update_tier};

pub fn init_tiers_router() -> Router<AppState> {
    Router::new()
        .route("/", get(get_tiers).post(create_tier))
        .route("/{id}", put(update_tier).delete(delete_tier))
}
