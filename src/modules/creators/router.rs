use axum::{Router, routing::get};

use crate::state::AppState;

use super::controller::{get_creators, get_taxonomy, update_taxonomy, upsert_creator};

pub fn init_creators_router() -> Router<AppState> {
    Router::new()
        .route("/", get(get_creators).post(upsert_creator))
        .route(
            "/{address}/taxonomy",
            get(get_taxonomy).patch(update_taxonomy),
        )
}
