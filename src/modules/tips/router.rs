use axum::{Router, routing::get};

use crate::state::AppState;

use super::controller::{create_tip, get_tips};

pub fn init_tips_router() -> Router<AppState> {
    Router::new().route("/", get(get_tips).post(create_tip))
}
