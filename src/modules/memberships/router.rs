use axum::{Router, routing::get};

use crate::state::AppState;

use super::controller::{create_membership, get_audience, get_memberships};

pub fn init_memberships_router() -> Router<AppState> {
    Router::new().route("/", get(get_memberships).post(create_membership))
}

/// Mounted at /api/audience, outside the memberships prefix.
pub fn init_audience_router() -> Router<AppState> {
    Router::new().route("/", get(get_audience))
}
