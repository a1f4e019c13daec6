use crate::docs::ApiDoc;
use crate::logging::logging_middleware;
use crate::modules::creators::router::init_creators_router;
use crate::modules::memberships::router::{init_audience_router, init_memberships_router};
use crate::modules::posts::router::init_posts_router;
use crate::modules::stats::router::init_stats_router;
use crate::modules::tiers::router::init_tiers_router;
use crate::modules::tips::router::init_tips_router;
use crate::state::AppState;
use axum::http::{HeaderValue, Method};
use axum::{Router, middleware};
use tower_http::cors::CorsLayer;
use utoipa::OpenApi;
use utoipa_scalar::{Scalar, Servable as _};
use utoipa_swagger_ui::SwaggerUi;

pub fn init_router(state: AppState) -> Router {
    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .merge(Scalar::with_url("/scalar", ApiDoc::openapi()))
        .nest(
            "/api",
            Router::new()
                .nest("/creators", init_creators_router())
                .nest("/posts", init_posts_router())
                .nest("/tiers", init_tiers_router())
                .nest("/memberships", init_memberships_router())
                .nest("/audience", init_audience_router())
                .nest("/stats", init_stats_router())
                .nest("/tips", init_tips_router()),
        )
        .with_state(state.clone())
        .layer({
            let allowed_origins: Vec<HeaderValue> = state
                .cors_config
                .allowed_origins
                .iter()
                .filter_map(|origin| origin.parse().ok())
                .collect();

            CorsLayer::new()
                .allow_origin(allowed_origins)
                .allow_methods([
                    Method::GET,
                    Method::POST,
                    Method::PUT,
                    Method::PATCH,
                    Method::DELETE,
                    Method::OPTIONS,
                ])
                .allow_headers([
                    axum::http::header::AUTHORIZATION,
                    axum::http::header::CONTENT_TYPE,
                    axum::http::header::ACCEPT,
                ])
                .allow_credentials(true)
        })
        .layer(middleware::from_fn(logging_middleware))
}
