pub mod api;
pub mod auth;
pub mod cli;
pub mod config;
pub mod database;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod validation;

use std::sync::Arc;

use axum::{
    extract::DefaultBodyLimit,
    http::HeaderValue,
    routing::get,
    Router,
};
use tower::ServiceBuilder;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::auth::JwtKeys;
use crate::config::AppConfig;
use crate::database::PostRepository;

/// Shared handler state: the post store and the token verifier
#[derive(Clone)]
pub struct AppState {
    pub posts: Arc<dyn PostRepository>,
    pub jwt: JwtKeys,
}

impl AppState {
    pub fn new(posts: Arc<dyn PostRepository>, jwt: JwtKeys) -> Self {
        Self { posts, jwt }
    }
}

/// Build the full router: public routes, the authenticated posts resource,
/// and the global layers configured in `config`.
pub fn app(state: AppState, config: &AppConfig) -> Router {
    let mut router = Router::new()
        // Public
        .route("/", get(handlers::public::root))
        .route("/health", get(handlers::public::health))
        // Protected
        .merge(post_routes(state.clone()))
        .layer(DefaultBodyLimit::max(config.api.max_request_size_bytes))
        .with_state(state);

    if config.security.enable_cors {
        router = router.layer(cors_layer(&config.security.cors_origins));
    }

    if config.api.enable_request_logging {
        router = router.layer(ServiceBuilder::new().layer(TraceLayer::new_for_http()));
    }

    router
}

fn post_routes(state: AppState) -> Router<AppState> {
    use handlers::protected::posts;

    Router::new()
        .route("/api/posts", get(posts::post_list).post(posts::post_create))
        .route(
            "/api/posts/:id",
            get(posts::post_show)
                .put(posts::post_update)
                .delete(posts::post_delete),
        )
        // route_layer: auth only wraps matched routes, unknown paths still 404
        .route_layer(axum::middleware::from_fn_with_state(
            state,
            middleware::jwt_auth_middleware,
        ))
}

fn cors_layer(origins: &[String]) -> CorsLayer {
    if origins.iter().any(|o| o == "*") {
        return CorsLayer::permissive();
    }

    let origins: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|o| HeaderValue::from_str(o).ok())
        .collect();

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods(Any)
        .allow_headers(Any)
}
