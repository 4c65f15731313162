pub mod health;
pub mod profile;
pub mod projects;
pub mod search;
pub mod skills;

use axum::{
    http::{header::CONTENT_TYPE, HeaderValue, Method, Request},
    routing::{get, put},
    Router,
};
use tower::ServiceBuilder;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::{DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::Level;
use uuid::Uuid;

use crate::config::Config;
use crate::errors::AppError;
use crate::state::AppState;

async fn route_not_found() -> AppError {
    AppError::NotFound("Route not found".to_string())
}

async fn method_not_allowed() -> AppError {
    AppError::MethodNotAllowed
}

pub fn build_router(state: AppState) -> Router {
    // Per-route fallbacks keep 405s on the JSON error contract too.
    Router::new()
        .route(
            "/health",
            get(health::health_handler).fallback(method_not_allowed),
        )
        .route(
            "/profile",
            get(profile::handle_get_profile).fallback(method_not_allowed),
        )
        .route(
            "/profile/:id",
            put(profile::handle_update_profile).fallback(method_not_allowed),
        )
        .route(
            "/projects",
            get(projects::handle_list_projects).fallback(method_not_allowed),
        )
        .route(
            "/skills/top",
            get(skills::handle_top_skills).fallback(method_not_allowed),
        )
        .route(
            "/search",
            get(search::handle_search).fallback(method_not_allowed),
        )
        .fallback(route_not_found)
        .with_state(state)
}

fn build_cors(config: &Config) -> CorsLayer {
    let methods = [Method::GET, Method::PUT, Method::OPTIONS];

    if config.cors_allow_origins.iter().any(|o| o == "*") {
        return CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(methods)
            .allow_headers([CONTENT_TYPE]);
    }

    let origins: Vec<HeaderValue> = config
        .cors_allow_origins
        .iter()
        .filter_map(|o| {
            o.parse::<HeaderValue>()
                .map_err(|e| tracing::warn!("Ignoring invalid CORS origin '{o}': {e}"))
                .ok()
        })
        .collect();

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods(methods)
        .allow_headers([CONTENT_TYPE])
}

/// The router with request tracing and CORS applied. This is what `main` serves.
pub fn build_app(state: AppState) -> Router {
    let cors = build_cors(&state.config);
    build_router(state).layer(
        ServiceBuilder::new()
            .layer(
                TraceLayer::new_for_http()
                    .make_span_with(|request: &Request<_>| {
                        tracing::info_span!(
                            "http-request",
                            method = %request.method(),
                            uri = %request.uri(),
                            request_id = %Uuid::new_v4()
                        )
                    })
                    .on_request(DefaultOnRequest::new().level(Level::DEBUG))
                    .on_response(DefaultOnResponse::new().level(Level::INFO)),
            )
            .layer(cors),
    )
}
