//! HTTP adapters - HTML demo and REST API.
//!
//! `build_router` wires the disagreement routes together with the shared
//! tower-http middleware stack.

pub mod disagreement;

pub use disagreement::{disagreement_router, DisagreementAppState};

use axum::http::{HeaderValue, Method};
use axum::Router;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use crate::config::ServerConfig;

/// Builds the application router with tracing, timeout and CORS layers.
pub fn build_router(state: DisagreementAppState, server: &ServerConfig) -> Router {
    disagreement_router()
        .with_state(state)
        .layer(cors_layer(server))
        .layer(TimeoutLayer::new(server.request_timeout()))
        .layer(TraceLayer::new_for_http())
}

/// Configured origins when present. Without any, development is permissive
/// and other environments allow same-origin only.
fn cors_layer(server: &ServerConfig) -> CorsLayer {
    let origins: Vec<HeaderValue> = server
        .cors_origins_list()
        .into_iter()
        .filter_map(|origin| match HeaderValue::from_str(&origin) {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(origin = %origin, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    if origins.is_empty() {
        return if server.is_development() {
            CorsLayer::permissive()
        } else {
            CorsLayer::new()
        };
    }

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers(Any)
}
