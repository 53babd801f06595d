/**
 * Router Configuration
 *
 * This module provides the main router creation function that combines
 * all route configurations into a single Axum router.
 *
 * # Route Order
 *
 * 1. Public routes (health, register, login)
 * 2. Authenticated API routes
 * 3. Fallback handler (JSON 404)
 *
 * # Layers
 *
 * Outermost first: CORS, request tracing, panic guard. A panicking handler
 * becomes a 500 with a generic message instead of a dropped connection.
 */

use std::any::Any;

use axum::{
    http::{header, HeaderValue, Method, StatusCode},
    response::Response,
    Json, Router,
};
use tower_http::{catch_panic::CatchPanicLayer, cors::CorsLayer, trace::TraceLayer};

use crate::backend::error::conversion::internal_error_response;
use crate::backend::routes::api_routes::{configure_api_routes, configure_public_routes};
use crate::backend::server::state::AppState;
use crate::shared::writing::MessageResponse;

/// Create the Axum router with all routes configured
///
/// # Arguments
///
/// * `app_state` - Pool, token issuer and blob store
/// * `cors_origin` - The single browser origin allowed to call the API
pub fn create_router(app_state: AppState, cors_origin: &str) -> Router<()> {
    let router = configure_public_routes(Router::new());
    let router = configure_api_routes(router, &app_state);

    // Fallback handler for 404
    let router = router.fallback(|| async {
        (
            StatusCode::NOT_FOUND,
            Json(MessageResponse::new("Route not found")),
        )
    });

    router
        .layer(CatchPanicLayer::custom(handle_panic))
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer(cors_origin))
        .with_state(app_state)
}

fn handle_panic(_payload: Box<dyn Any + Send + 'static>) -> Response {
    tracing::error!("Handler panicked");
    internal_error_response()
}

/// CORS for the configured frontend origin
///
/// An origin that is not a valid header value is rejected by
/// `ServerConfig::validate`; if one slips through, no origin is allowed.
fn cors_layer(origin: &str) -> CorsLayer {
    let layer = CorsLayer::new()
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE]);

    match HeaderValue::from_str(origin) {
        Ok(origin) => layer.allow_origin(origin),
        Err(_) => {
            tracing::warn!("Ignoring invalid CORS origin: {}", origin);
            layer
        }
    }
}
