//! HTTP route handlers.
//!
//! # Route Structure
//!
//! ```text
//! GET  /                       - Liveness banner
//! GET  /health                 - Liveness check
//! GET  /health/ready           - Store connectivity check
//!
//! # Auth
//! POST /jwt                    - Issue a session token for an identity object
//!
//! # Catalog
//! GET  /products               - Product listing (?searchText)
//! GET  /products/filter        - Filtered, sorted product listing
//! GET  /nav-notifications      - Navigation notifications
//! GET  /categories             - Categories
//! GET  /reviews                - Reviews
//!
//! # Cart (guarded when CART_REQUIRES_AUTH is set)
//! GET  /cart                   - List cart items
//! POST /cart                   - Add a cart item
//! ```

pub mod auth;
pub mod cart;
pub mod home;
pub mod products;
pub mod resources;

use axum::{
    Router,
    middleware::{from_fn, from_fn_with_state},
    routing::{get, post},
};
use tower_http::cors::CorsLayer;
use tower_http::trace::{DefaultOnResponse, OnResponse, TraceLayer};
use tracing::Span;

use crate::middleware::{request_id_middleware, require_claims};
use crate::state::AppState;

/// Create the catalog routes router.
pub fn catalog_routes() -> Router<AppState> {
    Router::new()
        .route("/products", get(products::index))
        .route("/products/filter", get(products::filter))
        .route("/nav-notifications", get(resources::nav_notifications))
        .route("/categories", get(resources::categories))
        .route("/reviews", get(resources::reviews))
}

/// Create the cart routes router.
///
/// The access guard is only composed when `cart_requires_auth` is set.
pub fn cart_routes(state: &AppState) -> Router<AppState> {
    let router = Router::new().route("/cart", get(cart::list).post(cart::add));

    if state.config().cart_requires_auth {
        router.route_layer(from_fn_with_state(state.clone(), require_claims))
    } else {
        router
    }
}

/// Build the full application router with tracing, request IDs and CORS.
///
/// Sentry layers are added by the binary so tests can run without a client.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(home::index))
        .route("/health", get(home::health))
        .route("/health/ready", get(home::readiness))
        .route("/jwt", post(auth::issue_token))
        .merge(catalog_routes())
        .merge(cart_routes(&state))
        .layer(from_fn(request_id_middleware))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(|request: &axum::http::Request<_>| {
                    tracing::info_span!(
                        "http_request",
                        method = %request.method(),
                        uri = %request.uri(),
                        status = tracing::field::Empty,
                        latency_ms = tracing::field::Empty,
                        request_id = tracing::field::Empty,
                        user = tracing::field::Empty,
                    )
                })
                .on_response(
                    |response: &axum::http::Response<_>,
                     latency: std::time::Duration,
                     span: &Span| {
                        span.record("status", response.status().as_u16());
                        span.record(
                            "latency_ms",
                            u64::try_from(latency.as_millis()).unwrap_or(u64::MAX),
                        );
                        DefaultOnResponse::default().on_response(response, latency, span);
                    },
                ),
        )
        .layer(CorsLayer::permissive())
        .with_state(state)
}
