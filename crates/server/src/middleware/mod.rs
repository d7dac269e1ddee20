//! HTTP middleware stack for the catalog server.
//!
//! # Middleware Order (outermost first)
//!
//! 1. Sentry layers (capture errors, added in `main`)
//! 2. CORS (any origin)
//! 3. `TraceLayer` (request tracing)
//! 4. Request ID (add unique ID to each request)
//! 5. Access guard (per route, see [`auth`])

pub mod auth;
pub mod request_id;

pub use auth::{AuthRejection, require_claims};
pub use request_id::request_id_middleware;
