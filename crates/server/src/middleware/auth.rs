//! Access guard for protected routes.
//!
//! The guard is a capability composed explicitly onto the routes that need it
//! with `route_layer`:
//!
//! ```rust,ignore
//! Router::new()
//!     .route("/cart", get(cart::list))
//!     .route_layer(axum::middleware::from_fn_with_state(state, require_claims))
//! ```
//!
//! On success the decoded [`Claims`] are inserted into the request extensions,
//! where handlers can read them with `Option<Extension<Claims>>`.

use axum::{
    Json,
    extract::{Request, State},
    http::{HeaderMap, StatusCode, header::AUTHORIZATION},
    middleware::Next,
    response::{IntoResponse, Response},
};

use crate::error::{ErrorBody, UNAUTHORIZED_MESSAGE};
use crate::services::auth::Claims;
use crate::state::AppState;

/// Error returned when a protected route is called without a valid token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthRejection {
    /// No `Authorization` header, or no token after the scheme.
    MissingToken,
    /// Token failed signature or expiry checks.
    InvalidToken,
}

impl IntoResponse for AuthRejection {
    fn into_response(self) -> Response {
        (
            StatusCode::UNAUTHORIZED,
            Json(ErrorBody::new(UNAUTHORIZED_MESSAGE)),
        )
            .into_response()
    }
}

/// Extract the token from an `Authorization: <scheme> <token>` header.
fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    let value = headers.get(AUTHORIZATION)?.to_str().ok()?;
    let (_scheme, token) = value.trim().split_once(' ')?;
    let token = token.trim();
    (!token.is_empty()).then_some(token)
}

/// Route layer that rejects requests without a valid bearer token.
///
/// # Errors
///
/// Returns `AuthRejection` (401) when the token is missing or invalid.
pub async fn require_claims(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, AuthRejection> {
    let token = bearer_token(request.headers()).ok_or(AuthRejection::MissingToken)?;

    let claims = state.tokens().verify(token).map_err(|e| {
        tracing::debug!(error = %e, "Rejected bearer token");
        AuthRejection::InvalidToken
    })?;

    if let Some(email) = claims.email() {
        tracing::Span::current().record("user", email);
    }

    request.extensions_mut().insert::<Claims>(claims);
    Ok(next.run(request).await)
}
