//! Token error types.

use thiserror::Error;

/// Errors that can occur while issuing or verifying tokens.
#[derive(Debug, Error)]
pub enum AuthError {
    /// Token is malformed, has a bad signature, or has expired.
    #[error("invalid token: {0}")]
    InvalidToken(#[source] jsonwebtoken::errors::Error),

    /// Signing a new token failed.
    #[error("token signing failed: {0}")]
    Signing(#[source] jsonwebtoken::errors::Error),
}
