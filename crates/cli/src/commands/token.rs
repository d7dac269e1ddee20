//! Issue a session token from the command line.

use serde_json::Value;
use thiserror::Error;

use ub_jewellers_core::Document;
use ub_jewellers_server::config::{ConfigError, ServerConfig};
use ub_jewellers_server::services::auth::{AuthError, TokenService};

/// Errors from issuing a token.
#[derive(Debug, Error)]
pub enum TokenError {
    #[error("Invalid identity JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Identity must be a JSON object")]
    NotAnObject,

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Signing error: {0}")]
    Auth(#[from] AuthError),
}

/// Parse an identity object from its JSON text.
///
/// # Errors
///
/// Returns `TokenError` unless the text is a JSON object.
pub fn parse_identity(raw: &str) -> Result<Document, TokenError> {
    match serde_json::from_str::<Value>(raw)? {
        Value::Object(identity) => Ok(identity),
        _ => Err(TokenError::NotAnObject),
    }
}

/// Print a signed token for `identity` to stdout.
///
/// # Errors
///
/// Returns `TokenError` if the identity is invalid, configuration is missing,
/// or signing fails.
pub fn run(identity: &str) -> Result<(), TokenError> {
    let identity = parse_identity(identity)?;
    let config = ServerConfig::from_env()?;

    let token = TokenService::new(&config.jwt_secret).issue(identity)?;

    #[allow(clippy::print_stdout)]
    {
        println!("{token}");
    }
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_identity_accepts_objects() {
        let identity = parse_identity(r#"{"email":"dev@example.com"}"#).unwrap();
        assert_eq!(identity["email"], "dev@example.com");
    }

    #[test]
    fn test_parse_identity_rejects_other_json() {
        assert!(matches!(
            parse_identity(r#""dev@example.com""#),
            Err(TokenError::NotAnObject)
        ));
        assert!(matches!(parse_identity("{"), Err(TokenError::Json(_))));
    }
}
