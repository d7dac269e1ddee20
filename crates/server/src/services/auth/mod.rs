//! Session token service.
//!
//! Issues HS256 JWTs that embed whatever identity object the caller supplies,
//! plus `iat`/`exp` claims. No identity verification happens here: the token
//! only proves that this server issued it for that payload.

mod error;

pub use error::AuthError;

use chrono::{DateTime, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};

use ub_jewellers_core::Document;

/// Token lifetime in seconds (2 hours).
pub const TOKEN_LIFETIME_SECONDS: i64 = 2 * 60 * 60;

/// Decoded token payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Claims {
    /// The caller-supplied identity fields (e.g. `email`).
    #[serde(flatten)]
    pub identity: Document,
    /// Issued-at, seconds since the epoch.
    pub iat: i64,
    /// Expiry, seconds since the epoch.
    pub exp: i64,
}

impl Claims {
    /// The identity's `email` field, if it is a string.
    #[must_use]
    pub fn email(&self) -> Option<&str> {
        self.identity.get("email").and_then(serde_json::Value::as_str)
    }
}

/// Issues and verifies session tokens.
///
/// Implements `Debug` manually to keep key material out of logs.
#[derive(Clone)]
pub struct TokenService {
    encoding: EncodingKey,
    decoding: DecodingKey,
    validation: Validation,
}

impl std::fmt::Debug for TokenService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenService")
            .field("algorithm", &Algorithm::HS256)
            .field("keys", &"[REDACTED]")
            .finish()
    }
}

impl TokenService {
    /// Create a token service from the signing secret.
    #[must_use]
    pub fn new(secret: &SecretString) -> Self {
        let secret = secret.expose_secret().as_bytes();

        Self {
            encoding: EncodingKey::from_secret(secret),
            decoding: DecodingKey::from_secret(secret),
            validation: Validation::new(Algorithm::HS256),
        }
    }

    /// Issue a token for `identity`, valid for two hours from now.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::Signing` if encoding fails.
    pub fn issue(&self, identity: Document) -> Result<String, AuthError> {
        self.issue_at(identity, Utc::now())
    }

    /// Issue a token as if at `issued_at`.
    ///
    /// Reserved `iat`/`exp` keys in the identity are replaced.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::Signing` if encoding fails.
    pub fn issue_at(
        &self,
        mut identity: Document,
        issued_at: DateTime<Utc>,
    ) -> Result<String, AuthError> {
        identity.remove("iat");
        identity.remove("exp");

        let iat = issued_at.timestamp();
        let claims = Claims {
            identity,
            iat,
            exp: iat + TOKEN_LIFETIME_SECONDS,
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding).map_err(AuthError::Signing)
    }

    /// Verify a token's signature and expiry and return its claims.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::InvalidToken` for malformed, forged, or expired tokens.
    pub fn verify(&self, token: &str) -> Result<Claims, AuthError> {
        decode::<Claims>(token, &self.decoding, &self.validation)
            .map(|data| data.claims)
            .map_err(AuthError::InvalidToken)
    }
}
