//! Token issuance route.

use axum::{Json, extract::State};
use serde::{Deserialize, Serialize};
use tracing::instrument;

use ub_jewellers_core::Document;

use crate::error::Result;
use crate::extract::ApiJson;
use crate::state::AppState;

/// Response body for `POST /jwt`.
#[derive(Debug, Serialize, Deserialize)]
pub struct TokenResponse {
    pub token: String,
}

/// Issue a session token for the posted identity object.
///
/// The identity is trusted as-is; see [`crate::services::auth`].
#[instrument(skip(state, identity))]
pub async fn issue_token(
    State(state): State<AppState>,
    ApiJson(identity): ApiJson<Document>,
) -> Result<Json<TokenResponse>> {
    let token = state.tokens().issue(identity)?;

    tracing::debug!("Issued session token");
    Ok(Json(TokenResponse { token }))
}
