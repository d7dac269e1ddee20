//! Cart route handlers.
//!
//! Cart items are arbitrary client objects stored verbatim: no dedup, no
//! quantity merging, no ownership check. When the access guard is enabled the
//! caller's claims are available but not used to scope the cart.

use axum::{Extension, Json, extract::State};
use tracing::instrument;

use ub_jewellers_core::{CollectionName, Document, InsertOneResult};

use crate::error::Result;
use crate::extract::ApiJson;
use crate::services::auth::Claims;
use crate::state::AppState;

/// List every cart item.
#[instrument(skip(state))]
pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<Document>>> {
    let items = state.collection(CollectionName::Cart).list().await?;
    Ok(Json(items))
}

/// Append an item to the cart.
#[instrument(skip(state, claims, item))]
pub async fn add(
    State(state): State<AppState>,
    claims: Option<Extension<Claims>>,
    ApiJson(item): ApiJson<Document>,
) -> Result<Json<InsertOneResult>> {
    let result = state.collection(CollectionName::Cart).insert(item).await?;

    tracing::info!(
        inserted_id = %result.inserted_id,
        authenticated = claims.is_some(),
        "Cart item added"
    );
    Ok(Json(result))
}
