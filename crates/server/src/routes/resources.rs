//! Read-only collections served verbatim.

use axum::{Json, extract::State};
use tracing::instrument;

use ub_jewellers_core::{CollectionName, Document};

use crate::error::Result;
use crate::state::AppState;

async fn list(state: &AppState, collection: CollectionName) -> Result<Json<Vec<Document>>> {
    let docs = state.collection(collection).list().await?;
    Ok(Json(docs))
}

/// Navigation bar notifications.
#[instrument(skip(state))]
pub async fn nav_notifications(State(state): State<AppState>) -> Result<Json<Vec<Document>>> {
    list(&state, CollectionName::NavNotifications).await
}

/// Product categories.
#[instrument(skip(state))]
pub async fn categories(State(state): State<AppState>) -> Result<Json<Vec<Document>>> {
    list(&state, CollectionName::Categories).await
}

/// Customer reviews.
#[instrument(skip(state))]
pub async fn reviews(State(state): State<AppState>) -> Result<Json<Vec<Document>>> {
    list(&state, CollectionName::Reviews).await
}
