//! Product route handlers.

use axum::{Json, extract::State};
use serde::Deserialize;
use tracing::instrument;

use ub_jewellers_core::Product;
use ub_jewellers_core::catalog::{FilterParams, ProductFilter, SearchQuery};

use crate::error::Result;
use crate::extract::ApiQuery;
use crate::state::AppState;

/// Product listing query parameters.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchParams {
    pub search_text: Option<String>,
}

/// List products, optionally narrowed by a name/category search.
///
/// `?searchText=` (present but empty) returns an empty list; omitting the
/// parameter returns the whole catalog. Products are returned as stored.
#[instrument(skip(state))]
pub async fn index(
    State(state): State<AppState>,
    ApiQuery(params): ApiQuery<SearchParams>,
) -> Result<Json<Vec<Product>>> {
    let query = SearchQuery::from_param(params.search_text.as_deref());
    let products = state.products().search(&query).await?;

    Ok(Json(products))
}

/// Filter, sort and search products.
///
/// The category stage is pushed down to the store; the remaining stages run
/// in memory. Products without a numeric price are dropped, never rejected.
#[instrument(skip(state))]
pub async fn filter(
    State(state): State<AppState>,
    ApiQuery(params): ApiQuery<FilterParams>,
) -> Result<Json<Vec<Product>>> {
    let filter = ProductFilter::parse(&params, state.config().query_parsing)?;

    let candidates = state
        .products()
        .find_by_category(filter.category_needle())
        .await?;
    let products = filter.refine(candidates);

    tracing::debug!(count = products.len(), "Filtered products");
    Ok(Json(products))
}
