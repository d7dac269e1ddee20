//! Catalog query engine.
//!
//! Pure filtering, searching and sorting over [`Product`] lists. The server
//! fetches products from the store and hands them to this module; nothing
//! here performs I/O.
//!
//! - [`ProductFilter`] - the staged filter behind `GET /products/filter`
//! - [`SearchQuery`] - the name/category search behind `GET /products`
//!
//! [`Product`]: crate::types::Product

pub mod filter;
pub mod search;

pub use filter::{FilterError, FilterParams, ParseMode, PriceOrder, ProductFilter};
pub use search::{SEARCH_FIELDS, SearchQuery};

/// Sentinel filter value meaning "do not filter on this dimension".
pub const ALL_SENTINEL: &str = "all";

/// Case-insensitive substring test.
#[must_use]
pub fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}
