//! Product text search over name and category.

use super::contains_ignore_case;
use crate::types::Product;

/// Product fields the text search looks at.
pub const SEARCH_FIELDS: [&str; 2] = ["name", "category"];

/// A product search request.
///
/// An absent search parameter and an empty one mean different things: the
/// former lists the whole catalog, the latter matches nothing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchQuery {
    /// No search text supplied; every product matches.
    All,
    /// Search text supplied but empty; nothing matches.
    Nothing,
    /// Case-insensitive substring over name or category.
    Text(String),
}

impl SearchQuery {
    #[must_use]
    pub fn from_param(param: Option<&str>) -> Self {
        match param {
            None => Self::All,
            Some("") => Self::Nothing,
            Some(text) => Self::Text(text.to_owned()),
        }
    }
}

/// Whether `text` occurs in the product's name or category, ignoring case.
///
/// Non-string fields never match.
#[must_use]
pub fn matches_text(product: &Product, text: &str) -> bool {
    [product.name(), product.category()]
        .into_iter()
        .flatten()
        .any(|field| contains_ignore_case(field, text))
}
