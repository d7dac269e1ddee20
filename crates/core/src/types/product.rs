//! Catalog product documents.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::Document;

/// A product in the catalog.
///
/// Products are schemaless documents served back exactly as stored. The
/// accessors read the fields the query engine inspects leniently: a field
/// that is missing or has the wrong JSON type reads as `None`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Product(Document);

impl Product {
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        self.0.get("name").and_then(Value::as_str)
    }

    #[must_use]
    pub fn category(&self) -> Option<&str> {
        self.0.get("category").and_then(Value::as_str)
    }

    #[must_use]
    pub fn size(&self) -> Option<&str> {
        self.0.get("size").and_then(Value::as_str)
    }

    /// Numeric price. String prices are not coerced.
    #[must_use]
    pub fn price(&self) -> Option<f64> {
        self.0.get("price").and_then(Value::as_f64)
    }

    /// Whether `carate` is a JSON number equal to `carate`.
    ///
    /// `18` and `18.0` both match 18; `"18"` does not.
    #[must_use]
    #[allow(clippy::cast_precision_loss, clippy::float_cmp)]
    pub fn carate_is(&self, carate: i64) -> bool {
        match self.0.get("carate") {
            Some(Value::Number(n)) => {
                n.as_i64() == Some(carate) || n.as_f64() == Some(carate as f64)
            }
            _ => false,
        }
    }

    /// The stored document.
    #[must_use]
    pub const fn as_document(&self) -> &Document {
        &self.0
    }
}

impl From<Document> for Product {
    fn from(doc: Document) -> Self {
        Self(doc)
    }
}

impl From<Product> for Document {
    fn from(product: Product) -> Self {
        product.0
    }
}
