//! Schemaless documents and the named collections that hold them.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::DocumentId;

/// A schemaless JSON object as stored in a collection.
pub type Document = Map<String, Value>;

/// Field under which a document's identifier is exposed to clients.
pub const ID_FIELD: &str = "_id";

/// The collections the catalog service reads from and writes to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum CollectionName {
    Products,
    Reviews,
    NavNotifications,
    Categories,
    Cart,
}

impl CollectionName {
    /// Every collection, in declaration order.
    pub const ALL: [Self; 5] = [
        Self::Products,
        Self::Reviews,
        Self::NavNotifications,
        Self::Categories,
        Self::Cart,
    ];

    /// Public collection name, as used by clients and the CLI.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Products => "products",
            Self::Reviews => "reviews",
            Self::NavNotifications => "navNotifications",
            Self::Categories => "categories",
            Self::Cart => "cart",
        }
    }

    /// Backing table name (snake case, without schema).
    #[must_use]
    pub const fn table(self) -> &'static str {
        match self {
            Self::Products => "products",
            Self::Reviews => "reviews",
            Self::NavNotifications => "nav_notifications",
            Self::Categories => "categories",
            Self::Cart => "cart",
        }
    }

    /// Parse a collection from its public or table name.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|c| c.as_str() == s || c.table() == s)
    }
}

impl std::fmt::Display for CollectionName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Acknowledgement returned after inserting a single document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InsertOneResult {
    pub acknowledged: bool,
    pub inserted_id: DocumentId,
}

impl InsertOneResult {
    #[must_use]
    pub const fn acknowledged(inserted_id: DocumentId) -> Self {
        Self {
            acknowledged: true,
            inserted_id,
        }
    }
}

/// Merge a store-assigned identifier into a document body.
#[must_use]
pub fn with_id(mut doc: Document, id: DocumentId) -> Document {
    doc.insert(ID_FIELD.to_owned(), Value::String(id.to_string()));
    doc
}
