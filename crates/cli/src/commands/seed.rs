//! Seed a collection from a JSON file.
//!
//! The file must hold a JSON array of objects. Every entry is validated before
//! the database is touched, so a bad file never leaves a half-seeded
//! collection behind.

use std::path::Path;
use std::sync::Arc;

use serde_json::Value;
use thiserror::Error;
use tracing::info;

use ub_jewellers_core::{CollectionName, Document};
use ub_jewellers_server::config::{ConfigError, ServerConfig};
use ub_jewellers_server::db::{self, DocumentStore, PgDocumentStore, RepositoryError};

/// Errors from seeding a collection.
#[derive(Debug, Error)]
pub enum SeedError {
    #[error("Unknown collection: {0}")]
    UnknownCollection(String),

    #[error("Failed to read {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Expected a JSON array of objects")]
    NotAnArray,

    #[error("Entry {0} is not a JSON object")]
    NotAnObject(usize),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Store error: {0}")]
    Store(#[from] RepositoryError),
}

/// Parse seed file contents into documents.
///
/// # Errors
///
/// Returns `SeedError` if the content is not an array of objects.
pub fn parse_documents(content: &str) -> Result<Vec<Document>, SeedError> {
    let Value::Array(entries) = serde_json::from_str::<Value>(content)? else {
        return Err(SeedError::NotAnArray);
    };

    entries
        .into_iter()
        .enumerate()
        .map(|(index, entry)| match entry {
            Value::Object(doc) => Ok(doc),
            _ => Err(SeedError::NotAnObject(index)),
        })
        .collect()
}

/// Insert documents from `file` into `collection`.
///
/// # Errors
///
/// Returns `SeedError` if the collection is unknown, the file is invalid, or
/// a database operation fails.
pub async fn run(collection: &str, file: &Path, clear: bool) -> Result<(), SeedError> {
    let collection = CollectionName::parse(collection)
        .ok_or_else(|| SeedError::UnknownCollection(collection.to_string()))?;

    let content = tokio::fs::read_to_string(file)
        .await
        .map_err(|source| SeedError::Read {
            path: file.display().to_string(),
            source,
        })?;
    let docs = parse_documents(&content)?;
    info!(%collection, documents = docs.len(), "Parsed seed file");

    let config = ServerConfig::from_env()?;
    let store = Arc::new(PgDocumentStore::new(
        db::create_pool(&config.database_url).await?,
    ));

    let result = insert_all(store.as_ref(), collection, docs, clear).await;
    store.close().await;

    let inserted = result?;
    info!(%collection, inserted, "Seeding complete!");
    Ok(())
}

async fn insert_all(
    store: &dyn DocumentStore,
    collection: CollectionName,
    docs: Vec<Document>,
    clear: bool,
) -> Result<usize, SeedError> {
    if clear {
        let removed = store.delete_all(collection).await?;
        info!(%collection, removed, "Cleared existing documents");
    }

    let mut inserted = 0;
    for doc in docs {
        store.insert_one(collection, doc).await?;
        inserted += 1;
    }
    Ok(inserted)
}
