//! Document storage for the catalog.
//!
//! # Database: `ub_jewellers`
//!
//! `PostgreSQL` is used as a document store. Each collection is a JSONB table
//! in the `catalog` schema:
//!
//! - `products` - Catalog products (seeded via the CLI)
//! - `reviews` - Customer reviews
//! - `nav_notifications` - Navigation bar notices
//! - `categories` - Product categories
//! - `cart` - Cart items posted by clients
//!
//! # Migrations
//!
//! Migrations are stored in `crates/server/migrations/` and run via:
//! ```bash
//! cargo run -p ub-jewellers-cli -- migrate
//! ```

pub mod collections;
pub mod memory;
pub mod postgres;

use std::time::Duration;

use async_trait::async_trait;
use secrecy::ExposeSecret;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use thiserror::Error;

use ub_jewellers_core::{CollectionName, Document, InsertOneResult};

pub use collections::{DocumentRepository, ProductRepository};
pub use memory::MemoryDocumentStore;
pub use postgres::PgDocumentStore;

/// Errors from document store operations.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// Database error from sqlx.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// The store cannot currently serve requests.
    #[error("store unavailable: {0}")]
    Unavailable(String),
}

/// A store of schemaless documents grouped into named collections.
///
/// Documents returned by the store always carry their `_id`. Results are in
/// insertion order.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Every document in a collection.
    async fn find_all(&self, collection: CollectionName)
    -> Result<Vec<Document>, RepositoryError>;

    /// Documents where any of `fields` is a string containing `needle`,
    /// ignoring case.
    async fn find_containing(
        &self,
        collection: CollectionName,
        fields: &[&str],
        needle: &str,
    ) -> Result<Vec<Document>, RepositoryError>;

    /// Insert a document verbatim. Any client-supplied `_id` is discarded.
    async fn insert_one(
        &self,
        collection: CollectionName,
        doc: Document,
    ) -> Result<InsertOneResult, RepositoryError>;

    /// Remove every document in a collection, returning how many were removed.
    async fn delete_all(&self, collection: CollectionName) -> Result<u64, RepositoryError>;

    /// Check that the store is reachable.
    async fn ping(&self) -> Result<(), RepositoryError>;

    /// Release the store's connections.
    async fn close(&self);
}

/// Create a `PostgreSQL` connection pool with sensible defaults.
///
/// # Arguments
///
/// * `database_url` - `PostgreSQL` connection string (wrapped in `SecretString`)
///
/// # Errors
///
/// Returns `sqlx::Error` if the connection cannot be established.
pub async fn create_pool(database_url: &secrecy::SecretString) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(10)
        .min_connections(1)
        .acquire_timeout(Duration::from_secs(10))
        .connect(database_url.expose_secret())
        .await
}
