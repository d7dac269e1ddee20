//! Typed accessors over the named collections.

use ub_jewellers_core::catalog::{SEARCH_FIELDS, SearchQuery};
use ub_jewellers_core::{CollectionName, Document, InsertOneResult, Product};

use super::{DocumentStore, RepositoryError};

/// Repository for the `products` collection.
pub struct ProductRepository<'a> {
    store: &'a dyn DocumentStore,
}

impl<'a> ProductRepository<'a> {
    /// Create a new product repository.
    #[must_use]
    pub const fn new(store: &'a dyn DocumentStore) -> Self {
        Self { store }
    }

    /// Get every product.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn find_all(&self) -> Result<Vec<Product>, RepositoryError> {
        let docs = self.store.find_all(CollectionName::Products).await?;
        Ok(into_products(docs))
    }

    /// Get products whose category contains `needle`, ignoring case.
    ///
    /// `None` returns every product.
    ///
    /// # Errors
    ///
    /// See [`ProductRepository::find_all`].
    pub async fn find_by_category(
        &self,
        needle: Option<&str>,
    ) -> Result<Vec<Product>, RepositoryError> {
        let Some(needle) = needle else {
            return self.find_all().await;
        };

        let docs = self
            .store
            .find_containing(CollectionName::Products, &["category"], needle)
            .await?;
        Ok(into_products(docs))
    }

    /// Run a name/category text search.
    ///
    /// An empty search never touches the store.
    ///
    /// # Errors
    ///
    /// See [`ProductRepository::find_all`].
    pub async fn search(&self, query: &SearchQuery) -> Result<Vec<Product>, RepositoryError> {
        match query {
            SearchQuery::All => self.find_all().await,
            SearchQuery::Nothing => Ok(Vec::new()),
            SearchQuery::Text(text) => {
                let docs = self
                    .store
                    .find_containing(CollectionName::Products, &SEARCH_FIELDS, text)
                    .await?;
                Ok(into_products(docs))
            }
        }
    }
}

fn into_products(docs: Vec<Document>) -> Vec<Product> {
    docs.into_iter().map(Product::from).collect()
}

/// Pass-through repository for collections served verbatim.
pub struct DocumentRepository<'a> {
    store: &'a dyn DocumentStore,
    collection: CollectionName,
}

impl<'a> DocumentRepository<'a> {
    #[must_use]
    pub const fn new(store: &'a dyn DocumentStore, collection: CollectionName) -> Self {
        Self { store, collection }
    }

    /// Get every document in the collection.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list(&self) -> Result<Vec<Document>, RepositoryError> {
        self.store.find_all(self.collection).await
    }

    /// Insert a document verbatim.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the insert fails.
    pub async fn insert(&self, doc: Document) -> Result<InsertOneResult, RepositoryError> {
        self.store.insert_one(self.collection, doc).await
    }
}
