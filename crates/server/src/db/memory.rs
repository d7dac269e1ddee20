//! In-process document store.
//!
//! Backs router and integration tests, and any run that does not need
//! persistence. Matching rules mirror [`PgDocumentStore`](super::PgDocumentStore).

use std::collections::HashMap;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use async_trait::async_trait;
use serde_json::Value;

use ub_jewellers_core::catalog::contains_ignore_case;
use ub_jewellers_core::{CollectionName, Document, DocumentId, ID_FIELD, InsertOneResult, with_id};

use super::{DocumentStore, RepositoryError};

type Collections = HashMap<CollectionName, Vec<(DocumentId, Document)>>;

/// Document store held entirely in memory.
#[derive(Default)]
pub struct MemoryDocumentStore {
    collections: RwLock<Collections>,
}

impl MemoryDocumentStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store pre-populated with documents for one collection.
    ///
    /// Can be chained to seed several collections.
    #[must_use]
    pub fn with_documents(
        self,
        collection: CollectionName,
        docs: impl IntoIterator<Item = Document>,
    ) -> Self {
        {
            let mut collections = self
                .collections
                .write()
                .unwrap_or_else(std::sync::PoisonError::into_inner);
            let entries = collections.entry(collection).or_default();
            entries.extend(docs.into_iter().map(|mut doc| {
                doc.remove(ID_FIELD);
                (DocumentId::generate(), doc)
            }));
        }
        self
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, Collections>, RepositoryError> {
        self.collections
            .read()
            .map_err(|_| RepositoryError::Unavailable("Lock poisoned".to_string()))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, Collections>, RepositoryError> {
        self.collections
            .write()
            .map_err(|_| RepositoryError::Unavailable("Lock poisoned".to_string()))
    }
}

fn field_contains(doc: &Document, field: &str, needle: &str) -> bool {
    doc.get(field)
        .and_then(Value::as_str)
        .is_some_and(|value| contains_ignore_case(value, needle))
}

#[async_trait]
impl DocumentStore for MemoryDocumentStore {
    async fn find_all(
        &self,
        collection: CollectionName,
    ) -> Result<Vec<Document>, RepositoryError> {
        let collections = self.read()?;
        Ok(collections
            .get(&collection)
            .map(|entries| {
                entries
                    .iter()
                    .map(|(id, doc)| with_id(doc.clone(), *id))
                    .collect()
            })
            .unwrap_or_default())
    }

    async fn find_containing(
        &self,
        collection: CollectionName,
        fields: &[&str],
        needle: &str,
    ) -> Result<Vec<Document>, RepositoryError> {
        let collections = self.read()?;
        Ok(collections
            .get(&collection)
            .map(|entries| {
                entries
                    .iter()
                    .filter(|(_, doc)| {
                        fields
                            .iter()
                            .any(|field| field_contains(doc, field, needle))
                    })
                    .map(|(id, doc)| with_id(doc.clone(), *id))
                    .collect()
            })
            .unwrap_or_default())
    }

    async fn insert_one(
        &self,
        collection: CollectionName,
        mut doc: Document,
    ) -> Result<InsertOneResult, RepositoryError> {
        doc.remove(ID_FIELD);
        let id = DocumentId::generate();

        self.write()?
            .entry(collection)
            .or_default()
            .push((id, doc));

        Ok(InsertOneResult::acknowledged(id))
    }

    async fn delete_all(&self, collection: CollectionName) -> Result<u64, RepositoryError> {
        let removed = self
            .write()?
            .remove(&collection)
            .map_or(0, |entries| entries.len());

        Ok(u64::try_from(removed).unwrap_or(u64::MAX))
    }

    async fn ping(&self) -> Result<(), RepositoryError> {
        self.read().map(|_| ())
    }

    async fn close(&self) {}
}
