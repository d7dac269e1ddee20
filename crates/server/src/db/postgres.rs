//! `PostgreSQL`-backed document store.
//!
//! Table names come from [`CollectionName::table`], never from user input, so
//! they are interpolated into the SQL text. All values are bound.

use async_trait::async_trait;
use sqlx::PgPool;
use sqlx::types::Json;

use ub_jewellers_core::{CollectionName, Document, DocumentId, ID_FIELD, InsertOneResult, with_id};

use super::{DocumentStore, RepositoryError};

type DocumentRow = (DocumentId, Json<Document>);

/// Document store over JSONB tables in the `catalog` schema.
#[derive(Clone)]
pub struct PgDocumentStore {
    pool: PgPool,
}

impl PgDocumentStore {
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn into_documents(rows: Vec<DocumentRow>) -> Vec<Document> {
    rows.into_iter()
        .map(|(id, Json(doc))| with_id(doc, id))
        .collect()
}

/// `WHERE` clause matching `needle` (bound as `$1`) against `field_count`
/// string fields (bound as `$2..`). Numbers and booleans never match.
fn containing_clause(field_count: usize) -> String {
    (0..field_count)
        .map(|i| {
            let field = i + 2;
            format!(
                "(jsonb_typeof(doc->${field}) = 'string' AND strpos(lower(doc->>${field}), lower($1)) > 0)"
            )
        })
        .collect::<Vec<_>>()
        .join(" OR ")
}

#[async_trait]
impl DocumentStore for PgDocumentStore {
    async fn find_all(
        &self,
        collection: CollectionName,
    ) -> Result<Vec<Document>, RepositoryError> {
        let sql = format!(
            "SELECT id, doc FROM catalog.{} ORDER BY seq",
            collection.table()
        );
        let rows = sqlx::query_as::<_, DocumentRow>(&sql)
            .fetch_all(&self.pool)
            .await?;

        Ok(into_documents(rows))
    }

    async fn find_containing(
        &self,
        collection: CollectionName,
        fields: &[&str],
        needle: &str,
    ) -> Result<Vec<Document>, RepositoryError> {
        if fields.is_empty() {
            return Ok(Vec::new());
        }

        let sql = format!(
            "SELECT id, doc FROM catalog.{} WHERE {} ORDER BY seq",
            collection.table(),
            containing_clause(fields.len())
        );
        let mut query = sqlx::query_as::<_, DocumentRow>(&sql).bind(needle);
        for field in fields {
            query = query.bind(*field);
        }
        let rows = query.fetch_all(&self.pool).await?;

        Ok(into_documents(rows))
    }

    async fn insert_one(
        &self,
        collection: CollectionName,
        mut doc: Document,
    ) -> Result<InsertOneResult, RepositoryError> {
        doc.remove(ID_FIELD);

        let sql = format!(
            "INSERT INTO catalog.{} (doc) VALUES ($1) RETURNING id",
            collection.table()
        );
        let id = sqlx::query_scalar::<_, DocumentId>(&sql)
            .bind(Json(doc))
            .fetch_one(&self.pool)
            .await?;

        Ok(InsertOneResult::acknowledged(id))
    }

    async fn delete_all(&self, collection: CollectionName) -> Result<u64, RepositoryError> {
        let sql = format!("DELETE FROM catalog.{}", collection.table());
        let result = sqlx::query(&sql).execute(&self.pool).await?;

        Ok(result.rows_affected())
    }

    async fn ping(&self) -> Result<(), RepositoryError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }

    async fn close(&self) {
        self.pool.close().await;
    }
}
