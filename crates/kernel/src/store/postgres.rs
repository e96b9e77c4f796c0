//! PostgreSQL-backed document store.
//!
//! All collections share the `document` table; `body` is JSONB.

use async_trait::async_trait;
use serde_json::Value;
use sqlx::PgPool;
use tracing::debug;
use uuid::Uuid;

use super::query_builder::DocumentQueryBuilder;
use super::{Collection, Document, DocumentStore, Filter, FindOptions, StoreError, into_fields};

#[derive(sqlx::FromRow)]
struct DocumentRow {
    id: Uuid,
    body: Value,
}

impl DocumentRow {
    fn into_document(self) -> Document {
        let fields = match self.body {
            Value::Object(map) => map,
            _ => serde_json::Map::new(),
        };
        Document {
            id: self.id,
            fields,
        }
    }
}

/// Document store over a PostgreSQL pool.
#[derive(Clone)]
pub struct PgDocumentStore {
    pool: PgPool,
}

impl PgDocumentStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

#[async_trait]
impl DocumentStore for PgDocumentStore {
    async fn count(&self, collection: Collection, filter: &Filter) -> Result<u64, StoreError> {
        filter.validate()?;
        let sql = DocumentQueryBuilder::new(collection, filter).build_count();
        debug!(%collection, %sql, "count documents");

        let total: i64 = sqlx::query_scalar(&sql).fetch_one(&self.pool).await?;
        Ok(total.max(0) as u64)
    }

    async fn find(
        &self,
        collection: Collection,
        filter: &Filter,
        options: FindOptions,
    ) -> Result<Vec<Document>, StoreError> {
        filter.validate()?;
        let sql = DocumentQueryBuilder::new(collection, filter).build_find(options);
        debug!(%collection, %sql, "find documents");

        let rows = sqlx::query_as::<_, DocumentRow>(&sql)
            .fetch_all(&self.pool)
            .await?;

        Ok(rows.into_iter().map(DocumentRow::into_document).collect())
    }

    async fn find_by_id(
        &self,
        collection: Collection,
        id: Uuid,
    ) -> Result<Option<Document>, StoreError> {
        let row = sqlx::query_as::<_, DocumentRow>(
            "SELECT id, body FROM document WHERE collection = $1 AND id = $2",
        )
        .bind(collection.as_str())
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(DocumentRow::into_document))
    }

    async fn insert_one(
        &self,
        collection: Collection,
        body: Value,
    ) -> Result<Document, StoreError> {
        let fields = into_fields(body)?;
        let id = Uuid::now_v7();

        sqlx::query("INSERT INTO document (id, collection, body) VALUES ($1, $2, $3)")
            .bind(id)
            .bind(collection.as_str())
            .bind(sqlx::types::Json(&fields))
            .execute(&self.pool)
            .await?;

        debug!(%collection, %id, "inserted document");
        Ok(Document { id, fields })
    }

    async fn delete_one(&self, collection: Collection, id: Uuid) -> Result<bool, StoreError> {
        let result = sqlx::query("DELETE FROM document WHERE collection = $1 AND id = $2")
            .bind(collection.as_str())
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn ping(&self) -> bool {
        crate::db::check_health(&self.pool).await
    }
}
