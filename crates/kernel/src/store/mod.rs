//! Document store abstraction.
//!
//! Every collection read or write goes through [`DocumentStore`]. Records are
//! schemaless JSON objects keyed by a time-ordered UUID, so ascending id order
//! is insertion order.
//!
//! Two implementations:
//! - [`PgDocumentStore`] keeps all collections in one JSONB table.
//! - [`MemoryDocumentStore`] keeps them in process, used by tests and demos.

mod memory;
mod postgres;
pub mod query_builder;

use std::fmt;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;
use uuid::Uuid;

pub use memory::MemoryDocumentStore;
pub use postgres::PgDocumentStore;

/// Named document collections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Collection {
    Users,
    Subscribers,
    Products,
    Blogs,
    Courses,
}

impl Collection {
    /// Storage name of the collection.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Users => "users",
            Self::Subscribers => "subscribers",
            Self::Products => "products",
            Self::Blogs => "blogs",
            Self::Courses => "courses",
        }
    }
}

impl fmt::Display for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A stored record: identifier plus arbitrary fields.
///
/// Serializes flat, with the identifier under `_id`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    #[serde(rename = "_id")]
    pub id: Uuid,
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

impl Document {
    /// Text value of a top-level field, if it is a string.
    pub fn str_field(&self, name: &str) -> Option<&str> {
        self.fields.get(name).and_then(Value::as_str)
    }
}

/// A single predicate clause over a top-level field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Clause {
    /// Field equals value exactly.
    Equals { field: String, value: String },
    /// Field contains value as a substring, ignoring case.
    ContainsIgnoreCase { field: String, value: String },
}

/// Conjunction of clauses. An empty filter matches everything.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Filter {
    clauses: Vec<Clause>,
}

impl Filter {
    /// Filter matching every record.
    pub fn all() -> Self {
        Self::default()
    }

    /// Add an exact-equality clause.
    pub fn eq(mut self, field: impl Into<String>, value: impl Into<String>) -> Self {
        self.clauses.push(Clause::Equals {
            field: field.into(),
            value: value.into(),
        });
        self
    }

    /// Add a case-insensitive substring clause.
    pub fn contains_ignore_case(
        mut self,
        field: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        self.clauses.push(Clause::ContainsIgnoreCase {
            field: field.into(),
            value: value.into(),
        });
        self
    }

    pub fn clauses(&self) -> &[Clause] {
        &self.clauses
    }

    pub fn is_empty(&self) -> bool {
        self.clauses.is_empty()
    }

    /// Reject clauses the backends cannot express.
    pub fn validate(&self) -> Result<(), StoreError> {
        for clause in &self.clauses {
            let (field, value) = match clause {
                Clause::Equals { field, value } => (field, value),
                Clause::ContainsIgnoreCase { field, value } => (field, value),
            };
            if field.is_empty() {
                return Err(StoreError::InvalidFilter("empty field name".to_string()));
            }
            if field.contains('\0') || value.contains('\0') {
                return Err(StoreError::InvalidFilter(format!(
                    "filter on '{}' contains a NUL byte",
                    field.replace('\0', "")
                )));
            }
        }
        Ok(())
    }

    /// Evaluate the filter against a document in memory.
    pub fn matches(&self, doc: &Document) -> bool {
        self.clauses.iter().all(|clause| match clause {
            Clause::Equals { field, value } => doc.str_field(field) == Some(value.as_str()),
            Clause::ContainsIgnoreCase { field, value } => doc
                .str_field(field)
                .is_some_and(|s| s.to_lowercase().contains(&value.to_lowercase())),
        })
    }
}

/// Result ordering by identifier.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortOrder {
    /// Natural storage order (oldest first).
    #[default]
    Oldest,
    /// Newest first.
    Newest,
}

/// Paging and ordering for [`DocumentStore::find`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FindOptions {
    pub skip: u64,
    pub limit: Option<u64>,
    pub sort: SortOrder,
}

impl FindOptions {
    pub fn skip(mut self, n: u64) -> Self {
        self.skip = n;
        self
    }

    pub fn limit(mut self, n: u64) -> Self {
        self.limit = Some(n);
        self
    }

    pub fn newest_first(mut self) -> Self {
        self.sort = SortOrder::Newest;
        self
    }
}

/// Document store errors.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("document store unavailable")]
    Unavailable(#[source] sqlx::Error),

    #[error("document query failed")]
    Query(#[source] sqlx::Error),

    #[error("invalid filter: {0}")]
    InvalidFilter(String),

    #[error("document body must be a JSON object")]
    NotAnObject,
}

impl From<sqlx::Error> for StoreError {
    fn from(e: sqlx::Error) -> Self {
        match e {
            sqlx::Error::Io(_)
            | sqlx::Error::PoolTimedOut
            | sqlx::Error::PoolClosed
            | sqlx::Error::Tls(_) => StoreError::Unavailable(e),
            other => StoreError::Query(other),
        }
    }
}

/// Storage collaborator for all collections.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Count records matching the filter.
    async fn count(&self, collection: Collection, filter: &Filter) -> Result<u64, StoreError>;

    /// Fetch records matching the filter, skipping and limiting per `options`.
    async fn find(
        &self,
        collection: Collection,
        filter: &Filter,
        options: FindOptions,
    ) -> Result<Vec<Document>, StoreError>;

    /// Fetch the first matching record in natural order.
    async fn find_one(
        &self,
        collection: Collection,
        filter: &Filter,
    ) -> Result<Option<Document>, StoreError> {
        let mut docs = self
            .find(collection, filter, FindOptions::default().limit(1))
            .await?;
        Ok(docs.pop())
    }

    /// Fetch a record by identifier.
    async fn find_by_id(
        &self,
        collection: Collection,
        id: Uuid,
    ) -> Result<Option<Document>, StoreError>;

    /// Insert a JSON object, assigning a new identifier.
    ///
    /// Any `_id` key in the body is discarded.
    async fn insert_one(&self, collection: Collection, body: Value)
    -> Result<Document, StoreError>;

    /// Delete a record by identifier. Returns whether a record was removed.
    async fn delete_one(&self, collection: Collection, id: Uuid) -> Result<bool, StoreError>;

    /// Whether the backend is reachable.
    async fn ping(&self) -> bool;
}

/// Turn an insert body into stored fields.
pub(crate) fn into_fields(body: Value) -> Result<Map<String, Value>, StoreError> {
    match body {
        Value::Object(mut fields) => {
            fields.remove("_id");
            Ok(fields)
        }
        _ => Err(StoreError::NotAnObject),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn doc(fields: Value) -> Document {
        Document {
            id: Uuid::now_v7(),
            fields: into_fields(fields).unwrap(),
        }
    }

    #[test]
    fn empty_filter_matches_everything() {
        let d = doc(json!({"courseName": "Rust"}));
        assert!(Filter::all().matches(&d));
        assert!(Filter::all().matches(&doc(json!({}))));
    }

    #[test]
    fn contains_ignores_case() {
        let d = doc(json!({"courseName": "Intro to RUST"}));
        assert!(Filter::all().contains_ignore_case("courseName", "rust").matches(&d));
        assert!(Filter::all().contains_ignore_case("courseName", "To r").matches(&d));
        assert!(!Filter::all().contains_ignore_case("courseName", "go").matches(&d));
    }

    #[test]
    fn equals_is_exact() {
        let d = doc(json!({"category": "Web"}));
        assert!(Filter::all().eq("category", "Web").matches(&d));
        assert!(!Filter::all().eq("category", "web").matches(&d));
        assert!(!Filter::all().eq("category", "We").matches(&d));
    }

    #[test]
    fn missing_or_non_string_field_never_matches() {
        let d = doc(json!({"category": 7}));
        assert!(!Filter::all().eq("category", "7").matches(&d));
        assert!(!Filter::all().contains_ignore_case("courseName", "").matches(&d));
    }

    #[test]
    fn clauses_are_intersected() {
        let d = doc(json!({"courseName": "Rust Web", "category": "Web"}));
        let f = Filter::all()
            .contains_ignore_case("courseName", "rust")
            .eq("category", "Web");
        assert!(f.matches(&d));
        let f = Filter::all()
            .contains_ignore_case("courseName", "rust")
            .eq("category", "Systems");
        assert!(!f.matches(&d));
    }

    #[test]
    fn validate_rejects_nul_and_empty_field() {
        assert!(Filter::all().eq("category", "a\0b").validate().is_err());
        assert!(Filter::all().eq("", "x").validate().is_err());
        assert!(Filter::all().eq("category", "x").validate().is_ok());
    }

    #[test]
    fn insert_body_must_be_object_and_drops_id() {
        let fields = into_fields(json!({"_id": "abc", "name": "x"})).unwrap();
        assert!(!fields.contains_key("_id"));
        assert_eq!(fields["name"], "x");
        assert!(matches!(into_fields(json!([1, 2])), Err(StoreError::NotAnObject)));
    }

    #[test]
    fn document_serializes_flat() {
        let d = doc(json!({"title": "Hello"}));
        let v = serde_json::to_value(&d).unwrap();
        assert_eq!(v["_id"], d.id.to_string());
        assert_eq!(v["title"], "Hello");
    }

    #[test]
    fn collection_names() {
        assert_eq!(Collection::Courses.as_str(), "courses");
        assert_eq!(Collection::Blogs.to_string(), "blogs");
    }
}
