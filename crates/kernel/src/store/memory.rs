//! In-process document store.

use std::collections::HashMap;

use async_trait::async_trait;
use parking_lot::RwLock;
use serde_json::Value;
use uuid::Uuid;

use super::{
    Collection, Document, DocumentStore, Filter, FindOptions, SortOrder, StoreError, into_fields,
};

/// Document store holding every collection in memory, in insertion order.
#[derive(Default)]
pub struct MemoryDocumentStore {
    collections: RwLock<HashMap<Collection, Vec<Document>>>,
}

impl MemoryDocumentStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of records in a collection, unfiltered.
    pub fn len(&self, collection: Collection) -> usize {
        self.collections
            .read()
            .get(&collection)
            .map_or(0, Vec::len)
    }

    pub fn is_empty(&self, collection: Collection) -> bool {
        self.len(collection) == 0
    }
}

#[async_trait]
impl DocumentStore for MemoryDocumentStore {
    async fn count(&self, collection: Collection, filter: &Filter) -> Result<u64, StoreError> {
        filter.validate()?;
        let guard = self.collections.read();
        let count = guard
            .get(&collection)
            .map_or(0, |docs| docs.iter().filter(|d| filter.matches(d)).count());
        Ok(count as u64)
    }

    async fn find(
        &self,
        collection: Collection,
        filter: &Filter,
        options: FindOptions,
    ) -> Result<Vec<Document>, StoreError> {
        filter.validate()?;
        let guard = self.collections.read();
        let Some(docs) = guard.get(&collection) else {
            return Ok(Vec::new());
        };

        let skip = usize::try_from(options.skip).unwrap_or(usize::MAX);
        let limit = options
            .limit
            .map_or(usize::MAX, |l| usize::try_from(l).unwrap_or(usize::MAX));

        let matching = docs.iter().filter(|d| filter.matches(d));
        let page: Vec<Document> = match options.sort {
            SortOrder::Oldest => matching.skip(skip).take(limit).cloned().collect(),
            SortOrder::Newest => {
                let mut all: Vec<&Document> = matching.collect();
                all.reverse();
                all.into_iter().skip(skip).take(limit).cloned().collect()
            }
        };
        Ok(page)
    }

    async fn find_by_id(
        &self,
        collection: Collection,
        id: Uuid,
    ) -> Result<Option<Document>, StoreError> {
        let guard = self.collections.read();
        Ok(guard
            .get(&collection)
            .and_then(|docs| docs.iter().find(|d| d.id == id))
            .cloned())
    }

    async fn insert_one(
        &self,
        collection: Collection,
        body: Value,
    ) -> Result<Document, StoreError> {
        let doc = Document {
            id: Uuid::now_v7(),
            fields: into_fields(body)?,
        };
        self.collections
            .write()
            .entry(collection)
            .or_default()
            .push(doc.clone());
        Ok(doc)
    }

    async fn delete_one(&self, collection: Collection, id: Uuid) -> Result<bool, StoreError> {
        let mut guard = self.collections.write();
        let Some(docs) = guard.get_mut(&collection) else {
            return Ok(false);
        };
        let before = docs.len();
        docs.retain(|d| d.id != id);
        Ok(docs.len() < before)
    }

    async fn ping(&self) -> bool {
        true
    }
}
