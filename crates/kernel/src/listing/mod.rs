//! Paginated, filterable collection listings.
//!
//! One implementation serves every listable collection; a [`ListingSpec`]
//! names the collection and which fields the search term and category
//! filter apply to.
//!
//! Each listing issues exactly two store calls, a count and a page fetch,
//! with no transaction between them. Under concurrent writes `totalCount`
//! and `items` may disagree.

mod types;

use std::sync::Arc;

use tracing::debug;

use crate::store::{Collection, DocumentStore, Filter, FindOptions, StoreError};

pub use types::{DEFAULT_PAGE, DEFAULT_PAGE_SIZE, ListingParams, PageRequest, PageResult};

/// Which collection to list and which fields the filters target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListingSpec {
    pub collection: Collection,
    /// Field matched case-insensitively against `searchTerm`.
    pub name_field: &'static str,
    /// Field matched exactly against `category`.
    pub category_field: &'static str,
}

impl ListingSpec {
    pub const COURSES: ListingSpec = ListingSpec {
        collection: Collection::Courses,
        name_field: "courseName",
        category_field: "category",
    };

    pub const BLOGS: ListingSpec = ListingSpec {
        collection: Collection::Blogs,
        name_field: "title",
        category_field: "category",
    };

    /// Build the predicate for a request: match-all, narrowed by each
    /// provided filter.
    pub fn filter_for(&self, request: &PageRequest) -> Filter {
        let mut filter = Filter::all();
        if let Some(term) = &request.search_term {
            filter = filter.contains_ignore_case(self.name_field, term.as_str());
        }
        if let Some(category) = &request.category {
            filter = filter.eq(self.category_field, category.as_str());
        }
        filter
    }
}

/// Read-only listing service over a document store.
#[derive(Clone)]
pub struct ListingService {
    store: Arc<dyn DocumentStore>,
    max_page_size: Option<u32>,
}

impl ListingService {
    pub fn new(store: Arc<dyn DocumentStore>, max_page_size: Option<u32>) -> Self {
        Self {
            store,
            max_page_size,
        }
    }

    /// Configured clamp on page size, if any.
    pub fn max_page_size(&self) -> Option<u32> {
        self.max_page_size
    }

    /// Normalize raw query parameters with this service's page size limit.
    pub fn request_from(&self, params: &ListingParams) -> PageRequest {
        PageRequest::from_params(params, self.max_page_size)
    }

    /// Compute one page of matching records plus pagination metadata.
    pub async fn list(
        &self,
        spec: &ListingSpec,
        request: &PageRequest,
    ) -> Result<PageResult, StoreError> {
        let filter = spec.filter_for(request);
        filter.validate()?;

        let total_count = self.store.count(spec.collection, &filter).await?;

        let options = FindOptions::default()
            .skip(request.skip())
            .limit(u64::from(request.page_size));
        let items = self.store.find(spec.collection, &filter, options).await?;

        debug!(
            collection = %spec.collection,
            page = request.page,
            page_size = request.page_size,
            total_count,
            returned = items.len(),
            "listing page"
        );

        Ok(PageResult::new(
            items,
            total_count,
            request.page,
            request.page_size,
        ))
    }
}
