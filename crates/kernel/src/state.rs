//! Application state shared across all handlers.

use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::info;

use crate::config::Config;
use crate::db;
use crate::listing::ListingService;
use crate::services::token::TokenService;
use crate::store::{DocumentStore, PgDocumentStore};

/// Shared application state.
///
/// Wrapped in Arc internally so Clone is cheap.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    /// Backing document store for every collection.
    store: Arc<dyn DocumentStore>,

    /// Paginated listings over the store.
    listings: ListingService,

    /// Signs tokens for `POST /jwt`.
    tokens: TokenService,
}

impl AppState {
    /// Connect to PostgreSQL, apply migrations, and build state.
    pub async fn new(config: &Config) -> Result<Self> {
        let pool = db::create_pool(config)
            .await
            .context("failed to create database pool")?;

        db::run_migrations(&pool)
            .await
            .context("failed to run migrations")?;

        info!("Database migrations applied");

        Ok(Self::with_store(config, Arc::new(PgDocumentStore::new(pool))))
    }

    /// Build state over an existing store.
    pub fn with_store(config: &Config, store: Arc<dyn DocumentStore>) -> Self {
        let listings = ListingService::new(store.clone(), config.listing_max_page_size);
        let tokens = TokenService::new(config.access_token_secret.as_bytes());

        Self {
            inner: Arc::new(AppStateInner {
                store,
                listings,
                tokens,
            }),
        }
    }

    /// Get the document store.
    pub fn store(&self) -> &Arc<dyn DocumentStore> {
        &self.inner.store
    }

    /// Get the listing service.
    pub fn listings(&self) -> &ListingService {
        &self.inner.listings
    }

    /// Get the token service.
    pub fn tokens(&self) -> &TokenService {
        &self.inner.tokens
    }

    /// Check if the document store is reachable.
    pub async fn store_healthy(&self) -> bool {
        self.inner.store.ping().await
    }
}
