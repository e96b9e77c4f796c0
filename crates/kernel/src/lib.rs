//! Storefront Kernel Library
//!
//! Document collections over PostgreSQL, paginated listings, and the HTTP
//! routes that expose them. The `storefront` binary wires these together.

pub mod config;
pub mod db;
pub mod error;
pub mod listing;
pub mod routes;
pub mod services;
pub mod state;
pub mod store;

pub use config::Config;
pub use error::{AppError, AppResult};
pub use state::AppState;
