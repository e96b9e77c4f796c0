//! Configuration loaded from environment variables.

use std::env;

use anyhow::{Context, Result};

/// Application configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP server port (default: 5000).
    pub port: u16,

    /// PostgreSQL connection URL.
    pub database_url: String,

    /// Maximum database connections in pool (default: 10).
    pub database_max_connections: u32,

    /// HMAC secret used to sign tokens issued by `POST /jwt`.
    pub access_token_secret: String,

    /// CORS allowed origins (comma-separated, default: "*").
    pub cors_allowed_origins: Vec<String>,

    /// Optional upper bound on listing page size. Unbounded when None.
    pub listing_max_page_size: Option<u32>,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self> {
        let port = env::var("PORT")
            .unwrap_or_else(|_| "5000".to_string())
            .parse()
            .context("PORT must be a valid u16")?;

        let database_url =
            env::var("DATABASE_URL").context("DATABASE_URL environment variable is required")?;

        let database_max_connections = env::var("DATABASE_MAX_CONNECTIONS")
            .unwrap_or_else(|_| "10".to_string())
            .parse()
            .context("DATABASE_MAX_CONNECTIONS must be a valid u32")?;

        let access_token_secret = env::var("ACCESS_TOKEN_SECRET")
            .context("ACCESS_TOKEN_SECRET environment variable is required")?;

        let cors_allowed_origins = env::var("CORS_ALLOWED_ORIGINS")
            .map(|v| v.split(',').map(|s| s.trim().to_string()).collect())
            .unwrap_or_else(|_| vec!["*".to_string()]);

        let listing_max_page_size = match env::var("LISTING_MAX_PAGE_SIZE") {
            Ok(v) => {
                let max: u32 = v
                    .parse()
                    .context("LISTING_MAX_PAGE_SIZE must be a valid u32")?;
                if max == 0 {
                    anyhow::bail!("LISTING_MAX_PAGE_SIZE must be greater than zero");
                }
                Some(max)
            }
            Err(_) => None,
        };

        Ok(Self {
            port,
            database_url,
            database_max_connections,
            access_token_secret,
            cors_allowed_origins,
            listing_max_page_size,
        })
    }

    /// Configuration for tests and embedded use, no environment required.
    pub fn for_testing(access_token_secret: &str) -> Self {
        Self {
            port: 0,
            database_url: String::new(),
            database_max_connections: 1,
            access_token_secret: access_token_secret.to_string(),
            cors_allowed_origins: vec!["*".to_string()],
            listing_max_page_size: None,
        }
    }
}
