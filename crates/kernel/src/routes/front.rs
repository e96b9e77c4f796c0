//! Root banner.

use axum::Router;
use axum::routing::get;

use crate::state::AppState;

async fn index() -> &'static str {
    "Storefront is open"
}

pub fn router() -> Router<AppState> {
    Router::new().route("/", get(index))
}
