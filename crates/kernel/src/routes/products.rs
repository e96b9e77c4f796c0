//! Product catalogue.

use axum::extract::State;
use axum::routing::get;
use axum::{Json, Router};
use serde_json::Value;

use super::helpers::{self, InsertResult};
use crate::error::AppResult;
use crate::state::AppState;
use crate::store::{Collection, Document};

async fn list_products(State(state): State<AppState>) -> AppResult<Json<Vec<Document>>> {
    helpers::list_all(&state, Collection::Products).await
}

async fn create_product(
    State(state): State<AppState>,
    Json(body): Json<Value>,
) -> AppResult<Json<InsertResult>> {
    helpers::insert(&state, Collection::Products, body).await
}

pub fn router() -> Router<AppState> {
    Router::new().route("/products", get(list_products).post(create_product))
}
