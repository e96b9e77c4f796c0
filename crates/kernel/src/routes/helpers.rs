//! Shared route helpers for collection endpoints.

use axum::Json;
use serde::Serialize;
use serde_json::{Value, json};
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use crate::state::AppState;
use crate::store::{Collection, Document, Filter, FindOptions};

/// Acknowledgement returned after an insert.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InsertResult {
    pub acknowledged: bool,
    pub inserted_id: Uuid,
}

impl From<&Document> for InsertResult {
    fn from(doc: &Document) -> Self {
        Self {
            acknowledged: true,
            inserted_id: doc.id,
        }
    }
}

/// Non-empty string value of a top-level body field.
pub fn non_empty_str<'a>(body: &'a Value, field: &str) -> Option<&'a str> {
    body.get(field)
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
}

/// Parse a record identifier from a path segment.
pub fn parse_id(raw: &str) -> AppResult<Uuid> {
    Uuid::parse_str(raw).map_err(|_| AppError::BadRequest(format!("invalid id: {raw}")))
}

/// Every record in a collection, in natural order.
pub async fn list_all(
    state: &AppState,
    collection: Collection,
) -> AppResult<Json<Vec<Document>>> {
    let docs = state
        .store()
        .find(collection, &Filter::all(), FindOptions::default())
        .await?;
    Ok(Json(docs))
}

/// Insert a JSON object body into a collection.
pub async fn insert(
    state: &AppState,
    collection: Collection,
    body: Value,
) -> AppResult<Json<InsertResult>> {
    let doc = state.store().insert_one(collection, body).await?;
    tracing::info!(%collection, id = %doc.id, "document created");
    Ok(Json(InsertResult::from(&doc)))
}

/// Fetch one record by id, or 404.
pub async fn get_one(
    state: &AppState,
    collection: Collection,
    id: &str,
) -> AppResult<Json<Document>> {
    let id = parse_id(id)?;
    state
        .store()
        .find_by_id(collection, id)
        .await?
        .map(Json)
        .ok_or(AppError::NotFound)
}

/// Delete one record by id, or 404 when nothing matched.
pub async fn delete_one(
    state: &AppState,
    collection: Collection,
    id: &str,
) -> AppResult<Json<Value>> {
    let id = parse_id(id)?;
    if !state.store().delete_one(collection, id).await? {
        return Err(AppError::NotFound);
    }
    tracing::info!(%collection, %id, "document deleted");
    Ok(Json(json!({ "deletedCount": 1 })))
}
