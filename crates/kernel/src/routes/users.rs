//! User registration and lookup.

use axum::extract::State;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use serde_json::{Value, json};
use tracing::info;

use super::helpers::{self, InsertResult, non_empty_str};
use crate::error::{AppError, AppResult};
use crate::state::AppState;
use crate::store::{Collection, Document, Filter};

async fn list_users(State(state): State<AppState>) -> AppResult<Json<Vec<Document>>> {
    helpers::list_all(&state, Collection::Users).await
}

/// Register a user unless one with the same email exists.
///
/// A duplicate is not an error: the response says so and carries a null id.
async fn create_user(
    State(state): State<AppState>,
    Json(body): Json<Value>,
) -> AppResult<Response> {
    let email = non_empty_str(&body, "email")
        .ok_or_else(|| AppError::BadRequest("email is required".to_string()))?
        .to_string();

    let existing = state
        .store()
        .find_one(Collection::Users, &Filter::all().eq("email", email.as_str()))
        .await?;
    if existing.is_some() {
        info!(%email, "user already registered");
        return Ok(Json(json!({
            "message": "User already exists",
            "insertId": null,
        }))
        .into_response());
    }

    let doc = state.store().insert_one(Collection::Users, body).await?;
    info!(id = %doc.id, "user registered");
    Ok(Json(InsertResult::from(&doc)).into_response())
}

pub fn router() -> Router<AppState> {
    Router::new().route("/users", get(list_users).post(create_user))
}
