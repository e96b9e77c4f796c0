//! Newsletter subscriptions.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use serde_json::{Value, json};
use tracing::{error, info};

use super::helpers::{self, InsertResult, non_empty_str};
use crate::error::{AppError, AppResult};
use crate::state::AppState;
use crate::store::{Collection, Document, Filter, StoreError};

async fn list_subscribers(State(state): State<AppState>) -> AppResult<Json<Vec<Document>>> {
    helpers::list_all(&state, Collection::Subscribers).await
}

/// Store a subscriber. Returns None when the email is already subscribed.
async fn register(
    state: &AppState,
    name: &str,
    email: &str,
) -> Result<Option<Document>, StoreError> {
    let store = state.store();
    if store
        .find_one(Collection::Subscribers, &Filter::all().eq("email", email))
        .await?
        .is_some()
    {
        return Ok(None);
    }

    let doc = store
        .insert_one(
            Collection::Subscribers,
            json!({ "name": name, "email": email }),
        )
        .await?;
    Ok(Some(doc))
}

/// Subscribe to the newsletter.
///
/// Only `name` and `email` are stored. Store failures get their own message
/// rather than the generic error body.
async fn subscribe(
    State(state): State<AppState>,
    Json(body): Json<Value>,
) -> AppResult<Response> {
    let (Some(name), Some(email)) = (non_empty_str(&body, "name"), non_empty_str(&body, "email"))
    else {
        return Err(AppError::BadRequest("Name and email are required".to_string()));
    };

    match register(&state, name, email).await {
        Ok(Some(doc)) => {
            info!(id = %doc.id, "newsletter subscription created");
            Ok(Json(json!({
                "message": "Subscription successful",
                "result": InsertResult::from(&doc),
            }))
            .into_response())
        }
        Ok(None) => Err(AppError::Conflict("Email is already subscribed".to_string())),
        Err(e) => {
            error!(error = ?e, "failed to store newsletter subscription");
            Ok((
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "message": "Error subscribing to newsletter" })),
            )
                .into_response())
        }
    }
}

pub fn router() -> Router<AppState> {
    Router::new().route("/subscribe", get(list_subscribers).post(subscribe))
}
