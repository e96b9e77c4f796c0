//! Token issuance endpoint.
//!
//! `POST /jwt` signs whatever JSON object it receives. Tokens are not
//! checked by any route in this service.

use axum::extract::State;
use axum::routing::post;
use axum::{Json, Router};
use serde::Serialize;
use serde_json::Value;

use crate::error::{AppError, AppResult};
use crate::state::AppState;

#[derive(Debug, Serialize)]
struct TokenResponse {
    token: String,
}

async fn issue_token(
    State(state): State<AppState>,
    Json(body): Json<Value>,
) -> AppResult<Json<TokenResponse>> {
    let Value::Object(subject) = body else {
        return Err(AppError::BadRequest("token subject must be a JSON object".to_string()));
    };

    let token = state.tokens().issue(subject)?;
    Ok(Json(TokenResponse { token }))
}

pub fn router() -> Router<AppState> {
    Router::new().route("/jwt", post(issue_token))
}
