//! Courses: paginated, filterable listing plus create, fetch, delete.

use axum::extract::{Path, Query, State};
use axum::routing::get;
use axum::{Json, Router};
use serde_json::Value;

use super::helpers::{self, InsertResult};
use crate::error::AppResult;
use crate::listing::{ListingParams, ListingSpec, PageResult};
use crate::state::AppState;
use crate::store::{Collection, Document};

/// `GET /courses?page=&pageSize=&searchTerm=&category=`
async fn list_courses(
    State(state): State<AppState>,
    Query(params): Query<ListingParams>,
) -> AppResult<Json<PageResult>> {
    let listings = state.listings();
    let request = listings.request_from(&params);
    Ok(Json(listings.list(&ListingSpec::COURSES, &request).await?))
}

async fn create_course(
    State(state): State<AppState>,
    Json(body): Json<Value>,
) -> AppResult<Json<InsertResult>> {
    helpers::insert(&state, Collection::Courses, body).await
}

async fn get_course(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<Document>> {
    helpers::get_one(&state, Collection::Courses, &id).await
}

async fn delete_course(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<Value>> {
    helpers::delete_one(&state, Collection::Courses, &id).await
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/courses", get(list_courses).post(create_course))
        .route("/courses/{id}", get(get_course).delete(delete_course))
}
