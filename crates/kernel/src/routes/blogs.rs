//! Blog posts: paginated listing, latest posts, create, fetch, delete.

use axum::extract::{Path, Query, State};
use axum::routing::get;
use axum::{Json, Router};
use serde::Serialize;
use serde_json::Value;

use super::helpers::{self, InsertResult};
use crate::error::AppResult;
use crate::listing::{ListingParams, ListingSpec, PageResult};
use crate::state::AppState;
use crate::store::{Collection, Document, Filter, FindOptions};

/// Number of posts returned by `/allBlogs`.
const LATEST_BLOGS: u64 = 6;

#[derive(Serialize)]
struct LatestBlogs {
    blogs: Vec<Document>,
}

async fn list_blogs(
    State(state): State<AppState>,
    Query(params): Query<ListingParams>,
) -> AppResult<Json<PageResult>> {
    let listings = state.listings();
    let request = listings.request_from(&params);
    Ok(Json(listings.list(&ListingSpec::BLOGS, &request).await?))
}

/// Newest posts first.
async fn latest_blogs(State(state): State<AppState>) -> AppResult<Json<LatestBlogs>> {
    let blogs = state
        .store()
        .find(
            Collection::Blogs,
            &Filter::all(),
            FindOptions::default().limit(LATEST_BLOGS).newest_first(),
        )
        .await?;
    Ok(Json(LatestBlogs { blogs }))
}

async fn create_blog(
    State(state): State<AppState>,
    Json(body): Json<Value>,
) -> AppResult<Json<InsertResult>> {
    helpers::insert(&state, Collection::Blogs, body).await
}

async fn get_blog(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<Document>> {
    helpers::get_one(&state, Collection::Blogs, &id).await
}

async fn delete_blog(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<Value>> {
    helpers::delete_one(&state, Collection::Blogs, &id).await
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/blogs", get(list_blogs).post(create_blog))
        .route("/blogs/{id}", get(get_blog).delete(delete_blog))
        .route("/allBlogs", get(latest_blogs))
}
