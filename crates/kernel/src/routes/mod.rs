//! HTTP route handlers.

pub mod blogs;
pub mod courses;
pub mod front;
pub mod health;
mod helpers;
pub mod products;
pub mod subscribers;
pub mod token;
pub mod users;

use axum::Router;

use crate::state::AppState;

/// Every route the service exposes, without middleware or state.
pub fn router() -> Router<AppState> {
    Router::new()
        .merge(front::router())
        .merge(health::router())
        .merge(token::router())
        .merge(users::router())
        .merge(products::router())
        .merge(subscribers::router())
        .merge(blogs::router())
        .merge(courses::router())
}
