#![allow(clippy::unwrap_used, clippy::expect_used)]
//! Paginated listing tests for `/courses` and `/blogs`.
//!
//! Run through the real router against the in-memory store.

use axum::http::StatusCode;
use serde_json::json;

use storefront_kernel::Config;
use storefront_kernel::store::Collection;
use storefront_test_utils::{assert, numbered_courses, test_blog, test_course};

mod common;
use common::{TEST_SECRET, TestApp, response_json};

async fn app_with_courses(n: usize) -> TestApp {
    let app = TestApp::new();
    app.seed(Collection::Courses, numbered_courses("Course", "General", n))
        .await;
    app
}

#[tokio::test]
async fn fourteen_courses_paged_by_six() {
    let app = app_with_courses(14).await;

    let response = app.get("/courses?page=1&pageSize=6").await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = response_json(response).await;
    assert_eq!(body["totalCount"], 14);
    assert_eq!(body["totalPages"], 3);
    assert_eq!(body["page"], 1);
    assert_eq!(body["pageSize"], 6);
    assert_eq!(
        assert::field_values(&body["items"], "courseName"),
        (1..=6).map(|i| format!("Course {i}")).collect::<Vec<_>>()
    );

    let body = response_json(app.get("/courses?page=3&pageSize=6").await).await;
    assert_eq!(
        assert::field_values(&body["items"], "courseName"),
        ["Course 13", "Course 14"]
    );
    assert_eq!(body["totalPages"], 3);
}

#[tokio::test]
async fn defaults_to_first_page_of_six() {
    let app = app_with_courses(8).await;

    let body = response_json(app.get("/courses").await).await;
    assert_eq!(body["page"], 1);
    assert_eq!(body["pageSize"], 6);
    assert_eq!(body["items"].as_array().unwrap().len(), 6);
    assert_eq!(body["totalPages"], 2);
}

#[tokio::test]
async fn malformed_numbers_fall_back_to_defaults() {
    let app = app_with_courses(8).await;

    let body = response_json(app.get("/courses?page=abc&pageSize=xyz").await).await;
    assert_eq!(body["page"], 1);
    assert_eq!(body["pageSize"], 6);
}

#[tokio::test]
async fn non_positive_page_clamps_to_first() {
    let app = app_with_courses(8).await;

    for page in ["0", "-3"] {
        let body = response_json(app.get(&format!("/courses?page={page}")).await).await;
        assert_eq!(body["page"], 1);
        assert_eq!(
            assert::field_values(&body["items"], "courseName")[0],
            "Course 1"
        );
    }
}

#[tokio::test]
async fn page_past_the_end_is_empty() {
    let app = app_with_courses(4).await;

    let body = response_json(app.get("/courses?page=9").await).await;
    assert_eq!(body["totalCount"], 4);
    assert_eq!(body["totalPages"], 1);
    assert!(body["items"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn empty_collection_has_zero_pages() {
    let app = TestApp::new();

    let body = response_json(app.get("/courses").await).await;
    assert_eq!(body["totalCount"], 0);
    assert_eq!(body["totalPages"], 0);
    assert!(body["items"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn category_filter_matches_exactly() {
    let app = TestApp::new();
    app.seed(
        Collection::Courses,
        [
            test_course("Rust Basics", "Systems").build(),
            test_course("Web with Axum", "Web").build(),
            test_course("Web Sockets", "web").build(),
            test_course("Async Rust", "Systems").build(),
        ],
    )
    .await;

    let body = response_json(app.get("/courses?category=Systems").await).await;
    assert_eq!(body["totalCount"], 2);
    assert::all_field_eq(&body["items"], "category", "Systems");

    let body = response_json(app.get("/courses?category=Web").await).await;
    assert_eq!(body["totalCount"], 1);
    assert_eq!(
        assert::field_values(&body["items"], "courseName"),
        ["Web with Axum"]
    );
}

#[tokio::test]
async fn search_term_is_case_insensitive_substring() {
    let app = TestApp::new();
    app.seed(
        Collection::Courses,
        [
            test_course("Rust Basics", "Systems").build(),
            test_course("Advanced RUST", "Systems").build(),
            test_course("Go Basics", "Systems").build(),
        ],
    )
    .await;

    let body = response_json(app.get("/courses?searchTerm=rust").await).await;
    assert_eq!(body["totalCount"], 2);
    assert_eq!(
        assert::field_values(&body["items"], "courseName"),
        ["Rust Basics", "Advanced RUST"]
    );

    let body = response_json(app.get("/courses?searchTerm=BASICS").await).await;
    assert_eq!(body["totalCount"], 2);
}

#[tokio::test]
async fn search_term_wildcards_are_literal() {
    let app = TestApp::new();
    app.seed(
        Collection::Courses,
        [
            test_course("100% Rust", "Systems").build(),
            test_course("1000 Rust tips", "Systems").build(),
        ],
    )
    .await;

    let body = response_json(app.get("/courses?searchTerm=100%25").await).await;
    assert_eq!(body["totalCount"], 1);
    assert_eq!(
        assert::field_values(&body["items"], "courseName"),
        ["100% Rust"]
    );
}

#[tokio::test]
async fn combined_filters_intersect_and_paginate() {
    let app = TestApp::new();
    app.seed(Collection::Courses, numbered_courses("Rust", "Systems", 8))
        .await;
    app.seed(Collection::Courses, numbered_courses("Rust", "Web", 3))
        .await;
    app.seed(Collection::Courses, numbered_courses("Go", "Systems", 5))
        .await;

    let body = response_json(
        app.get("/courses?searchTerm=rust&category=Systems&pageSize=3&page=3")
            .await,
    )
    .await;
    assert_eq!(body["totalCount"], 8);
    assert_eq!(body["totalPages"], 3);
    assert_eq!(
        assert::field_values(&body["items"], "courseName"),
        ["Rust 7", "Rust 8"]
    );
    assert::all_field_eq(&body["items"], "category", "Systems");
}

#[tokio::test]
async fn empty_filters_are_ignored() {
    let app = app_with_courses(3).await;

    let body = response_json(app.get("/courses?searchTerm=&category=").await).await;
    assert_eq!(body["totalCount"], 3);
}

#[tokio::test]
async fn invalid_filter_is_bad_request() {
    let app = app_with_courses(1).await;

    let response = app.get("/courses?searchTerm=a%00b").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn page_size_clamped_when_configured() {
    let mut config = Config::for_testing(TEST_SECRET);
    config.listing_max_page_size = Some(4);
    let app = TestApp::with_config(config);
    app.seed(Collection::Courses, numbered_courses("Course", "General", 10))
        .await;

    let body = response_json(app.get("/courses?pageSize=100").await).await;
    assert_eq!(body["pageSize"], 4);
    assert_eq!(body["items"].as_array().unwrap().len(), 4);
    assert_eq!(body["totalPages"], 3);
}

#[tokio::test]
async fn page_size_unbounded_by_default() {
    let app = app_with_courses(10).await;

    let body = response_json(app.get("/courses?pageSize=100").await).await;
    assert_eq!(body["pageSize"], 100);
    assert_eq!(body["items"].as_array().unwrap().len(), 10);
    assert_eq!(body["totalPages"], 1);
}

#[tokio::test]
async fn blogs_use_title_for_search() {
    let app = TestApp::new();
    app.seed(
        Collection::Blogs,
        [
            test_blog("Shipping Rust", "Engineering").build(),
            test_blog("Quarterly update", "News").build(),
            test_blog("Rust in production", "News").build(),
        ],
    )
    .await;

    let body = response_json(app.get("/blogs?searchTerm=RUST").await).await;
    assert_eq!(body["totalCount"], 2);

    let body = response_json(app.get("/blogs?searchTerm=rust&category=News").await).await;
    assert_eq!(
        assert::field_values(&body["items"], "title"),
        ["Rust in production"]
    );
}

#[tokio::test]
async fn listing_items_carry_ids() {
    let app = TestApp::new();
    app.seed(Collection::Blogs, [json!({"title": "One"})]).await;

    let body = response_json(app.get("/blogs").await).await;
    let item = &body["items"][0];
    assert!(item["_id"].as_str().is_some());
    assert_eq!(item["title"], "One");
}
