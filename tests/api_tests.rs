//! HTTP tests for requests rejected before any database access

mod common;

use axum::http::{Method, StatusCode};
use chrono::{Datelike, Utc};
use serde_json::json;

use common::{get, lazy_pool, post, send, test_state, token};
use yamdb_server::models::Role;

#[tokio::test]
async fn health_check_accepts_trailing_slash() {
    let state = test_state(lazy_pool());

    let (status, body) = get(&state, "/api/v1/health/").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");

    let (status, _) = get(&state, "/api/v1/health").await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn openapi_document_lists_nested_routes() {
    let state = test_state(lazy_pool());
    let (status, body) = get(&state, "/api-docs/openapi.json").await;

    assert_eq!(status, StatusCode::OK);
    assert!(body["paths"]["/titles/{title_id}/reviews/{review_id}/comments"].is_object());
}

#[tokio::test]
async fn writes_require_a_token() {
    let state = test_state(lazy_pool());
    let (status, body) = send(
        &state,
        Method::POST,
        "/api/v1/titles/1/reviews/",
        None,
        Some(json!({"text": "Great", "score": 9})),
    )
    .await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "NOT_AUTHENTICATED");
}

#[tokio::test]
async fn forged_token_is_rejected() {
    let state = test_state(lazy_pool());
    let (status, _) = post(
        &state,
        "/api/v1/titles/1/reviews/",
        "not-a-jwt",
        json!({"text": "Great", "score": 9}),
    )
    .await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn only_admins_create_titles() {
    let state = test_state(lazy_pool());
    let body = json!({"name": "Dune", "year": 1965, "genre": [], "category": "books"});

    for role in [Role::User, Role::Moderator] {
        let (status, body) = post(&state, "/api/v1/titles/", &token(1, role), body.clone()).await;
        assert_eq!(status, StatusCode::FORBIDDEN);
        assert_eq!(body["error"], "PERMISSION_DENIED");
    }
}

#[tokio::test]
async fn score_out_of_range_is_a_field_error() {
    let state = test_state(lazy_pool());
    let user = token(1, Role::User);

    for score in [-1, 11] {
        let (status, body) = post(
            &state,
            "/api/v1/titles/1/reviews/",
            &user,
            json!({"text": "Hmm", "score": score}),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "VALIDATION_ERROR");
        assert!(body["fields"]["score"].is_array());
    }
}

#[tokio::test]
async fn missing_score_is_a_field_error() {
    let state = test_state(lazy_pool());
    let (status, body) = post(
        &state,
        "/api/v1/titles/1/reviews/",
        &token(1, Role::User),
        json!({"text": "No score"}),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["fields"]["score"].is_array());
}

#[tokio::test]
async fn future_year_is_rejected() {
    let state = test_state(lazy_pool());
    let next_year = Utc::now().year() + 1;
    let (status, body) = post(
        &state,
        "/api/v1/titles/",
        &token(1, Role::Admin),
        json!({"name": "Sequel", "year": next_year, "genre": [], "category": "books"}),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["fields"]["year"].is_array());
}

#[tokio::test]
async fn overlong_title_name_is_rejected() {
    let state = test_state(lazy_pool());
    let (status, body) = post(
        &state,
        "/api/v1/titles/",
        &token(1, Role::Admin),
        json!({"name": "x".repeat(257), "year": 1965, "genre": [], "category": "books"}),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["fields"]["name"].is_array());
}

#[tokio::test]
async fn invalid_slug_is_rejected() {
    let state = test_state(lazy_pool());
    let (status, body) = post(
        &state,
        "/api/v1/categories/",
        &token(1, Role::Admin),
        json!({"name": "Books", "slug": "books and more"}),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["fields"]["slug"].is_array());
}

#[tokio::test]
async fn malformed_path_id_is_a_validation_error() {
    let state = test_state(lazy_pool());
    let (status, body) = get(&state, "/api/v1/titles/abc/").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "VALIDATION_ERROR");
    assert!(body["fields"]["non_field_errors"].is_array());

    let (status, body) = get(&state, "/api/v1/titles/1/reviews/x/comments/").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn malformed_query_value_is_a_validation_error() {
    let state = test_state(lazy_pool());
    let (status, body) = get(&state, "/api/v1/titles/?year=abc").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "VALIDATION_ERROR");
    assert!(body["fields"]["non_field_errors"].is_array());

    let (status, body) = get(&state, "/api/v1/genres/?page=first").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "VALIDATION_ERROR");
}
