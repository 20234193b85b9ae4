//! Database-backed HTTP tests for titles, reviews and comments.
//!
//! These need PostgreSQL. Run with: DATABASE_URL=... cargo test -- --ignored

mod common;

use axum::http::StatusCode;
use chrono::{Datelike, Utc};
use serde_json::{json, Value};
use sqlx::PgPool;

use common::{create_user, delete, get, patch, post, test_state, token};
use yamdb_server::{
    models::{review::CreateReview, Role},
    validation::{RequestContext, WriteAction},
    AppState,
};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

struct Fixture {
    state: AppState,
    pool: PgPool,
    admin: String,
}

async fn fixture(pool: PgPool) -> Fixture {
    let admin_id = create_user(&pool, "admin", Role::Admin).await;
    let state = test_state(pool.clone());
    let admin = token(admin_id, Role::Admin);

    let (status, _) = post(&state, "/api/v1/categories/", &admin, json!({"name": "Books", "slug": "books"})).await;
    assert_eq!(status, StatusCode::CREATED);
    for (name, slug) in [("Science fiction", "sci-fi"), ("Adventure", "adventure")] {
        let (status, _) = post(&state, "/api/v1/genres/", &admin, json!({"name": name, "slug": slug})).await;
        assert_eq!(status, StatusCode::CREATED);
    }

    Fixture { state, pool, admin }
}

async fn create_dune(f: &Fixture) -> i64 {
    let (status, body) = post(
        &f.state,
        "/api/v1/titles/",
        &f.admin,
        json!({
            "name": "Dune",
            "year": 1965,
            "description": "Desert planet",
            "genre": ["sci-fi", "adventure"],
            "category": "books"
        }),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "{}", body);
    body["id"].as_i64().unwrap()
}

async fn reader(f: &Fixture, name: &str) -> (i64, String) {
    let id = create_user(&f.pool, name, Role::User).await;
    (id, token(id, Role::User))
}

async fn review(f: &Fixture, title_id: i64, user: &str, score: i32) -> (StatusCode, Value) {
    post(
        &f.state,
        &format!("/api/v1/titles/{}/reviews/", title_id),
        user,
        json!({"text": "My thoughts", "score": score}),
    )
    .await
}

async fn count(pool: &PgPool, table: &str) -> i64 {
    sqlx::query_scalar(&format!("SELECT COUNT(*) FROM {}", table))
        .fetch_one(pool)
        .await
        .unwrap()
}

// ---------------------------------------------------------------------------
// Titles and ratings
// ---------------------------------------------------------------------------

#[sqlx::test]
#[ignore]
async fn rating_is_null_without_reviews_and_mean_with_them(pool: PgPool) {
    let f = fixture(pool).await;
    let title_id = create_dune(&f).await;

    let (status, body) = get(&f.state, &format!("/api/v1/titles/{}/", title_id)).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["rating"].is_null());
    assert_eq!(body["category"]["slug"], "books");
    assert_eq!(body["genre"].as_array().unwrap().len(), 2);

    let (_, alice) = reader(&f, "alice").await;
    let (_, bob) = reader(&f, "bob").await;
    assert_eq!(review(&f, title_id, &alice, 8).await.0, StatusCode::CREATED);
    assert_eq!(review(&f, title_id, &bob, 10).await.0, StatusCode::CREATED);

    let (_, body) = get(&f.state, &format!("/api/v1/titles/{}", title_id)).await;
    assert_eq!(body["rating"].as_f64(), Some(9.0));

    let (_, list) = get(&f.state, "/api/v1/titles/?genre=sci-fi").await;
    assert_eq!(list["total"], 1);
    assert_eq!(list["items"][0]["rating"].as_f64(), Some(9.0));
}

#[sqlx::test]
#[ignore]
async fn current_year_is_accepted(pool: PgPool) {
    let f = fixture(pool).await;
    let year = Utc::now().year();
    let (status, body) = post(
        &f.state,
        "/api/v1/titles/",
        &f.admin,
        json!({"name": "Fresh", "year": year, "genre": ["sci-fi"], "category": "books"}),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["year"], year);
}

#[sqlx::test]
#[ignore]
async fn unknown_slugs_are_field_errors(pool: PgPool) {
    let f = fixture(pool).await;
    let (status, body) = post(
        &f.state,
        "/api/v1/titles/",
        &f.admin,
        json!({"name": "Lost", "year": 2000, "genre": ["sci-fi", "nope"], "category": "films"}),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["fields"]["genre"].is_array());
    assert!(body["fields"]["category"].is_array());
    assert_eq!(count(&f.pool, "titles").await, 0);
}

#[sqlx::test]
#[ignore]
async fn repeated_genre_slugs_link_once(pool: PgPool) {
    let f = fixture(pool).await;
    let (status, body) = post(
        &f.state,
        "/api/v1/titles/",
        &f.admin,
        json!({"name": "Twice", "year": 2000, "genre": ["sci-fi", "sci-fi"], "category": "books"}),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["genre"].as_array().unwrap().len(), 1);
    assert_eq!(count(&f.pool, "genre_title").await, 1);
}

#[sqlx::test]
#[ignore]
async fn patch_replaces_genres_and_keeps_other_fields(pool: PgPool) {
    let f = fixture(pool).await;
    let title_id = create_dune(&f).await;

    let (status, body) = patch(
        &f.state,
        &format!("/api/v1/titles/{}/", title_id),
        &f.admin,
        json!({"genre": ["adventure"]}),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["name"], "Dune");
    assert_eq!(body["genre"][0]["slug"], "adventure");
    assert_eq!(body["genre"].as_array().unwrap().len(), 1);
}

#[sqlx::test]
#[ignore]
async fn deleting_category_keeps_title(pool: PgPool) {
    let f = fixture(pool).await;
    let title_id = create_dune(&f).await;

    let (status, _) = delete(&f.state, "/api/v1/categories/books/", &f.admin).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, body) = get(&f.state, &format!("/api/v1/titles/{}", title_id)).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["category"].is_null());
}

#[sqlx::test]
#[ignore]
async fn duplicate_category_slug_is_a_field_error(pool: PgPool) {
    let f = fixture(pool).await;
    let (status, body) = post(
        &f.state,
        "/api/v1/categories/",
        &f.admin,
        json!({"name": "More books", "slug": "books"}),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["fields"]["slug"].is_array());
}

#[sqlx::test]
#[ignore]
async fn search_treats_wildcards_literally(pool: PgPool) {
    let f = fixture(pool).await;
    let (status, _) = post(&f.state, "/api/v1/genres/", &f.admin, json!({"name": "Film_noir", "slug": "noir"})).await;
    assert_eq!(status, StatusCode::CREATED);

    let (_, list) = get(&f.state, "/api/v1/genres/?search=_").await;
    assert_eq!(list["total"], 1);
    assert_eq!(list["items"][0]["slug"], "noir");

    let (_, list) = get(&f.state, "/api/v1/categories/?search=%25").await;
    assert_eq!(list["total"], 0);
}

#[sqlx::test]
#[ignore]
async fn page_far_past_the_end_is_empty(pool: PgPool) {
    let f = fixture(pool).await;
    create_dune(&f).await;

    let (status, list) = get(&f.state, "/api/v1/titles/?page=9223372036854775807").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(list["total"], 1);
    assert!(list["items"].as_array().unwrap().is_empty());
}

// ---------------------------------------------------------------------------
// Reviews
// ---------------------------------------------------------------------------

#[sqlx::test]
#[ignore]
async fn score_bounds_are_inclusive(pool: PgPool) {
    let f = fixture(pool).await;
    let title_id = create_dune(&f).await;
    let (_, alice) = reader(&f, "alice").await;
    let (_, bob) = reader(&f, "bob").await;

    let (status, body) = review(&f, title_id, &alice, 0).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["author"], "alice");
    assert!(body["pub_date"].is_string());
    assert_eq!(review(&f, title_id, &bob, 10).await.0, StatusCode::CREATED);

    let (_, body) = get(&f.state, &format!("/api/v1/titles/{}", title_id)).await;
    assert_eq!(body["rating"].as_f64(), Some(5.0));
}

#[sqlx::test]
#[ignore]
async fn second_review_by_same_author_is_rejected(pool: PgPool) {
    let f = fixture(pool).await;
    let title_id = create_dune(&f).await;
    let (_, alice) = reader(&f, "alice").await;

    assert_eq!(review(&f, title_id, &alice, 7).await.0, StatusCode::CREATED);
    let (status, body) = review(&f, title_id, &alice, 3).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["fields"]["non_field_errors"].is_array());
    assert_eq!(count(&f.pool, "reviews").await, 1);
}

#[sqlx::test]
#[ignore]
async fn concurrent_duplicate_reviews_store_one(pool: PgPool) {
    let f = fixture(pool).await;
    let title_id = create_dune(&f).await;
    let (alice_id, _) = reader(&f, "alice").await;

    let ctx = RequestContext::for_title(alice_id, title_id, WriteAction::Create);
    let data = CreateReview {
        text: "Race".to_string(),
        score: 6,
    };
    let reviews = &f.state.services.reviews;
    let (first, second) = tokio::join!(reviews.create(&ctx, &data), reviews.create(&ctx, &data));

    assert!(first.is_ok() ^ second.is_ok(), "exactly one create must win");
    let loser = if first.is_ok() { second } else { first };
    assert!(matches!(loser, Err(yamdb_server::AppError::Validation(_))));
    assert_eq!(count(&f.pool, "reviews").await, 1);
}

#[sqlx::test]
#[ignore]
async fn review_on_missing_title_is_not_found(pool: PgPool) {
    let f = fixture(pool).await;
    let (_, alice) = reader(&f, "alice").await;

    let (status, body) = review(&f, 9999, &alice, 5).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "NOT_FOUND");
}

#[sqlx::test]
#[ignore]
async fn only_author_or_moderator_edits_review(pool: PgPool) {
    let f = fixture(pool).await;
    let title_id = create_dune(&f).await;
    let (_, alice) = reader(&f, "alice").await;
    let (_, bob) = reader(&f, "bob").await;
    let moderator_id = create_user(&f.pool, "mod", Role::Moderator).await;
    let moderator = token(moderator_id, Role::Moderator);

    let (_, body) = review(&f, title_id, &alice, 4).await;
    let uri = format!("/api/v1/titles/{}/reviews/{}/", title_id, body["id"]);

    let (status, _) = patch(&f.state, &uri, &bob, json!({"score": 1})).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, body) = patch(&f.state, &uri, &alice, json!({"score": 6})).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["score"], 6);
    assert_eq!(body["text"], "My thoughts");

    let (status, _) = delete(&f.state, &uri, &moderator).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
}

#[sqlx::test]
#[ignore]
async fn review_is_scoped_to_its_title(pool: PgPool) {
    let f = fixture(pool).await;
    let dune = create_dune(&f).await;
    let (_, other) = post(
        &f.state,
        "/api/v1/titles/",
        &f.admin,
        json!({"name": "Solaris", "year": 1961, "genre": ["sci-fi"], "category": "books"}),
    )
    .await;
    let (_, alice) = reader(&f, "alice").await;
    let (_, body) = review(&f, dune, &alice, 9).await;

    let (status, _) = get(
        &f.state,
        &format!("/api/v1/titles/{}/reviews/{}", other["id"], body["id"]),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

// ---------------------------------------------------------------------------
// Comments and cascades
// ---------------------------------------------------------------------------

#[sqlx::test]
#[ignore]
async fn authors_may_comment_repeatedly(pool: PgPool) {
    let f = fixture(pool).await;
    let title_id = create_dune(&f).await;
    let (_, alice) = reader(&f, "alice").await;
    let (_, body) = review(&f, title_id, &alice, 8).await;
    let uri = format!("/api/v1/titles/{}/reviews/{}/comments/", title_id, body["id"]);

    for text in ["First", "Second"] {
        let (status, _) = post(&f.state, &uri, &alice, json!({"text": text})).await;
        assert_eq!(status, StatusCode::CREATED);
    }

    let (status, list) = get(&f.state, &uri).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(list["total"], 2);
    assert_eq!(list["items"][0]["text"], "Second");
}

#[sqlx::test]
#[ignore]
async fn comment_on_missing_review_is_not_found(pool: PgPool) {
    let f = fixture(pool).await;
    let title_id = create_dune(&f).await;
    let (_, alice) = reader(&f, "alice").await;

    let (status, _) = post(
        &f.state,
        &format!("/api/v1/titles/{}/reviews/9999/comments/", title_id),
        &alice,
        json!({"text": "Hello?"}),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[sqlx::test]
#[ignore]
async fn deleting_title_removes_reviews_and_comments(pool: PgPool) {
    let f = fixture(pool).await;
    let title_id = create_dune(&f).await;
    let (_, alice) = reader(&f, "alice").await;
    let (_, body) = review(&f, title_id, &alice, 8).await;
    let (status, _) = post(
        &f.state,
        &format!("/api/v1/titles/{}/reviews/{}/comments/", title_id, body["id"]),
        &alice,
        json!({"text": "Agreed"}),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, _) = delete(&f.state, &format!("/api/v1/titles/{}/", title_id), &f.admin).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    assert_eq!(count(&f.pool, "reviews").await, 0);
    assert_eq!(count(&f.pool, "comments").await, 0);
    assert_eq!(count(&f.pool, "genre_title").await, 0);

    let (status, _) = get(&f.state, &format!("/api/v1/titles/{}/reviews/", title_id)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[sqlx::test]
#[ignore]
async fn readiness_reports_database(pool: PgPool) {
    let state = test_state(pool);
    let (status, body) = get(&state, "/api/v1/ready").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ready");
}
