//! Review endpoints, nested under a title

use axum::{
    extract::State,
    http::StatusCode,
    Json,
};

use crate::{
    error::AppResult,
    models::{
        review::{CreateReview, Review, UpdateReview},
        PageQuery,
    },
    validation::{RequestContext, WriteAction},
};

use super::{ApiJson, ApiPath, ApiQuery, AuthenticatedUser, PaginatedResponse};

/// List reviews of a title, newest first
#[utoipa::path(
    get,
    path = "/titles/{title_id}/reviews",
    tag = "reviews",
    params(
        ("title_id" = i64, Path, description = "Title ID"),
        ("page" = Option<i64>, Query, description = "Page number (default: 1)"),
        ("per_page" = Option<i64>, Query, description = "Items per page (default: 20)")
    ),
    responses(
        (status = 200, description = "List of reviews", body = PaginatedResponse<Review>),
        (status = 404, description = "Title not found")
    )
)]
pub async fn list_reviews(
    State(state): State<crate::AppState>,
    ApiPath(title_id): ApiPath<i64>,
    ApiQuery(query): ApiQuery<PageQuery>,
) -> AppResult<Json<PaginatedResponse<Review>>> {
    let page = query.page();
    let (items, total) = state.services.reviews.list(title_id, page).await?;

    Ok(Json(PaginatedResponse {
        items,
        total,
        page: page.page,
        per_page: page.per_page,
    }))
}

/// Get a review
#[utoipa::path(
    get,
    path = "/titles/{title_id}/reviews/{review_id}",
    tag = "reviews",
    params(
        ("title_id" = i64, Path, description = "Title ID"),
        ("review_id" = i64, Path, description = "Review ID")
    ),
    responses(
        (status = 200, description = "Review details", body = Review),
        (status = 404, description = "Review not found")
    )
)]
pub async fn get_review(
    State(state): State<crate::AppState>,
    ApiPath((title_id, review_id)): ApiPath<(i64, i64)>,
) -> AppResult<Json<Review>> {
    let review = state.services.reviews.get(title_id, review_id).await?;
    Ok(Json(review))
}

/// Review a title; one review per user and title
#[utoipa::path(
    post,
    path = "/titles/{title_id}/reviews",
    tag = "reviews",
    security(("bearer_auth" = [])),
    params(("title_id" = i64, Path, description = "Title ID")),
    request_body = CreateReview,
    responses(
        (status = 201, description = "Review created", body = Review),
        (status = 400, description = "Invalid score or review already exists", body = crate::error::ErrorResponse),
        (status = 404, description = "Title not found")
    )
)]
pub async fn create_review(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    ApiPath(title_id): ApiPath<i64>,
    ApiJson(data): ApiJson<CreateReview>,
) -> AppResult<(StatusCode, Json<Review>)> {
    let ctx = RequestContext::for_title(claims.user_id, title_id, WriteAction::Create);
    let review = state.services.reviews.create(&ctx, &data).await?;
    Ok((StatusCode::CREATED, Json(review)))
}

/// Update a review (author, moderator or admin)
#[utoipa::path(
    patch,
    path = "/titles/{title_id}/reviews/{review_id}",
    tag = "reviews",
    security(("bearer_auth" = [])),
    params(
        ("title_id" = i64, Path, description = "Title ID"),
        ("review_id" = i64, Path, description = "Review ID")
    ),
    request_body = UpdateReview,
    responses(
        (status = 200, description = "Review updated", body = Review),
        (status = 403, description = "Not the author"),
        (status = 404, description = "Review not found")
    )
)]
pub async fn update_review(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    ApiPath((title_id, review_id)): ApiPath<(i64, i64)>,
    ApiJson(data): ApiJson<UpdateReview>,
) -> AppResult<Json<Review>> {
    let existing = state.services.reviews.get(title_id, review_id).await?;
    claims.require_author_or_moderator(existing.author_id)?;

    let ctx = RequestContext::for_review(claims.user_id, title_id, review_id, WriteAction::Update);
    let review = state.services.reviews.update(&ctx, &data).await?;
    Ok(Json(review))
}

/// Delete a review and its comments (author, moderator or admin)
#[utoipa::path(
    delete,
    path = "/titles/{title_id}/reviews/{review_id}",
    tag = "reviews",
    security(("bearer_auth" = [])),
    params(
        ("title_id" = i64, Path, description = "Title ID"),
        ("review_id" = i64, Path, description = "Review ID")
    ),
    responses(
        (status = 204, description = "Review deleted"),
        (status = 403, description = "Not the author"),
        (status = 404, description = "Review not found")
    )
)]
pub async fn delete_review(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    ApiPath((title_id, review_id)): ApiPath<(i64, i64)>,
) -> AppResult<StatusCode> {
    let existing = state.services.reviews.get(title_id, review_id).await?;
    claims.require_author_or_moderator(existing.author_id)?;

    let ctx = RequestContext::for_review(claims.user_id, title_id, review_id, WriteAction::Delete);
    state.services.reviews.delete(&ctx).await?;
    Ok(StatusCode::NO_CONTENT)
}
