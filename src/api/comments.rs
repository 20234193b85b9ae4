//! Comment endpoints, nested under a review

use axum::{
    extract::State,
    http::StatusCode,
    Json,
};

use crate::{
    error::AppResult,
    models::{
        comment::{Comment, CreateComment, UpdateComment},
        PageQuery,
    },
    validation::{RequestContext, WriteAction},
};

use super::{ApiJson, ApiPath, ApiQuery, AuthenticatedUser, PaginatedResponse};

/// List comments of a review, newest first
#[utoipa::path(
    get,
    path = "/titles/{title_id}/reviews/{review_id}/comments",
    tag = "comments",
    params(
        ("title_id" = i64, Path, description = "Title ID"),
        ("review_id" = i64, Path, description = "Review ID"),
        ("page" = Option<i64>, Query, description = "Page number (default: 1)"),
        ("per_page" = Option<i64>, Query, description = "Items per page (default: 20)")
    ),
    responses(
        (status = 200, description = "List of comments", body = PaginatedResponse<Comment>),
        (status = 404, description = "Review not found")
    )
)]
pub async fn list_comments(
    State(state): State<crate::AppState>,
    ApiPath((title_id, review_id)): ApiPath<(i64, i64)>,
    ApiQuery(query): ApiQuery<PageQuery>,
) -> AppResult<Json<PaginatedResponse<Comment>>> {
    let page = query.page();
    let (items, total) = state.services.comments.list(title_id, review_id, page).await?;

    Ok(Json(PaginatedResponse {
        items,
        total,
        page: page.page,
        per_page: page.per_page,
    }))
}

/// Get a comment
#[utoipa::path(
    get,
    path = "/titles/{title_id}/reviews/{review_id}/comments/{comment_id}",
    tag = "comments",
    params(
        ("title_id" = i64, Path, description = "Title ID"),
        ("review_id" = i64, Path, description = "Review ID"),
        ("comment_id" = i64, Path, description = "Comment ID")
    ),
    responses(
        (status = 200, description = "Comment details", body = Comment),
        (status = 404, description = "Comment not found")
    )
)]
pub async fn get_comment(
    State(state): State<crate::AppState>,
    ApiPath((title_id, review_id, comment_id)): ApiPath<(i64, i64, i64)>,
) -> AppResult<Json<Comment>> {
    let comment = state.services.comments.get(title_id, review_id, comment_id).await?;
    Ok(Json(comment))
}

/// Comment on a review
#[utoipa::path(
    post,
    path = "/titles/{title_id}/reviews/{review_id}/comments",
    tag = "comments",
    security(("bearer_auth" = [])),
    params(
        ("title_id" = i64, Path, description = "Title ID"),
        ("review_id" = i64, Path, description = "Review ID")
    ),
    request_body = CreateComment,
    responses(
        (status = 201, description = "Comment created", body = Comment),
        (status = 400, description = "Invalid input", body = crate::error::ErrorResponse),
        (status = 404, description = "Review not found")
    )
)]
pub async fn create_comment(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    ApiPath((title_id, review_id)): ApiPath<(i64, i64)>,
    ApiJson(data): ApiJson<CreateComment>,
) -> AppResult<(StatusCode, Json<Comment>)> {
    let ctx = RequestContext::for_review(claims.user_id, title_id, review_id, WriteAction::Create);
    let comment = state.services.comments.create(&ctx, &data).await?;
    Ok((StatusCode::CREATED, Json(comment)))
}

/// Update a comment (author, moderator or admin)
#[utoipa::path(
    patch,
    path = "/titles/{title_id}/reviews/{review_id}/comments/{comment_id}",
    tag = "comments",
    security(("bearer_auth" = [])),
    params(
        ("title_id" = i64, Path, description = "Title ID"),
        ("review_id" = i64, Path, description = "Review ID"),
        ("comment_id" = i64, Path, description = "Comment ID")
    ),
    request_body = UpdateComment,
    responses(
        (status = 200, description = "Comment updated", body = Comment),
        (status = 403, description = "Not the author"),
        (status = 404, description = "Comment not found")
    )
)]
pub async fn update_comment(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    ApiPath((title_id, review_id, comment_id)): ApiPath<(i64, i64, i64)>,
    ApiJson(data): ApiJson<UpdateComment>,
) -> AppResult<Json<Comment>> {
    let existing = state.services.comments.get(title_id, review_id, comment_id).await?;
    claims.require_author_or_moderator(existing.author_id)?;

    let ctx = RequestContext::for_review(claims.user_id, title_id, review_id, WriteAction::Update);
    let comment = state.services.comments.update(&ctx, comment_id, &data).await?;
    Ok(Json(comment))
}

/// Delete a comment (author, moderator or admin)
#[utoipa::path(
    delete,
    path = "/titles/{title_id}/reviews/{review_id}/comments/{comment_id}",
    tag = "comments",
    security(("bearer_auth" = [])),
    params(
        ("title_id" = i64, Path, description = "Title ID"),
        ("review_id" = i64, Path, description = "Review ID"),
        ("comment_id" = i64, Path, description = "Comment ID")
    ),
    responses(
        (status = 204, description = "Comment deleted"),
        (status = 403, description = "Not the author"),
        (status = 404, description = "Comment not found")
    )
)]
pub async fn delete_comment(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    ApiPath((title_id, review_id, comment_id)): ApiPath<(i64, i64, i64)>,
) -> AppResult<StatusCode> {
    let existing = state.services.comments.get(title_id, review_id, comment_id).await?;
    claims.require_author_or_moderator(existing.author_id)?;

    let ctx = RequestContext::for_review(claims.user_id, title_id, review_id, WriteAction::Delete);
    state.services.comments.delete(&ctx, comment_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
