//! Category endpoints

use axum::{
    extract::State,
    http::StatusCode,
    Json,
};

use crate::{
    error::AppResult,
    models::{
        category::{Category, CreateCategory},
        LookupQuery,
    },
};

use super::{ApiJson, ApiPath, ApiQuery, AuthenticatedUser, PaginatedResponse};

/// List categories
#[utoipa::path(
    get,
    path = "/categories",
    tag = "categories",
    params(
        ("search" = Option<String>, Query, description = "Search in name"),
        ("page" = Option<i64>, Query, description = "Page number (default: 1)"),
        ("per_page" = Option<i64>, Query, description = "Items per page (default: 20)")
    ),
    responses(
        (status = 200, description = "List of categories", body = PaginatedResponse<Category>)
    )
)]
pub async fn list_categories(
    State(state): State<crate::AppState>,
    ApiQuery(query): ApiQuery<LookupQuery>,
) -> AppResult<Json<PaginatedResponse<Category>>> {
    let (items, total) = state.services.categories.list(&query).await?;
    let page = query.page();

    Ok(Json(PaginatedResponse {
        items,
        total,
        page: page.page,
        per_page: page.per_page,
    }))
}

/// Create a category
#[utoipa::path(
    post,
    path = "/categories",
    tag = "categories",
    security(("bearer_auth" = [])),
    request_body = CreateCategory,
    responses(
        (status = 201, description = "Category created", body = Category),
        (status = 400, description = "Invalid input or slug already taken", body = crate::error::ErrorResponse),
        (status = 403, description = "Administrator privileges required")
    )
)]
pub async fn create_category(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    ApiJson(data): ApiJson<CreateCategory>,
) -> AppResult<(StatusCode, Json<Category>)> {
    claims.require_admin()?;
    let category = state.services.categories.create(&data).await?;
    Ok((StatusCode::CREATED, Json(category)))
}

/// Delete a category; its titles are kept without a category
#[utoipa::path(
    delete,
    path = "/categories/{slug}",
    tag = "categories",
    security(("bearer_auth" = [])),
    params(("slug" = String, Path, description = "Category slug")),
    responses(
        (status = 204, description = "Category deleted"),
        (status = 404, description = "Category not found")
    )
)]
pub async fn delete_category(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    ApiPath(slug): ApiPath<String>,
) -> AppResult<StatusCode> {
    claims.require_admin()?;
    state.services.categories.delete(&slug).await?;
    Ok(StatusCode::NO_CONTENT)
}
