//! Title endpoints

use axum::{
    extract::State,
    http::StatusCode,
    Json,
};

use crate::{
    error::AppResult,
    models::title::{CreateTitle, Title, TitleQuery, UpdateTitle},
};

use super::{ApiJson, ApiPath, ApiQuery, AuthenticatedUser, PaginatedResponse};

/// List titles with filters and pagination
#[utoipa::path(
    get,
    path = "/titles",
    tag = "titles",
    params(
        ("genre" = Option<String>, Query, description = "Filter by genre slug"),
        ("category" = Option<String>, Query, description = "Filter by category slug"),
        ("year" = Option<i32>, Query, description = "Filter by release year"),
        ("name" = Option<String>, Query, description = "Search in name"),
        ("page" = Option<i64>, Query, description = "Page number (default: 1)"),
        ("per_page" = Option<i64>, Query, description = "Items per page (default: 20)")
    ),
    responses(
        (status = 200, description = "List of titles", body = PaginatedResponse<Title>)
    )
)]
pub async fn list_titles(
    State(state): State<crate::AppState>,
    ApiQuery(query): ApiQuery<TitleQuery>,
) -> AppResult<Json<PaginatedResponse<Title>>> {
    let (items, total) = state.services.titles.list(&query).await?;
    let page = query.page();

    Ok(Json(PaginatedResponse {
        items,
        total,
        page: page.page,
        per_page: page.per_page,
    }))
}

/// Get a title with its rating
#[utoipa::path(
    get,
    path = "/titles/{title_id}",
    tag = "titles",
    params(("title_id" = i64, Path, description = "Title ID")),
    responses(
        (status = 200, description = "Title details", body = Title),
        (status = 404, description = "Title not found")
    )
)]
pub async fn get_title(
    State(state): State<crate::AppState>,
    ApiPath(title_id): ApiPath<i64>,
) -> AppResult<Json<Title>> {
    let title = state.services.titles.get(title_id).await?;
    Ok(Json(title))
}

/// Create a title
#[utoipa::path(
    post,
    path = "/titles",
    tag = "titles",
    security(("bearer_auth" = [])),
    request_body = CreateTitle,
    responses(
        (status = 201, description = "Title created", body = Title),
        (status = 400, description = "Invalid input", body = crate::error::ErrorResponse),
        (status = 403, description = "Administrator privileges required")
    )
)]
pub async fn create_title(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    ApiJson(data): ApiJson<CreateTitle>,
) -> AppResult<(StatusCode, Json<Title>)> {
    claims.require_admin()?;
    let title = state.services.titles.create(&data).await?;
    Ok((StatusCode::CREATED, Json(title)))
}

/// Partially update a title
#[utoipa::path(
    patch,
    path = "/titles/{title_id}",
    tag = "titles",
    security(("bearer_auth" = [])),
    params(("title_id" = i64, Path, description = "Title ID")),
    request_body = UpdateTitle,
    responses(
        (status = 200, description = "Title updated", body = Title),
        (status = 400, description = "Invalid input", body = crate::error::ErrorResponse),
        (status = 404, description = "Title not found")
    )
)]
pub async fn update_title(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    ApiPath(title_id): ApiPath<i64>,
    ApiJson(data): ApiJson<UpdateTitle>,
) -> AppResult<Json<Title>> {
    claims.require_admin()?;
    let title = state.services.titles.update(title_id, &data).await?;
    Ok(Json(title))
}

/// Delete a title with its reviews and their comments
#[utoipa::path(
    delete,
    path = "/titles/{title_id}",
    tag = "titles",
    security(("bearer_auth" = [])),
    params(("title_id" = i64, Path, description = "Title ID")),
    responses(
        (status = 204, description = "Title deleted"),
        (status = 404, description = "Title not found")
    )
)]
pub async fn delete_title(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    ApiPath(title_id): ApiPath<i64>,
) -> AppResult<StatusCode> {
    claims.require_admin()?;
    state.services.titles.delete(title_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
