//! Genre endpoints

use axum::{
    extract::State,
    http::StatusCode,
    Json,
};

use crate::{
    error::AppResult,
    models::{
        genre::{CreateGenre, Genre},
        LookupQuery,
    },
};

use super::{ApiJson, ApiPath, ApiQuery, AuthenticatedUser, PaginatedResponse};

/// List genres
#[utoipa::path(
    get,
    path = "/genres",
    tag = "genres",
    params(
        ("search" = Option<String>, Query, description = "Search in name"),
        ("page" = Option<i64>, Query, description = "Page number (default: 1)"),
        ("per_page" = Option<i64>, Query, description = "Items per page (default: 20)")
    ),
    responses(
        (status = 200, description = "List of genres", body = PaginatedResponse<Genre>)
    )
)]
pub async fn list_genres(
    State(state): State<crate::AppState>,
    ApiQuery(query): ApiQuery<LookupQuery>,
) -> AppResult<Json<PaginatedResponse<Genre>>> {
    let (items, total) = state.services.genres.list(&query).await?;
    let page = query.page();

    Ok(Json(PaginatedResponse {
        items,
        total,
        page: page.page,
        per_page: page.per_page,
    }))
}

/// Create a genre
#[utoipa::path(
    post,
    path = "/genres",
    tag = "genres",
    security(("bearer_auth" = [])),
    request_body = CreateGenre,
    responses(
        (status = 201, description = "Genre created", body = Genre),
        (status = 400, description = "Invalid input or slug already taken", body = crate::error::ErrorResponse),
        (status = 403, description = "Administrator privileges required")
    )
)]
pub async fn create_genre(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    ApiJson(data): ApiJson<CreateGenre>,
) -> AppResult<(StatusCode, Json<Genre>)> {
    claims.require_admin()?;
    let genre = state.services.genres.create(&data).await?;
    Ok((StatusCode::CREATED, Json(genre)))
}

/// Delete a genre and its title links
#[utoipa::path(
    delete,
    path = "/genres/{slug}",
    tag = "genres",
    security(("bearer_auth" = [])),
    params(("slug" = String, Path, description = "Genre slug")),
    responses(
        (status = 204, description = "Genre deleted"),
        (status = 404, description = "Genre not found")
    )
)]
pub async fn delete_genre(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    ApiPath(slug): ApiPath<String>,
) -> AppResult<StatusCode> {
    claims.require_admin()?;
    state.services.genres.delete(&slug).await?;
    Ok(StatusCode::NO_CONTENT)
}
