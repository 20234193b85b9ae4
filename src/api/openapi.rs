//! OpenAPI documentation

use axum::Router;
use utoipa::{
    openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme},
    Modify, OpenApi,
};
use utoipa_swagger_ui::SwaggerUi;

use crate::api::{categories, comments, genres, health, reviews, titles};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "YaMDb API",
        version = "1.0.0",
        description = "Title reviews and ratings REST API",
        license(name = "AGPL-3.0", url = "https://www.gnu.org/licenses/agpl-3.0.html")
    ),
    servers(
        (url = "/api/v1", description = "API v1")
    ),
    paths(
        // Health
        health::health_check,
        health::readiness_check,
        // Categories
        categories::list_categories,
        categories::create_category,
        categories::delete_category,
        // Genres
        genres::list_genres,
        genres::create_genre,
        genres::delete_genre,
        // Titles
        titles::list_titles,
        titles::get_title,
        titles::create_title,
        titles::update_title,
        titles::delete_title,
        // Reviews
        reviews::list_reviews,
        reviews::get_review,
        reviews::create_review,
        reviews::update_review,
        reviews::delete_review,
        // Comments
        comments::list_comments,
        comments::get_comment,
        comments::create_comment,
        comments::update_comment,
        comments::delete_comment,
    ),
    components(
        schemas(
            crate::models::category::Category,
            crate::models::category::CreateCategory,
            crate::models::genre::Genre,
            crate::models::genre::CreateGenre,
            crate::models::title::Title,
            crate::models::title::CreateTitle,
            crate::models::title::UpdateTitle,
            crate::models::review::Review,
            crate::models::review::CreateReview,
            crate::models::review::UpdateReview,
            crate::models::comment::Comment,
            crate::models::comment::CreateComment,
            crate::models::comment::UpdateComment,
            health::HealthResponse,
            crate::error::ErrorResponse,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "categories", description = "Title categories"),
        (name = "genres", description = "Title genres"),
        (name = "titles", description = "Reviewable titles and their ratings"),
        (name = "reviews", description = "Reviews of a title"),
        (name = "comments", description = "Comments on a review")
    )
)]
pub struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}

/// Create the OpenAPI documentation router
pub fn create_openapi_router() -> Router {
    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
}
