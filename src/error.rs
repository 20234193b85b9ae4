//! Error types for the YaMDb server

use std::collections::BTreeMap;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

/// Field name → list of messages, the shape of every validation error body
pub type FieldErrors = BTreeMap<String, Vec<String>>;

/// Key used for errors that concern the payload as a whole
pub const NON_FIELD_ERRORS: &str = "non_field_errors";

pub const DUPLICATE_REVIEW: &str = "Review to this title already exists";

// PostgreSQL SQLSTATE codes
const UNIQUE_VIOLATION: &str = "23505";
const FOREIGN_KEY_VIOLATION: &str = "23503";

/// Main application error type
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Authentication failed: {0}")]
    Authentication(String),

    #[error("Authorization failed: {0}")]
    Authorization(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {}", describe_fields(.0))]
    Validation(FieldErrors),

    #[error("Database error: {0}")]
    Database(sqlx::Error),

    #[error("Internal server error: {0}")]
    Internal(String),
}

impl AppError {
    /// Validation error on a single field
    pub fn field(field: &str, message: impl Into<String>) -> Self {
        let mut fields = FieldErrors::new();
        fields.insert(field.to_string(), vec![message.into()]);
        AppError::Validation(fields)
    }

    /// Validation error not tied to one field
    pub fn non_field(message: impl Into<String>) -> Self {
        Self::field(NON_FIELD_ERRORS, message)
    }
}

fn describe_fields(fields: &FieldErrors) -> String {
    fields
        .iter()
        .map(|(field, messages)| format!("{}: {}", field, messages.join(", ")))
        .collect::<Vec<_>>()
        .join("; ")
}

impl From<sqlx::Error> for AppError {
    fn from(err: sqlx::Error) -> Self {
        if let sqlx::Error::Database(db_err) = &err {
            let code = db_err.code();
            if let Some(translated) = classify_constraint_violation(code.as_deref(), db_err.constraint()) {
                return translated;
            }
        }
        AppError::Database(err)
    }
}

/// Translate a constraint violation raised by the store into the error a
/// request-time check would have produced. Unknown constraints are left alone.
pub fn classify_constraint_violation(code: Option<&str>, constraint: Option<&str>) -> Option<AppError> {
    let constraint = constraint?;
    match code? {
        UNIQUE_VIOLATION => match constraint {
            "uq_reviews_author_title" => Some(AppError::non_field(DUPLICATE_REVIEW)),
            "uq_categories_slug" => Some(AppError::field("slug", "Category with this slug already exists")),
            "uq_genres_slug" => Some(AppError::field("slug", "Genre with this slug already exists")),
            _ => None,
        },
        FOREIGN_KEY_VIOLATION => match constraint {
            "fk_reviews_title" | "fk_genre_title_title" => Some(AppError::NotFound("Title not found".to_string())),
            "fk_comments_review" => Some(AppError::NotFound("Review not found".to_string())),
            "fk_titles_category" => Some(AppError::field("category", "Category does not exist")),
            "fk_genre_title_genre" => Some(AppError::field("genre", "Genre does not exist")),
            "fk_reviews_author" | "fk_comments_author" => {
                Some(AppError::Authentication("Unknown user".to_string()))
            }
            _ => None,
        },
        _ => None,
    }
}

/// Error response body
#[derive(Serialize, utoipa::ToSchema)]
pub struct ErrorResponse {
    /// Machine-readable error code
    pub error: String,
    pub message: String,
    /// Field name → messages, present on validation errors
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fields: Option<FieldErrors>,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message, fields) = match self {
            AppError::Authentication(msg) => (StatusCode::UNAUTHORIZED, "NOT_AUTHENTICATED", msg, None),
            AppError::Authorization(msg) => (StatusCode::FORBIDDEN, "PERMISSION_DENIED", msg, None),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, "NOT_FOUND", msg, None),
            AppError::Validation(fields) => (
                StatusCode::BAD_REQUEST,
                "VALIDATION_ERROR",
                describe_fields(&fields),
                Some(fields),
            ),
            AppError::Database(e) => {
                tracing::error!(error = ?e, "Database error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "DATABASE_ERROR",
                    "Database error".to_string(),
                    None,
                )
            }
            AppError::Internal(msg) => {
                tracing::error!(error = %msg, "Internal error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "Internal server error".to_string(),
                    None,
                )
            }
        };

        let body = Json(ErrorResponse {
            error: code.to_string(),
            message,
            fields,
        });

        (status, body).into_response()
    }
}

/// Result type alias for application operations
pub type AppResult<T> = Result<T, AppError>;
