//! Request validation helpers
//!
//! Field-level rules are declared on the payload types with `validator`
//! derives. Rules that depend on the store, the clock or the request itself
//! (who is writing, which title the path points at) are plain functions here,
//! fed through an explicit [`RequestContext`].

use chrono::{Datelike, Utc};
use once_cell::sync::Lazy;
use regex::Regex;
use validator::{Validate, ValidationErrors};

use crate::error::{AppError, AppResult, FieldErrors, DUPLICATE_REVIEW};

pub static SLUG_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[-a-zA-Z0-9_]+$").expect("valid slug pattern"));

/// What a write request is doing to its target
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteAction {
    Create,
    Update,
    Delete,
}

/// Everything about the current request a validation rule may look at
#[derive(Debug, Clone, Copy)]
pub struct RequestContext {
    pub author_id: i64,
    pub title_id: i64,
    pub review_id: Option<i64>,
    pub action: WriteAction,
}

impl RequestContext {
    pub fn for_title(author_id: i64, title_id: i64, action: WriteAction) -> Self {
        Self {
            author_id,
            title_id,
            review_id: None,
            action,
        }
    }

    pub fn for_review(author_id: i64, title_id: i64, review_id: i64, action: WriteAction) -> Self {
        Self {
            author_id,
            title_id,
            review_id: Some(review_id),
            action,
        }
    }
}

/// Convert `validator` errors into the field map used in error bodies
pub fn field_errors(errors: &ValidationErrors) -> FieldErrors {
    let mut fields = FieldErrors::new();
    for (field, errs) in errors.field_errors() {
        let messages = fields.entry(field.to_string()).or_default();
        for err in errs.iter() {
            let message = match &err.message {
                Some(message) => message.to_string(),
                None => format!("Invalid value ({})", err.code),
            };
            messages.push(message);
        }
    }
    fields
}

/// Run the declared field rules of a payload, merging in any extra errors
/// collected by the caller
pub fn check<T: Validate>(payload: &T, extra: FieldErrors) -> AppResult<()> {
    let mut fields = match payload.validate() {
        Ok(()) => FieldErrors::new(),
        Err(errors) => field_errors(&errors),
    };
    for (field, messages) in extra {
        fields.entry(field).or_default().extend(messages);
    }
    if fields.is_empty() {
        Ok(())
    } else {
        Err(AppError::Validation(fields))
    }
}

pub fn current_year() -> i32 {
    Utc::now().year()
}

/// A release year may not be in the future
pub fn validate_year(year: i32, current_year: i32) -> Result<(), String> {
    if year > current_year {
        Err("Release year cannot be greater than the current year".to_string())
    } else {
        Ok(())
    }
}

/// At most one review per author and title. Only creation can move a pair
/// into the has-review state, so only creation is checked.
pub fn validate_review_uniqueness(ctx: &RequestContext, review_exists: bool) -> AppResult<()> {
    if ctx.action == WriteAction::Create && review_exists {
        return Err(AppError::non_field(DUPLICATE_REVIEW));
    }
    Ok(())
}

/// Record one error message on a field
pub fn push_error(fields: &mut FieldErrors, field: &str, message: impl Into<String>) {
    fields.entry(field.to_string()).or_default().push(message.into());
}
