//! YaMDb review aggregation server
//!
//! Users rate titles grouped by category and genre, post reviews with a
//! 0 to 10 score and comment on reviews. Each title's rating is the mean
//! score of its reviews, computed on read.

use std::sync::Arc;

use axum::Router;
use tower::Layer;
use tower_http::normalize_path::{NormalizePath, NormalizePathLayer};

pub mod api;
pub mod config;
pub mod error;
pub mod models;
pub mod repository;
pub mod services;
pub mod validation;

pub use config::AppConfig;
pub use error::{AppError, AppResult};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub services: Arc<services::Services>,
}

/// Full application service; `/titles/` and `/titles` route the same
pub fn app(state: AppState) -> NormalizePath<Router> {
    NormalizePathLayer::trim_trailing_slash().layer(api::create_router(state))
}
