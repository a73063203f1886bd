use std::sync::Arc;

use axum::{routing::get, Router};

use crate::features::categories::handlers;
use crate::features::categories::services::CategoryService;

/// HTML listing page (signed-in users)
pub fn web_routes(service: Arc<CategoryService>) -> Router {
    Router::new()
        .route("/categories", get(handlers::index))
        .with_state(service)
}

/// JSON API routes
///
/// Note: public unless `API_REQUIRE_AUTH` is set (see `core::middleware`)
pub fn api_routes(service: Arc<CategoryService>) -> Router {
    Router::new()
        .route("/api/categories", get(handlers::list_categories))
        .with_state(service)
}
