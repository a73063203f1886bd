use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};

use crate::features::products::handlers::{self, product_web_handler as web};
use crate::features::products::services::ProductService;

/// HTML routes. Guards on each handler decide between user and admin access.
pub fn web_routes(service: Arc<ProductService>) -> Router {
    Router::new()
        .route("/products", get(web::index))
        .route("/product/create", get(web::create_form))
        .route("/product/store", post(web::store))
        .route("/product/{id}/edit", get(web::edit_form))
        .route(
            "/product/{id}",
            post(web::method_override)
                .put(web::update)
                .delete(web::destroy),
        )
        .with_state(service)
}

/// JSON API routes
///
/// Note: public unless `API_REQUIRE_AUTH` is set (see `core::middleware`)
pub fn api_routes(service: Arc<ProductService>) -> Router {
    Router::new()
        .route(
            "/api/products",
            get(handlers::list_products).post(handlers::create_product),
        )
        .with_state(service)
}
