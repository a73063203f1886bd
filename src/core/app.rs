use std::sync::Arc;

use axum::{
    http::StatusCode,
    middleware::{from_fn, from_fn_with_state},
    response::Redirect,
    routing::get,
    Router,
};

use crate::core::middleware;
use crate::features::auth::{routes as auth_routes, AuthService};
use crate::features::categories::{routes as categories_routes, CategoryService};
use crate::features::products::{routes as products_routes, ProductService};

/// Services shared by every route
#[derive(Clone)]
pub struct AppServices {
    pub auth: Arc<AuthService>,
    pub products: Arc<ProductService>,
    pub categories: Arc<CategoryService>,
}

async fn health_check() -> StatusCode {
    StatusCode::OK
}

async fn home() -> Redirect {
    Redirect::to("/products")
}

/// Application routes without the outer HTTP layers (CORS, tracing, request id)
pub fn build_router(services: &AppServices, api_require_auth: bool) -> Router {
    let mut api = Router::new()
        .merge(products_routes::api_routes(Arc::clone(&services.products)))
        .merge(categories_routes::api_routes(Arc::clone(&services.categories)));

    if api_require_auth {
        api = api.route_layer(from_fn(middleware::api_access_middleware));
    }

    Router::new()
        .route("/", get(home))
        .route("/health", get(health_check))
        .merge(auth_routes::routes(Arc::clone(&services.auth)))
        .merge(products_routes::web_routes(Arc::clone(&services.products)))
        .merge(categories_routes::web_routes(Arc::clone(&services.categories)))
        .merge(api)
        .layer(from_fn_with_state(
            Arc::clone(&services.auth),
            middleware::session_middleware,
        ))
}
