use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};

use crate::features::auth::{handlers, services::AuthService};

/// Create routes for sign-in and logout (public)
pub fn routes(service: Arc<AuthService>) -> Router {
    Router::new()
        .route("/login", get(handlers::login_page).post(handlers::login))
        .route("/logout", post(handlers::logout))
        .with_state(service)
}
