use std::sync::Arc;

use axum::{
    extract::State,
    response::{Html, IntoResponse, Response},
    Json,
};
use minijinja::context;

use crate::core::error::{Result, WebError};
use crate::features::auth::guards::RequireUser;
use crate::features::categories::dtos::CategoryResponseDto;
use crate::features::categories::services::CategoryService;
use crate::shared::constants::EMPTY_CATEGORIES_MESSAGE;
use crate::shared::views;

/// List all categories
#[utoipa::path(
    get,
    path = "/api/categories",
    responses(
        (status = 200, description = "List of categories", body = Vec<CategoryResponseDto>),
    ),
    tag = "categories"
)]
pub async fn list_categories(
    State(service): State<Arc<CategoryService>>,
) -> Result<Json<Vec<CategoryResponseDto>>> {
    let categories = service.list().await?;
    Ok(Json(categories))
}

/// `GET /categories`: listing page for any signed-in user
pub async fn index(
    RequireUser(user): RequireUser,
    State(service): State<Arc<CategoryService>>,
) -> std::result::Result<Response, WebError> {
    let categories = service.list().await?;

    let html = views::render(
        "categories/index.html",
        context! {
            user => user,
            categories => categories,
            empty_message => EMPTY_CATEGORIES_MESSAGE,
        },
    )?;

    Ok(Html(html).into_response())
}
