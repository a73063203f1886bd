use std::sync::Arc;

use axum::{extract::State, http::StatusCode, Json};

use crate::core::error::Result;
use crate::core::extractor::AppJson;
use crate::features::products::dtos::{CreateProductDto, ProductResponseDto};
use crate::features::products::services::ProductService;
use crate::shared::types::ErrorResponse;

/// List all products
///
/// Returns every product, unpaginated, oldest first.
#[utoipa::path(
    get,
    path = "/api/products",
    responses(
        (status = 200, description = "List of products", body = Vec<ProductResponseDto>),
    ),
    tag = "products"
)]
pub async fn list_products(
    State(service): State<Arc<ProductService>>,
) -> Result<Json<Vec<ProductResponseDto>>> {
    let products = service.list_all().await?;
    Ok(Json(products.into_iter().map(Into::into).collect()))
}

/// Create a product
#[utoipa::path(
    post,
    path = "/api/products",
    request_body = CreateProductDto,
    responses(
        (status = 201, description = "Product created", body = ProductResponseDto),
        (status = 400, description = "Malformed JSON body", body = ErrorResponse),
        (status = 422, description = "Validation error", body = ErrorResponse)
    ),
    tag = "products"
)]
pub async fn create_product(
    State(service): State<Arc<ProductService>>,
    AppJson(dto): AppJson<CreateProductDto>,
) -> Result<(StatusCode, Json<ProductResponseDto>)> {
    let product = service.create(dto.into()).await?;
    Ok((StatusCode::CREATED, Json(product.into())))
}
