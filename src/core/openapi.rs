use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::features::categories::{dtos as categories_dtos, handlers as categories_handlers};
use crate::features::products::{dtos as products_dtos, handlers as products_handlers};
use crate::shared::types::ErrorResponse;

#[derive(OpenApi)]
#[openapi(
    paths(
        // Products
        products_handlers::list_products,
        products_handlers::create_product,
        // Categories
        categories_handlers::list_categories,
    ),
    components(
        schemas(
            ErrorResponse,
            products_dtos::ProductResponseDto,
            products_dtos::CreateProductDto,
            categories_dtos::CategoryResponseDto,
        )
    ),
    tags(
        (name = "products", description = "Product catalog"),
        (name = "categories", description = "Product categories (read-only)"),
    ),
    modifiers(&SecurityAddon),
    info(
        title = "Catalog API",
        version = "0.1.0",
        description = "API documentation for the product catalog",
    )
)]
pub struct ApiDoc;

/// Adds the session token as a Bearer security scheme
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "session_token",
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

/// Modifier to override OpenAPI info from config
pub struct SwaggerInfoModifier {
    pub title: String,
    pub version: String,
    pub description: String,
}

impl Modify for SwaggerInfoModifier {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        openapi.info.title = self.title.clone();
        openapi.info.version = self.version.clone();
        openapi.info.description = Some(self.description.clone());
    }
}
