use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    response::{Html, IntoResponse, Response},
    Form,
};
use minijinja::context;
use serde::Serialize;
use uuid::Uuid;

use crate::core::error::{AppError, WebError};
use crate::features::auth::guards::{RequireAdmin, RequireUser};
use crate::features::products::dtos::{ProductForm, ProductInput, ProductView};
use crate::features::products::services::ProductService;
use crate::shared::constants::EMPTY_PRODUCTS_MESSAGE;
use crate::shared::flash::{Flash, IncomingFlash};
use crate::shared::types::{Page, PaginationQuery};
use crate::shared::views;

const PRODUCTS_PATH: &str = "/products";
const CREATE_PATH: &str = "/product/create";

fn edit_path(id: Uuid) -> String {
    format!("/product/{}/edit", id)
}

/// Product id from the path. An id that is not a UUID names no product.
fn product_id(raw: &str) -> Result<Uuid, AppError> {
    Uuid::parse_str(raw)
        .map_err(|_| AppError::NotFound(format!("Product with id {} not found", raw)))
}

/// Pager state handed to the listing template
#[derive(Debug, Serialize)]
struct ProductPageView {
    items: Vec<ProductView>,
    page: i64,
    last_page: i64,
    total: i64,
    has_previous: bool,
    has_next: bool,
}

impl From<Page<ProductView>> for ProductPageView {
    fn from(page: Page<ProductView>) -> Self {
        Self {
            has_previous: page.has_previous(),
            has_next: page.has_next(),
            page: page.page,
            last_page: page.last_page,
            total: page.total,
            items: page.items,
        }
    }
}

/// Map a failed store/update to a redirect back to the form
fn back_on_invalid(back: String, input: &ProductInput) -> impl FnOnce(AppError) -> WebError + '_ {
    move |e| match e {
        AppError::Validation(errors) => WebError::Invalid {
            back,
            flash: Flash::invalid(errors, input.old_input()),
        },
        other => other.into(),
    }
}

/// `GET /products`: paginated listing for any signed-in user
pub async fn index(
    RequireUser(user): RequireUser,
    State(service): State<Arc<ProductService>>,
    Query(query): Query<PaginationQuery>,
    flash: IncomingFlash,
) -> Result<Response, WebError> {
    let page = service.list_page(&query).await?.map(ProductView::from);
    let flash = flash.into_inner();

    let html = views::render(
        "products/index.html",
        context! {
            user => user,
            products => ProductPageView::from(page),
            status => flash.status,
            empty_message => EMPTY_PRODUCTS_MESSAGE,
        },
    )?;

    Ok((IncomingFlash::clear(), Html(html)).into_response())
}

/// `GET /product/create`
pub async fn create_form(
    RequireAdmin(user): RequireAdmin,
    flash: IncomingFlash,
) -> Result<Response, WebError> {
    let flash = flash.into_inner();
    let values = ProductInput::new(
        flash.old.get("name").cloned().unwrap_or_default(),
        flash.old.get("price").cloned().unwrap_or_default(),
    )
    .old_input();

    let html = views::render(
        "products/form.html",
        context! {
            user => user,
            values => values,
            errors => flash.errors,
        },
    )?;

    Ok((IncomingFlash::clear(), Html(html)).into_response())
}

/// `POST /product/store`
pub async fn store(
    RequireAdmin(_user): RequireAdmin,
    State(service): State<Arc<ProductService>>,
    Form(form): Form<ProductForm>,
) -> Result<Response, WebError> {
    let input = ProductInput::from(form);
    service
        .create(input.clone())
        .await
        .map_err(back_on_invalid(CREATE_PATH.to_string(), &input))?;

    Ok(Flash::status("Product created.").redirect(PRODUCTS_PATH))
}

/// `GET /product/{id}/edit`: form prefilled with the stored values, or with
/// the rejected input after a failed update
pub async fn edit_form(
    RequireAdmin(user): RequireAdmin,
    State(service): State<Arc<ProductService>>,
    Path(id): Path<String>,
    flash: IncomingFlash,
) -> Result<Response, WebError> {
    let product = ProductView::from(service.get(product_id(&id)?).await?);
    let flash = flash.into_inner();

    let values = if flash.old.is_empty() {
        ProductInput::new(product.name.clone(), product.price.clone()).old_input()
    } else {
        flash.old
    };

    let html = views::render(
        "products/form.html",
        context! {
            user => user,
            product => product,
            values => values,
            errors => flash.errors,
        },
    )?;

    Ok((IncomingFlash::clear(), Html(html)).into_response())
}

/// `PUT /product/{id}`
pub async fn update(
    RequireAdmin(_user): RequireAdmin,
    State(service): State<Arc<ProductService>>,
    Path(id): Path<String>,
    Form(form): Form<ProductForm>,
) -> Result<Response, WebError> {
    apply_update(&service, product_id(&id)?, form).await
}

/// `DELETE /product/{id}`
pub async fn destroy(
    RequireAdmin(_user): RequireAdmin,
    State(service): State<Arc<ProductService>>,
    Path(id): Path<String>,
) -> Result<Response, WebError> {
    apply_delete(&service, product_id(&id)?).await
}

/// `POST /product/{id}` with `_method=PUT|PATCH|DELETE`, for HTML forms
pub async fn method_override(
    RequireAdmin(_user): RequireAdmin,
    State(service): State<Arc<ProductService>>,
    Path(id): Path<String>,
    Form(form): Form<ProductForm>,
) -> Result<Response, WebError> {
    let method = form
        .method
        .as_deref()
        .map(str::to_ascii_uppercase)
        .unwrap_or_default();

    let id = product_id(&id)?;
    match method.as_str() {
        "PUT" | "PATCH" => apply_update(&service, id, form).await,
        "DELETE" => apply_delete(&service, id).await,
        _ => Err(AppError::BadRequest(format!("Unsupported _method '{}'", method)).into()),
    }
}

async fn apply_update(service: &ProductService, id: Uuid, form: ProductForm) -> Result<Response, WebError> {
    let input = ProductInput::from(form);
    service
        .update(id, input.clone())
        .await
        .map_err(back_on_invalid(edit_path(id), &input))?;

    Ok(Flash::status("Product updated.").redirect(PRODUCTS_PATH))
}

async fn apply_delete(service: &ProductService, id: Uuid) -> Result<Response, WebError> {
    service.delete(id).await?;
    Ok(Flash::status("Product deleted.").redirect(PRODUCTS_PATH))
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;

    use crate::shared::constants::FLASH_COOKIE;
    use crate::shared::test_helpers::{location, set_cookie_value, with_session_and_flash, TestApp};

    #[tokio::test]
    async fn test_index_redirects_guest_to_login() {
        let app = TestApp::new().await;

        let response = app.server.get("/products").await;

        assert_eq!(response.status_code(), StatusCode::SEE_OTHER);
        assert_eq!(location(&response), "/login");
    }

    #[tokio::test]
    async fn test_index_shows_empty_state() {
        let app = TestApp::new().await;

        let response = app.user(app.server.get("/products")).await;

        assert_eq!(response.status_code(), StatusCode::OK);
        assert!(response.text().contains("No products found"));
    }

    #[tokio::test]
    async fn test_index_lists_products_with_eur_price() {
        let app = TestApp::new().await;
        app.create_product("Product 1", "100").await;

        let text = app.user(app.server.get("/products")).await.text();

        assert!(!text.contains("No products found"));
        assert!(text.contains("Product 1"));
        assert!(text.contains("100.00"));
        assert!(text.contains("98.00"));
    }

    #[tokio::test]
    async fn test_index_paginates_by_ten() {
        let app = TestApp::new().await;
        for i in 1..=11 {
            app.create_product(&format!("Item-{:02}", i), "10").await;
        }

        let first = app.user(app.server.get("/products")).await.text();
        assert!(first.contains("Item-10"));
        assert!(!first.contains("Item-11"));

        let second = app.user(app.server.get("/products?page=2")).await.text();
        assert!(second.contains("Item-11"));
        assert!(!second.contains("Item-01"));
    }

    #[tokio::test]
    async fn test_index_page_past_the_end_never_shows_empty_state() {
        let app = TestApp::new().await;
        app.create_product("Product 1", "100").await;

        for path in ["/products?page=5", "/products?page=9223372036854775807"] {
            let response = app.user(app.server.get(path)).await;
            assert_eq!(response.status_code(), StatusCode::OK, "{}", path);
            let text = response.text();
            assert!(text.contains("Product 1"), "{}", path);
            assert!(!text.contains("No products found"), "{}", path);
        }
    }

    #[tokio::test]
    async fn test_index_unparsable_page_falls_back_to_first() {
        let app = TestApp::new().await;
        app.create_product("Product 1", "100").await;

        let response = app.user(app.server.get("/products?page=abc")).await;

        assert_eq!(response.status_code(), StatusCode::OK);
        assert!(response.text().contains("Product 1"));
    }

    #[tokio::test]
    async fn test_create_link_only_for_admin() {
        let app = TestApp::new().await;

        let admin_page = app.admin(app.server.get("/products")).await.text();
        assert!(admin_page.contains("Create Product"));

        let user_page = app.user(app.server.get("/products")).await.text();
        assert!(!user_page.contains("Create Product"));
    }

    #[tokio::test]
    async fn test_admin_only_pages_forbid_regular_user() {
        let app = TestApp::new().await;
        let product = app.create_product("Product 1", "100").await;

        let create = app.user(app.server.get("/product/create")).await;
        assert_eq!(create.status_code(), StatusCode::FORBIDDEN);

        let edit = app
            .user(app.server.get(&format!("/product/{}/edit", product.id)))
            .await;
        assert_eq!(edit.status_code(), StatusCode::FORBIDDEN);

        let store = app
            .user(app.server.post("/product/store"))
            .form(&[("name", "Sneaky"), ("price", "1")])
            .await;
        assert_eq!(store.status_code(), StatusCode::FORBIDDEN);

        let delete = app
            .user(app.server.delete(&format!("/product/{}", product.id)))
            .await;
        assert_eq!(delete.status_code(), StatusCode::FORBIDDEN);
        assert_eq!(app.product_count().await, 1);
    }

    #[tokio::test]
    async fn test_admin_pages_redirect_guest_to_login() {
        let app = TestApp::new().await;
        let product = app.create_product("Product 1", "100").await;
        let path = format!("/product/{}", product.id);

        let responses = vec![
            app.server.get("/product/create").await,
            app.server.get(&format!("{}/edit", path)).await,
            app.server
                .post("/product/store")
                .form(&[("name", "Sneaky"), ("price", "1")])
                .await,
            app.server
                .put(&path)
                .form(&[("name", "Sneaky"), ("price", "1")])
                .await,
            app.server.delete(&path).await,
            app.server
                .post(&path)
                .form(&[("_method", "PUT"), ("name", "Sneaky"), ("price", "1")])
                .await,
            app.server.post(&path).form(&[("_method", "DELETE")]).await,
        ];

        for response in &responses {
            assert_eq!(response.status_code(), StatusCode::SEE_OTHER);
            assert_eq!(location(response), "/login");
        }

        let products = app.services.products.list_all().await.unwrap();
        assert_eq!(products, vec![product]);
    }

    #[tokio::test]
    async fn test_store_creates_product() {
        let app = TestApp::new().await;

        let response = app
            .admin(app.server.post("/product/store"))
            .form(&[("name", "Product 1"), ("price", "100")])
            .await;

        assert_eq!(response.status_code(), StatusCode::SEE_OTHER);
        assert_eq!(location(&response), "/products");

        let products = app.services.products.list_all().await.unwrap();
        assert_eq!(products.len(), 1);
        assert_eq!(products[0].name, "Product 1");
        assert_eq!(products[0].price.to_string(), "100.00");
    }

    #[tokio::test]
    async fn test_status_message_shown_once_after_store() {
        let app = TestApp::new().await;

        let response = app
            .admin(app.server.post("/product/store"))
            .form(&[("name", "Product 1"), ("price", "100")])
            .await;
        let flash = set_cookie_value(&response, FLASH_COOKIE).unwrap();

        let page = with_session_and_flash(app.server.get("/products"), &app.admin_token, &flash)
            .await;
        assert!(page.text().contains("Product created."));
        assert_eq!(set_cookie_value(&page, FLASH_COOKIE).as_deref(), Some(""));
    }

    #[tokio::test]
    async fn test_store_invalid_redirects_back_to_form() {
        let app = TestApp::new().await;

        let response = app
            .admin(app.server.post("/product/store"))
            .form(&[("name", ""), ("price", "abc")])
            .await;

        assert_eq!(response.status_code(), StatusCode::SEE_OTHER);
        assert_eq!(location(&response), "/product/create");
        assert_eq!(app.product_count().await, 0);

        let flash = set_cookie_value(&response, FLASH_COOKIE).unwrap();
        let form = with_session_and_flash(app.server.get("/product/create"), &app.admin_token, &flash)
            .await
            .text();
        assert!(form.contains("The name field is required."));
        assert!(form.contains("The price must be a number."));
        assert!(form.contains(r#"value="abc""#));
    }

    #[tokio::test]
    async fn test_edit_form_is_prefilled() {
        let app = TestApp::new().await;
        let product = app.create_product("Product 1", "100").await;

        let response = app
            .admin(app.server.get(&format!("/product/{}/edit", product.id)))
            .await;

        assert_eq!(response.status_code(), StatusCode::OK);
        let text = response.text();
        assert!(text.contains(r#"value="Product 1""#));
        assert!(text.contains(r#"value="100.00""#));
    }

    #[tokio::test]
    async fn test_edit_form_missing_product_is_not_found() {
        let app = TestApp::new().await;

        let response = app
            .admin(app.server.get(&format!("/product/{}/edit", uuid::Uuid::now_v7())))
            .await;

        assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_malformed_id_is_not_found() {
        let app = TestApp::new().await;
        app.create_product("Product 1", "100").await;

        let edit = app.admin(app.server.get("/product/abc/edit")).await;
        assert_eq!(edit.status_code(), StatusCode::NOT_FOUND);

        let update = app
            .admin(app.server.put("/product/abc"))
            .form(&[("name", "Product 2"), ("price", "200")])
            .await;
        assert_eq!(update.status_code(), StatusCode::NOT_FOUND);

        let delete = app.admin(app.server.delete("/product/123")).await;
        assert_eq!(delete.status_code(), StatusCode::NOT_FOUND);

        let overridden = app
            .admin(app.server.post("/product/123"))
            .form(&[("_method", "DELETE")])
            .await;
        assert_eq!(overridden.status_code(), StatusCode::NOT_FOUND);

        assert_eq!(app.product_count().await, 1);
    }

    #[tokio::test]
    async fn test_update_replaces_product() {
        let app = TestApp::new().await;
        let product = app.create_product("Product 1", "100").await;

        let response = app
            .admin(app.server.put(&format!("/product/{}", product.id)))
            .form(&[("name", "Product 2"), ("price", "200")])
            .await;

        assert_eq!(response.status_code(), StatusCode::SEE_OTHER);
        assert_eq!(location(&response), "/products");

        let products = app.services.products.list_all().await.unwrap();
        assert_eq!(products.len(), 1);
        assert_eq!(products[0].name, "Product 2");
        assert_eq!(products[0].price.to_string(), "200.00");
        assert!(!products.iter().any(|p| p.name == "Product 1"));
    }

    #[tokio::test]
    async fn test_update_with_empty_fields_redirects_back_with_errors() {
        let app = TestApp::new().await;
        let product = app.create_product("Product 1", "100").await;
        let edit_path = format!("/product/{}/edit", product.id);

        let response = app
            .admin(app.server.put(&format!("/product/{}", product.id)))
            .form(&[("name", ""), ("price", "")])
            .await;

        assert_eq!(response.status_code(), StatusCode::SEE_OTHER);
        assert_eq!(location(&response), edit_path);

        let flash = set_cookie_value(&response, FLASH_COOKIE).unwrap();
        let form = with_session_and_flash(app.server.get(&edit_path), &app.admin_token, &flash)
            .await
            .text();
        assert!(form.contains("The name field is required."));
        assert!(form.contains("The price field is required."));

        let unchanged = app.services.products.get(product.id).await.unwrap();
        assert_eq!(unchanged.name, "Product 1");
    }

    #[tokio::test]
    async fn test_delete_removes_product() {
        let app = TestApp::new().await;
        let product = app.create_product("Product 1", "100").await;
        let path = format!("/product/{}", product.id);

        let response = app.admin(app.server.delete(&path)).await;
        assert_eq!(response.status_code(), StatusCode::SEE_OTHER);
        assert_eq!(location(&response), "/products");
        assert_eq!(app.product_count().await, 0);

        let again = app.admin(app.server.delete(&path)).await;
        assert_eq!(again.status_code(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_method_override_dispatches_put_and_delete() {
        let app = TestApp::new().await;
        let product = app.create_product("Product 1", "100").await;
        let path = format!("/product/{}", product.id);

        let updated = app
            .admin(app.server.post(&path))
            .form(&[("_method", "PUT"), ("name", "Renamed"), ("price", "5.5")])
            .await;
        assert_eq!(updated.status_code(), StatusCode::SEE_OTHER);
        let stored = app.services.products.get(product.id).await.unwrap();
        assert_eq!(stored.name, "Renamed");
        assert_eq!(stored.price.to_string(), "5.50");

        let deleted = app
            .admin(app.server.post(&path))
            .form(&[("_method", "delete")])
            .await;
        assert_eq!(deleted.status_code(), StatusCode::SEE_OTHER);
        assert_eq!(app.product_count().await, 0);
    }

    #[tokio::test]
    async fn test_method_override_rejects_unknown_method() {
        let app = TestApp::new().await;
        let product = app.create_product("Product 1", "100").await;

        let response = app
            .admin(app.server.post(&format!("/product/{}", product.id)))
            .form(&[("_method", "PATCHY")])
            .await;

        assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(app.product_count().await, 1);
    }
}
