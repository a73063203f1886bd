//! In-memory application harness for HTTP-level tests.

use std::sync::Arc;
use std::time::Duration;

use axum::http::{header, HeaderValue};
use axum_test::{TestRequest, TestResponse, TestServer};

use crate::core::app::{build_router, AppServices};
use crate::core::config::SessionConfig;
use crate::features::auth::model::NewUser;
use crate::features::auth::repositories::InMemoryUserRepository;
use crate::features::auth::{AuthService, SessionService};
use crate::features::categories::repositories::InMemoryCategoryRepository;
use crate::features::categories::CategoryService;
use crate::features::products::dtos::ProductInput;
use crate::features::products::models::Product;
use crate::features::products::repositories::InMemoryProductRepository;
use crate::features::products::ProductService;
use crate::shared::constants::{FLASH_COOKIE, SESSION_COOKIE};

pub fn session_config() -> SessionConfig {
    SessionConfig {
        secret: "test-secret-test-secret-test-secret!".to_string(),
        ttl: Duration::from_secs(3600),
        cookie_secure: false,
    }
}

/// Full router over fresh in-memory stores, with one admin and one regular user
pub struct TestApp {
    pub server: TestServer,
    pub services: AppServices,
    pub admin_token: String,
    pub user_token: String,
}

impl TestApp {
    pub async fn new() -> Self {
        Self::build(false).await
    }

    /// Variant with `API_REQUIRE_AUTH` enabled
    pub async fn with_api_auth() -> Self {
        Self::build(true).await
    }

    async fn build(api_require_auth: bool) -> Self {
        let sessions = Arc::new(SessionService::new(session_config()));
        let services = AppServices {
            auth: Arc::new(AuthService::new(
                sessions,
                Arc::new(InMemoryUserRepository::new()),
            )),
            products: Arc::new(ProductService::new(Arc::new(InMemoryProductRepository::new()))),
            categories: Arc::new(CategoryService::new(Arc::new(
                InMemoryCategoryRepository::new(),
            ))),
        };

        let (_, admin_token) = services
            .auth
            .create_user_with_session(NewUser {
                name: "Admin".to_string(),
                email: "admin@example.com".to_string(),
                is_admin: true,
            })
            .await
            .expect("seed admin");
        let (_, user_token) = services
            .auth
            .create_user_with_session(NewUser {
                name: "Regular".to_string(),
                email: "user@example.com".to_string(),
                is_admin: false,
            })
            .await
            .expect("seed user");

        let server = TestServer::new(build_router(&services, api_require_auth))
            .expect("test server");

        Self {
            server,
            services,
            admin_token,
            user_token,
        }
    }

    /// Send `request` with the admin's session cookie
    pub fn admin(&self, request: TestRequest) -> TestRequest {
        with_session(request, &self.admin_token)
    }

    /// Send `request` with the regular user's session cookie
    pub fn user(&self, request: TestRequest) -> TestRequest {
        with_session(request, &self.user_token)
    }

    pub async fn create_product(&self, name: &str, price: &str) -> Product {
        self.services
            .products
            .create(ProductInput::new(name.to_string(), price.to_string()))
            .await
            .expect("create product")
    }

    pub async fn product_count(&self) -> usize {
        self.services.products.list_all().await.expect("list").len()
    }
}

/// Attach a session token as the session cookie
pub fn with_session(request: TestRequest, token: &str) -> TestRequest {
    let value = format!("{}={}", SESSION_COOKIE, token);
    request.add_header(
        header::COOKIE,
        HeaderValue::from_str(&value).expect("cookie header"),
    )
}

/// `Location` header of a redirect response
pub fn location(response: &TestResponse) -> String {
    response
        .header(header::LOCATION)
        .to_str()
        .expect("location header")
        .to_string()
}

/// Value a response sets for cookie `name`, if any
pub fn set_cookie_value(response: &TestResponse, name: &str) -> Option<String> {
    let prefix = format!("{}=", name);
    response
        .headers()
        .get_all(header::SET_COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .find_map(|v| v.strip_prefix(prefix.as_str()))
        .and_then(|rest| rest.split(';').next())
        .map(str::to_string)
}

/// Replay a flash cookie alongside a session
pub fn with_session_and_flash(request: TestRequest, token: &str, flash: &str) -> TestRequest {
    let value = format!("{}={}; {}={}", SESSION_COOKIE, token, FLASH_COOKIE, flash);
    request.add_header(
        header::COOKIE,
        HeaderValue::from_str(&value).expect("cookie header"),
    )
}
