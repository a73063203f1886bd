mod core;
mod features;
mod shared;

use crate::core::app::{build_router, AppServices};
use crate::core::config::Config;
use crate::core::openapi::{ApiDoc, SwaggerInfoModifier};
use crate::core::{database, middleware};
use crate::features::auth::model::NewUser;
use crate::features::auth::repositories::{InMemoryUserRepository, PgUserRepository, UserRepository};
use crate::features::auth::{AuthService, SessionService};
use crate::features::categories::repositories::{
    CategoryRepository, InMemoryCategoryRepository, PgCategoryRepository,
};
use crate::features::categories::CategoryService;
use crate::features::products::repositories::{
    InMemoryProductRepository, PgProductRepository, ProductRepository,
};
use crate::features::products::ProductService;
use axum::{middleware::from_fn, Router};
use std::sync::Arc;
use tower_http::request_id::{PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::trace::{DefaultOnRequest, DefaultOnResponse, TraceLayer};
use tracing::Level;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use utoipa::Modify;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

/// Categories available when running without a database
const DEMO_CATEGORIES: &[&str] = &["Books", "Electronics", "Home & Garden"];

fn main() -> anyhow::Result<()> {
    // Build Tokio runtime with configurable worker threads
    let worker_threads = std::env::var("TOKIO_WORKER_THREADS")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or_else(|| {
            std::thread::available_parallelism()
                .map(|p| p.get())
                .unwrap_or(4)
        });

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .worker_threads(worker_threads)
        .max_blocking_threads(worker_threads * 4)
        .enable_all()
        .build()?;

    runtime.block_on(async_main(worker_threads))
}

struct Stores {
    users: Arc<dyn UserRepository>,
    products: Arc<dyn ProductRepository>,
    categories: Arc<dyn CategoryRepository>,
}

async fn init_stores(config: &Config) -> anyhow::Result<Stores> {
    let Some(url) = config.database.url.as_deref() else {
        tracing::warn!("DATABASE_URL not set, using in-memory stores (data is lost on exit)");
        return Ok(Stores {
            users: Arc::new(InMemoryUserRepository::new()),
            products: Arc::new(InMemoryProductRepository::new()),
            categories: Arc::new(InMemoryCategoryRepository::new()),
        });
    };

    let pool = database::create_pool(&config.database, url).await?;
    tracing::info!("Database connection pool created");

    tracing::info!("Running database migrations...");
    database::run_migrations(&pool)
        .await
        .map_err(|e| anyhow::anyhow!("Migration failed: {}", e))?;
    tracing::info!("Database migrations completed successfully");

    Ok(Stores {
        users: Arc::new(PgUserRepository::new(pool.clone())),
        products: Arc::new(PgProductRepository::new(pool.clone())),
        categories: Arc::new(PgCategoryRepository::new(pool)),
    })
}

/// Seed a demo admin and a few categories into the in-memory stores
async fn seed_demo(services: &AppServices) -> anyhow::Result<()> {
    let (admin, token) = services
        .auth
        .create_user_with_session(NewUser {
            name: "Demo Admin".to_string(),
            email: "admin@example.com".to_string(),
            is_admin: true,
        })
        .await?;

    for name in DEMO_CATEGORIES {
        services.categories.create(name).await?;
    }

    tracing::info!(user_id = %admin.id, "Demo admin seeded, sign in at /login with token: {}", token);
    Ok(())
}

async fn async_main(worker_threads: usize) -> anyhow::Result<()> {
    // Load .env file BEFORE initializing logger so RUST_LOG is available
    let _ = dotenvy::dotenv();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = Config::from_env().map_err(|e| anyhow::anyhow!(e))?;

    let available_cpus = std::thread::available_parallelism()
        .map(|p| p.get())
        .unwrap_or(1);
    tracing::info!(
        "System info: available_cpus={}, tokio_worker_threads={}, pid={}",
        available_cpus,
        worker_threads,
        std::process::id()
    );

    tracing::info!("Configuration loaded successfully");

    let in_memory = config.database.url.is_none();
    let stores = init_stores(&config).await?;

    let session_service = Arc::new(SessionService::new(config.session.clone()));
    let services = AppServices {
        auth: Arc::new(AuthService::new(session_service, stores.users)),
        products: Arc::new(ProductService::new(stores.products)),
        categories: Arc::new(CategoryService::new(stores.categories)),
    };
    tracing::info!("Catalog services initialized");

    if in_memory {
        seed_demo(&services).await?;
    }

    // Build application router with dynamic swagger config
    let swagger_modifier = SwaggerInfoModifier {
        title: config.swagger.title.clone(),
        version: config.swagger.version.clone(),
        description: config.swagger.description.clone(),
    };

    let mut openapi = ApiDoc::openapi();
    swagger_modifier.modify(&mut openapi);

    let swagger = if let Some(credentials) = config.swagger.credentials() {
        tracing::info!("Swagger UI basic auth enabled");
        Router::new()
            .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", openapi))
            .layer(from_fn(middleware::basic_auth_middleware(Arc::new(
                credentials,
            ))))
    } else {
        tracing::info!("Swagger UI basic auth disabled (no credentials configured)");
        Router::new().merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", openapi))
    };

    if config.app.api_require_auth {
        tracing::info!("API authentication enforced (writes require admin)");
    }

    let app = build_router(&services, config.app.api_require_auth)
        .merge(swagger)
        .layer(middleware::cors_layer(config.app.cors_allowed_origins.clone()))
        // Propagate X-Request-Id to response headers
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(middleware::MakeSpanWithRequestId)
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        // Generate X-Request-Id using UUID v7 (or use client-provided one)
        .layer(SetRequestIdLayer::x_request_id(middleware::MakeRequestUuid));

    // Start server
    let addr = config.app.server_address();
    let socket_addr: std::net::SocketAddr = addr
        .parse()
        .map_err(|e| anyhow::anyhow!("Invalid address: {}", e))?;

    let socket = socket2::Socket::new(
        socket2::Domain::for_address(socket_addr),
        socket2::Type::STREAM,
        Some(socket2::Protocol::TCP),
    )?;

    socket.set_reuse_address(true)?;
    #[cfg(unix)]
    socket.set_reuse_port(true)?;
    socket.set_nodelay(true)?;

    #[cfg(target_os = "linux")]
    {
        let keepalive = socket2::TcpKeepalive::new()
            .with_time(std::time::Duration::from_secs(60))
            .with_interval(std::time::Duration::from_secs(10))
            .with_retries(3);
        socket.set_tcp_keepalive(&keepalive)?;
    }
    #[cfg(not(target_os = "linux"))]
    {
        let keepalive = socket2::TcpKeepalive::new().with_time(std::time::Duration::from_secs(60));
        socket.set_tcp_keepalive(&keepalive)?;
    }

    socket.set_nonblocking(true)?;
    socket.bind(&socket_addr.into())?;
    socket.listen(1024)?;

    let listener = tokio::net::TcpListener::from_std(socket.into())?;
    tracing::info!("Server listening on {}", format!("http://{}", addr));
    tracing::info!(
        "Swagger UI available at {}",
        format!("http://{}/swagger-ui/", addr)
    );

    axum::serve(listener, app).await?;

    Ok(())
}
