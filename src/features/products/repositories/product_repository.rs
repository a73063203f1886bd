use async_trait::async_trait;
use chrono::Utc;
use sqlx::PgPool;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::core::error::{AppError, Result};
use crate::features::products::models::{Product, ProductDraft};

/// Persistence for products.
///
/// Listings are in insertion order. Each write is a single atomic operation.
#[async_trait]
pub trait ProductRepository: Send + Sync {
    async fn list_all(&self) -> Result<Vec<Product>>;
    async fn paginate(&self, offset: i64, limit: i64) -> Result<Vec<Product>>;
    async fn count(&self) -> Result<i64>;
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Product>>;
    async fn create(&self, draft: ProductDraft) -> Result<Product>;
    /// Replace name and price. `None` if the product does not exist.
    async fn update(&self, id: Uuid, draft: ProductDraft) -> Result<Option<Product>>;
    /// `false` if the product does not exist
    async fn delete(&self, id: Uuid) -> Result<bool>;
}

/// Postgres-backed product store
pub struct PgProductRepository {
    pool: PgPool,
}

impl PgProductRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ProductRepository for PgProductRepository {
    async fn list_all(&self) -> Result<Vec<Product>> {
        sqlx::query_as::<_, Product>(
            r#"
            SELECT id, name, price, created_at, updated_at
            FROM products
            ORDER BY created_at, id
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to list products: {:?}", e);
            AppError::Database(e)
        })
    }

    async fn paginate(&self, offset: i64, limit: i64) -> Result<Vec<Product>> {
        sqlx::query_as::<_, Product>(
            r#"
            SELECT id, name, price, created_at, updated_at
            FROM products
            ORDER BY created_at, id
            LIMIT $1 OFFSET $2
            "#,
        )
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to paginate products: {:?}", e);
            AppError::Database(e)
        })
    }

    async fn count(&self) -> Result<i64> {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM products")
            .fetch_one(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Product>> {
        sqlx::query_as::<_, Product>(
            r#"
            SELECT id, name, price, created_at, updated_at
            FROM products
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to get product by id: {:?}", e);
            AppError::Database(e)
        })
    }

    async fn create(&self, draft: ProductDraft) -> Result<Product> {
        sqlx::query_as::<_, Product>(
            r#"
            INSERT INTO products (id, name, price)
            VALUES ($1, $2, $3)
            RETURNING id, name, price, created_at, updated_at
            "#,
        )
        .bind(Uuid::now_v7())
        .bind(&draft.name)
        .bind(draft.price)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to create product: {:?}", e);
            AppError::Database(e)
        })
    }

    async fn update(&self, id: Uuid, draft: ProductDraft) -> Result<Option<Product>> {
        sqlx::query_as::<_, Product>(
            r#"
            UPDATE products
            SET name = $1,
                price = $2,
                updated_at = NOW()
            WHERE id = $3
            RETURNING id, name, price, created_at, updated_at
            "#,
        )
        .bind(&draft.name)
        .bind(draft.price)
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to update product: {:?}", e);
            AppError::Database(e)
        })
    }

    async fn delete(&self, id: Uuid) -> Result<bool> {
        let result = sqlx::query("DELETE FROM products WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to delete product: {:?}", e);
                AppError::Database(e)
            })?;

        Ok(result.rows_affected() > 0)
    }
}

/// In-memory product store, used when no database is configured and in tests
#[derive(Default)]
pub struct InMemoryProductRepository {
    products: RwLock<Vec<Product>>,
}

impl InMemoryProductRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ProductRepository for InMemoryProductRepository {
    async fn list_all(&self) -> Result<Vec<Product>> {
        Ok(self.products.read().await.clone())
    }

    async fn paginate(&self, offset: i64, limit: i64) -> Result<Vec<Product>> {
        let products = self.products.read().await;
        Ok(products
            .iter()
            .skip(offset.max(0) as usize)
            .take(limit.max(0) as usize)
            .cloned()
            .collect())
    }

    async fn count(&self) -> Result<i64> {
        Ok(self.products.read().await.len() as i64)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Product>> {
        let products = self.products.read().await;
        Ok(products.iter().find(|p| p.id == id).cloned())
    }

    async fn create(&self, draft: ProductDraft) -> Result<Product> {
        let now = Utc::now();
        let product = Product {
            id: Uuid::now_v7(),
            name: draft.name,
            price: draft.price,
            created_at: now,
            updated_at: now,
        };
        self.products.write().await.push(product.clone());
        Ok(product)
    }

    async fn update(&self, id: Uuid, draft: ProductDraft) -> Result<Option<Product>> {
        let mut products = self.products.write().await;
        Ok(products.iter_mut().find(|p| p.id == id).map(|product| {
            product.name = draft.name;
            product.price = draft.price;
            product.updated_at = Utc::now();
            product.clone()
        }))
    }

    async fn delete(&self, id: Uuid) -> Result<bool> {
        let mut products = self.products.write().await;
        let before = products.len();
        products.retain(|p| p.id != id);
        Ok(products.len() < before)
    }
}
