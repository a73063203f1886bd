use std::sync::Arc;

use uuid::Uuid;

use crate::core::error::{AppError, Result};
use crate::features::products::dtos::ProductInput;
use crate::features::products::models::Product;
use crate::features::products::repositories::ProductRepository;
use crate::shared::types::{Page, PaginationQuery};

/// Service for product operations
pub struct ProductService {
    repo: Arc<dyn ProductRepository>,
}

fn not_found(id: Uuid) -> AppError {
    AppError::NotFound(format!("Product with id {} not found", id))
}

impl ProductService {
    pub fn new(repo: Arc<dyn ProductRepository>) -> Self {
        Self { repo }
    }

    /// One page of products, oldest first. Pages past the end show the last page.
    pub async fn list_page(&self, query: &PaginationQuery) -> Result<Page<Product>> {
        let total = self.repo.count().await?;
        let query = query.within(total);
        let items = self.repo.paginate(query.offset(), query.limit()).await?;
        Ok(Page::new(items, &query, total))
    }

    /// All products, oldest first
    pub async fn list_all(&self) -> Result<Vec<Product>> {
        self.repo.list_all().await
    }

    pub async fn get(&self, id: Uuid) -> Result<Product> {
        self.repo.find_by_id(id).await?.ok_or_else(|| not_found(id))
    }

    pub async fn create(&self, input: ProductInput) -> Result<Product> {
        let draft = input.into_draft().map_err(AppError::Validation)?;
        let product = self.repo.create(draft).await?;
        tracing::info!(product_id = %product.id, "Product created");
        Ok(product)
    }

    /// Replace name and price of an existing product
    pub async fn update(&self, id: Uuid, input: ProductInput) -> Result<Product> {
        let draft = input.into_draft().map_err(AppError::Validation)?;
        let product = self
            .repo
            .update(id, draft)
            .await?
            .ok_or_else(|| not_found(id))?;
        tracing::info!(product_id = %product.id, "Product updated");
        Ok(product)
    }

    pub async fn delete(&self, id: Uuid) -> Result<()> {
        if !self.repo.delete(id).await? {
            return Err(not_found(id));
        }
        tracing::info!(product_id = %id, "Product deleted");
        Ok(())
    }
}
