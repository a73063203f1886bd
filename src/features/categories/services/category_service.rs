use std::sync::Arc;

use crate::core::error::Result;
use crate::features::categories::dtos::CategoryResponseDto;
use crate::features::categories::repositories::CategoryRepository;

/// Service for category operations
pub struct CategoryService {
    repo: Arc<dyn CategoryRepository>,
}

impl CategoryService {
    pub fn new(repo: Arc<dyn CategoryRepository>) -> Self {
        Self { repo }
    }

    /// List all categories ordered by name
    pub async fn list(&self) -> Result<Vec<CategoryResponseDto>> {
        let categories = self.repo.list_all().await?;
        Ok(categories.into_iter().map(|c| c.into()).collect())
    }

    pub async fn create(&self, name: &str) -> Result<CategoryResponseDto> {
        let category = self.repo.create(name).await?;
        tracing::info!(category_id = %category.id, "Category created");
        Ok(category.into())
    }
}
