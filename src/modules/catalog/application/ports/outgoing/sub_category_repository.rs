use async_trait::async_trait;
use uuid::Uuid;

use super::CatalogRepositoryError;
use crate::catalog::application::domain::entities::{SubCategory, SubCategoryWithCategory};

#[async_trait]
pub trait SubCategoryRepository: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<SubCategory>, CatalogRepositoryError>;

    async fn find_duplicate(
        &self,
        name: &str,
        url: &str,
        exclude_id: Uuid,
    ) -> Result<Option<SubCategory>, CatalogRepositoryError>;

    /// Most recently updated first, each with its parent category.
    async fn list(&self) -> Result<Vec<SubCategoryWithCategory>, CatalogRepositoryError>;

    async fn upsert(&self, sub_category: SubCategory) -> Result<SubCategory, CatalogRepositoryError>;

    async fn delete(&self, id: Uuid) -> Result<bool, CatalogRepositoryError>;
}
