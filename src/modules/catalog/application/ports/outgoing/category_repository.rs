use async_trait::async_trait;
use uuid::Uuid;

use super::CatalogRepositoryError;
use crate::catalog::application::domain::entities::Category;

#[async_trait]
pub trait CategoryRepository: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Category>, CatalogRepositoryError>;

    /// Another category (not `exclude_id`) holding `name` or `url`.
    async fn find_duplicate(
        &self,
        name: &str,
        url: &str,
        exclude_id: Uuid,
    ) -> Result<Option<Category>, CatalogRepositoryError>;

    /// Most recently updated first.
    async fn list(&self) -> Result<Vec<Category>, CatalogRepositoryError>;

    /// Inserts, or updates the row with the same id.
    async fn upsert(&self, category: Category) -> Result<Category, CatalogRepositoryError>;

    /// `false` when nothing was deleted.
    async fn delete(&self, id: Uuid) -> Result<bool, CatalogRepositoryError>;
}
