use async_trait::async_trait;
use chrono::Utc;
use tracing::info;
use uuid::Uuid;

use super::{invalid, require_admin};
use crate::auth::application::domain::session::SessionUser;
use crate::catalog::application::domain::entities::Category;
use crate::catalog::application::domain::forms::CategoryForm;
use crate::catalog::application::ports::incoming::{CatalogError, CategoryUseCases};
use crate::catalog::application::ports::outgoing::{CatalogRepositoryError, CategoryRepository};

const NAME_TAKEN: &str = "Category with this name already exists";
const URL_TAKEN: &str = "Category with this URL already exists";

#[derive(Debug, Clone)]
pub struct CategoryService<R>
where
    R: CategoryRepository + Send + Sync,
{
    repository: R,
}

impl<R> CategoryService<R>
where
    R: CategoryRepository + Send + Sync,
{
    pub fn new(repository: R) -> Self {
        Self { repository }
    }
}

#[async_trait]
impl<R> CategoryUseCases for CategoryService<R>
where
    R: CategoryRepository + Send + Sync,
{
    async fn upsert(&self, actor: &SessionUser, form: CategoryForm) -> Result<Category, CatalogError> {
        require_admin(actor)?;
        form.validate().map_err(invalid)?;

        let id = form.id.unwrap_or_else(Uuid::new_v4);
        if let Some(existing) = self
            .repository
            .find_duplicate(&form.name, &form.url, id)
            .await?
        {
            let message = if existing.name == form.name { NAME_TAKEN } else { URL_TAKEN };
            return Err(CatalogError::Conflict(message.to_string()));
        }

        let now = Utc::now();
        let created_at = self
            .repository
            .find_by_id(id)
            .await?
            .map(|c| c.created_at)
            .unwrap_or(now);

        let image = form.image_url();
        let saved = self
            .repository
            .upsert(Category {
                id,
                name: form.name,
                image,
                url: form.url,
                featured: form.featured,
                created_at,
                updated_at: now,
            })
            .await
            .map_err(|e| match e {
                CatalogRepositoryError::Duplicate(column) if column == "url" => {
                    CatalogError::Conflict(URL_TAKEN.to_string())
                }
                CatalogRepositoryError::Duplicate(_) => CatalogError::Conflict(NAME_TAKEN.to_string()),
                other => other.into(),
            })?;

        info!(category_id = %saved.id, admin_id = %actor.id, "Category saved");
        Ok(saved)
    }

    async fn list(&self) -> Result<Vec<Category>, CatalogError> {
        Ok(self.repository.list().await?)
    }

    async fn get(&self, id: Uuid) -> Result<Category, CatalogError> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| CatalogError::NotFound("Category not found".to_string()))
    }

    async fn delete(&self, actor: &SessionUser, id: Uuid) -> Result<(), CatalogError> {
        require_admin(actor)?;

        if !self.repository.delete(id).await? {
            return Err(CatalogError::NotFound("Category not found".to_string()));
        }

        info!(category_id = %id, admin_id = %actor.id, "Category deleted");
        Ok(())
    }
}
