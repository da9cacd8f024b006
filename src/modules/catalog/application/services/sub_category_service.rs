use async_trait::async_trait;
use chrono::Utc;
use tracing::info;
use uuid::Uuid;

use super::{invalid, require_admin};
use crate::auth::application::domain::session::SessionUser;
use crate::catalog::application::domain::entities::{SubCategory, SubCategoryWithCategory};
use crate::catalog::application::domain::forms::SubCategoryForm;
use crate::catalog::application::ports::incoming::{CatalogError, SubCategoryUseCases};
use crate::catalog::application::ports::outgoing::{
    CatalogRepositoryError, CategoryRepository, SubCategoryRepository,
};
use crate::shared::validation::FieldError;

const NAME_TAKEN: &str = "SubCategory with this name already exists";
const URL_TAKEN: &str = "SubCategory with this URL already exists";

#[derive(Debug, Clone)]
pub struct SubCategoryService<S, C>
where
    S: SubCategoryRepository + Send + Sync,
    C: CategoryRepository + Send + Sync,
{
    repository: S,
    categories: C,
}

impl<S, C> SubCategoryService<S, C>
where
    S: SubCategoryRepository + Send + Sync,
    C: CategoryRepository + Send + Sync,
{
    pub fn new(repository: S, categories: C) -> Self {
        Self {
            repository,
            categories,
        }
    }
}

#[async_trait]
impl<S, C> SubCategoryUseCases for SubCategoryService<S, C>
where
    S: SubCategoryRepository + Send + Sync,
    C: CategoryRepository + Send + Sync,
{
    async fn upsert(
        &self,
        actor: &SessionUser,
        form: SubCategoryForm,
    ) -> Result<SubCategory, CatalogError> {
        require_admin(actor)?;
        form.validate().map_err(invalid)?;
        let Some(category_id) = form.category_uuid() else {
            return Err(invalid(vec![FieldError::new(
                "categoryId",
                "Category id must be a valid UUID",
            )]));
        };

        if self.categories.find_by_id(category_id).await?.is_none() {
            return Err(CatalogError::NotFound("Category not found".to_string()));
        }

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
            .map(|s| s.created_at)
            .unwrap_or(now);

        let image = form.image_url();
        let saved = self
            .repository
            .upsert(SubCategory {
                id,
                name: form.name,
                image,
                url: form.url,
                featured: form.featured,
                category_id,
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

        info!(sub_category_id = %saved.id, category_id = %category_id, "SubCategory saved");
        Ok(saved)
    }

    async fn list(&self) -> Result<Vec<SubCategoryWithCategory>, CatalogError> {
        Ok(self.repository.list().await?)
    }

    async fn get(&self, id: Uuid) -> Result<SubCategory, CatalogError> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| CatalogError::NotFound("SubCategory not found".to_string()))
    }

    async fn delete(&self, actor: &SessionUser, id: Uuid) -> Result<(), CatalogError> {
        require_admin(actor)?;

        if !self.repository.delete(id).await? {
            return Err(CatalogError::NotFound("SubCategory not found".to_string()));
        }

        info!(sub_category_id = %id, admin_id = %actor.id, "SubCategory deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::application::domain::entities::Category;
    use crate::catalog::application::domain::forms::ImageRef;
    use crate::tests::support::in_memory::{InMemoryCategories, InMemorySubCategories};
    use crate::tests::support::stubs::{admin_user, plain_user};

    struct Fixture {
        categories: InMemoryCategories,
        subs: InMemorySubCategories,
        service: SubCategoryService<InMemorySubCategories, InMemoryCategories>,
    }

    fn fixture() -> Fixture {
        let categories = InMemoryCategories::default();
        let subs = InMemorySubCategories::with_categories(categories.clone());
        Fixture {
            service: SubCategoryService::new(subs.clone(), categories.clone()),
            categories,
            subs,
        }
    }

    fn parent(f: &Fixture) -> Category {
        let now = Utc::now();
        let category = Category {
            id: Uuid::new_v4(),
            name: "Electronics".to_string(),
            image: "img".to_string(),
            url: "electronics".to_string(),
            featured: false,
            created_at: now,
            updated_at: now,
        };
        f.categories.insert(category.clone());
        category
    }

    fn form(category_id: Uuid, name: &str, url: &str) -> SubCategoryForm {
        SubCategoryForm {
            id: None,
            name: name.to_string(),
            image: vec![ImageRef {
                url: "https://cdn/sub.png".to_string(),
            }],
            url: url.to_string(),
            featured: false,
            category_id: category_id.to_string(),
        }
    }

    #[tokio::test]
    async fn created_sub_category_lists_with_parent() {
        let f = fixture();
        let category = parent(&f);

        let saved = f
            .service
            .upsert(&admin_user(), form(category.id, "Laptops", "laptops"))
            .await
            .unwrap();
        assert_eq!(saved.category_id, category.id);

        let listed = f.service.list().await.unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].sub_category.id, saved.id);
        assert_eq!(listed[0].category.as_ref().map(|c| c.id), Some(category.id));
    }

    #[tokio::test]
    async fn unknown_parent_is_not_found() {
        let f = fixture();

        let result = f
            .service
            .upsert(&admin_user(), form(Uuid::new_v4(), "Laptops", "laptops"))
            .await;

        assert_eq!(result, Err(CatalogError::NotFound("Category not found".to_string())));
        assert_eq!(f.subs.len(), 0);
    }

    #[tokio::test]
    async fn conflicts_use_sub_category_wording() {
        let f = fixture();
        let category = parent(&f);
        let admin = admin_user();
        f.service
            .upsert(&admin, form(category.id, "Laptops", "laptops"))
            .await
            .unwrap();

        let result = f
            .service
            .upsert(&admin, form(category.id, "Notebooks", "laptops"))
            .await;
        assert_eq!(result, Err(CatalogError::Conflict(URL_TAKEN.to_string())));
    }

    #[tokio::test]
    async fn only_admins_delete() {
        let f = fixture();
        let category = parent(&f);
        let saved = f
            .service
            .upsert(&admin_user(), form(category.id, "Laptops", "laptops"))
            .await
            .unwrap();

        assert!(matches!(
            f.service.delete(&plain_user(), saved.id).await,
            Err(CatalogError::Forbidden(_))
        ));
        assert_eq!(f.service.delete(&admin_user(), saved.id).await, Ok(()));
        assert!(matches!(f.service.get(saved.id).await, Err(CatalogError::NotFound(_))));
    }
}
