use async_trait::async_trait;
use uuid::Uuid;

use crate::auth::application::domain::session::SessionUser;
use crate::catalog::application::domain::entities::{
    Category, SubCategory, SubCategoryWithCategory,
};
use crate::catalog::application::domain::forms::{CategoryForm, SubCategoryForm};
use crate::catalog::application::ports::outgoing::CatalogRepositoryError;
use crate::shared::validation::FieldError;

pub const ADMIN_REQUIRED: &str = "Unauthorized access: Admin privileges required for Entry";

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CatalogError {
    #[error("{message}")]
    Validation {
        message: String,
        fields: Vec<FieldError>,
    },

    #[error("{0}")]
    Forbidden(String),

    #[error("{0}")]
    Conflict(String),

    #[error("{0}")]
    NotFound(String),

    #[error("Repository error: {0}")]
    Repository(String),
}

impl From<CatalogRepositoryError> for CatalogError {
    fn from(e: CatalogRepositoryError) -> Self {
        CatalogError::Repository(e.to_string())
    }
}

#[async_trait]
pub trait CategoryUseCases: Send + Sync {
    async fn upsert(&self, actor: &SessionUser, form: CategoryForm) -> Result<Category, CatalogError>;

    async fn list(&self) -> Result<Vec<Category>, CatalogError>;

    async fn get(&self, id: Uuid) -> Result<Category, CatalogError>;

    async fn delete(&self, actor: &SessionUser, id: Uuid) -> Result<(), CatalogError>;
}

#[async_trait]
pub trait SubCategoryUseCases: Send + Sync {
    async fn upsert(
        &self,
        actor: &SessionUser,
        form: SubCategoryForm,
    ) -> Result<SubCategory, CatalogError>;

    async fn list(&self) -> Result<Vec<SubCategoryWithCategory>, CatalogError>;

    async fn get(&self, id: Uuid) -> Result<SubCategory, CatalogError>;

    async fn delete(&self, actor: &SessionUser, id: Uuid) -> Result<(), CatalogError>;
}
