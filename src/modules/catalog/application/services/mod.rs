mod category_service;
mod sub_category_service;

pub use category_service::CategoryService;
pub use sub_category_service::SubCategoryService;

use crate::auth::application::domain::session::SessionUser;
use crate::catalog::application::ports::incoming::use_cases::{CatalogError, ADMIN_REQUIRED};

fn require_admin(actor: &SessionUser) -> Result<(), CatalogError> {
    if actor.is_admin() {
        Ok(())
    } else {
        tracing::warn!(user_id = %actor.id, "Catalog change refused for non-admin");
        Err(CatalogError::Forbidden(ADMIN_REQUIRED.to_string()))
    }
}

fn invalid(fields: Vec<crate::shared::validation::FieldError>) -> CatalogError {
    CatalogError::Validation {
        message: "Invalid fields".to_string(),
        fields,
    }
}
