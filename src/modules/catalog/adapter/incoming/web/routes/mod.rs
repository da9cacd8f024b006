mod categories;
mod sub_categories;

pub use categories::{
    delete_category_handler, get_categories_handler, get_category_handler,
    upsert_category_handler,
};
pub use categories::{__path_delete_category_handler, __path_get_categories_handler, __path_get_category_handler, __path_upsert_category_handler};
pub use sub_categories::{
    delete_sub_category_handler, get_sub_categories_handler, get_sub_category_handler,
    upsert_sub_category_handler,
};
pub use sub_categories::{__path_delete_sub_category_handler, __path_get_sub_categories_handler, __path_get_sub_category_handler, __path_upsert_sub_category_handler};

use actix_web::HttpResponse;
use tracing::error;

use crate::catalog::application::ports::incoming::CatalogError;
use crate::shared::api::ApiResponse;

pub(crate) fn catalog_error_response(e: CatalogError) -> HttpResponse {
    match e {
        CatalogError::Validation { message, fields } => {
            ApiResponse::validation_failed(&message, fields)
        }
        CatalogError::Forbidden(message) => ApiResponse::forbidden("ADMIN_REQUIRED", &message),
        CatalogError::Conflict(message) => ApiResponse::conflict("ALREADY_EXISTS", &message),
        CatalogError::NotFound(message) => ApiResponse::not_found("NOT_FOUND", &message),
        CatalogError::Repository(reason) => {
            error!(error = %reason, "Catalog repository failure");
            ApiResponse::internal_error()
        }
    }
}
