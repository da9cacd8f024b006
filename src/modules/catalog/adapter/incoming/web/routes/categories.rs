use actix_web::{delete, get, post, web, Responder};
use uuid::Uuid;

use super::catalog_error_response;
use crate::api::schemas::ErrorResponse;
use crate::auth::adapter::incoming::web::extractors::AdminUser;
use crate::auth::application::domain::session::SessionUser;
use crate::catalog::application::domain::entities::Category;
use crate::catalog::application::domain::forms::CategoryForm;
use crate::shared::api::ApiResponse;
use crate::AppState;

/// Create or update a category
///
/// A form carrying a known `id` updates that category; otherwise a new one is created.
#[utoipa::path(
    post,
    path = "/api/categories",
    tag = "catalog",
    request_body = CategoryForm,
    responses(
        (status = 200, description = "Category saved", body = Category),
        (status = 400, description = "Invalid fields", body = ErrorResponse),
        (status = 401, description = "Not signed in", body = ErrorResponse),
        (status = 403, description = "Admin privileges required", body = ErrorResponse),
        (status = 404, description = "Category to update does not exist", body = ErrorResponse),
        (status = 409, description = "Name or URL already taken", body = ErrorResponse),
    ),
    security(("bearer_auth" = []))
)]
#[post("/api/categories")]
pub async fn upsert_category_handler(
    AdminUser(admin): AdminUser,
    form: web::Json<CategoryForm>,
    data: web::Data<AppState>,
) -> impl Responder {
    match data.catalog.categories.upsert(&admin, form.into_inner()).await {
        Ok(category) => ApiResponse::success(category),
        Err(e) => catalog_error_response(e),
    }
}

/// List categories, most recently updated first
#[utoipa::path(
    get,
    path = "/api/categories",
    tag = "catalog",
    responses(
        (status = 200, description = "All categories", body = [Category]),
        (status = 401, description = "Not signed in", body = ErrorResponse),
    ),
    security(("bearer_auth" = []))
)]
#[get("/api/categories")]
pub async fn get_categories_handler(_user: SessionUser, data: web::Data<AppState>) -> impl Responder {
    match data.catalog.categories.list().await {
        Ok(categories) => ApiResponse::success(categories),
        Err(e) => catalog_error_response(e),
    }
}

#[utoipa::path(
    get,
    path = "/api/categories/{id}",
    tag = "catalog",
    params(("id" = Uuid, Path, description = "Category id")),
    responses(
        (status = 200, description = "The category", body = Category),
        (status = 401, description = "Not signed in", body = ErrorResponse),
        (status = 404, description = "No such category", body = ErrorResponse),
    ),
    security(("bearer_auth" = []))
)]
#[get("/api/categories/{id}")]
pub async fn get_category_handler(
    _user: SessionUser,
    path: web::Path<Uuid>,
    data: web::Data<AppState>,
) -> impl Responder {
    match data.catalog.categories.get(path.into_inner()).await {
        Ok(category) => ApiResponse::success(category),
        Err(e) => catalog_error_response(e),
    }
}

/// Delete a category and, through the foreign key, its sub-categories
#[utoipa::path(
    delete,
    path = "/api/categories/{id}",
    tag = "catalog",
    params(("id" = Uuid, Path, description = "Category id")),
    responses(
        (status = 204, description = "Deleted"),
        (status = 403, description = "Admin privileges required", body = ErrorResponse),
        (status = 404, description = "No such category", body = ErrorResponse),
    ),
    security(("bearer_auth" = []))
)]
#[delete("/api/categories/{id}")]
pub async fn delete_category_handler(
    AdminUser(admin): AdminUser,
    path: web::Path<Uuid>,
    data: web::Data<AppState>,
) -> impl Responder {
    match data.catalog.categories.delete(&admin, path.into_inner()).await {
        Ok(()) => ApiResponse::no_content(),
        Err(e) => catalog_error_response(e),
    }
}
