use actix_web::{delete, get, post, web, Responder};
use uuid::Uuid;

use super::catalog_error_response;
use crate::api::schemas::ErrorResponse;
use crate::auth::adapter::incoming::web::extractors::AdminUser;
use crate::auth::application::domain::session::SessionUser;
use crate::catalog::application::domain::entities::{SubCategory, SubCategoryWithCategory};
use crate::catalog::application::domain::forms::SubCategoryForm;
use crate::shared::api::ApiResponse;
use crate::AppState;

/// Create or update a sub-category under an existing category
#[utoipa::path(
    post,
    path = "/api/subcategories",
    tag = "catalog",
    request_body = SubCategoryForm,
    responses(
        (status = 200, description = "SubCategory saved", body = SubCategory),
        (status = 400, description = "Invalid fields", body = ErrorResponse),
        (status = 403, description = "Admin privileges required", body = ErrorResponse),
        (status = 404, description = "Parent category does not exist", body = ErrorResponse),
        (status = 409, description = "Name or URL already taken", body = ErrorResponse),
    ),
    security(("bearer_auth" = []))
)]
#[post("/api/subcategories")]
pub async fn upsert_sub_category_handler(
    AdminUser(admin): AdminUser,
    form: web::Json<SubCategoryForm>,
    data: web::Data<AppState>,
) -> impl Responder {
    match data.catalog.sub_categories.upsert(&admin, form.into_inner()).await {
        Ok(sub_category) => ApiResponse::success(sub_category),
        Err(e) => catalog_error_response(e),
    }
}

/// List sub-categories with their parent category
#[utoipa::path(
    get,
    path = "/api/subcategories",
    tag = "catalog",
    responses(
        (status = 200, description = "All sub-categories", body = [SubCategoryWithCategory]),
        (status = 401, description = "Not signed in", body = ErrorResponse),
    ),
    security(("bearer_auth" = []))
)]
#[get("/api/subcategories")]
pub async fn get_sub_categories_handler(
    _user: SessionUser,
    data: web::Data<AppState>,
) -> impl Responder {
    match data.catalog.sub_categories.list().await {
        Ok(rows) => ApiResponse::success(rows),
        Err(e) => catalog_error_response(e),
    }
}

#[utoipa::path(
    get,
    path = "/api/subcategories/{id}",
    tag = "catalog",
    params(("id" = Uuid, Path, description = "SubCategory id")),
    responses(
        (status = 200, description = "The sub-category", body = SubCategory),
        (status = 404, description = "No such sub-category", body = ErrorResponse),
    ),
    security(("bearer_auth" = []))
)]
#[get("/api/subcategories/{id}")]
pub async fn get_sub_category_handler(
    _user: SessionUser,
    path: web::Path<Uuid>,
    data: web::Data<AppState>,
) -> impl Responder {
    match data.catalog.sub_categories.get(path.into_inner()).await {
        Ok(sub_category) => ApiResponse::success(sub_category),
        Err(e) => catalog_error_response(e),
    }
}

#[utoipa::path(
    delete,
    path = "/api/subcategories/{id}",
    tag = "catalog",
    params(("id" = Uuid, Path, description = "SubCategory id")),
    responses(
        (status = 204, description = "Deleted"),
        (status = 403, description = "Admin privileges required", body = ErrorResponse),
        (status = 404, description = "No such sub-category", body = ErrorResponse),
    ),
    security(("bearer_auth" = []))
)]
#[delete("/api/subcategories/{id}")]
pub async fn delete_sub_category_handler(
    AdminUser(admin): AdminUser,
    path: web::Path<Uuid>,
    data: web::Data<AppState>,
) -> impl Responder {
    match data.catalog.sub_categories.delete(&admin, path.into_inner()).await {
        Ok(()) => ApiResponse::no_content(),
        Err(e) => catalog_error_response(e),
    }
}
