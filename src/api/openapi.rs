use crate::api::schemas::{ErrorDetail, ErrorResponse, SuccessResponse};
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::OpenApi;

use crate::auth::adapter::incoming::web::routes::{
    NewPasswordBody, SessionResponse, SignedInResponse,
};
use crate::auth::application::domain::entities::UserRole;
use crate::auth::application::domain::forms::{LoginRequest, RegisterRequest, ResetEmailRequest};
use crate::auth::application::domain::outcome::ActionResult;
use crate::auth::application::domain::session::SessionUser;
use crate::catalog::application::domain::entities::{
    Category, SubCategory, SubCategoryWithCategory,
};
use crate::catalog::application::domain::forms::{CategoryForm, ImageRef, SubCategoryForm};
use crate::shared::validation::FieldError;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Marketplace API",
        version = "1.0.0",
        description = "Authentication and catalog administration for the marketplace",
        contact(
            name = "API Support",
            email = "support@example.com"
        )
    ),
    paths(
        // Auth endpoints
        crate::auth::adapter::incoming::web::routes::login_user_handler,
        crate::auth::adapter::incoming::web::routes::register_user_handler,
        crate::auth::adapter::incoming::web::routes::reset_password_handler,
        crate::auth::adapter::incoming::web::routes::new_password_handler,
        crate::auth::adapter::incoming::web::routes::verify_email_handler,
        crate::auth::adapter::incoming::web::routes::logout_user_handler,
        crate::auth::adapter::incoming::web::routes::get_session_handler,

        // Catalog endpoints
        crate::catalog::adapter::incoming::web::routes::upsert_category_handler,
        crate::catalog::adapter::incoming::web::routes::get_categories_handler,
        crate::catalog::adapter::incoming::web::routes::get_category_handler,
        crate::catalog::adapter::incoming::web::routes::delete_category_handler,
        crate::catalog::adapter::incoming::web::routes::upsert_sub_category_handler,
        crate::catalog::adapter::incoming::web::routes::get_sub_categories_handler,
        crate::catalog::adapter::incoming::web::routes::get_sub_category_handler,
        crate::catalog::adapter::incoming::web::routes::delete_sub_category_handler,
    ),
    components(
        schemas(
            // Response wrappers
            SuccessResponse<SessionResponse>,
            ErrorResponse,
            ErrorDetail,
            FieldError,

            // Auth DTOs
            ActionResult,
            LoginRequest,
            RegisterRequest,
            ResetEmailRequest,
            NewPasswordBody,
            SignedInResponse,
            SessionResponse,
            SessionUser,
            UserRole,

            // Catalog
            Category,
            SubCategory,
            SubCategoryWithCategory,
            CategoryForm,
            SubCategoryForm,
            ImageRef
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "auth", description = "Sign-in, registration and account recovery"),
        (name = "catalog", description = "Category and sub-category administration"),
    )
)]
pub struct ApiDoc;

struct SecurityAddon;

impl utoipa::Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .description(Some("Session token from /api/auth/login"))
                        .build(),
                ),
            )
        }
    }
}
