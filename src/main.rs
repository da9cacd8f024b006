pub mod modules;
pub use modules::auth;
pub use modules::catalog;
pub use modules::email;
pub mod health;
pub mod shared;
mod api;

use crate::api::openapi::ApiDoc;
use crate::auth::adapter::incoming::web::middleware::request_gate;
use crate::auth::adapter::outgoing::account_repository_postgres::AccountRepositoryPostgres;
use crate::auth::adapter::outgoing::jwt::{JwtSessionTokenService, SessionConfig};
use crate::auth::adapter::outgoing::security::PasswordHasherConfig;
use crate::auth::adapter::outgoing::session_revocation_redis::RedisSessionRevocationStore;
use crate::auth::adapter::outgoing::token_store_postgres::TokenStorePostgres;
use crate::auth::adapter::outgoing::two_factor_confirmation_postgres::TwoFactorConfirmationPostgres;
use crate::auth::adapter::outgoing::user_query_postgres::UserQueryPostgres;
use crate::auth::adapter::outgoing::user_repository_postgres::UserRepositoryPostgres;
use crate::auth::application::config::AuthConfig;
use crate::auth::application::domain::routes::RouteConfig;
use crate::auth::application::orchestrator::{AuthOrchestrator, AuthPorts};
use crate::auth::application::ports::incoming::{AuthUseCases, SessionRefresher};
use crate::auth::application::ports::outgoing::SessionTokenProvider;
use crate::catalog::adapter::outgoing::category_repository_postgres::CategoryRepositoryPostgres;
use crate::catalog::adapter::outgoing::sub_category_repository_postgres::SubCategoryRepositoryPostgres;
use crate::catalog::application::catalog_use_cases::CatalogUseCases;
use crate::catalog::application::services::{CategoryService, SubCategoryService};
use crate::email::adapter::outgoing::smtp_sender::SmtpEmailSender;
use crate::email::application::ports::outgoing::EmailSender;
use crate::email::application::services::AuthEmailService;
use crate::shared::api::custom_json_config;

use actix_web::middleware::from_fn;
use actix_web::{web, App, HttpServer};
use deadpool_redis::{Config, Runtime};
use sea_orm::{ConnectOptions, Database};
use std::env;
use std::sync::Arc;
use std::time::Duration;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[cfg(test)]
mod tests;

#[derive(Clone)]
pub struct AppState {
    pub auth: Arc<dyn AuthUseCases + Send + Sync>,
    pub sessions: Arc<dyn SessionRefresher + Send + Sync>,
    pub session_tokens: Arc<dyn SessionTokenProvider + Send + Sync>,
    pub routes: RouteConfig,
    pub catalog: CatalogUseCases,
}

#[cfg(not(tarpaulin_include))]
fn smtp_sender_from_env() -> SmtpEmailSender {
    let from_email = env::var("EMAIL_FROM").expect("EMAIL_FROM not set");

    if env::var("RUST_ENV").as_deref() == Ok("test") {
        // Local Mailpit
        let host = env::var("SMTP_HOST").unwrap_or_else(|_| "localhost".to_string());
        let port: u16 = env::var("SMTP_PORT")
            .unwrap_or_else(|_| "1025".to_string())
            .parse()
            .expect("Invalid SMTP_PORT");

        SmtpEmailSender::new_local(&host, port, &from_email)
    } else {
        let smtp_server = env::var("SMTP_SERVER").expect("SMTP_SERVER not set");
        let smtp_user = env::var("SMTP_USERNAME").expect("SMTP_USERNAME not set");
        let smtp_pass = env::var("SMTP_PASSWORD").expect("SMTP_PASSWORD not set");

        SmtpEmailSender::new(&smtp_server, &smtp_user, &smtp_pass, &from_email)
            .expect("Failed to build SMTP transport")
    }
}

#[actix_web::main]
#[cfg(not(tarpaulin_include))]
async fn start() -> std::io::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,actix_web=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting application...");

    let rust_env = env::var("RUST_ENV").unwrap_or_else(|_| "development".to_string());

    // Try .env.{environment} first, then fall back to .env
    if dotenvy::from_filename(format!(".env.{rust_env}")).is_err() {
        dotenvy::dotenv().ok();
    }

    // Redis over TLS needs a process-wide crypto provider.
    let _ = rustls::crypto::ring::default_provider().install_default();

    let db_url = env::var("DATABASE_URL").expect("DATABASE_URL is not set in .env file");
    let host = env::var("HOST").expect("HOST is not set in .env file");
    let port = env::var("PORT").expect("PORT is not set in .env file");
    let redis_url = env::var("REDIS_URL").expect("REDIS_URL is not set in .env file");

    let auth_config = AuthConfig::from_env().expect("Invalid auth configuration");
    let session_config = SessionConfig::from_env().expect("Invalid session configuration");
    let hasher = PasswordHasherConfig::from_env()
        .and_then(|config| config.build())
        .expect("Invalid password hasher configuration");

    let server_url = format!("{host}:{port}");
    info!(address = %server_url, env = %rust_env, "Binding server");

    // Database connection
    let mut opt = ConnectOptions::new(db_url);
    opt.max_connections(50)
        .min_connections(10)
        .connect_timeout(Duration::from_secs(5))
        .acquire_timeout(Duration::from_secs(5))
        .idle_timeout(Duration::from_secs(300))
        .max_lifetime(Duration::from_secs(1800))
        .sqlx_logging(false);

    let db_arc = Arc::new(
        Database::connect(opt)
            .await
            .expect("Failed to connect to database"),
    );

    // Redis connection
    let redis_arc = Arc::new(
        Config::from_url(&redis_url)
            .create_pool(Some(Runtime::Tokio1))
            .expect("Failed to create Redis pool"),
    );

    let sender: Arc<dyn EmailSender + Send + Sync> = Arc::new(smtp_sender_from_env());
    let notifier = Arc::new(AuthEmailService::new(sender, &auth_config.app_url));

    let users = Arc::new(UserQueryPostgres::new(Arc::clone(&db_arc)));
    let session_tokens: Arc<dyn SessionTokenProvider + Send + Sync> =
        Arc::new(JwtSessionTokenService::new(session_config));

    let routes = RouteConfig::with_redirect(&auth_config.default_login_redirect);
    let orchestrator = AuthOrchestrator::new(
        auth_config,
        AuthPorts {
            users,
            user_repository: Arc::new(UserRepositoryPostgres::new(Arc::clone(&db_arc))),
            accounts: Arc::new(AccountRepositoryPostgres::new(Arc::clone(&db_arc))),
            tokens: Arc::new(TokenStorePostgres::new(Arc::clone(&db_arc))),
            confirmations: Arc::new(TwoFactorConfirmationPostgres::new(Arc::clone(&db_arc))),
            hasher,
            notifier,
            session_tokens: Arc::clone(&session_tokens),
            revocations: Arc::new(RedisSessionRevocationStore::new(Arc::clone(&redis_arc))),
        },
    );

    let category_repo = CategoryRepositoryPostgres::new(Arc::clone(&db_arc));
    let sub_category_repo = SubCategoryRepositoryPostgres::new(Arc::clone(&db_arc));

    let state = AppState {
        sessions: Arc::new(orchestrator.session_issuer()),
        auth: Arc::new(orchestrator),
        session_tokens,
        routes,
        catalog: CatalogUseCases {
            categories: Arc::new(CategoryService::new(category_repo.clone())),
            sub_categories: Arc::new(SubCategoryService::new(sub_category_repo, category_repo)),
        },
    };

    let openapi = ApiDoc::openapi();

    HttpServer::new(move || {
        App::new()
            .wrap(from_fn(request_gate))
            .app_data(web::Data::new(state.clone()))
            .app_data(web::Data::new(Arc::clone(&db_arc)))
            .app_data(web::Data::new(Arc::clone(&redis_arc)))
            .app_data(custom_json_config())
            .configure(init_routes)
            .service(
                SwaggerUi::new("/swagger-ui/{_:.*}").url("/api-docs/openapi.json", openapi.clone()),
            )
    })
    .bind(server_url)?
    .run()
    .await
}

#[cfg(not(tarpaulin_include))]
fn init_routes(cfg: &mut web::ServiceConfig) {
    // Health
    cfg.service(crate::health::health);
    cfg.service(crate::health::readiness);
    // Auth
    cfg.service(crate::auth::adapter::incoming::web::routes::login_user_handler);
    cfg.service(crate::auth::adapter::incoming::web::routes::register_user_handler);
    cfg.service(crate::auth::adapter::incoming::web::routes::reset_password_handler);
    cfg.service(crate::auth::adapter::incoming::web::routes::new_password_handler);
    cfg.service(crate::auth::adapter::incoming::web::routes::verify_email_handler);
    cfg.service(crate::auth::adapter::incoming::web::routes::logout_user_handler);
    cfg.service(crate::auth::adapter::incoming::web::routes::get_session_handler);
    // Catalog
    cfg.service(crate::catalog::adapter::incoming::web::routes::upsert_category_handler);
    cfg.service(crate::catalog::adapter::incoming::web::routes::get_categories_handler);
    cfg.service(crate::catalog::adapter::incoming::web::routes::get_category_handler);
    cfg.service(crate::catalog::adapter::incoming::web::routes::delete_category_handler);
    cfg.service(crate::catalog::adapter::incoming::web::routes::upsert_sub_category_handler);
    cfg.service(crate::catalog::adapter::incoming::web::routes::get_sub_categories_handler);
    cfg.service(crate::catalog::adapter::incoming::web::routes::get_sub_category_handler);
    cfg.service(crate::catalog::adapter::incoming::web::routes::delete_sub_category_handler);
}

#[cfg(not(tarpaulin_include))]
fn main() {
    if let Err(e) = start() {
        eprintln!("Error starting app: {e}");
    }
}
