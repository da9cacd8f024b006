pub mod account_repository_postgres;
pub mod jwt;
pub mod sea_orm_entity;
pub mod security;
pub mod session_revocation_redis;
pub mod token_store_postgres;
pub mod two_factor_confirmation_postgres;
pub mod user_query_postgres;
pub mod user_repository_postgres;
