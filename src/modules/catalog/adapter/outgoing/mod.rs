pub mod category_repository_postgres;
pub mod sea_orm_entity;
pub mod sub_category_repository_postgres;

use sea_orm::DbErr;

use crate::catalog::application::ports::outgoing::CatalogRepositoryError;

/// Unique violations on `name` or `url` become `Duplicate`.
pub(crate) fn map_write_error(e: DbErr) -> CatalogRepositoryError {
    let msg = e.to_string().to_lowercase();
    let unique = msg.contains("duplicate") || msg.contains("unique") || msg.contains("23505");

    if unique && msg.contains("url") {
        CatalogRepositoryError::Duplicate("url".to_string())
    } else if unique && msg.contains("name") {
        CatalogRepositoryError::Duplicate("name".to_string())
    } else {
        CatalogRepositoryError::DatabaseError(e.to_string())
    }
}

pub(crate) fn db_error(e: DbErr) -> CatalogRepositoryError {
    CatalogRepositoryError::DatabaseError(e.to_string())
}
