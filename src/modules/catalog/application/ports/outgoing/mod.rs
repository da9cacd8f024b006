pub mod category_repository;
pub mod sub_category_repository;

pub use category_repository::CategoryRepository;
pub use sub_category_repository::SubCategoryRepository;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CatalogRepositoryError {
    #[error("Database error: {0}")]
    DatabaseError(String),

    /// A unique column rejected the write; carries the column name.
    #[error("Duplicate {0}")]
    Duplicate(String),
}
