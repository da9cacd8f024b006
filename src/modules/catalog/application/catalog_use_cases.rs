use std::sync::Arc;

use crate::catalog::application::ports::incoming::{CategoryUseCases, SubCategoryUseCases};

#[derive(Clone)]
pub struct CatalogUseCases {
    pub categories: Arc<dyn CategoryUseCases + Send + Sync>,
    pub sub_categories: Arc<dyn SubCategoryUseCases + Send + Sync>,
}
