use std::sync::Arc;

use crate::auth::application::domain::routes::RouteConfig;
use crate::auth::application::ports::incoming::{AuthUseCases, SessionRefresher};
use crate::auth::application::ports::outgoing::SessionTokenProvider;
use crate::catalog::application::catalog_use_cases::CatalogUseCases;
use crate::catalog::application::services::{CategoryService, SubCategoryService};
use crate::tests::support::in_memory::{InMemoryCategories, InMemorySubCategories};
use crate::tests::support::stubs::{StubAuthUseCases, StubSessionRefresher, StubSessionTokens};
use crate::AppState;

/// Builds an `AppState` from stubs. The catalog runs its real services over in-memory rows.
pub struct TestAppStateBuilder {
    auth: Arc<dyn AuthUseCases + Send + Sync>,
    sessions: Arc<dyn SessionRefresher + Send + Sync>,
    session_tokens: Arc<dyn SessionTokenProvider + Send + Sync>,
    routes: RouteConfig,
    categories: InMemoryCategories,
    sub_categories: Option<InMemorySubCategories>,
}

impl Default for TestAppStateBuilder {
    fn default() -> Self {
        Self {
            auth: Arc::new(StubAuthUseCases::default()),
            sessions: Arc::new(StubSessionRefresher),
            session_tokens: Arc::new(StubSessionTokens),
            routes: RouteConfig::default(),
            categories: InMemoryCategories::default(),
            sub_categories: None,
        }
    }
}

impl TestAppStateBuilder {
    pub fn with_auth(mut self, auth: impl AuthUseCases + Send + Sync + 'static) -> Self {
        self.auth = Arc::new(auth);
        self
    }

    pub fn with_categories(mut self, categories: InMemoryCategories) -> Self {
        self.categories = categories;
        self
    }

    /// Sub-categories check parents against their own category store.
    pub fn with_sub_categories(mut self, sub_categories: InMemorySubCategories) -> Self {
        self.sub_categories = Some(sub_categories);
        self
    }

    pub fn build(self) -> AppState {
        let sub_categories = self
            .sub_categories
            .unwrap_or_else(|| InMemorySubCategories::with_categories(self.categories.clone()));
        let parents = sub_categories.categories();

        AppState {
            auth: self.auth,
            sessions: self.sessions,
            session_tokens: self.session_tokens,
            routes: self.routes,
            catalog: CatalogUseCases {
                categories: Arc::new(CategoryService::new(self.categories)),
                sub_categories: Arc::new(SubCategoryService::new(sub_categories, parents)),
            },
        }
    }
}
