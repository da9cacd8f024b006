use async_trait::async_trait;
use sea_orm::sea_query::OnConflict;
use sea_orm::{
    ColumnTrait, Condition, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
};
use std::sync::Arc;
use uuid::Uuid;

use super::sea_orm_entity::categories::{ActiveModel, Column, Entity};
use super::{db_error, map_write_error};
use crate::catalog::application::domain::entities::Category;
use crate::catalog::application::ports::outgoing::{CatalogRepositoryError, CategoryRepository};

#[derive(Clone, Debug)]
pub struct CategoryRepositoryPostgres {
    db: Arc<DatabaseConnection>,
}

impl CategoryRepositoryPostgres {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }
}

#[async_trait]
impl CategoryRepository for CategoryRepositoryPostgres {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Category>, CatalogRepositoryError> {
        let found = Entity::find_by_id(id)
            .one(&*self.db)
            .await
            .map_err(db_error)?;
        Ok(found.map(Category::from))
    }

    async fn find_duplicate(
        &self,
        name: &str,
        url: &str,
        exclude_id: Uuid,
    ) -> Result<Option<Category>, CatalogRepositoryError> {
        let found = Entity::find()
            .filter(
                Condition::any()
                    .add(Column::Name.eq(name))
                    .add(Column::Url.eq(url)),
            )
            .filter(Column::Id.ne(exclude_id))
            .one(&*self.db)
            .await
            .map_err(db_error)?;
        Ok(found.map(Category::from))
    }

    async fn list(&self) -> Result<Vec<Category>, CatalogRepositoryError> {
        let rows = Entity::find()
            .order_by_desc(Column::UpdatedAt)
            .all(&*self.db)
            .await
            .map_err(db_error)?;
        Ok(rows.into_iter().map(Category::from).collect())
    }

    async fn upsert(&self, category: Category) -> Result<Category, CatalogRepositoryError> {
        let model = ActiveModel {
            id: Set(category.id),
            name: Set(category.name),
            image: Set(category.image),
            url: Set(category.url),
            featured: Set(category.featured),
            created_at: Set(category.created_at.into()),
            updated_at: Set(category.updated_at.into()),
        };

        let saved = Entity::insert(model)
            .on_conflict(
                OnConflict::column(Column::Id)
                    .update_columns([
                        Column::Name,
                        Column::Image,
                        Column::Url,
                        Column::Featured,
                        Column::UpdatedAt,
                    ])
                    .to_owned(),
            )
            .exec_with_returning(&*self.db)
            .await
            .map_err(map_write_error)?;

        Ok(saved.into())
    }

    async fn delete(&self, id: Uuid) -> Result<bool, CatalogRepositoryError> {
        let result = Entity::delete_by_id(id)
            .exec(&*self.db)
            .await
            .map_err(db_error)?;
        Ok(result.rows_affected > 0)
    }
}
