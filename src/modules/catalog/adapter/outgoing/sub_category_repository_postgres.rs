use async_trait::async_trait;
use sea_orm::sea_query::OnConflict;
use sea_orm::{
    ColumnTrait, Condition, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
};
use std::sync::Arc;
use uuid::Uuid;

use super::sea_orm_entity::categories::Entity as CategoryEntity;
use super::sea_orm_entity::sub_categories::{ActiveModel, Column, Entity};
use super::{db_error, map_write_error};
use crate::catalog::application::domain::entities::{
    Category, SubCategory, SubCategoryWithCategory,
};
use crate::catalog::application::ports::outgoing::{
    CatalogRepositoryError, SubCategoryRepository,
};

#[derive(Clone, Debug)]
pub struct SubCategoryRepositoryPostgres {
    db: Arc<DatabaseConnection>,
}

impl SubCategoryRepositoryPostgres {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }
}

#[async_trait]
impl SubCategoryRepository for SubCategoryRepositoryPostgres {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<SubCategory>, CatalogRepositoryError> {
        let found = Entity::find_by_id(id)
            .one(&*self.db)
            .await
            .map_err(db_error)?;
        Ok(found.map(SubCategory::from))
    }

    async fn find_duplicate(
        &self,
        name: &str,
        url: &str,
        exclude_id: Uuid,
    ) -> Result<Option<SubCategory>, CatalogRepositoryError> {
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
        Ok(found.map(SubCategory::from))
    }

    async fn list(&self) -> Result<Vec<SubCategoryWithCategory>, CatalogRepositoryError> {
        let rows = Entity::find()
            .find_also_related(CategoryEntity)
            .order_by_desc(Column::UpdatedAt)
            .all(&*self.db)
            .await
            .map_err(db_error)?;

        Ok(rows
            .into_iter()
            .map(|(sub, parent)| SubCategoryWithCategory {
                sub_category: sub.into(),
                category: parent.map(Category::from),
            })
            .collect())
    }

    async fn upsert(&self, sub_category: SubCategory) -> Result<SubCategory, CatalogRepositoryError> {
        let model = ActiveModel {
            id: Set(sub_category.id),
            name: Set(sub_category.name),
            image: Set(sub_category.image),
            url: Set(sub_category.url),
            featured: Set(sub_category.featured),
            category_id: Set(sub_category.category_id),
            created_at: Set(sub_category.created_at.into()),
            updated_at: Set(sub_category.updated_at.into()),
        };

        let saved = Entity::insert(model)
            .on_conflict(
                OnConflict::column(Column::Id)
                    .update_columns([
                        Column::Name,
                        Column::Image,
                        Column::Url,
                        Column::Featured,
                        Column::CategoryId,
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::adapter::outgoing::sea_orm_entity::sub_categories::Model;
    use chrono::Utc;
    use sea_orm::{DatabaseBackend, DbErr, MockDatabase, RuntimeErr};

    fn model(category_id: Uuid) -> Model {
        let now = Utc::now().fixed_offset();
        Model {
            id: Uuid::new_v4(),
            name: "Laptops".to_string(),
            image: "https://cdn/sub.png".to_string(),
            url: "laptops".to_string(),
            featured: true,
            category_id,
            created_at: now,
            updated_at: now,
        }
    }

    fn repo(db: MockDatabase) -> SubCategoryRepositoryPostgres {
        SubCategoryRepositoryPostgres::new(Arc::new(db.into_connection()))
    }

    #[tokio::test]
    async fn find_by_id_maps_parent_reference() {
        let parent = Uuid::new_v4();
        let row = model(parent);
        let db = MockDatabase::new(DatabaseBackend::Postgres).append_query_results([vec![row.clone()]]);

        let found = repo(db).find_by_id(row.id).await.unwrap().unwrap();

        assert_eq!(found.category_id, parent);
        assert!(found.featured);
    }

    #[tokio::test]
    async fn upsert_returns_saved_row() {
        let row = model(Uuid::new_v4());
        let db = MockDatabase::new(DatabaseBackend::Postgres).append_query_results([vec![row.clone()]]);

        let saved = repo(db).upsert(row.clone().into()).await.unwrap();

        assert_eq!(saved.id, row.id);
    }

    #[tokio::test]
    async fn unique_name_violation_is_duplicate() {
        let db = MockDatabase::new(DatabaseBackend::Postgres).append_query_errors([DbErr::Query(
            RuntimeErr::Internal(
                "duplicate key value violates unique constraint \"sub_categories_name_key\"".to_string(),
            ),
        )]);

        let result = repo(db).upsert(model(Uuid::new_v4()).into()).await;

        assert_eq!(result, Err(CatalogRepositoryError::Duplicate("name".to_string())));
    }

    #[tokio::test]
    async fn database_failure_is_reported() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_errors([DbErr::Custom("connection reset".to_string())]);

        let result = repo(db).find_by_id(Uuid::new_v4()).await;

        assert!(matches!(result, Err(CatalogRepositoryError::DatabaseError(_))));
    }
}
