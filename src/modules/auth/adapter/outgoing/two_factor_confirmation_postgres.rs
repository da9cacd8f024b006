use async_trait::async_trait;
use sea_orm::sea_query::OnConflict;
use sea_orm::{ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter, Set};
use std::sync::Arc;
use uuid::Uuid;

use super::sea_orm_entity::two_factor_confirmations::{
    ActiveModel as ConfirmationActiveModel, Column as ConfirmationColumn,
    Entity as ConfirmationEntity, Model as ConfirmationModel,
};
use crate::auth::application::domain::entities::TwoFactorConfirmation;
use crate::auth::application::ports::outgoing::{
    ConfirmationRepositoryError, TwoFactorConfirmationRepository,
};

#[derive(Clone, Debug)]
pub struct TwoFactorConfirmationPostgres {
    db: Arc<DatabaseConnection>,
}

impl TwoFactorConfirmationPostgres {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }
}

impl From<ConfirmationModel> for TwoFactorConfirmation {
    fn from(model: ConfirmationModel) -> Self {
        TwoFactorConfirmation {
            id: model.id,
            user_id: model.user_id,
        }
    }
}

fn db_error(e: DbErr) -> ConfirmationRepositoryError {
    ConfirmationRepositoryError::DatabaseError(e.to_string())
}

#[async_trait]
impl TwoFactorConfirmationRepository for TwoFactorConfirmationPostgres {
    async fn find_by_user(
        &self,
        user_id: Uuid,
    ) -> Result<Option<TwoFactorConfirmation>, ConfirmationRepositoryError> {
        let found = ConfirmationEntity::find()
            .filter(ConfirmationColumn::UserId.eq(user_id))
            .one(&*self.db)
            .await
            .map_err(db_error)?;

        Ok(found.map(Into::into))
    }

    async fn replace_for_user(
        &self,
        user_id: Uuid,
    ) -> Result<TwoFactorConfirmation, ConfirmationRepositoryError> {
        let row = ConfirmationActiveModel {
            id: Set(Uuid::new_v4()),
            user_id: Set(user_id),
        };

        // A fresh id on the unique user_id row invalidates the old confirmation.
        let saved = ConfirmationEntity::insert(row)
            .on_conflict(
                OnConflict::column(ConfirmationColumn::UserId)
                    .update_column(ConfirmationColumn::Id)
                    .to_owned(),
            )
            .exec_with_returning(&*self.db)
            .await
            .map_err(db_error)?;

        Ok(saved.into())
    }

    async fn delete_for_user(&self, user_id: Uuid) -> Result<bool, ConfirmationRepositoryError> {
        let result = ConfirmationEntity::delete_many()
            .filter(ConfirmationColumn::UserId.eq(user_id))
            .exec(&*self.db)
            .await
            .map_err(db_error)?;

        Ok(result.rows_affected > 0)
    }
}
