use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set};
use std::sync::Arc;
use uuid::Uuid;

use super::sea_orm_entity::accounts::{
    ActiveModel as AccountActiveModel, Column as AccountColumn, Entity as AccountEntity,
    Model as AccountModel,
};
use crate::auth::application::domain::entities::LinkedAccount;
use crate::auth::application::ports::outgoing::{AccountRepository, AccountRepositoryError};

#[derive(Clone, Debug)]
pub struct AccountRepositoryPostgres {
    db: Arc<DatabaseConnection>,
}

impl AccountRepositoryPostgres {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }
}

impl From<AccountModel> for LinkedAccount {
    fn from(model: AccountModel) -> Self {
        LinkedAccount {
            id: model.id,
            user_id: model.user_id,
            provider: model.provider,
            provider_account_id: model.provider_account_id,
        }
    }
}

fn db_error(e: sea_orm::DbErr) -> AccountRepositoryError {
    AccountRepositoryError::DatabaseError(e.to_string())
}

#[async_trait]
impl AccountRepository for AccountRepositoryPostgres {
    async fn exists_for_user(&self, user_id: Uuid) -> Result<bool, AccountRepositoryError> {
        let account = AccountEntity::find()
            .filter(AccountColumn::UserId.eq(user_id))
            .one(&*self.db)
            .await
            .map_err(db_error)?;

        Ok(account.is_some())
    }

    async fn find_by_provider(
        &self,
        provider: &str,
        provider_account_id: &str,
    ) -> Result<Option<LinkedAccount>, AccountRepositoryError> {
        let account = AccountEntity::find()
            .filter(AccountColumn::Provider.eq(provider))
            .filter(AccountColumn::ProviderAccountId.eq(provider_account_id))
            .one(&*self.db)
            .await
            .map_err(db_error)?;

        Ok(account.map(LinkedAccount::from))
    }

    async fn link(
        &self,
        user_id: Uuid,
        provider: &str,
        provider_account_id: &str,
    ) -> Result<LinkedAccount, AccountRepositoryError> {
        let inserted = AccountActiveModel {
            id: Set(Uuid::new_v4()),
            user_id: Set(user_id),
            provider: Set(provider.to_string()),
            provider_account_id: Set(provider_account_id.to_string()),
            created_at: Set(Utc::now().into()),
        }
        .insert(&*self.db)
        .await
        .map_err(db_error)?;

        Ok(inserted.into())
    }
}
