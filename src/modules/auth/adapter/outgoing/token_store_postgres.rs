use async_trait::async_trait;
use chrono::{Duration, Utc};
use sea_orm::sea_query::OnConflict;
use sea_orm::{ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter, Set};
use std::sync::Arc;
use uuid::Uuid;

use super::sea_orm_entity::auth_tokens::{
    ActiveModel as TokenActiveModel, Column as TokenColumn, Entity as TokenEntity,
    Model as TokenModel,
};
use crate::auth::application::domain::entities::{AuthToken, TokenKind};
use crate::auth::application::ports::outgoing::{TokenStore, TokenStoreError};

/// All three token kinds in `auth_tokens`, one live row per (kind, email).
#[derive(Clone, Debug)]
pub struct TokenStorePostgres {
    db: Arc<DatabaseConnection>,
}

impl TokenStorePostgres {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    fn to_domain(model: TokenModel) -> Result<AuthToken, TokenStoreError> {
        let kind = TokenKind::parse(&model.kind).ok_or_else(|| {
            TokenStoreError::DatabaseError(format!("unknown token kind '{}'", model.kind))
        })?;

        Ok(AuthToken {
            id: model.id,
            kind,
            email: model.email,
            token: model.token,
            expires_at: model.expires_at.with_timezone(&Utc),
        })
    }
}

fn db_error(e: DbErr) -> TokenStoreError {
    TokenStoreError::DatabaseError(e.to_string())
}

#[async_trait]
impl TokenStore for TokenStorePostgres {
    /// One upsert on the `(kind, email)` unique index, so concurrent issues for
    /// the same email never collide and the newest token always wins.
    async fn issue(
        &self,
        kind: TokenKind,
        email: &str,
        ttl: Duration,
    ) -> Result<AuthToken, TokenStoreError> {
        let token = AuthToken::generate(kind, email, ttl, Utc::now());

        let row = TokenActiveModel {
            id: Set(token.id),
            kind: Set(kind.as_str().to_string()),
            email: Set(token.email.clone()),
            token: Set(token.token.clone()),
            expires_at: Set(token.expires_at.into()),
        };

        let saved = TokenEntity::insert(row)
            .on_conflict(
                OnConflict::columns([TokenColumn::Kind, TokenColumn::Email])
                    .update_columns([TokenColumn::Id, TokenColumn::Token, TokenColumn::ExpiresAt])
                    .to_owned(),
            )
            .exec_with_returning(&*self.db)
            .await
            .map_err(db_error)?;

        Self::to_domain(saved)
    }

    async fn find_by_token(
        &self,
        kind: TokenKind,
        token: &str,
    ) -> Result<Option<AuthToken>, TokenStoreError> {
        TokenEntity::find()
            .filter(TokenColumn::Kind.eq(kind.as_str()))
            .filter(TokenColumn::Token.eq(token))
            .one(&*self.db)
            .await
            .map_err(db_error)?
            .map(Self::to_domain)
            .transpose()
    }

    async fn find_by_email(
        &self,
        kind: TokenKind,
        email: &str,
    ) -> Result<Option<AuthToken>, TokenStoreError> {
        TokenEntity::find()
            .filter(TokenColumn::Kind.eq(kind.as_str()))
            .filter(TokenColumn::Email.eq(email))
            .one(&*self.db)
            .await
            .map_err(db_error)?
            .map(Self::to_domain)
            .transpose()
    }

    async fn consume(&self, kind: TokenKind, id: Uuid) -> Result<(), TokenStoreError> {
        // Zero rows affected is fine: already consumed.
        TokenEntity::delete_many()
            .filter(TokenColumn::Id.eq(id))
            .filter(TokenColumn::Kind.eq(kind.as_str()))
            .exec(&*self.db)
            .await
            .map_err(db_error)?;

        Ok(())
    }
}
