use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // =====================================================
        // auth_tokens: verification, reset and two-factor tokens
        // =====================================================
        manager
            .create_table(
                Table::create()
                    .table(AuthTokens::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(AuthTokens::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(AuthTokens::Kind).string_len(32).not_null())
                    .col(ColumnDef::new(AuthTokens::Email).string_len(255).not_null())
                    .col(ColumnDef::new(AuthTokens::Token).string_len(255).not_null())
                    .col(
                        ColumnDef::new(AuthTokens::ExpiresAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_auth_tokens_kind_token")
                    .table(AuthTokens::Table)
                    .col(AuthTokens::Kind)
                    .col(AuthTokens::Token)
                    .unique()
                    .to_owned(),
            )
            .await?;

        // At most one live token per kind and email
        manager
            .create_index(
                Index::create()
                    .name("idx_auth_tokens_kind_email")
                    .table(AuthTokens::Table)
                    .col(AuthTokens::Kind)
                    .col(AuthTokens::Email)
                    .unique()
                    .to_owned(),
            )
            .await?;

        // =====================================================
        // two_factor_confirmations
        // =====================================================
        manager
            .create_table(
                Table::create()
                    .table(TwoFactorConfirmations::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(TwoFactorConfirmations::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(TwoFactorConfirmations::UserId)
                            .uuid()
                            .not_null()
                            .unique_key(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_two_factor_confirmations_user_id")
                            .from(TwoFactorConfirmations::Table, TwoFactorConfirmations::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(TwoFactorConfirmations::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(AuthTokens::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum AuthTokens {
    Table,
    Id,
    Kind,
    Email,
    Token,
    ExpiresAt,
}

#[derive(DeriveIden)]
enum TwoFactorConfirmations {
    Table,
    Id,
    UserId,
}

#[derive(DeriveIden)]
enum Users {
    Table,
    Id,
}
