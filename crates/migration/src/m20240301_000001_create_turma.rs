//! Create `turma` table.
//!
//! `nome` carries no unique constraint: duplicate names are rejected by the
//! service at creation time only.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Turma::Table)
                    .if_not_exists()
                    .col(pk_auto(Turma::Id))
                    .col(text(Turma::Nome))
                    .col(boolean_null(Turma::Ativo))
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Turma::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Turma { Table, Id, Nome, Ativo }
