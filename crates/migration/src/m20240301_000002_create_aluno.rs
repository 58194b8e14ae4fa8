//! Create `aluno` table with FK to `turma`.
//!
//! Deleting a referenced class is restricted at the store level as well.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Aluno::Table)
                    .if_not_exists()
                    .col(pk_auto(Aluno::Id))
                    .col(text(Aluno::Nome))
                    .col(date(Aluno::DataNascimento))
                    .col(char_len(Aluno::Sexo, 1))
                    .col(integer_null(Aluno::TotalFaltas))
                    .col(integer(Aluno::TurmaId))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_aluno_turma")
                            .from(Aluno::Table, Aluno::TurmaId)
                            .to(Turma::Table, Turma::Id)
                            .on_delete(ForeignKeyAction::Restrict)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Aluno::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Aluno { Table, Id, Nome, DataNascimento, Sexo, TotalFaltas, TurmaId }

#[derive(DeriveIden)]
enum Turma { Table, Id }
