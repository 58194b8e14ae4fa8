use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Aluno: enrolled-students lookups and the delete guard filter on turma_id
        manager
            .create_index(
                Index::create()
                    .name("idx_aluno_turma")
                    .table(Aluno::Table)
                    .col(Aluno::TurmaId)
                    .to_owned(),
            )
            .await?;

        // Turma: duplicate-name check at creation (non-unique). Hash, since
        // btree entries on unbounded TEXT fail past ~2.7 KB.
        manager
            .create_index(
                Index::create()
                    .name("idx_turma_nome")
                    .table(Turma::Table)
                    .col(Turma::Nome)
                    .index_type(IndexType::Hash)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(Index::drop().name("idx_aluno_turma").table(Aluno::Table).to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_turma_nome").table(Turma::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Aluno { Table, TurmaId }

#[derive(DeriveIden)]
enum Turma { Table, Nome }
