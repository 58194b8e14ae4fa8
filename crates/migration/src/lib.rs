//! Migrator registering the school schema in dependency order.
//! `turma` must exist before `aluno` references it; indexes are applied last.
pub use sea_orm_migration::prelude::*;

mod m20240301_000001_create_turma;
mod m20240301_000002_create_aluno;
mod m20240301_000003_add_indexes;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20240301_000001_create_turma::Migration),
            Box::new(m20240301_000002_create_aluno::Migration),
            Box::new(m20240301_000003_add_indexes::Migration),
        ]
    }
}
