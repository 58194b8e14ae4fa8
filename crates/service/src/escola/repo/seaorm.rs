use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ActiveValue::Unchanged, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder, Set,
};

use models::{aluno, turma};

use crate::errors::ServiceError;
use crate::escola::domain::{Aluno, NovaTurma, NovoAluno, Turma};
use crate::escola::repository::EscolaRepository;

/// SeaORM-backed repository. Every write commits on its own.
#[derive(Clone)]
pub struct SeaOrmEscolaRepository {
    pub db: DatabaseConnection,
}

impl SeaOrmEscolaRepository {
    pub fn new(db: DatabaseConnection) -> Self { Self { db } }
}

/// `RecordNotUpdated` means the row vanished before the write.
fn updated(res: Result<impl Sized, DbErr>) -> Result<bool, ServiceError> {
    match res {
        Ok(_) => Ok(true),
        Err(DbErr::RecordNotUpdated) => Ok(false),
        Err(e) => Err(e.into()),
    }
}

#[async_trait]
impl EscolaRepository for SeaOrmEscolaRepository {
    async fn count_alunos(&self) -> Result<u64, ServiceError> {
        Ok(aluno::Entity::find().count(&self.db).await?)
    }

    async fn list_alunos(&self) -> Result<Vec<Aluno>, ServiceError> {
        let rows = aluno::Entity::find().order_by_asc(aluno::Column::Id).all(&self.db).await?;
        Ok(rows.into_iter().map(Aluno::from).collect())
    }

    async fn find_aluno(&self, id: i32) -> Result<Option<Aluno>, ServiceError> {
        Ok(aluno::Entity::find_by_id(id).one(&self.db).await?.map(Aluno::from))
    }

    async fn list_alunos_by_turma(&self, turma_id: i32) -> Result<Vec<Aluno>, ServiceError> {
        let rows = aluno::Entity::find()
            .filter(aluno::Column::TurmaId.eq(turma_id))
            .order_by_asc(aluno::Column::Id)
            .all(&self.db)
            .await?;
        Ok(rows.into_iter().map(Aluno::from).collect())
    }

    async fn add_aluno(&self, novo: &NovoAluno) -> Result<Aluno, ServiceError> {
        let created = aluno::create(
            &self.db,
            aluno::NewAluno {
                nome: &novo.nome,
                data_nascimento: novo.data_nascimento,
                sexo: novo.sexo,
                total_faltas: novo.total_faltas,
                turma_id: novo.turma_id,
            },
        )
        .await?;
        Ok(created.into())
    }

    async fn replace_aluno(&self, a: &Aluno) -> Result<bool, ServiceError> {
        let am = aluno::ActiveModel {
            id: Unchanged(a.id),
            nome: Set(a.nome.clone()),
            data_nascimento: Set(a.data_nascimento),
            sexo: Set(a.sexo.to_string()),
            total_faltas: Set(a.total_faltas),
            turma_id: Set(a.turma_id),
        };
        updated(am.update(&self.db).await)
    }

    async fn remove_aluno(&self, id: i32) -> Result<bool, ServiceError> {
        let res = aluno::Entity::delete_by_id(id).exec(&self.db).await?;
        Ok(res.rows_affected > 0)
    }

    async fn count_turmas(&self) -> Result<u64, ServiceError> {
        Ok(turma::Entity::find().count(&self.db).await?)
    }

    async fn list_turmas(&self) -> Result<Vec<Turma>, ServiceError> {
        let rows = turma::Entity::find().order_by_asc(turma::Column::Id).all(&self.db).await?;
        Ok(rows.into_iter().map(Turma::from).collect())
    }

    async fn find_turma(&self, id: i32) -> Result<Option<Turma>, ServiceError> {
        Ok(turma::Entity::find_by_id(id).one(&self.db).await?.map(Turma::from))
    }

    async fn turma_exists(&self, id: i32) -> Result<bool, ServiceError> {
        let n = turma::Entity::find().filter(turma::Column::Id.eq(id)).count(&self.db).await?;
        Ok(n > 0)
    }

    async fn turma_exists_by_nome(&self, nome: &str) -> Result<bool, ServiceError> {
        Ok(turma::exists_by_nome(&self.db, nome).await?)
    }

    async fn turma_has_alunos(&self, id: i32) -> Result<bool, ServiceError> {
        let n = aluno::Entity::find().filter(aluno::Column::TurmaId.eq(id)).count(&self.db).await?;
        Ok(n > 0)
    }

    async fn add_turma(&self, nova: &NovaTurma) -> Result<Turma, ServiceError> {
        Ok(turma::create(&self.db, &nova.nome, nova.ativo).await?.into())
    }

    async fn replace_turma(&self, t: &Turma) -> Result<bool, ServiceError> {
        let am = turma::ActiveModel {
            id: Unchanged(t.id),
            nome: Set(t.nome.clone()),
            ativo: Set(t.ativo),
        };
        updated(am.update(&self.db).await)
    }

    async fn remove_turma(&self, id: i32) -> Result<bool, ServiceError> {
        let res = turma::Entity::delete_by_id(id).exec(&self.db).await?;
        Ok(res.rows_affected > 0)
    }
}
