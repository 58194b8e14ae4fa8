use std::collections::HashMap;
use std::sync::Arc;

use tracing::{debug, info, instrument};

use super::domain::{is_unset_date, AlunoInput, Created, NovoAluno};
use super::report;
use super::repository::EscolaRepository;
use crate::errors::ServiceError;

/// Student business service, independent of the web framework.
pub struct AlunoService<R: EscolaRepository + ?Sized> {
    repo: Arc<R>,
}

impl<R: EscolaRepository + ?Sized> AlunoService<R> {
    pub fn new(repo: Arc<R>) -> Self { Self { repo } }

    /// Report of the students whose class is active.
    ///
    /// NotFound only when no student exists at all; an empty filter result
    /// still yields a report with the placeholder line.
    #[instrument(skip(self))]
    pub async fn list_active(&self) -> Result<String, ServiceError> {
        if self.repo.count_alunos().await? == 0 {
            return Err(ServiceError::not_found("Não há nenhum aluno cadastrado"));
        }
        let alunos = self.repo.list_alunos().await?;
        let turmas: HashMap<_, _> = self
            .repo
            .list_turmas()
            .await?
            .into_iter()
            .map(|t| (t.id, t))
            .collect();
        info!(count = alunos.len(), "alunos_listed");
        Ok(report::alunos_ativos(&alunos, &turmas))
    }

    #[instrument(skip(self))]
    pub async fn get(&self, id: i32) -> Result<String, ServiceError> {
        let aluno = self
            .repo
            .find_aluno(id)
            .await?
            .ok_or_else(|| ServiceError::not_found(format!("Não há nenhum aluno cadastrado com o id {}.", id)))?;
        let turma = self
            .repo
            .find_turma(aluno.turma_id)
            .await?
            .ok_or_else(|| ServiceError::not_found(format!("Não existe nenhuma turma cadastrada com o id {}.", aluno.turma_id)))?;
        Ok(report::aluno_detail(&aluno, &turma))
    }

    /// Validate and persist a new student.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    /// use service::escola::{AlunoService, TurmaService};
    /// use service::escola::domain::{AlunoInput, TurmaInput};
    /// use service::escola::repository::mock::MockEscolaRepository;
    ///
    /// let repo = Arc::new(MockEscolaRepository::default());
    /// let turma = tokio_test::block_on(TurmaService::new(repo.clone()).create(TurmaInput {
    ///     nome: Some("1A".into()), ativo: Some(true), ..Default::default()
    /// })).unwrap();
    /// let input = AlunoInput {
    ///     nome: Some("Ana".into()),
    ///     data_nascimento: chrono::NaiveDate::from_ymd_opt(2005, 1, 1),
    ///     sexo: Some('F'),
    ///     turma_id: turma.id,
    ///     ..Default::default()
    /// };
    /// let created = tokio_test::block_on(AlunoService::new(repo).create(input)).unwrap();
    /// assert!(created.report.contains("Nome: Ana"));
    /// ```
    #[instrument(skip(self, input), fields(turma_id = input.turma_id))]
    pub async fn create(&self, input: AlunoInput) -> Result<Created, ServiceError> {
        let novo = self.check_data(&input).await?;
        let aluno = self.repo.add_aluno(&novo).await?;
        info!(id = aluno.id, turma_id = aluno.turma_id, "aluno_created");
        Ok(Created {
            id: aluno.id,
            report: format!("Cadastro criado com sucesso.\n\n{}", report::aluno_block(&aluno)),
        })
    }

    /// Full-record replace. The id check runs before any store access.
    #[instrument(skip(self, input), fields(body_id = input.id))]
    pub async fn replace(&self, id: i32, input: AlunoInput) -> Result<String, ServiceError> {
        if id != input.id {
            return Err(ServiceError::bad_request("Favor informar apenas um id."));
        }
        let aluno = self.check_data(&input).await?.with_id(id);
        if !self.repo.replace_aluno(&aluno).await? {
            return Err(ServiceError::not_found("Não há nenhum aluno cadastrado com o id informado."));
        }
        info!(id, "aluno_replaced");
        Ok(format!("O cadastro de {} foi alterado com sucesso.", aluno.nome))
    }

    #[instrument(skip(self))]
    pub async fn delete(&self, id: i32) -> Result<String, ServiceError> {
        let not_found = || ServiceError::not_found(format!("Não há nenhum aluno cadastrado com o id {}.", id));
        let aluno = self.repo.find_aluno(id).await?.ok_or_else(not_found)?;
        if !self.repo.remove_aluno(id).await? {
            return Err(not_found());
        }
        info!(id, "aluno_deleted");
        Ok(format!("Aluno(a) {} excluído(a) com sucesso.", aluno.nome))
    }

    /// Field rules in fixed order; the first failure is reported.
    async fn check_data(&self, input: &AlunoInput) -> Result<NovoAluno, ServiceError> {
        let nome = input.nome.as_deref().unwrap_or_default();
        if nome.is_empty() {
            return Err(rejected("É obrigatório o preenchimento do campo 'Nome'."));
        }
        if input.turma_id < 1 {
            return Err(rejected("É obrigatório o preenchimento do campo 'Id da turma' com um valor positivo."));
        }
        if !self.repo.turma_exists(input.turma_id).await? {
            return Err(rejected(format!("Não existe nenhuma turma cadastrada com o id {}.", input.turma_id)));
        }
        let sexo = match input.sexo {
            Some(c) if c != '\0' => c,
            _ => return Err(rejected("É obrigatório o preenchimento do campo 'Sexo'.")),
        };
        let data_nascimento = match input.data_nascimento {
            Some(d) if !is_unset_date(d) => d,
            _ => return Err(rejected("É obrigatório o preenchimento do campo 'Data de nascimento'.")),
        };
        Ok(NovoAluno {
            nome: nome.to_string(),
            data_nascimento,
            sexo,
            total_faltas: input.total_faltas,
            turma_id: input.turma_id,
        })
    }
}

fn rejected(msg: impl Into<String>) -> ServiceError {
    let err = ServiceError::bad_request(msg);
    debug!(reason = %err, "aluno_rejected");
    err
}
