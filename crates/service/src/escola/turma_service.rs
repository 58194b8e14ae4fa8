use std::sync::Arc;

use tracing::{debug, info, instrument};

use super::domain::{Created, NovaTurma, Turma, TurmaInput};
use super::report;
use super::repository::EscolaRepository;
use crate::errors::ServiceError;

const NOME_OBRIGATORIO: &str = "É obrigatório o preenchimento do campo Nome.";

/// Class business service. Owns the "no delete while students are enrolled" rule.
pub struct TurmaService<R: EscolaRepository + ?Sized> {
    repo: Arc<R>,
}

impl<R: EscolaRepository + ?Sized> TurmaService<R> {
    pub fn new(repo: Arc<R>) -> Self { Self { repo } }

    #[instrument(skip(self))]
    pub async fn list_active(&self) -> Result<String, ServiceError> {
        if self.repo.count_turmas().await? == 0 {
            return Err(ServiceError::not_found("Não há nenhuma turma cadastrada."));
        }
        let turmas = self.repo.list_turmas().await?;
        let alunos = self.repo.list_alunos().await?;
        info!(count = turmas.len(), "turmas_listed");
        Ok(report::turmas_ativas(&turmas, &alunos))
    }

    #[instrument(skip(self))]
    pub async fn get(&self, id: i32) -> Result<String, ServiceError> {
        let turma = self.find_or_not_found(id).await?;
        let alunos = self.repo.list_alunos_by_turma(id).await?;
        Ok(report::turma_block(&turma, &alunos))
    }

    /// Create a class; names are checked for duplicates here and only here.
    #[instrument(skip(self, input))]
    pub async fn create(&self, input: TurmaInput) -> Result<Created, ServiceError> {
        let nome = input.nome.unwrap_or_default();
        if nome.is_empty() {
            debug!("turma_rejected_empty_nome");
            return Err(ServiceError::bad_request(NOME_OBRIGATORIO));
        }
        if self.repo.turma_exists_by_nome(&nome).await? {
            debug!(%nome, "turma_rejected_duplicate");
            return Err(ServiceError::bad_request(format!("Erro. A turma {} já está cadastrada.", nome)));
        }
        let turma = self.repo.add_turma(&NovaTurma { nome, ativo: input.ativo }).await?;
        info!(id = turma.id, "turma_created");
        Ok(Created {
            id: turma.id,
            report: format!("Turma criada com sucesso\n\n{}", report::turma_block(&turma, &[])),
        })
    }

    #[instrument(skip(self, input), fields(body_id = input.id))]
    pub async fn replace(&self, id: i32, input: TurmaInput) -> Result<String, ServiceError> {
        if id != input.id {
            return Err(ServiceError::bad_request("Favor informar apenas 1 id."));
        }
        let nome = input.nome.unwrap_or_default();
        if nome.is_empty() {
            return Err(ServiceError::bad_request(NOME_OBRIGATORIO));
        }
        let turma = Turma { id, nome, ativo: input.ativo };
        if !self.repo.replace_turma(&turma).await? {
            return Err(not_found(id));
        }
        info!(id, "turma_replaced");
        Ok(format!("Alteração realizada com sucesso na turma {} (id {}).", turma.nome, turma.id))
    }

    #[instrument(skip(self))]
    pub async fn delete(&self, id: i32) -> Result<String, ServiceError> {
        let turma = self.find_or_not_found(id).await?;
        if self.repo.turma_has_alunos(id).await? {
            return Err(ServiceError::bad_request("Não é possível excluir uma turma que possui alunos inscritos."));
        }
        if !self.repo.remove_turma(id).await? {
            return Err(not_found(id));
        }
        info!(id, "turma_deleted");
        Ok(format!("Turma {} (id {}) excluída com sucesso.", turma.nome, turma.id))
    }

    async fn find_or_not_found(&self, id: i32) -> Result<Turma, ServiceError> {
        self.repo.find_turma(id).await?.ok_or_else(|| not_found(id))
    }
}

fn not_found(id: i32) -> ServiceError {
    ServiceError::not_found(format!("Não há nenhuma turma cadastrada com o id {}.", id))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::escola::domain::NovoAluno;
    use crate::escola::repository::mock::MockEscolaRepository;
    use chrono::NaiveDate;

    fn input(nome: &str, ativo: Option<bool>) -> TurmaInput {
        TurmaInput { id: 0, nome: Some(nome.into()), ativo }
    }

    async fn enroll(repo: &MockEscolaRepository, nome: &str, turma_id: i32) {
        repo.add_aluno(&NovoAluno {
            nome: nome.into(),
            data_nascimento: NaiveDate::from_ymd_opt(2006, 3, 9).unwrap(),
            sexo: 'M',
            total_faltas: Some(1),
            turma_id,
        })
        .await
        .unwrap();
    }

    #[tokio::test]
    async fn create_reports_new_class() {
        let svc = TurmaService::new(Arc::new(MockEscolaRepository::default()));
        let created = svc.create(input("1A", Some(true))).await.unwrap();
        assert_eq!(
            created.report,
            format!(
                "Turma criada com sucesso\n\nTurma: 1A\nId: {}\nStatus: ativa\nAlunos matriculados:\n{}\n",
                created.id,
                report::SEM_ALUNOS_MATRICULADOS
            )
        );
    }

    #[tokio::test]
    async fn create_requires_nome() {
        let svc = TurmaService::new(Arc::new(MockEscolaRepository::default()));
        let res = svc.create(TurmaInput::default()).await;
        assert!(matches!(res, Err(ServiceError::BadRequest(msg)) if msg == NOME_OBRIGATORIO));
    }

    #[tokio::test]
    async fn duplicate_name_rejected_and_single_row_kept() {
        let repo = Arc::new(MockEscolaRepository::default());
        let svc = TurmaService::new(repo.clone());
        svc.create(input("1A", Some(true))).await.unwrap();

        let res = svc.create(input("1A", Some(false))).await;
        assert!(matches!(res, Err(ServiceError::BadRequest(msg)) if msg == "Erro. A turma 1A já está cadastrada."));
        assert_eq!(repo.count_turmas().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn list_without_classes_is_not_found() {
        let svc = TurmaService::new(Arc::new(MockEscolaRepository::default()));
        assert!(matches!(svc.list_active().await, Err(ServiceError::NotFound(_))));
    }

    #[tokio::test]
    async fn list_nests_enrolled_students() {
        let repo = Arc::new(MockEscolaRepository::default());
        let svc = TurmaService::new(repo.clone());
        let a = svc.create(input("1A", Some(true))).await.unwrap();
        svc.create(input("2B", Some(false))).await.unwrap();
        enroll(&repo, "Caio", a.id).await;

        let body = svc.list_active().await.unwrap();
        assert!(body.starts_with(report::TURMAS_ATIVAS_HEADER));
        assert!(body.contains("Turma: 1A"));
        assert!(body.contains("\tNome: Caio"));
        assert!(!body.contains("2B"));
    }

    #[tokio::test]
    async fn list_placeholder_when_all_inactive() {
        let svc = TurmaService::new(Arc::new(MockEscolaRepository::default()));
        svc.create(input("1A", None)).await.unwrap();
        let body = svc.list_active().await.unwrap();
        assert!(body.contains(report::SEM_TURMAS_ATIVAS));
    }

    #[tokio::test]
    async fn get_shows_status_and_students() {
        let repo = Arc::new(MockEscolaRepository::default());
        let svc = TurmaService::new(repo.clone());
        let a = svc.create(input("1A", Some(false))).await.unwrap();
        enroll(&repo, "Caio", a.id).await;

        let body = svc.get(a.id).await.unwrap();
        assert!(body.contains("Status: inativa"));
        assert!(body.contains("\tData de Nascimento: 09/03/2006"));
        assert!(matches!(svc.get(a.id + 1).await, Err(ServiceError::NotFound(_))));
    }

    #[tokio::test]
    async fn delete_with_students_is_rejected_and_keeps_rows() {
        let repo = Arc::new(MockEscolaRepository::default());
        let svc = TurmaService::new(repo.clone());
        let a = svc.create(input("1A", Some(true))).await.unwrap();
        enroll(&repo, "Caio", a.id).await;

        let res = svc.delete(a.id).await;
        assert!(matches!(res, Err(ServiceError::BadRequest(msg)) if msg.contains("possui alunos inscritos")));
        assert!(repo.turma_exists(a.id).await.unwrap());
        assert_eq!(repo.list_alunos_by_turma(a.id).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn delete_empty_class() {
        let repo = Arc::new(MockEscolaRepository::default());
        let svc = TurmaService::new(repo.clone());
        let a = svc.create(input("1A", Some(true))).await.unwrap();

        let msg = svc.delete(a.id).await.unwrap();
        assert_eq!(msg, format!("Turma 1A (id {}) excluída com sucesso.", a.id));
        assert!(matches!(svc.delete(a.id).await, Err(ServiceError::NotFound(_))));
    }

    #[tokio::test]
    async fn replace_checks_id_then_nome_then_existence() {
        let repo = Arc::new(MockEscolaRepository::default());
        let svc = TurmaService::new(repo.clone());
        let a = svc.create(input("1A", Some(true))).await.unwrap();
        let writes = repo.write_count();

        let mismatch = TurmaInput { id: a.id + 1, ..input("1B", None) };
        let res = svc.replace(a.id, mismatch).await;
        assert!(matches!(res, Err(ServiceError::BadRequest(msg)) if msg == "Favor informar apenas 1 id."));
        assert_eq!(repo.write_count(), writes);

        let empty = TurmaInput { id: a.id, nome: Some(String::new()), ativo: None };
        assert!(matches!(svc.replace(a.id, empty).await, Err(ServiceError::BadRequest(_))));

        let ok = TurmaInput { id: a.id, ..input("1A-tarde", Some(false)) };
        assert_eq!(
            svc.replace(a.id, ok).await.unwrap(),
            format!("Alteração realizada com sucesso na turma 1A-tarde (id {}).", a.id)
        );
        assert_eq!(repo.find_turma(a.id).await.unwrap().unwrap().ativo, Some(false));

        repo.vanish_turma(a.id);
        let gone = TurmaInput { id: a.id, ..input("1A", None) };
        assert!(matches!(svc.replace(a.id, gone).await, Err(ServiceError::NotFound(_))));
    }
}
