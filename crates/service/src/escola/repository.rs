use async_trait::async_trait;

use super::domain::{Aluno, NovaTurma, NovoAluno, Turma};
use crate::errors::ServiceError;

/// Persistence abstraction over the `aluno` and `turma` tables.
///
/// Lists are ordered by ascending id. `replace_*` and `remove_*` return
/// `false` when the target row does not exist at write time.
#[async_trait]
pub trait EscolaRepository: Send + Sync {
    async fn count_alunos(&self) -> Result<u64, ServiceError>;
    async fn list_alunos(&self) -> Result<Vec<Aluno>, ServiceError>;
    async fn find_aluno(&self, id: i32) -> Result<Option<Aluno>, ServiceError>;
    async fn list_alunos_by_turma(&self, turma_id: i32) -> Result<Vec<Aluno>, ServiceError>;
    async fn add_aluno(&self, aluno: &NovoAluno) -> Result<Aluno, ServiceError>;
    async fn replace_aluno(&self, aluno: &Aluno) -> Result<bool, ServiceError>;
    async fn remove_aluno(&self, id: i32) -> Result<bool, ServiceError>;

    async fn count_turmas(&self) -> Result<u64, ServiceError>;
    async fn list_turmas(&self) -> Result<Vec<Turma>, ServiceError>;
    async fn find_turma(&self, id: i32) -> Result<Option<Turma>, ServiceError>;
    async fn turma_exists(&self, id: i32) -> Result<bool, ServiceError>;
    async fn turma_exists_by_nome(&self, nome: &str) -> Result<bool, ServiceError>;
    async fn turma_has_alunos(&self, id: i32) -> Result<bool, ServiceError>;
    async fn add_turma(&self, turma: &NovaTurma) -> Result<Turma, ServiceError>;
    async fn replace_turma(&self, turma: &Turma) -> Result<bool, ServiceError>;
    async fn remove_turma(&self, id: i32) -> Result<bool, ServiceError>;
}

/// In-memory repository for tests and doc examples.
///
/// Enforces the `aluno.turma_id` foreign key the way the database does.
pub mod mock {
    use super::*;
    use std::collections::BTreeMap;
    use std::sync::Mutex;

    #[derive(Default)]
    struct Tables {
        alunos: BTreeMap<i32, Aluno>,
        turmas: BTreeMap<i32, Turma>,
        next_aluno_id: i32,
        next_turma_id: i32,
    }

    #[derive(Default)]
    pub struct MockEscolaRepository {
        tables: Mutex<Tables>,
        writes: Mutex<u32>,
    }

    impl MockEscolaRepository {
        /// Number of add/replace/remove calls that reached the store.
        pub fn write_count(&self) -> u32 {
            *self.writes.lock().unwrap()
        }

        /// Drop a student behind the service's back, as a concurrent request would.
        pub fn vanish_aluno(&self, id: i32) {
            self.tables.lock().unwrap().alunos.remove(&id);
        }

        pub fn vanish_turma(&self, id: i32) {
            self.tables.lock().unwrap().turmas.remove(&id);
        }

        fn record_write(&self) {
            *self.writes.lock().unwrap() += 1;
        }
    }

    fn fk_violation(turma_id: i32) -> ServiceError {
        ServiceError::Db(format!("foreign key violation: turma {} does not exist", turma_id))
    }

    #[async_trait]
    impl EscolaRepository for MockEscolaRepository {
        async fn count_alunos(&self) -> Result<u64, ServiceError> {
            Ok(self.tables.lock().unwrap().alunos.len() as u64)
        }

        async fn list_alunos(&self) -> Result<Vec<Aluno>, ServiceError> {
            Ok(self.tables.lock().unwrap().alunos.values().cloned().collect())
        }

        async fn find_aluno(&self, id: i32) -> Result<Option<Aluno>, ServiceError> {
            Ok(self.tables.lock().unwrap().alunos.get(&id).cloned())
        }

        async fn list_alunos_by_turma(&self, turma_id: i32) -> Result<Vec<Aluno>, ServiceError> {
            let tables = self.tables.lock().unwrap();
            Ok(tables.alunos.values().filter(|a| a.turma_id == turma_id).cloned().collect())
        }

        async fn add_aluno(&self, aluno: &NovoAluno) -> Result<Aluno, ServiceError> {
            self.record_write();
            let mut tables = self.tables.lock().unwrap();
            if !tables.turmas.contains_key(&aluno.turma_id) {
                return Err(fk_violation(aluno.turma_id));
            }
            tables.next_aluno_id += 1;
            let created = aluno.clone().with_id(tables.next_aluno_id);
            tables.alunos.insert(created.id, created.clone());
            Ok(created)
        }

        async fn replace_aluno(&self, aluno: &Aluno) -> Result<bool, ServiceError> {
            self.record_write();
            let mut tables = self.tables.lock().unwrap();
            if !tables.alunos.contains_key(&aluno.id) {
                return Ok(false);
            }
            if !tables.turmas.contains_key(&aluno.turma_id) {
                return Err(fk_violation(aluno.turma_id));
            }
            tables.alunos.insert(aluno.id, aluno.clone());
            Ok(true)
        }

        async fn remove_aluno(&self, id: i32) -> Result<bool, ServiceError> {
            self.record_write();
            Ok(self.tables.lock().unwrap().alunos.remove(&id).is_some())
        }

        async fn count_turmas(&self) -> Result<u64, ServiceError> {
            Ok(self.tables.lock().unwrap().turmas.len() as u64)
        }

        async fn list_turmas(&self) -> Result<Vec<Turma>, ServiceError> {
            Ok(self.tables.lock().unwrap().turmas.values().cloned().collect())
        }

        async fn find_turma(&self, id: i32) -> Result<Option<Turma>, ServiceError> {
            Ok(self.tables.lock().unwrap().turmas.get(&id).cloned())
        }

        async fn turma_exists(&self, id: i32) -> Result<bool, ServiceError> {
            Ok(self.tables.lock().unwrap().turmas.contains_key(&id))
        }

        async fn turma_exists_by_nome(&self, nome: &str) -> Result<bool, ServiceError> {
            Ok(self.tables.lock().unwrap().turmas.values().any(|t| t.nome == nome))
        }

        async fn turma_has_alunos(&self, id: i32) -> Result<bool, ServiceError> {
            Ok(self.tables.lock().unwrap().alunos.values().any(|a| a.turma_id == id))
        }

        async fn add_turma(&self, turma: &NovaTurma) -> Result<Turma, ServiceError> {
            self.record_write();
            let mut tables = self.tables.lock().unwrap();
            tables.next_turma_id += 1;
            let created = Turma { id: tables.next_turma_id, nome: turma.nome.clone(), ativo: turma.ativo };
            tables.turmas.insert(created.id, created.clone());
            Ok(created)
        }

        async fn replace_turma(&self, turma: &Turma) -> Result<bool, ServiceError> {
            self.record_write();
            let mut tables = self.tables.lock().unwrap();
            match tables.turmas.get_mut(&turma.id) {
                Some(slot) => {
                    *slot = turma.clone();
                    Ok(true)
                }
                None => Ok(false),
            }
        }

        async fn remove_turma(&self, id: i32) -> Result<bool, ServiceError> {
            self.record_write();
            let mut tables = self.tables.lock().unwrap();
            if tables.alunos.values().any(|a| a.turma_id == id) {
                return Err(ServiceError::Db(format!("foreign key violation: turma {} is referenced", id)));
            }
            Ok(tables.turmas.remove(&id).is_some())
        }
    }
}
