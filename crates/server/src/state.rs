use std::sync::Arc;

use service::escola::repository::EscolaRepository;
use service::escola::{AlunoService, TurmaService};

/// Shared handler state: only the store handle. Services are built per request.
#[derive(Clone)]
pub struct ServerState {
    pub repo: Arc<dyn EscolaRepository>,
}

impl ServerState {
    pub fn new(repo: Arc<dyn EscolaRepository>) -> Self { Self { repo } }

    pub fn alunos(&self) -> AlunoService<dyn EscolaRepository> {
        AlunoService::new(Arc::clone(&self.repo))
    }

    pub fn turmas(&self) -> TurmaService<dyn EscolaRepository> {
        TurmaService::new(Arc::clone(&self.repo))
    }
}
