//! School records: students (`aluno`) and classes (`turma`).
//!
//! Layout follows domain / repository / service, with the text reports kept
//! in their own module so they can be tested without a store.

pub mod domain;
pub mod repository;
pub mod report;
pub mod aluno_service;
pub mod turma_service;

pub mod repo {
    pub mod seaorm;
}

pub use aluno_service::AlunoService;
pub use turma_service::TurmaService;
