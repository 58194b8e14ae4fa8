//! SeaORM entities for the school schema and their insert helpers.

pub mod errors;
pub mod db;
pub mod turma;
pub mod aluno;

#[cfg(test)]
mod tests;
