//! Service layer for the school records backend.
//! - Validation and relationship-integrity rules for students and classes.
//! - Text report assembly joining the two entities.
//! - Persistence behind the [`escola::repository::EscolaRepository`] trait.

pub mod errors;
pub mod escola;
#[cfg(test)]
pub mod test_support;
