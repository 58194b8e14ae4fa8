use chrono::NaiveDate;
use sea_orm::{entity::prelude::*, DatabaseConnection, Set};
use serde::{Deserialize, Serialize};

use crate::{errors, turma};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "aluno")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub nome: String,
    pub data_nascimento: Date,
    /// Single-character code stored as `CHAR(1)`.
    pub sexo: String,
    pub total_faltas: Option<i32>,
    pub turma_id: i32,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {
    Turma,
}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Relation::Turma => Entity::belongs_to(turma::Entity)
                .from(Column::TurmaId)
                .to(turma::Column::Id)
                .into(),
        }
    }
}

impl Related<turma::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Turma.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    /// `'\0'` when the column is empty.
    pub fn sexo_char(&self) -> char {
        self.sexo.chars().next().unwrap_or('\0')
    }
}

pub struct NewAluno<'a> {
    pub nome: &'a str,
    pub data_nascimento: NaiveDate,
    pub sexo: char,
    pub total_faltas: Option<i32>,
    pub turma_id: i32,
}

/// Insert a student. Field rules are enforced by the service before this runs.
pub async fn create(db: &DatabaseConnection, input: NewAluno<'_>) -> Result<Model, errors::ModelError> {
    let am = ActiveModel {
        nome: Set(input.nome.to_string()),
        data_nascimento: Set(input.data_nascimento),
        sexo: Set(input.sexo.to_string()),
        total_faltas: Set(input.total_faltas),
        turma_id: Set(input.turma_id),
        ..Default::default()
    };
    am.insert(db).await.map_err(|e| errors::ModelError::Db(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sexo_char_reads_first_character() {
        let m = Model {
            id: 1,
            nome: "Ana".into(),
            data_nascimento: NaiveDate::from_ymd_opt(2005, 1, 1).unwrap(),
            sexo: "F".into(),
            total_faltas: None,
            turma_id: 1,
        };
        assert_eq!(m.sexo_char(), 'F');
        assert_eq!(Model { sexo: String::new(), ..m }.sexo_char(), '\0');
    }
}
