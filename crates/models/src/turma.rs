use sea_orm::{entity::prelude::*, ColumnTrait, DatabaseConnection, QueryFilter, Set};
use serde::{Deserialize, Serialize};

use crate::{aluno, errors};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "turma")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub nome: String,
    pub ativo: Option<bool>,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {
    Aluno,
}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Relation::Aluno => Entity::has_many(aluno::Entity).into(),
        }
    }
}

impl Related<aluno::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Aluno.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn is_active(&self) -> bool {
        self.ativo == Some(true)
    }
}

pub async fn create(db: &DatabaseConnection, nome: &str, ativo: Option<bool>) -> Result<Model, errors::ModelError> {
    let am = ActiveModel {
        nome: Set(nome.to_string()),
        ativo: Set(ativo),
        ..Default::default()
    };
    am.insert(db).await.map_err(|e| errors::ModelError::Db(e.to_string()))
}

pub async fn exists_by_nome(db: &DatabaseConnection, nome: &str) -> Result<bool, errors::ModelError> {
    let count = Entity::find()
        .filter(Column::Nome.eq(nome))
        .count(db)
        .await
        .map_err(|e| errors::ModelError::Db(e.to_string()))?;
    Ok(count > 0)
}
