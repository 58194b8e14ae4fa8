use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Persisted student (business view)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Aluno {
    pub id: i32,
    pub nome: String,
    pub data_nascimento: NaiveDate,
    pub sexo: char,
    pub total_faltas: Option<i32>,
    pub turma_id: i32,
}

/// Persisted class. Enrolled students are looked up by `turma_id`, never held here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Turma {
    pub id: i32,
    pub nome: String,
    pub ativo: Option<bool>,
}

impl Turma {
    pub fn is_active(&self) -> bool {
        self.ativo == Some(true)
    }

    /// Status word used in reports; an unset flag reads as inactive.
    pub fn status_label(&self) -> &'static str {
        if self.is_active() { "ativa" } else { "inativa" }
    }
}

/// Student request body for create and replace.
///
/// Every field is optional on the wire so that missing values reach the
/// validation rules instead of failing deserialization. `null`, `""`, `"\0"`
/// and the `0001-01-01T00:00:00` default timestamp all read as unset.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AlunoInput {
    #[serde(default, deserialize_with = "wire::id_or_zero")]
    pub id: i32,
    #[serde(default)]
    pub nome: Option<String>,
    #[serde(default, deserialize_with = "wire::optional_date")]
    pub data_nascimento: Option<NaiveDate>,
    #[serde(default, deserialize_with = "wire::optional_char")]
    pub sexo: Option<char>,
    #[serde(default)]
    pub total_faltas: Option<i32>,
    #[serde(default, deserialize_with = "wire::id_or_zero")]
    pub turma_id: i32,
}

/// Class request body for create and replace.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TurmaInput {
    #[serde(default, deserialize_with = "wire::id_or_zero")]
    pub id: i32,
    #[serde(default)]
    pub nome: Option<String>,
    #[serde(default)]
    pub ativo: Option<bool>,
}

mod wire {
    use chrono::{DateTime, NaiveDate, NaiveDateTime};
    use serde::de::Error;
    use serde::{Deserialize, Deserializer};

    pub fn id_or_zero<'de, D: Deserializer<'de>>(d: D) -> Result<i32, D::Error> {
        Ok(Option::<i32>::deserialize(d)?.unwrap_or_default())
    }

    pub fn optional_char<'de, D: Deserializer<'de>>(d: D) -> Result<Option<char>, D::Error> {
        let Some(s) = Option::<String>::deserialize(d)? else { return Ok(None) };
        let mut chars = s.chars();
        match (chars.next(), chars.next()) {
            (None, _) | (Some('\0'), None) => Ok(None),
            (Some(c), None) => Ok(Some(c)),
            _ => Err(D::Error::invalid_length(s.chars().count(), &"a single character")),
        }
    }

    /// `YYYY-MM-DD`, a naive date-time or RFC 3339; the time part is dropped.
    pub fn optional_date<'de, D: Deserializer<'de>>(d: D) -> Result<Option<NaiveDate>, D::Error> {
        let Some(s) = Option::<String>::deserialize(d)? else { return Ok(None) };
        let s = s.trim();
        if s.is_empty() {
            return Ok(None);
        }
        if let Ok(date) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
            return Ok(Some(date));
        }
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f") {
            return Ok(Some(dt.date()));
        }
        DateTime::parse_from_rfc3339(s)
            .map(|dt| Some(dt.date_naive()))
            .map_err(|e| D::Error::custom(format!("invalid date {:?}: {}", s, e)))
    }
}

/// Student fields that passed validation, ready to persist.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NovoAluno {
    pub nome: String,
    pub data_nascimento: NaiveDate,
    pub sexo: char,
    pub total_faltas: Option<i32>,
    pub turma_id: i32,
}

impl NovoAluno {
    pub fn with_id(self, id: i32) -> Aluno {
        Aluno {
            id,
            nome: self.nome,
            data_nascimento: self.data_nascimento,
            sexo: self.sexo,
            total_faltas: self.total_faltas,
            turma_id: self.turma_id,
        }
    }
}

/// Class fields that passed validation, ready to persist.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NovaTurma {
    pub nome: String,
    pub ativo: Option<bool>,
}

/// Result of a create: the store-assigned id and the summary text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Created {
    pub id: i32,
    pub report: String,
}

/// `0001-01-01` is the "never set" date clients send for an empty field.
pub fn is_unset_date(date: NaiveDate) -> bool {
    date == NaiveDate::from_ymd_opt(1, 1, 1).unwrap_or(NaiveDate::MIN)
}

impl From<models::aluno::Model> for Aluno {
    fn from(m: models::aluno::Model) -> Self {
        let sexo = m.sexo_char();
        Aluno {
            id: m.id,
            nome: m.nome,
            data_nascimento: m.data_nascimento,
            sexo,
            total_faltas: m.total_faltas,
            turma_id: m.turma_id,
        }
    }
}

impl From<models::turma::Model> for Turma {
    fn from(m: models::turma::Model) -> Self {
        Turma { id: m.id, nome: m.nome, ativo: m.ativo }
    }
}
