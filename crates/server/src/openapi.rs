use utoipa::OpenApi;
use utoipa::ToSchema;

#[derive(ToSchema)]
pub struct HealthResponse { pub status: String }

/// Student body. Missing fields are reported by validation, in order:
/// nome, turmaId, sexo, dataNascimento.
#[derive(ToSchema)]
#[schema(rename_all = "camelCase")]
pub struct AlunoInputDoc {
    /// Must equal the path id on PUT; ignored on POST.
    pub id: Option<i32>,
    #[schema(example = "Ana")]
    pub nome: String,
    #[schema(value_type = String, format = Date, example = "2005-01-01")]
    pub data_nascimento: String,
    #[schema(value_type = String, example = "F")]
    pub sexo: String,
    pub total_faltas: Option<i32>,
    pub turma_id: i32,
}

#[derive(ToSchema)]
pub struct TurmaInputDoc {
    /// Must equal the path id on PUT; ignored on POST.
    pub id: Option<i32>,
    #[schema(example = "1A")]
    pub nome: String,
    pub ativo: Option<bool>,
}

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::routes::health,
        crate::routes::alunos::list,
        crate::routes::alunos::get,
        crate::routes::alunos::create,
        crate::routes::alunos::replace,
        crate::routes::alunos::delete,
        crate::routes::turmas::list,
        crate::routes::turmas::get,
        crate::routes::turmas::create,
        crate::routes::turmas::replace,
        crate::routes::turmas::delete,
    ),
    components(
        schemas(
            HealthResponse,
            AlunoInputDoc,
            TurmaInputDoc,
        )
    ),
    tags(
        (name = "health"),
        (name = "students", description = "Alunos"),
        (name = "classes", description = "Turmas"),
    )
)]
pub struct ApiDoc;
