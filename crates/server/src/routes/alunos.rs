//! `/students` handlers. Bodies are plain text reports.

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::{header, StatusCode},
    Json,
};
use service::escola::domain::AlunoInput;
use tracing::{info, warn};

use crate::errors::ApiError;
use crate::state::ServerState;

type Created = (StatusCode, [(header::HeaderName, String); 1], String);

#[utoipa::path(
    get, path = "/students", tag = "students",
    responses(
        (status = 200, description = "Students of active classes", body = String, content_type = "text/plain"),
        (status = 404, description = "No student registered")
    )
)]
pub async fn list(State(state): State<ServerState>) -> Result<String, ApiError> {
    Ok(state.alunos().list_active().await?)
}

#[utoipa::path(
    get, path = "/students/{id}", tag = "students",
    params(("id" = i32, Path, description = "Student id")),
    responses(
        (status = 200, description = "Student detail with class status", body = String, content_type = "text/plain"),
        (status = 404, description = "Not Found")
    )
)]
pub async fn get(State(state): State<ServerState>, Path(id): Path<i32>) -> Result<String, ApiError> {
    Ok(state.alunos().get(id).await?)
}

#[utoipa::path(
    post, path = "/students", tag = "students",
    request_body = crate::openapi::AlunoInputDoc,
    responses(
        (status = 201, description = "Created", body = String, content_type = "text/plain"),
        (status = 400, description = "Validation Error")
    )
)]
pub async fn create(
    State(state): State<ServerState>,
    body: Result<Json<AlunoInput>, JsonRejection>,
) -> Result<Created, ApiError> {
    let Json(input) = body?;
    let created = state.alunos().create(input).await.inspect_err(|e| warn!(err = %e, "create aluno rejected"))?;
    info!(id = created.id, "created aluno");
    Ok((StatusCode::CREATED, [(header::LOCATION, format!("/students/{}", created.id))], created.report))
}

#[utoipa::path(
    put, path = "/students/{id}", tag = "students",
    params(("id" = i32, Path, description = "Student id")),
    request_body = crate::openapi::AlunoInputDoc,
    responses(
        (status = 200, description = "Updated", body = String, content_type = "text/plain"),
        (status = 400, description = "Id mismatch or Validation Error"),
        (status = 404, description = "Not Found")
    )
)]
pub async fn replace(
    State(state): State<ServerState>,
    Path(id): Path<i32>,
    body: Result<Json<AlunoInput>, JsonRejection>,
) -> Result<String, ApiError> {
    let Json(input) = body?;
    Ok(state.alunos().replace(id, input).await?)
}

#[utoipa::path(
    delete, path = "/students/{id}", tag = "students",
    params(("id" = i32, Path, description = "Student id")),
    responses(
        (status = 200, description = "Deleted", body = String, content_type = "text/plain"),
        (status = 404, description = "Not Found")
    )
)]
pub async fn delete(State(state): State<ServerState>, Path(id): Path<i32>) -> Result<String, ApiError> {
    let msg = state.alunos().delete(id).await?;
    info!(id, "deleted aluno");
    Ok(msg)
}
