use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::{header, StatusCode},
    Json,
};
use service::escola::domain::TurmaInput;
use tracing::{info, warn};

use crate::errors::ApiError;
use crate::state::ServerState;

type Created = (StatusCode, [(header::HeaderName, String); 1], String);

#[utoipa::path(
    get, path = "/classes", tag = "classes",
    responses(
        (status = 200, description = "Active classes with enrolled students", body = String, content_type = "text/plain"),
        (status = 404, description = "No class registered")
    )
)]
pub async fn list(State(state): State<ServerState>) -> Result<String, ApiError> {
    Ok(state.turmas().list_active().await?)
}

#[utoipa::path(
    get, path = "/classes/{id}", tag = "classes",
    params(("id" = i32, Path, description = "Class id")),
    responses(
        (status = 200, description = "Class detail", body = String, content_type = "text/plain"),
        (status = 404, description = "Not Found")
    )
)]
pub async fn get(State(state): State<ServerState>, Path(id): Path<i32>) -> Result<String, ApiError> {
    Ok(state.turmas().get(id).await?)
}

#[utoipa::path(
    post, path = "/classes", tag = "classes",
    request_body = crate::openapi::TurmaInputDoc,
    responses(
        (status = 201, description = "Created", body = String, content_type = "text/plain"),
        (status = 400, description = "Empty or duplicate name")
    )
)]
pub async fn create(
    State(state): State<ServerState>,
    body: Result<Json<TurmaInput>, JsonRejection>,
) -> Result<Created, ApiError> {
    let Json(input) = body?;
    let created = state.turmas().create(input).await.inspect_err(|e| warn!(err = %e, "create turma rejected"))?;
    info!(id = created.id, "created turma");
    Ok((StatusCode::CREATED, [(header::LOCATION, format!("/classes/{}", created.id))], created.report))
}

#[utoipa::path(
    put, path = "/classes/{id}", tag = "classes",
    params(("id" = i32, Path, description = "Class id")),
    request_body = crate::openapi::TurmaInputDoc,
    responses(
        (status = 200, description = "Updated", body = String, content_type = "text/plain"),
        (status = 400, description = "Id mismatch or empty name"),
        (status = 404, description = "Not Found")
    )
)]
pub async fn replace(
    State(state): State<ServerState>,
    Path(id): Path<i32>,
    body: Result<Json<TurmaInput>, JsonRejection>,
) -> Result<String, ApiError> {
    let Json(input) = body?;
    Ok(state.turmas().replace(id, input).await?)
}

#[utoipa::path(
    delete, path = "/classes/{id}", tag = "classes",
    params(("id" = i32, Path, description = "Class id")),
    responses(
        (status = 200, description = "Deleted", body = String, content_type = "text/plain"),
        (status = 400, description = "Class has enrolled students"),
        (status = 404, description = "Not Found")
    )
)]
pub async fn delete(State(state): State<ServerState>, Path(id): Path<i32>) -> Result<String, ApiError> {
    let msg = state.turmas().delete(id).await.inspect_err(|e| warn!(id, err = %e, "delete turma rejected"))?;
    info!(id, "deleted turma");
    Ok(msg)
}
