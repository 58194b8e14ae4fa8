use axum::{routing::get, Json, Router};
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnFailure, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::Level;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use common::types::Health;

use crate::openapi::ApiDoc;
use crate::state::ServerState;

pub mod alunos;
pub mod turmas;

#[utoipa::path(get, path = "/health", tag = "health", responses((status = 200, description = "OK")))]
pub async fn health() -> Json<Health> {
    Json(Health { status: "ok" })
}

/// Build the full application router: health, students, classes and API docs.
pub fn build_router(state: ServerState, cors: CorsLayer) -> Router {
    let students = Router::new()
        .route("/students", get(alunos::list).post(alunos::create))
        .route("/students/:id", get(alunos::get).put(alunos::replace).delete(alunos::delete));

    let classes = Router::new()
        .route("/classes", get(turmas::list).post(turmas::create))
        .route("/classes/:id", get(turmas::get).put(turmas::replace).delete(turmas::delete));

    Router::new()
        .route("/health", get(health))
        .merge(students)
        .merge(classes)
        .merge(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .with_state(state)
        .layer(cors)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO).include_headers(false))
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO).include_headers(false))
                // 5xx
                .on_failure(DefaultOnFailure::new().level(Level::ERROR)),
        )
}
