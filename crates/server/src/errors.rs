use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use service::errors::ServiceError;
use tracing::{debug, error};

/// Plain-text error response; the body is the message verbatim.
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
}

impl ApiError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self { status, message: message.into() }
    }
}

impl From<ServiceError> for ApiError {
    fn from(e: ServiceError) -> Self {
        match e {
            ServiceError::BadRequest(msg) => ApiError::new(StatusCode::BAD_REQUEST, msg),
            ServiceError::NotFound(msg) => ApiError::new(StatusCode::NOT_FOUND, msg),
            other => {
                error!(code = other.code(), err = %other, "unhandled store failure");
                ApiError::new(StatusCode::INTERNAL_SERVER_ERROR, other.to_string())
            }
        }
    }
}

/// Malformed or mistyped bodies are client errors, never 415/422.
impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        debug!(status = %rejection.status(), err = %rejection.body_text(), "request body rejected");
        ApiError::new(StatusCode::BAD_REQUEST, rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, self.message).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use models::errors::ModelError;

    #[test]
    fn maps_service_errors_to_status() {
        assert_eq!(ApiError::from(ServiceError::bad_request("x")).status, StatusCode::BAD_REQUEST);
        assert_eq!(ApiError::from(ServiceError::not_found("x")).status, StatusCode::NOT_FOUND);
        assert_eq!(ApiError::from(ServiceError::Db("down".into())).status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            ApiError::from(ServiceError::Model(ModelError::Db("fk".into()))).status,
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn body_is_the_message() {
        let err = ApiError::from(ServiceError::not_found("Não há nenhum aluno cadastrado"));
        assert_eq!(err.message, "Não há nenhum aluno cadastrado");
    }
}
