//! Main Crate Error

use axum::{
    Json,
    extract::rejection::{JsonRejection, PathRejection, QueryRejection},
    http::StatusCode,
    response::IntoResponse,
};
use serde_json::json;
use tracing::{error, warn};

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error(transparent)]
    IO(#[from] std::io::Error),

    #[error(transparent)]
    Models(#[from] crm_models::error::Error),

    #[error(transparent)]
    Auth(#[from] crm_auth::error::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    /* Api Errors */
    #[error("{0}")]
    Validation(String),

    #[error("{0} not found")]
    NotFound(&'static str),

    #[error("API Forbidden")]
    ApiForbidden,

    #[error("Wrong Credentials")]
    WrongCredentials,

    #[error("Context Missing")]
    CtxMissing,
}

impl From<JsonRejection> for Error {
    fn from(rejection: JsonRejection) -> Self {
        Error::Validation(rejection.body_text())
    }
}

impl From<PathRejection> for Error {
    fn from(rejection: PathRejection) -> Self {
        Error::Validation(rejection.body_text())
    }
}

impl From<QueryRejection> for Error {
    fn from(rejection: QueryRejection) -> Self {
        Error::Validation(rejection.body_text())
    }
}

impl Error {
    fn status_and_message(&self) -> (StatusCode, String) {
        match self {
            Error::Validation(cause) => (StatusCode::BAD_REQUEST, cause.clone()),
            Error::NotFound(_) => (StatusCode::NOT_FOUND, self.to_string()),
            Error::WrongCredentials => (StatusCode::UNAUTHORIZED, "Invalid credentials".into()),
            Error::CtxMissing => (StatusCode::UNAUTHORIZED, "Missing credentials".into()),
            Error::ApiForbidden => (StatusCode::FORBIDDEN, "Access forbidden".into()),
            Error::Auth(err) => match err {
                crm_auth::error::Error::InvalidToken => {
                    (StatusCode::UNAUTHORIZED, "Invalid authentication token".into())
                }
                crm_auth::error::Error::TokenMissing => {
                    (StatusCode::UNAUTHORIZED, "No token provided".into())
                }
                crm_auth::error::Error::TokenExpired => {
                    (StatusCode::UNAUTHORIZED, "Authentication token expired".into())
                }
                crm_auth::error::Error::TokenCreation(_)
                | crm_auth::error::Error::PasswordHash(_)
                | crm_auth::error::Error::UnknownRole(_) => {
                    (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error".into())
                }
            },
            Error::IO(_) | Error::Json(_) | Error::Models(_) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error".into())
            }
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> axum::response::Response {
        let (status, message) = self.status_and_message();

        let body = if status.is_server_error() {
            error!("Creating API error response for error: {:?}", self);
            json!({
                "error": {
                    "message": message,
                    "status": status.as_u16(),
                    "detail": self.to_string(),
                }
            })
        } else {
            warn!("Rejecting request: {}", self);
            json!({
                "error": {
                    "message": message,
                    "status": status.as_u16(),
                }
            })
        };

        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use axum::body::to_bytes;
    use serde_json::Value;

    use super::*;

    async fn body_of(err: Error) -> (StatusCode, Value) {
        let response = err.into_response();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn auth_failures_are_unauthorized() {
        for err in [
            Error::WrongCredentials,
            Error::CtxMissing,
            Error::Auth(crm_auth::error::Error::TokenMissing),
            Error::Auth(crm_auth::error::Error::InvalidToken),
            Error::Auth(crm_auth::error::Error::TokenExpired),
        ] {
            let (status, _) = body_of(err).await;
            assert_eq!(status, StatusCode::UNAUTHORIZED);
        }
    }

    #[tokio::test]
    async fn validation_carries_cause() {
        let (status, body) = body_of(Error::Validation("email taken".into())).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["message"], "email taken");
        assert_eq!(body["error"]["status"], 400);
        assert!(body["error"].get("detail").is_none());
    }

    #[tokio::test]
    async fn internal_errors_surface_detail() {
        let err = Error::Models(crm_models::error::Error::Poisoned);
        let (status, body) = body_of(err).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"]["detail"], "Store lock poisoned");
    }

    #[tokio::test]
    async fn forbidden_and_not_found() {
        assert_eq!(body_of(Error::ApiForbidden).await.0, StatusCode::FORBIDDEN);
        let (status, body) = body_of(Error::NotFound("Deal")).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"]["message"], "Deal not found");
    }
}
