use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use enroll_application::RegisterUserError;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("{0}")]
    EmailAlreadyRegistered(String),

    #[error("Unexpected error: {0}")]
    UnexpectedError(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status_code = match self {
            ApiError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            ApiError::EmailAlreadyRegistered(_) => StatusCode::CONFLICT,
            ApiError::UnexpectedError(ref e) => {
                tracing::error!(error = %e, "Request failed");
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        let body = Json(ErrorResponse {
            error: self.to_string(),
        });

        (status_code, body).into_response()
    }
}

impl From<RegisterUserError> for ApiError {
    fn from(error: RegisterUserError) -> Self {
        match error {
            RegisterUserError::InvalidEmail(_)
            | RegisterUserError::InvalidName(_)
            | RegisterUserError::WeakPassword(_) => ApiError::InvalidInput(error.to_string()),
            RegisterUserError::EmailAlreadyRegistered(_) => {
                ApiError::EmailAlreadyRegistered(error.to_string())
            }
            RegisterUserError::Persistence(_)
            | RegisterUserError::EventDispatch(_)
            | RegisterUserError::Unexpected(_) => ApiError::UnexpectedError(error.to_string()),
        }
    }
}
