use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;
use tracing::error;

use crate::users::store::DuplicateUser;

/// One failed validation rule, keyed by the field it applies to.
#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct FieldError {
    pub field: &'static str,
    pub message: &'static str,
}

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("validation failed")]
    Validation(Vec<FieldError>),
    #[error("{0}")]
    NotFound(&'static str),
    #[error("A user with this ID or Email already exists!")]
    Duplicate,
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl From<DuplicateUser> for ApiError {
    fn from(_: DuplicateUser) -> Self {
        ApiError::Duplicate
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::Validation(errors) => {
                (StatusCode::BAD_REQUEST, Json(errors)).into_response()
            }
            ApiError::NotFound(message) => (StatusCode::NOT_FOUND, message).into_response(),
            ApiError::Duplicate => (
                StatusCode::BAD_REQUEST,
                "A user with this ID or Email already exists!",
            )
                .into_response(),
            ApiError::Internal(e) => {
                // Full detail stays in the log; the caller only sees a generic message.
                error!(error = %e, "unhandled internal error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "There was an internal server error.",
                )
                    .into_response()
            }
        }
    }
}
