//! Typed errors and HTTP mapping.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

/// Model declaration errors, raised once at route-generation time.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum SchemaError {
    #[error("the \"{0}\" model does not declare a primary key")]
    NoPrimaryKey(String),
    #[error("the \"{0}\" model declares more than one primary key: \"{1}\" and \"{2}\"")]
    MultiplePrimaryKeys(String, String, String),
    #[error("unknown model \"{0}\"")]
    UnknownModel(String),
}

/// One discriminant space for HTTP-layer and data-layer failures.
/// Messages are fully formed where the failure happens; nothing
/// between the failure point and the HTTP boundary inspects them.
#[derive(Error, Debug)]
pub enum OperationError {
    #[error("{0}")]
    BadRequest(String),
    #[error("{0}")]
    EntityNotFound(String),
    #[error("{0}")]
    DuplicatePrimaryKey(String),
    #[error("{0}")]
    Internal(String),
}

impl OperationError {
    /// Total mapping from error kind to response status.
    pub fn status(&self) -> StatusCode {
        match self {
            OperationError::EntityNotFound(_) => StatusCode::NOT_FOUND,
            OperationError::DuplicatePrimaryKey(_) => StatusCode::CONFLICT,
            OperationError::BadRequest(_) => StatusCode::BAD_REQUEST,
            OperationError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

#[derive(Serialize)]
pub struct ErrorBody {
    pub message: String,
}

impl IntoResponse for OperationError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = ErrorBody {
            message: self.to_string(),
        };
        (status, Json(body)).into_response()
    }
}
