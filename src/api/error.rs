use crate::catalog::StoreError;
use reqwest::StatusCode;
use serde_json::{json, Value};
use thiserror::Error;

/// Endpoint error with a fixed status code and a machine-readable message
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ApiError {
    #[error("Unauthorized")]
    Unauthorized,

    #[error("Forbidden")]
    Forbidden,

    #[error("{0}")]
    BadRequest(String),

    #[error("{0}")]
    NotFound(String),

    #[error("Internal error")]
    Internal(String),
}

impl ApiError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        ApiError::BadRequest(message.into())
    }

    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Unauthorized => StatusCode::UNAUTHORIZED,
            ApiError::Forbidden => StatusCode::FORBIDDEN,
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// `{"error": "<message>"}`. Internal details are not exposed.
    pub fn body(&self) -> Value {
        json!({ "error": self.to_string() })
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::AppNotFound(_) => ApiError::NotFound(err.to_string()),
            StoreError::UnknownTech(_) | StoreError::MissingField(_) => {
                ApiError::BadRequest(err.to_string())
            }
            StoreError::Storage(message) => ApiError::Internal(message),
        }
    }
}
