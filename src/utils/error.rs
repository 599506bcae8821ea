use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use thiserror::Error;

use crate::database::StoreError;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Unauthorized access token.")]
    MissingToken,

    #[error("Unauthorized access.")]
    InvalidToken,

    #[error("Forbidden access.")]
    Forbidden,

    #[error("{0}")]
    BadRequest(String),

    #[error("Invalid id: {0}")]
    InvalidId(String),

    #[error("{0}")]
    NotFound(String),

    #[error("Internal server error")]
    Store(#[from] StoreError),

    #[error("Internal server error")]
    Token(#[from] jsonwebtoken::errors::Error),

    #[error("Internal server error")]
    Internal(&'static str),
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::MissingToken | ApiError::InvalidToken => StatusCode::UNAUTHORIZED,
            ApiError::Forbidden => StatusCode::FORBIDDEN,
            ApiError::BadRequest(_) | ApiError::InvalidId(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Store(_) | ApiError::Token(_) | ApiError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    fn error_response(&self) -> HttpResponse {
        if self.status_code().is_server_error() {
            log::error!("❌ Request failed: {:?}", self);
        }

        match self {
            // Auth failures answer with a JSON envelope, everything else is plain text
            ApiError::MissingToken | ApiError::InvalidToken | ApiError::Forbidden => {
                HttpResponse::build(self.status_code()).json(serde_json::json!({
                    "error": true,
                    "message": self.to_string()
                }))
            }
            _ => HttpResponse::build(self.status_code())
                .content_type("text/plain; charset=utf-8")
                .body(self.to_string()),
        }
    }
}
