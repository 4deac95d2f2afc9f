use actix_web::http::{header, StatusCode};
use actix_web::{HttpResponse, ResponseError};
use jsonwebtoken::errors::Error as JsonWebTokenError;
use serde_json::json;
use sqlx::Error as SqlxError;
use thiserror::Error as ThisError;

use crate::export::ExportError;

#[derive(Debug, ThisError)]
pub enum Error {
    #[error("database error: {0}")]
    DatabaseError(#[from] SqlxError),

    #[error("jwt error: {0}")]
    JWTError(#[from] JsonWebTokenError),

    #[error("bussiness error: {0}")]
    BusinessError(String),

    #[error("header error")]
    HeaderError(#[from] header::ToStrError),

    #[error("password hash error: {0}")]
    PasswordHash(String),

    #[error("export error: {0}")]
    ExportError(#[from] ExportError),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("not found: {0}")]
    NotFound(String),

    #[error("unauthorized")]
    Unauthorized,

    #[error("forbidden")]
    Forbidden,
}

impl ResponseError for Error {
    fn status_code(&self) -> StatusCode {
        match self {
            Error::BusinessError(_) => StatusCode::BAD_REQUEST,
            Error::Unauthorized | Error::JWTError(_) | Error::HeaderError(_) => StatusCode::UNAUTHORIZED,
            Error::Forbidden => StatusCode::FORBIDDEN,
            Error::NotFound(_) | Error::DatabaseError(SqlxError::RowNotFound) => StatusCode::NOT_FOUND,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();
        if status.is_server_error() {
            log::error!("{}", self);
        }
        HttpResponse::build(status).json(json!({ "error": self.to_string() }))
    }
}
