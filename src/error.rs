//!
//! # Custom Error Handling
//!
//! This module defines the error type `AppError` returned by every HTTP handler.
//! Each variant maps to exactly one status code, and every error body has the
//! same shape: `{"message": "..."}`.
//!
//! `AppError` implements `actix_web::error::ResponseError`, so handlers can
//! return `Result<_, AppError>` and actix renders the failure. The auth gate
//! renders it by hand because it answers before any handler runs.

use actix_web::{error::ResponseError, http::StatusCode, HttpResponse};
use serde_json::json;
use thiserror::Error;

use crate::auth::TokenError;

/// Message sent when a protected route is called without a bearer token.
pub const MSG_ACCESS_DENIED: &str = "Acesso negado. Token não fornecido.";
/// Message sent when the bearer token fails verification.
pub const MSG_INVALID_TOKEN: &str = "Token inválido ou expirado.";
/// Message sent when the login pair does not match the configured one.
pub const MSG_WRONG_CREDENTIALS: &str = "Credenciais erradas";
pub const MSG_TASK_NOT_FOUND: &str = "Tarefa não encontrada";
pub const MSG_CREATE_FAILED: &str = "Erro ao criar a tarefa";
pub const MSG_INVALID_ID: &str = "ID inválido";
pub const MSG_DELETE_FAILED: &str = "Erro ao apagar a tarefa";
pub const MSG_TASK_DELETED: &str = "Tarefa apagada com sucesso";
pub const MSG_LIST_FAILED: &str = "Erro ao listar as tarefas";
/// Message sent when a body declared as JSON cannot be parsed.
pub const MSG_INVALID_BODY: &str = "Corpo da requisição inválido";

/// Represents all errors a request can end with.
#[derive(Debug, Error)]
pub enum AppError {
    /// No credential was presented (HTTP 403).
    #[error("Forbidden: {0}")]
    Forbidden(String),
    /// A credential was presented and rejected, or login failed (HTTP 401).
    #[error("Unauthorized: {0}")]
    Unauthorized(String),
    /// Malformed input, malformed id or a rejected store write (HTTP 400).
    #[error("Bad Request: {0}")]
    BadRequest(String),
    /// The targeted task does not exist (HTTP 404).
    #[error("Not Found: {0}")]
    NotFound(String),
    /// Anything unexpected (HTTP 500).
    #[error("Internal Server Error: {0}")]
    InternalServerError(String),
}

impl AppError {
    /// The client-facing message, without the variant prefix used by `Display`.
    pub fn message(&self) -> &str {
        match self {
            AppError::Forbidden(msg)
            | AppError::Unauthorized(msg)
            | AppError::BadRequest(msg)
            | AppError::NotFound(msg)
            | AppError::InternalServerError(msg) => msg,
        }
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::Forbidden(_) => StatusCode::FORBIDDEN,
            AppError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::InternalServerError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(json!({
            "message": self.message()
        }))
    }
}

/// Any verification failure collapses into the single "invalid or expired" answer.
impl From<TokenError> for AppError {
    fn from(error: TokenError) -> AppError {
        match error {
            TokenError::Signing(msg) => AppError::InternalServerError(msg),
            _ => AppError::Unauthorized(MSG_INVALID_TOKEN.into()),
        }
    }
}
