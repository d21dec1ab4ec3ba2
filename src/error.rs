/*
 * Responsibility
 * - アプリ共通の AppError 定義（閉じたエラー集合）
 * - IntoResponse 実装 (HTTP status / JSON error body) を一箇所に集約
 * - RepoError / IdCodecError を統一的に変換
 */
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;

use crate::repos::error::RepoError;
use crate::services::id_codec::IdCodecError;

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: ErrorBody,
}

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub code: &'static str,
    pub message: String,
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error("{0}")]
    Validation(&'static str),

    #[error("email is already registered")]
    DuplicateEmail,

    #[error("invalid email or password")]
    InvalidCredentials,

    #[error("unauthorized")]
    Unauthorized,

    #[error("not authorized for this resource")]
    Forbidden,

    #[error("{resource} not found")]
    NotFound { resource: &'static str },

    #[error("invalid or expired reset token")]
    InvalidOrExpiredToken,

    #[error("server error: {0}")]
    Internal(String),
}

impl AppError {
    pub fn internal(e: impl std::fmt::Display) -> Self {
        Self::Internal(e.to_string())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code) = match &self {
            AppError::Validation(_) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR"),
            AppError::DuplicateEmail => (StatusCode::BAD_REQUEST, "DUPLICATE_EMAIL"),
            AppError::InvalidCredentials => (StatusCode::UNAUTHORIZED, "INVALID_CREDENTIALS"),
            AppError::Unauthorized => (StatusCode::UNAUTHORIZED, "UNAUTHORIZED"),
            // 所有者不一致は本システムの慣例で 401 を返す
            AppError::Forbidden => (StatusCode::UNAUTHORIZED, "FORBIDDEN"),
            AppError::NotFound { .. } => (StatusCode::NOT_FOUND, "NOT_FOUND"),
            AppError::InvalidOrExpiredToken => (StatusCode::BAD_REQUEST, "INVALID_RESET_TOKEN"),
            AppError::Internal(_) => (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL"),
        };

        if let AppError::Internal(detail) = &self {
            tracing::error!(error = %detail, "internal error");
        }

        let body = ErrorResponse {
            error: ErrorBody {
                code,
                message: self.to_string(),
            },
        };

        (status, Json(body)).into_response()
    }
}

impl From<RepoError> for AppError {
    fn from(e: RepoError) -> Self {
        match e {
            // unique index 違反はこのアプリでは users.email のみ
            RepoError::Conflict => AppError::DuplicateEmail,
            RepoError::Db(e) => AppError::internal(e),
        }
    }
}

impl From<IdCodecError> for AppError {
    fn from(e: IdCodecError) -> Self {
        match e {
            // Client supplied a malformed public id (e.g. /notes/{id})
            IdCodecError::DecodeInvalidFormat | IdCodecError::DecodeOutOfRange => {
                AppError::Validation("invalid note id")
            }
            // Anything else is server-side config / programming error
            _ => AppError::internal(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn status_of(err: AppError) -> StatusCode {
        err.into_response().status()
    }

    #[test]
    fn statuses_follow_the_error_table() {
        assert_eq!(status_of(AppError::Validation("x")), StatusCode::BAD_REQUEST);
        assert_eq!(status_of(AppError::DuplicateEmail), StatusCode::BAD_REQUEST);
        assert_eq!(
            status_of(AppError::InvalidCredentials),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(status_of(AppError::Unauthorized), StatusCode::UNAUTHORIZED);
        // wrong owner is served as 401 in this API
        assert_eq!(status_of(AppError::Forbidden), StatusCode::UNAUTHORIZED);
        assert_eq!(
            status_of(AppError::NotFound { resource: "note" }),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            status_of(AppError::InvalidOrExpiredToken),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            status_of(AppError::Internal("boom".into())),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn conflict_from_repo_becomes_duplicate_email() {
        let err: AppError = RepoError::Conflict.into();
        assert!(matches!(err, AppError::DuplicateEmail));
    }
}
