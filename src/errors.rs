use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use sea_orm::DbErr;
use serde::Serialize;
use thiserror::Error;

/// Corps d'erreur uniforme renvoyé au client
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub message: String,
    pub kind: String,
    pub code: u16,
}

/// Réponse générique de succès (opérations sans corps métier)
#[derive(Debug, Serialize)]
pub struct SuccessResponse {
    pub message: String,
    pub status: String,
}

impl SuccessResponse {
    pub fn new(message: &str) -> Self {
        Self {
            message: message.to_string(),
            status: "SUCCESS".to_string(),
        }
    }
}

/// Taxonomie des erreurs métier.
/// Les échecs du gate (authn/authz) court-circuitent avant les handlers
/// mais partagent le même corps JSON.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Conflict(String),

    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    Unauthorized(String),

    #[error("{0}")]
    Unauthenticated(String),

    #[error("Erreur interne: {0}")]
    Internal(String),

    #[error("Erreur base de données: {0}")]
    Database(#[from] DbErr),
}

impl AppError {
    fn kind(&self) -> &'static str {
        match self {
            AppError::NotFound(_) => "NOT_FOUND",
            AppError::Conflict(_) => "CONFLICT",
            AppError::Validation(_) => "BAD_REQUEST",
            AppError::Unauthorized(_) => "UNAUTHORIZED",
            AppError::Unauthenticated(_) => "UNAUTHENTICATED",
            AppError::Internal(_) | AppError::Database(_) => "INTERNAL_ERROR",
        }
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Conflict(_) => StatusCode::BAD_REQUEST,
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::Unauthorized(_) => StatusCode::FORBIDDEN,
            AppError::Unauthenticated(_) => StatusCode::UNAUTHORIZED,
            AppError::Internal(_) | AppError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        if let AppError::Database(e) = self {
            tracing::error!("erreur base de données: {}", e);
        }
        HttpResponse::build(self.status_code()).json(ErrorResponse {
            message: self.to_string(),
            kind: self.kind().to_string(),
            code: self.status_code().as_u16(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(
            AppError::NotFound("x".into()).status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            AppError::Conflict("x".into()).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AppError::Unauthenticated("x".into()).status_code(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            AppError::Unauthorized("x".into()).status_code(),
            StatusCode::FORBIDDEN
        );
    }

    #[test]
    fn test_kind_labels() {
        assert_eq!(AppError::Validation("x".into()).kind(), "BAD_REQUEST");
        assert_eq!(AppError::Conflict("x".into()).kind(), "CONFLICT");
    }
}
