//! Command errors and their mapping to exit codes and error bodies.

use std::process::ExitCode;

use rookie_core::DomainError;
use rookie_infra::image::AttachmentError;
use rookie_shared::ErrorResponse;

/// Application-level error type returned by command handlers.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    pub fn post_not_found(id: u64) -> Self {
        AppError::NotFound(format!("post {id} does not exist"))
    }

    pub fn exit_code(&self) -> ExitCode {
        match self {
            AppError::NotFound(_) => ExitCode::from(3),
            AppError::BadRequest(_) => ExitCode::from(2),
            AppError::Forbidden(_) => ExitCode::from(4),
            AppError::Conflict(_) => ExitCode::from(5),
            AppError::Internal(_) => ExitCode::FAILURE,
        }
    }

    pub fn to_response(&self) -> ErrorResponse {
        let (kind, title) = match self {
            AppError::NotFound(_) => ("not_found", "Not Found"),
            AppError::BadRequest(_) => ("bad_request", "Bad Request"),
            AppError::Forbidden(_) => ("forbidden", "Forbidden"),
            AppError::Conflict(_) => ("conflict", "Conflict"),
            AppError::Internal(detail) => {
                tracing::error!("Internal error: {}", detail);
                return ErrorResponse::internal(detail.clone());
            }
        };
        ErrorResponse::new(kind, title).with_detail(self.to_string())
    }
}

// Conversion from domain errors
impl From<DomainError> for AppError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::NotFound { entity_type, id } => {
                AppError::NotFound(format!("{} {} does not exist", entity_type, id))
            }
            DomainError::Validation(msg) => AppError::BadRequest(msg),
            DomainError::Duplicate(msg) => AppError::Conflict(msg),
            DomainError::Unauthorized => {
                AppError::Forbidden("only the author may do this".to_string())
            }
        }
    }
}

impl From<AttachmentError> for AppError {
    fn from(err: AttachmentError) -> Self {
        AppError::BadRequest(err.to_string())
    }
}

/// Result type alias for handlers.
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_domain_errors_map_to_app_errors() {
        assert!(matches!(
            AppError::from(DomainError::Validation("x".into())),
            AppError::BadRequest(_)
        ));
        assert!(matches!(
            AppError::from(DomainError::Duplicate("tag".into())),
            AppError::Conflict(_)
        ));
        assert!(matches!(
            AppError::from(DomainError::Unauthorized),
            AppError::Forbidden(_)
        ));
    }

    #[test]
    fn test_error_body_kind() {
        let body = AppError::post_not_found(9).to_response();
        assert_eq!(body.error_type, "not_found");
        assert_eq!(body.detail.as_deref(), Some("Not found: post 9 does not exist"));
    }
}
