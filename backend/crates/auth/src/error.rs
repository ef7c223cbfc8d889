//! Auth Error Types
//!
//! Account-specific error variants that integrate with the unified
//! `kernel::error::AppError` system. The `Display` text of each client-facing
//! variant is the message sent back in the problem details body.

use axum::extract::rejection::JsonRejection;
use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, kind::ErrorKind};
use thiserror::Error;

/// Auth-specific result type alias
pub type AuthResult<T> = Result<T, AuthError>;

#[derive(Debug, Error)]
pub enum AuthError {
    /// Required registration fields absent or blank
    #[error("Faltan campos obligatorios")]
    MissingFields,

    /// Login without email or password
    #[error("Faltan credenciales")]
    MissingCredentials,

    /// Email outside the institutional domain
    #[error("Solo se permiten correos institucionales {0}")]
    NonInstitutionalEmail(String),

    /// Email that is not shaped like an address at all
    #[error("Correo con formato inválido")]
    InvalidEmail,

    #[error("El correo ya está registrado")]
    EmailTaken,

    /// Unknown email or wrong password; both render identically
    #[error("Credenciales inválidas")]
    InvalidCredentials,

    #[error("Usuario no encontrado")]
    UserNotFound,

    /// No `Authorization` header, or a scheme other than `Bearer`
    #[error("No autorizado")]
    MissingToken,

    /// Bad signature, malformed token or expired token
    #[error("Token inválido o expirado")]
    InvalidToken,

    /// Body, query or path could not be parsed
    #[error("Solicitud con formato inválido")]
    MalformedRequest(String),

    #[error("Error interno del servidor")]
    Database(#[from] sqlx::Error),

    #[error("Error interno del servidor")]
    Internal(String),
}

impl AuthError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            AuthError::MissingFields
            | AuthError::MissingCredentials
            | AuthError::NonInstitutionalEmail(_)
            | AuthError::InvalidEmail
            | AuthError::MalformedRequest(_) => ErrorKind::BadRequest,
            AuthError::EmailTaken => ErrorKind::Conflict,
            AuthError::InvalidCredentials | AuthError::MissingToken | AuthError::InvalidToken => {
                ErrorKind::Unauthorized
            }
            AuthError::UserNotFound => ErrorKind::NotFound,
            AuthError::Database(_) | AuthError::Internal(_) => ErrorKind::InternalServerError,
        }
    }

    /// Convert to AppError, consuming the driver error if there is one
    pub fn into_app_error(self) -> AppError {
        match self {
            AuthError::Database(e) => AppError::from(e),
            AuthError::NonInstitutionalEmail(ref domain) => {
                let action = format!("Usa una dirección que termine en {domain}");
                AppError::new(self.kind(), self.to_string()).with_action(action)
            }
            other => AppError::new(other.kind(), other.to_string()),
        }
    }

    fn log(&self) {
        match self {
            AuthError::Database(e) => {
                tracing::error!(error = %e, "Auth database error");
            }
            AuthError::Internal(msg) => {
                tracing::error!(message = %msg, "Auth internal error");
            }
            AuthError::InvalidCredentials => {
                tracing::warn!("Invalid login attempt");
            }
            AuthError::InvalidToken => {
                tracing::warn!("Rejected bearer token");
            }
            AuthError::MalformedRequest(detail) => {
                tracing::debug!(detail = %detail, "Malformed auth request");
            }
            _ => {
                tracing::debug!(error = %self, "Auth error");
            }
        }
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        self.log();
        self.into_app_error().into_response()
    }
}

impl From<JsonRejection> for AuthError {
    fn from(rejection: JsonRejection) -> Self {
        AuthError::MalformedRequest(rejection.body_text())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kernel::error::conversions::INTERNAL_MESSAGE;

    #[test]
    fn test_kinds() {
        assert_eq!(AuthError::MissingFields.kind(), ErrorKind::BadRequest);
        assert_eq!(AuthError::EmailTaken.kind(), ErrorKind::Conflict);
        assert_eq!(AuthError::InvalidCredentials.kind(), ErrorKind::Unauthorized);
        assert_eq!(AuthError::MissingToken.kind(), ErrorKind::Unauthorized);
        assert_eq!(AuthError::UserNotFound.kind(), ErrorKind::NotFound);
        assert_eq!(
            AuthError::Internal("boom".into()).kind(),
            ErrorKind::InternalServerError
        );
    }

    #[test]
    fn test_internal_detail_is_hidden() {
        let app = AuthError::Internal("connection string leaked".into()).into_app_error();
        assert_eq!(app.message(), INTERNAL_MESSAGE);
    }

    #[test]
    fn test_pool_timeout_is_unavailable() {
        let app = AuthError::Database(sqlx::Error::PoolTimedOut).into_app_error();
        assert_eq!(app.kind(), ErrorKind::ServiceUnavailable);
    }

    #[test]
    fn test_institutional_message() {
        let err = AuthError::NonInstitutionalEmail("@correo.unicordoba.edu.co".into());
        assert_eq!(
            err.to_string(),
            "Solo se permiten correos institucionales @correo.unicordoba.edu.co"
        );
        assert!(err.into_app_error().action().is_some());
    }
}
