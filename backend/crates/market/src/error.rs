//! Market Error Types
//!
//! Marketplace error variants, rendered through `kernel::error::AppError`.

use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, kind::ErrorKind};
use thiserror::Error;

use crate::domain::entity::listing::ListingAction;

/// Market-specific result type alias
pub type MarketResult<T> = Result<T, MarketError>;

#[derive(Debug, Error)]
pub enum MarketError {
    /// Required body fields absent or blank; carries the client-facing message
    #[error("{0}")]
    MissingFields(&'static str),

    /// Field present but outside its allowed range or combination
    #[error("{0}")]
    Validation(&'static str),

    #[error("Publicación no encontrada")]
    ListingNotFound,

    #[error("No puedes {0} esta publicación")]
    NotListingOwner(ListingAction),

    /// Foreign key pointing at a row that does not exist
    #[error("Referencia inválida")]
    InvalidReference,

    /// Listing still referenced by messages, barters or orders
    #[error("La publicación tiene actividad asociada")]
    ListingHasActivity,

    /// Body, query or path could not be parsed
    #[error("Solicitud con formato inválido")]
    MalformedRequest(String),

    #[error("Error interno del servidor")]
    Database(#[from] sqlx::Error),

    #[error("Error interno del servidor")]
    Internal(String),
}

impl MarketError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            MarketError::MissingFields(_)
            | MarketError::Validation(_)
            | MarketError::InvalidReference
            | MarketError::MalformedRequest(_) => ErrorKind::BadRequest,
            MarketError::ListingNotFound => ErrorKind::NotFound,
            MarketError::NotListingOwner(_) => ErrorKind::Forbidden,
            MarketError::ListingHasActivity => ErrorKind::Conflict,
            MarketError::Database(_) | MarketError::Internal(_) => {
                ErrorKind::InternalServerError
            }
        }
    }

    /// Convert to AppError, consuming the driver error if there is one
    pub fn into_app_error(self) -> AppError {
        match self {
            MarketError::Database(e) => AppError::from(e),
            other => AppError::new(other.kind(), other.to_string()),
        }
    }

    fn log(&self) {
        match self {
            MarketError::Database(e) => {
                tracing::error!(error = %e, "Market database error");
            }
            MarketError::Internal(msg) => {
                tracing::error!(message = %msg, "Market internal error");
            }
            MarketError::NotListingOwner(action) => {
                tracing::warn!(action = %action, "Listing mutation by non-owner");
            }
            MarketError::MalformedRequest(detail) => {
                tracing::debug!(detail = %detail, "Malformed market request");
            }
            _ => {
                tracing::debug!(error = %self, "Market error");
            }
        }
    }
}

impl IntoResponse for MarketError {
    fn into_response(self) -> Response {
        self.log();
        self.into_app_error().into_response()
    }
}

impl From<JsonRejection> for MarketError {
    fn from(rejection: JsonRejection) -> Self {
        MarketError::MalformedRequest(rejection.body_text())
    }
}

impl From<QueryRejection> for MarketError {
    fn from(rejection: QueryRejection) -> Self {
        MarketError::MalformedRequest(rejection.body_text())
    }
}

impl From<PathRejection> for MarketError {
    fn from(rejection: PathRejection) -> Self {
        MarketError::MalformedRequest(rejection.body_text())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_owner_messages() {
        assert_eq!(
            MarketError::NotListingOwner(ListingAction::Edit).to_string(),
            "No puedes editar esta publicación"
        );
        assert_eq!(
            MarketError::NotListingOwner(ListingAction::Delete).to_string(),
            "No puedes eliminar esta publicación"
        );
    }

    #[test]
    fn test_kinds() {
        assert_eq!(MarketError::ListingNotFound.kind(), ErrorKind::NotFound);
        assert_eq!(
            MarketError::NotListingOwner(ListingAction::Delete).kind(),
            ErrorKind::Forbidden
        );
        assert_eq!(MarketError::InvalidReference.kind(), ErrorKind::BadRequest);
        assert_eq!(MarketError::ListingHasActivity.kind(), ErrorKind::Conflict);
    }

    #[test]
    fn test_database_detail_is_hidden() {
        let app = MarketError::Database(sqlx::Error::Protocol("secret detail".into())).into_app_error();
        assert_eq!(app.kind(), ErrorKind::InternalServerError);
        assert!(!app.message().contains("secret"));
    }
}
