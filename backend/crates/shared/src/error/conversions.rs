//! Error conversions - From/IntoResponse implementations for [`AppError`]
//!
//! Both conversions are feature-gated so the kernel stays free of the
//! database driver and the web framework unless a crate asks for them.

#[cfg(any(feature = "sqlx", feature = "axum"))]
use super::app_error::AppError;

// ============================================================================
// SQLx conversions (feature-gated)
// ============================================================================

/// Generic message for persistence failures; the driver error is only logged
pub const INTERNAL_MESSAGE: &str = "Error interno del servidor";

#[cfg(feature = "sqlx")]
impl From<sqlx::Error> for AppError {
    fn from(err: sqlx::Error) -> Self {
        match &err {
            sqlx::Error::RowNotFound => AppError::not_found("Registro no encontrado").with_source(err),
            sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed | sqlx::Error::Io(_) => {
                AppError::service_unavailable("Servicio no disponible, intenta más tarde")
                    .with_source(err)
            }
            sqlx::Error::Database(db_err) => {
                // PostgreSQL error codes:
                // https://www.postgresql.org/docs/current/errcodes-appendix.html
                let app_err = match db_err.code().as_deref() {
                    Some("23505") => AppError::conflict("Registro duplicado"),
                    Some("23503") => AppError::bad_request("Referencia inválida"),
                    Some("23502") | Some("23514") => AppError::bad_request("Datos inválidos"),
                    Some("22003") => AppError::bad_request("Valor numérico fuera del rango permitido"),
                    Some("53000" | "53100" | "53200" | "53300" | "57P01" | "57P02" | "57P03") => {
                        AppError::service_unavailable("Servicio no disponible, intenta más tarde")
                    }
                    _ => AppError::internal(INTERNAL_MESSAGE),
                };
                app_err.with_source(err)
            }
            _ => AppError::internal(INTERNAL_MESSAGE).with_source(err),
        }
    }
}

// ============================================================================
// Axum conversions (feature-gated)
// ============================================================================

#[cfg(feature = "axum")]
impl axum::response::IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        use axum::Json;
        use axum::http::StatusCode;

        let status =
            StatusCode::from_u16(self.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        // RFC 7807 Problem Details for HTTP APIs
        let body = serde_json::json!({
            "type": format!("https://httpstatuses.io/{}", self.status_code()),
            "title": self.kind().as_str(),
            "status": self.status_code(),
            "detail": self.message(),
            "action": self.action(),
        });

        (status, Json(body)).into_response()
    }
}

#[cfg(all(test, feature = "axum"))]
mod tests {
    use super::*;
    use crate::error::kind::ErrorKind;
    use axum::response::IntoResponse;

    #[tokio::test]
    async fn test_problem_details_body() {
        let response = AppError::new(ErrorKind::Forbidden, "No puedes eliminar esta publicación").into_response();
        assert_eq!(response.status().as_u16(), 403);

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["status"], 403);
        assert_eq!(body["title"], "Forbidden");
        assert_eq!(body["detail"], "No puedes eliminar esta publicación");
        assert!(body["action"].is_null());
    }
}

#[cfg(all(test, feature = "sqlx"))]
mod sqlx_tests {
    use super::*;
    use crate::error::kind::ErrorKind;

    #[test]
    fn test_pool_timeout_is_service_unavailable() {
        let app_err: AppError = sqlx::Error::PoolTimedOut.into();
        assert_eq!(app_err.kind(), ErrorKind::ServiceUnavailable);
    }

    #[test]
    fn test_row_not_found_is_not_found() {
        let app_err: AppError = sqlx::Error::RowNotFound.into();
        assert_eq!(app_err.kind(), ErrorKind::NotFound);
    }

    #[test]
    fn test_other_errors_are_opaque() {
        let app_err: AppError = sqlx::Error::Protocol("unexpected packet".into()).into();
        assert_eq!(app_err.kind(), ErrorKind::InternalServerError);
        assert_eq!(app_err.message(), INTERNAL_MESSAGE);
    }
}
