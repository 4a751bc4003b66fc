use salvo::http::StatusCode;
use salvo::prelude::*;
use serde_json::json;
use thiserror::Error;

pub const INVALID_DATE_MESSAGE: &str = "Formato de fecha inválido.";

/// Failures reported to API clients. Storage detail never reaches the body;
/// `Internal` carries it only for the log line.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Formato de fecha inválido.")]
    InvalidDate,

    #[error("cuerpo de la solicitud inválido: {0}")]
    InvalidBody(String),

    #[error("{0}")]
    Validation(String),

    #[error("el CUIT {0} ya está registrado")]
    DuplicateCuit(String),

    #[error("el proveedor {0} no existe")]
    UnknownSupplier(i64),

    #[error("error interno del servidor")]
    Internal(String),
}

impl ApiError {
    pub fn code(&self) -> &'static str {
        match self {
            Self::InvalidDate => "INVALID_DATE",
            Self::InvalidBody(_) => "INVALID_BODY",
            Self::Validation(_) => "VALIDATION_ERROR",
            Self::DuplicateCuit(_) => "DUPLICATE_CUIT",
            Self::UnknownSupplier(_) => "SUPPLIER_NOT_FOUND",
            Self::Internal(_) => "INTERNAL_ERROR",
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            _ => StatusCode::BAD_REQUEST,
        }
    }

    /// Client-facing message. `context` prefixes everything except the fixed
    /// date message and internal errors.
    pub fn message(&self, context: Option<&str>) -> String {
        match (self, context) {
            (Self::InvalidDate | Self::Internal(_), _) | (_, None) => self.to_string(),
            (_, Some(context)) => format!("{context}: {self}"),
        }
    }
}

pub fn render_error(res: &mut Response, err: &ApiError, context: Option<&str>) {
    match err {
        ApiError::Internal(detail) => tracing::error!(code = err.code(), %detail, "request failed"),
        _ => tracing::warn!(code = err.code(), error = %err, "request rejected"),
    }

    res.status_code(err.status());
    res.render(Json(json!({
        "message": err.message(context),
        "code": err.code(),
    })));
}

#[cfg(test)]
mod tests {
    use super::{ApiError, INVALID_DATE_MESSAGE};
    use salvo::http::StatusCode;

    #[test]
    fn context_prefixes_client_errors() {
        let err = ApiError::DuplicateCuit("30-22222222-2".to_string());
        assert_eq!(
            err.message(Some("Error al guardar proveedor")),
            "Error al guardar proveedor: el CUIT 30-22222222-2 ya está registrado"
        );
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn invalid_date_message_is_fixed() {
        let err = ApiError::InvalidDate;
        assert_eq!(err.message(Some("Error al registrar factura")), INVALID_DATE_MESSAGE);
        assert_eq!(err.code(), "INVALID_DATE");
    }

    #[test]
    fn internal_errors_hide_detail() {
        let err = ApiError::Internal("disk I/O error".to_string());
        let message = err.message(Some("Error al guardar proveedor"));
        assert!(!message.contains("disk"));
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
