use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use sea_orm::DbErr;
use thiserror::Error;

/// Erreurs exposées aux clients : chaque variante correspond à un statut HTTP
/// et un corps JSON `{"error": "..."}`.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Database not configured")]
    DatabaseNotConfigured,

    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    NotFound(String),

    #[error("Method not allowed")]
    MethodNotAllowed,

    // Le détail part dans les logs, pas dans la réponse
    #[error("Database error")]
    Db(#[from] DbErr),
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::DatabaseNotConfigured | ApiError::Db(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
        }
    }

    fn error_response(&self) -> HttpResponse {
        if let ApiError::Db(e) = self {
            tracing::error!("database error: {e}");
        }

        HttpResponse::build(self.status_code())
            .insert_header(("Access-Control-Allow-Origin", "*"))
            .json(serde_json::json!({ "error": self.to_string() }))
    }
}
