use axum::{Json, http::StatusCode, response::IntoResponse};
use serde::Serialize;
use sqlx::Error as SqlxError;
use sqlx::error::ErrorKind;
use thiserror::Error as ThisError;

#[derive(Debug, ThisError)]
pub enum CatalogError {
    #[error("Store unavailable: {0}")]
    StoreUnavailable(String),

    #[error("Duplicate key: {0}")]
    DuplicateKey(String),

    #[error("Foreign key violation: {0}")]
    ForeignKeyViolation(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Password hashing error: {0}")]
    PasswordHash(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Data corruption: {0}")]
    DataCorruption(String),

    #[error("Database error: {0}")]
    Database(SqlxError),
}

impl CatalogError {
    /// Constraint violations are caller mistakes; everything else is ours.
    pub fn is_constraint(&self) -> bool {
        matches!(
            self,
            CatalogError::DuplicateKey(_)
                | CatalogError::ForeignKeyViolation(_)
                | CatalogError::Validation(_)
        )
    }
}

impl From<SqlxError> for CatalogError {
    fn from(e: SqlxError) -> Self {
        if let SqlxError::Database(db_err) = &e {
            match db_err.kind() {
                ErrorKind::UniqueViolation => {
                    return CatalogError::DuplicateKey(db_err.message().to_string());
                }
                ErrorKind::ForeignKeyViolation => {
                    return CatalogError::ForeignKeyViolation(db_err.message().to_string());
                }
                _ => {}
            }
        }
        match e {
            SqlxError::Io(_)
            | SqlxError::Tls(_)
            | SqlxError::Protocol(_)
            | SqlxError::PoolTimedOut
            | SqlxError::PoolClosed
            | SqlxError::WorkerCrashed => CatalogError::StoreUnavailable(e.to_string()),
            SqlxError::Decode(_) | SqlxError::ColumnDecode { .. } => {
                CatalogError::DataCorruption(e.to_string())
            }
            other => CatalogError::Database(other),
        }
    }
}

impl From<argon2::password_hash::Error> for CatalogError {
    fn from(e: argon2::password_hash::Error) -> Self {
        CatalogError::PasswordHash(e.to_string())
    }
}

impl IntoResponse for CatalogError {
    fn into_response(self) -> axum::response::Response {
        let (status, code, message) = match &self {
            CatalogError::Validation(msg) => {
                (StatusCode::BAD_REQUEST, "INVALID_INPUT", msg.clone())
            }
            CatalogError::DuplicateKey(_) => (
                StatusCode::CONFLICT,
                "DUPLICATE",
                "The resource already exists.".to_string(),
            ),
            CatalogError::ForeignKeyViolation(_) => (
                StatusCode::NOT_FOUND,
                "NOT_FOUND",
                "A referenced user or product does not exist.".to_string(),
            ),
            CatalogError::StoreUnavailable(_) => (
                StatusCode::SERVICE_UNAVAILABLE, // 503
                "STORE_UNAVAILABLE",
                "The data store is currently unavailable.".to_string(),
            ),
            CatalogError::PasswordHash(_)
            | CatalogError::Config(_)
            | CatalogError::DataCorruption(_)
            | CatalogError::Database(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "INTERNAL_ERROR",
                "An internal server error occurred.".to_string(),
            ),
        };
        let body = ApiErrorBody {
            code: code.to_string(),
            message,
        };
        (status, Json(ApiErrorResponse { error: body })).into_response()
    }
}

/// Standardized API error response body
#[derive(Serialize)]
pub struct ApiErrorBody {
    pub code: String,
    pub message: String,
}

#[derive(Serialize)]
pub struct ApiErrorResponse {
    pub error: ApiErrorBody,
}
