use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Vacancy source returned status {status}")]
    SourceUnavailable { status: u16 },

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Cannot connect to database: {0}")]
    Connectivity(#[source] sqlx::Error),

    #[error("Query '{query}' failed: {source}")]
    QueryFailed {
        query: &'static str,
        #[source]
        source: sqlx::Error,
    },

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Wrap a sqlx error raised by one of the analytical queries.
    pub fn query(query: &'static str) -> impl FnOnce(sqlx::Error) -> AppError {
        move |source| AppError::QueryFailed { query, source }
    }
}

/// Why a single raw record did not make it into the store.
#[derive(Debug, thiserror::Error)]
pub enum SkipReason {
    #[error("employer data is missing")]
    MissingEmployer,

    #[error("malformed record: {0}")]
    Malformed(#[from] serde_json::Error),

    #[error("storage error: {0}")]
    Storage(#[from] sqlx::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            AppError::Connectivity(e) => {
                tracing::error!("Database unavailable: {e}");
                (
                    StatusCode::SERVICE_UNAVAILABLE,
                    "Database unavailable".to_string(),
                )
            }
            AppError::SourceUnavailable { .. } | AppError::Http(_) => {
                tracing::error!("{self}");
                (StatusCode::BAD_GATEWAY, "Vacancy source unavailable".to_string())
            }
            AppError::QueryFailed { query, source } => {
                tracing::error!("Query '{query}' failed: {source}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    format!("Query '{query}' failed"),
                )
            }
            AppError::Database(_) | AppError::Migration(_) | AppError::Internal(_) => {
                tracing::error!("{self}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
        };

        let body = axum::Json(json!({ "error": message }));
        (status, body).into_response()
    }
}
