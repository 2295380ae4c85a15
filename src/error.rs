use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use tracing::error;

use crate::store::StoreError;

pub const ACCESS_DENIED: &str = "Access Denied: You do not have permission to view this page.";

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("{}", ACCESS_DENIED)]
    Forbidden,
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error("session could not be encoded: {0}")]
    Session(#[from] serde_json::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            AppError::Forbidden => (StatusCode::FORBIDDEN, ACCESS_DENIED).into_response(),
            // Текст ошибки подключения показываем пользователю как есть
            AppError::Store(e) if e.is_unavailable() => {
                error!("Error connecting to database: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    format!("Database connection failed: {}", e),
                )
                    .into_response()
            }
            other => {
                error!("Internal server error: {}", other);
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error").into_response()
            }
        }
    }
}
