use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Invalid page number: {0:?}")]
    InvalidPage(String),

    #[error("Satellite catalog is still loading")]
    CatalogLoading,

    #[error("Template error: {0}")]
    Template(#[from] tera::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match self {
            AppError::InvalidPage(_) => StatusCode::BAD_REQUEST,
            AppError::CatalogLoading => StatusCode::SERVICE_UNAVAILABLE,
            AppError::Template(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        if status.is_server_error() {
            tracing::error!("Request failed: {}", self);
        } else {
            tracing::debug!("Request failed: {}", self);
        }
        (status, self.to_string()).into_response()
    }
}
