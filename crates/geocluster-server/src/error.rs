//! Error types for the clustering service

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use geocluster_core::ClusterError;
use serde_json::json;
use thiserror::Error;

/// Result type alias for service operations
pub type Result<T> = std::result::Result<T, Error>;

/// Service errors
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Upstream fetch or payload parsing failure
    #[error("Data source error: {0}")]
    DataSource(String),

    /// Clustering rejected its parameters or input
    #[error("Clustering error: {0}")]
    Cluster(#[from] ClusterError),

    /// Presentation layer failure
    #[error("Render error: {0}")]
    Render(String),

    /// Requested resource does not exist
    #[error("Not found: {0}")]
    NotFound(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// HTTP request error
    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl Error {
    /// Create a data source error
    pub fn data_source(message: impl Into<String>) -> Self {
        Self::DataSource(message.into())
    }

    /// Create a render error
    pub fn render(message: impl Into<String>) -> Self {
        Self::Render(message.into())
    }

    /// Create an internal error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    /// Whether the failure happened while obtaining the input data
    pub fn is_data_source(&self) -> bool {
        matches!(self, Error::DataSource(_) | Error::Http(_))
    }

    fn status_and_type(&self) -> (StatusCode, &'static str) {
        match self {
            Error::Config(_) => (StatusCode::INTERNAL_SERVER_ERROR, "config_error"),
            Error::DataSource(_) => (StatusCode::BAD_GATEWAY, "data_source_error"),
            Error::Cluster(_) => (StatusCode::UNPROCESSABLE_ENTITY, "cluster_error"),
            Error::Render(_) => (StatusCode::INTERNAL_SERVER_ERROR, "render_error"),
            Error::NotFound(_) => (StatusCode::NOT_FOUND, "not_found"),
            Error::Io(_) => (StatusCode::INTERNAL_SERVER_ERROR, "io_error"),
            Error::Json(_) => (StatusCode::BAD_GATEWAY, "json_error"),
            Error::Http(_) => (StatusCode::BAD_GATEWAY, "http_error"),
            Error::Internal(_) => (StatusCode::INTERNAL_SERVER_ERROR, "internal_error"),
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let (status, error_type) = self.status_and_type();
        tracing::error!(error_type, "request failed: {}", self);

        let body = Json(json!({
            "error": {
                "type": error_type,
                "message": self.to_string(),
            }
        }));

        (status, body).into_response()
    }
}
