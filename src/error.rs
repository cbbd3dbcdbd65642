use axum::{http::StatusCode, response::IntoResponse};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Schema error: {0}")]
    Schema(String),

    #[error("Insufficient data: {0}")]
    InsufficientData(String),

    #[error("Invalid American odds: {0} (magnitude must be >= 100)")]
    InvalidOdds(f64),

    #[error("Domain error: {0}")]
    Domain(String),

    #[error("Missing feature columns: {0:?}")]
    MissingFeature(Vec<String>),

    #[error("No trained model for prop type: {0}")]
    ModelNotFound(String),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, AppError>;

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Schema(_)
            | AppError::MissingFeature(_)
            | AppError::InvalidOdds(_)
            | AppError::Domain(_) => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::ModelNotFound(_) | AppError::InsufficientData(_) => StatusCode::NOT_FOUND,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        (self.status(), self.to_string()).into_response()
    }
}
