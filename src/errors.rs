use axum::http::StatusCode;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HeatmapError {
    #[error("invalid date '{date}', expected YYYY-MM-DD")]
    InvalidDate { date: String },

    #[error("negative count {count} on {date}")]
    NegativeCount { date: String, count: i64 },

    #[error("days are not contiguous: {previous} is followed by {next}")]
    NonContiguous { previous: String, next: String },

    #[error("invalid level thresholds: {0}")]
    InvalidThresholds(String),
}

#[derive(Debug)]
pub struct AppError {
    pub status: StatusCode,
    pub message: String,
}

impl AppError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: message.into(),
        }
    }

    pub fn internal(err: impl std::error::Error) -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: err.to_string(),
        }
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        Self::internal(err)
    }
}

impl From<HeatmapError> for AppError {
    fn from(err: HeatmapError) -> Self {
        Self::bad_request(err.to_string())
    }
}

impl axum::response::IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        (self.status, self.message).into_response()
    }
}
