use crate::assessments::{AssessmentServiceError, ScoringError, SerializationError};
use crate::config::ConfigError;
use crate::telemetry::TelemetryError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use std::fmt;

#[derive(Debug)]
pub enum AppError {
    Config(ConfigError),
    Telemetry(TelemetryError),
    Io(std::io::Error),
    Server(axum::Error),
    Input(String),
    Scoring(ScoringError),
    Export(SerializationError),
    Assessment(AssessmentServiceError),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Config(err) => write!(f, "configuration error: {}", err),
            AppError::Telemetry(err) => write!(f, "telemetry error: {}", err),
            AppError::Io(err) => write!(f, "io error: {}", err),
            AppError::Server(err) => write!(f, "server error: {}", err),
            AppError::Input(detail) => write!(f, "invalid input: {}", detail),
            AppError::Scoring(err) => write!(f, "scoring error: {}", err),
            AppError::Export(err) => write!(f, "export error: {}", err),
            AppError::Assessment(err) => write!(f, "assessment error: {}", err),
        }
    }
}

impl std::error::Error for AppError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AppError::Config(err) => Some(err),
            AppError::Telemetry(err) => Some(err),
            AppError::Io(err) => Some(err),
            AppError::Server(err) => Some(err),
            AppError::Input(_) => None,
            AppError::Scoring(err) => Some(err),
            AppError::Export(err) => Some(err),
            AppError::Assessment(err) => Some(err),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match self {
            AppError::Input(_) | AppError::Scoring(_) => StatusCode::BAD_REQUEST,
            AppError::Assessment(AssessmentServiceError::MemberNotFound(_)) => {
                StatusCode::NOT_FOUND
            }
            AppError::Assessment(AssessmentServiceError::InstrumentLocked(_)) => {
                StatusCode::CONFLICT
            }
            AppError::Config(_)
            | AppError::Telemetry(_)
            | AppError::Io(_)
            | AppError::Server(_)
            | AppError::Export(_)
            | AppError::Assessment(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let body = Json(json!({ "error": self.to_string() }));
        (status, body).into_response()
    }
}

impl From<ConfigError> for AppError {
    fn from(value: ConfigError) -> Self {
        Self::Config(value)
    }
}

impl From<TelemetryError> for AppError {
    fn from(value: TelemetryError) -> Self {
        Self::Telemetry(value)
    }
}

impl From<std::io::Error> for AppError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<axum::Error> for AppError {
    fn from(value: axum::Error) -> Self {
        Self::Server(value)
    }
}

impl From<serde_json::Error> for AppError {
    fn from(value: serde_json::Error) -> Self {
        Self::Input(value.to_string())
    }
}

impl From<ScoringError> for AppError {
    fn from(value: ScoringError) -> Self {
        Self::Scoring(value)
    }
}

impl From<SerializationError> for AppError {
    fn from(value: SerializationError) -> Self {
        Self::Export(value)
    }
}

impl From<AssessmentServiceError> for AppError {
    fn from(value: AssessmentServiceError) -> Self {
        Self::Assessment(value)
    }
}
