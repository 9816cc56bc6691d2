use crate::chart::{BudgetError, OptionChangeError};
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
    Budget(BudgetError),
    Change(OptionChangeError),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Config(err) => write!(f, "configuration error: {}", err),
            AppError::Telemetry(err) => write!(f, "telemetry error: {}", err),
            AppError::Io(err) => write!(f, "io error: {}", err),
            AppError::Server(err) => write!(f, "server error: {}", err),
            AppError::Budget(err) => write!(f, "budget exceeded: {}", err),
            AppError::Change(err) => write!(f, "invalid option change: {}", err),
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
            AppError::Budget(err) => Some(err),
            AppError::Change(err) => Some(err),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match self {
            AppError::Budget(_) => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::Change(_) => StatusCode::BAD_REQUEST,
            AppError::Config(_)
            | AppError::Telemetry(_)
            | AppError::Io(_)
            | AppError::Server(_) => StatusCode::INTERNAL_SERVER_ERROR,
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

impl From<BudgetError> for AppError {
    fn from(value: BudgetError) -> Self {
        Self::Budget(value)
    }
}

impl From<OptionChangeError> for AppError {
    fn from(value: OptionChangeError) -> Self {
        Self::Change(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chart::BudgetCategory;

    #[test]
    fn budget_errors_map_to_unprocessable() {
        let err = AppError::from(BudgetError::Exceeded {
            max: 5,
            category: BudgetCategory::Outline,
        });
        assert!(err.to_string().contains("only select 5 bad options"));
        assert_eq!(
            err.into_response().status(),
            StatusCode::UNPROCESSABLE_ENTITY
        );
    }

    #[test]
    fn change_errors_map_to_bad_request() {
        let err = AppError::from(OptionChangeError::UnknownKey("zz".to_string()));
        assert_eq!(err.into_response().status(), StatusCode::BAD_REQUEST);
    }
}
