//! Response types for the Take-Home Pay Engine API.
//!
//! This module defines the error response structures, the prefecture
//! listing body, and the mapping from [`EngineError`] to HTTP responses.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::config::{Prefecture, PrefectureTable};
use crate::error::EngineError;

/// API error response structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    /// Error code for programmatic handling.
    pub code: String,
    /// Human-readable error message.
    pub message: String,
    /// Optional details about the error.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: None,
        }
    }

    /// Creates a new API error with details.
    pub fn with_details(
        code: impl Into<String>,
        message: impl Into<String>,
        details: impl Into<String>,
    ) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: Some(details.into()),
        }
    }

    /// Creates a validation error response.
    pub fn validation_error(message: impl Into<String>) -> Self {
        Self::new("VALIDATION_ERROR", message)
    }

    /// Creates a malformed JSON error response.
    pub fn malformed_json(message: impl Into<String>) -> Self {
        Self::new("MALFORMED_JSON", message)
    }
}

/// API error with HTTP status code.
pub struct ApiErrorResponse {
    /// The HTTP status code.
    pub status: StatusCode,
    /// The error body.
    pub error: ApiError,
}

impl IntoResponse for ApiErrorResponse {
    fn into_response(self) -> Response {
        (self.status, Json(self.error)).into_response()
    }
}

impl From<EngineError> for ApiErrorResponse {
    fn from(error: EngineError) -> Self {
        match error {
            EngineError::InvalidInput { field, message } => ApiErrorResponse {
                status: StatusCode::BAD_REQUEST,
                error: ApiError::with_details(
                    "VALIDATION_ERROR",
                    format!("Invalid field '{}': {}", field, message),
                    "The request contains an invalid value",
                ),
            },
            EngineError::ConfigNotFound { path } => ApiErrorResponse {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                error: ApiError::with_details(
                    "CONFIG_ERROR",
                    "Configuration error",
                    format!("Configuration file not found: {}", path),
                ),
            },
            EngineError::ConfigParseError { path, message } => ApiErrorResponse {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                error: ApiError::with_details(
                    "CONFIG_ERROR",
                    "Configuration parse error",
                    format!("Failed to parse {}: {}", path, message),
                ),
            },
            EngineError::InvalidTable { table, message } => ApiErrorResponse {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                error: ApiError::with_details(
                    "CONFIG_ERROR",
                    format!("Invalid table '{}'", table),
                    message,
                ),
            },
        }
    }
}

/// One entry of the `/prefectures` listing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PrefectureEntry {
    /// Two-digit prefecture code.
    pub code: String,
    /// Prefecture name.
    pub name: String,
    /// Health insurance rate in percent.
    pub health_insurance_rate_percent: Decimal,
}

impl From<&Prefecture> for PrefectureEntry {
    fn from(p: &Prefecture) -> Self {
        Self {
            code: p.code.clone(),
            name: p.name.clone(),
            health_insurance_rate_percent: p.health_insurance_rate_percent,
        }
    }
}

/// Response body for `GET /prefectures`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PrefectureListResponse {
    /// Code used when a request names an unknown prefecture.
    pub default_code: String,
    /// Every prefecture, in code order.
    pub prefectures: Vec<PrefectureEntry>,
}

impl From<&PrefectureTable> for PrefectureListResponse {
    fn from(table: &PrefectureTable) -> Self {
        Self {
            default_code: table.default_prefecture().code.clone(),
            prefectures: table.all().iter().map(PrefectureEntry::from).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::builtin;

    #[test]
    fn test_api_error_serialization() {
        let error = ApiError::new("TEST_ERROR", "Test message");
        let json = serde_json::to_string(&error).unwrap();
        assert!(json.contains("\"code\":\"TEST_ERROR\""));
        assert!(json.contains("\"message\":\"Test message\""));
        assert!(!json.contains("details"));
    }

    #[test]
    fn test_api_error_with_details_serialization() {
        let error = ApiError::with_details("TEST_ERROR", "Test message", "Some details");
        let json = serde_json::to_string(&error).unwrap();
        assert!(json.contains("\"details\":\"Some details\""));
    }

    #[test]
    fn test_invalid_input_maps_to_bad_request() {
        let engine_error = EngineError::InvalidInput {
            field: "monthly_salary".to_string(),
            message: "must be greater than zero".to_string(),
        };
        let api_error: ApiErrorResponse = engine_error.into();
        assert_eq!(api_error.status, StatusCode::BAD_REQUEST);
        assert_eq!(api_error.error.code, "VALIDATION_ERROR");
        assert!(api_error.error.message.contains("monthly_salary"));
    }

    #[test]
    fn test_invalid_table_maps_to_server_error() {
        let engine_error = EngineError::invalid_table("remuneration_grades", "gap");
        let api_error: ApiErrorResponse = engine_error.into();
        assert_eq!(api_error.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(api_error.error.code, "CONFIG_ERROR");
    }

    #[test]
    fn test_prefecture_listing_from_builtin() {
        let listing = PrefectureListResponse::from(builtin().prefectures());
        assert_eq!(listing.default_code, "13");
        assert_eq!(listing.prefectures.len(), 47);
        assert_eq!(listing.prefectures[0].code, "01");
        assert_eq!(listing.prefectures[12].name, "東京都");
    }
}
