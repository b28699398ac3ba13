//! Request types for the Take-Home Pay Engine API.
//!
//! This module defines the JSON request structure for the `/calculate` endpoint.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::config::DEFAULT_PREFECTURE_CODE;
use crate::models::SalaryInput;

/// Request body for the `/calculate` endpoint.
///
/// Only `monthly_salary` is required. The salary may be sent as a JSON
/// number or a string.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CalculationRequest {
    /// Gross monthly salary in yen.
    pub monthly_salary: Decimal,
    /// Two-digit prefecture code; defaults to Tokyo.
    #[serde(default = "default_prefecture_code")]
    pub prefecture_code: String,
    /// Whether nursing care insurance applies; defaults to false.
    #[serde(default)]
    pub nursing_care: bool,
}

fn default_prefecture_code() -> String {
    DEFAULT_PREFECTURE_CODE.to_string()
}

impl From<CalculationRequest> for SalaryInput {
    fn from(req: CalculationRequest) -> Self {
        SalaryInput::new(req.monthly_salary, req.prefecture_code, req.nursing_care)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_deserialize_full_request() {
        let json = r#"{
            "monthly_salary": 300000,
            "prefecture_code": "27",
            "nursing_care": true
        }"#;

        let request: CalculationRequest = serde_json::from_str(json).unwrap();
        assert_eq!(request.monthly_salary, Decimal::from(300_000));
        assert_eq!(request.prefecture_code, "27");
        assert!(request.nursing_care);
    }

    #[test]
    fn test_optional_fields_use_defaults() {
        let request: CalculationRequest =
            serde_json::from_str(r#"{"monthly_salary": "250000"}"#).unwrap();

        assert_eq!(request.monthly_salary, Decimal::from_str("250000").unwrap());
        assert_eq!(request.prefecture_code, "13");
        assert!(!request.nursing_care);
    }

    #[test]
    fn test_missing_salary_fails() {
        let result: Result<CalculationRequest, _> =
            serde_json::from_str(r#"{"prefecture_code": "13"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_request_to_salary_input() {
        let request = CalculationRequest {
            monthly_salary: Decimal::from(300_000),
            prefecture_code: "01".to_string(),
            nursing_care: true,
        };

        let input: SalaryInput = request.into();
        assert_eq!(input.monthly_salary, Decimal::from(300_000));
        assert_eq!(input.prefecture_code, "01");
        assert!(input.nursing_care);
    }
}
