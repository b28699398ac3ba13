//! Salary input model.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::config::DEFAULT_PREFECTURE_CODE;
use crate::error::{EngineError, EngineResult};

/// Largest monthly salary accepted by [`SalaryInput::validate`].
pub const MAX_MONTHLY_SALARY: i64 = 100_000_000;

/// The three values a take-home calculation is driven by.
///
/// The engine accepts any non-negative salary and any prefecture code.
/// [`validate`](Self::validate) applies the stricter rules callers such as
/// the HTTP API enforce before calculating.
///
/// # Example
///
/// ```
/// use take_home_engine::models::SalaryInput;
/// use rust_decimal::Decimal;
///
/// let input = SalaryInput::new(Decimal::from(300_000), "13", false);
/// assert!(input.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SalaryInput {
    /// Gross monthly salary in whole yen.
    pub monthly_salary: Decimal,
    /// Two-digit prefecture code. Unknown codes fall back to Tokyo.
    pub prefecture_code: String,
    /// Whether nursing care insurance applies (employees aged 40 to 64).
    pub nursing_care: bool,
}

impl SalaryInput {
    /// Creates a new salary input.
    pub fn new(
        monthly_salary: Decimal,
        prefecture_code: impl Into<String>,
        nursing_care: bool,
    ) -> Self {
        Self {
            monthly_salary,
            prefecture_code: prefecture_code.into(),
            nursing_care,
        }
    }

    /// Creates an input for the default prefecture without nursing care.
    pub fn with_defaults(monthly_salary: Decimal) -> Self {
        Self::new(monthly_salary, DEFAULT_PREFECTURE_CODE, false)
    }

    /// Checks the caller-side preconditions: the salary must be a positive
    /// whole number of yen no larger than [`MAX_MONTHLY_SALARY`].
    pub fn validate(&self) -> EngineResult<()> {
        let invalid = |message: &str| EngineError::InvalidInput {
            field: "monthly_salary".to_string(),
            message: message.to_string(),
        };

        if self.monthly_salary <= Decimal::ZERO {
            return Err(invalid("must be greater than zero"));
        }
        if !self.monthly_salary.fract().is_zero() {
            return Err(invalid("must be a whole number of yen"));
        }
        if self.monthly_salary > Decimal::from(MAX_MONTHLY_SALARY) {
            return Err(invalid("must not exceed 100,000,000 yen"));
        }
        Ok(())
    }
}
