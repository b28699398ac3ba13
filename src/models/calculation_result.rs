//! Calculation result models for the Take-Home Pay Engine.
//!
//! This module contains the [`CalculationResult`] envelope returned by the
//! HTTP API and the audit types every pipeline stage records into.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{DeductionShare, TakeHomeBreakdown};

/// A single step in the audit trace.
///
/// # Example
///
/// ```
/// use take_home_engine::models::AuditStep;
///
/// let step = AuditStep {
///     step_number: 1,
///     rule_id: "standard_monthly_remuneration".to_string(),
///     rule_name: "Standard Monthly Remuneration".to_string(),
///     source_ref: "Health Insurance Act art. 40".to_string(),
///     input: serde_json::json!({"monthly_salary": "300000"}),
///     output: serde_json::json!({"health": "300000", "pension": "300000"}),
///     reasoning: "Salary 300000 falls in grade 22".to_string(),
/// };
/// assert_eq!(step.step_number, 1);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditStep {
    /// The sequential step number.
    pub step_number: u32,
    /// The unique identifier of the rule that was applied.
    pub rule_id: String,
    /// The human-readable name of the rule.
    pub rule_name: String,
    /// Statute or table the rule comes from.
    pub source_ref: String,
    /// The input data for this step.
    pub input: serde_json::Value,
    /// The output data from this step.
    pub output: serde_json::Value,
    /// Human-readable explanation of the arithmetic.
    pub reasoning: String,
}

/// A warning generated during calculation.
///
/// Warnings never change the figures; they flag inputs or results a caller
/// may want to surface.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditWarning {
    /// A code identifying the type of warning.
    pub code: String,
    /// A human-readable description of the warning.
    pub message: String,
    /// The severity level (e.g., "low", "medium", "high").
    pub severity: String,
}

impl AuditWarning {
    /// Code for a prefecture that was replaced by the default.
    pub const UNKNOWN_PREFECTURE: &'static str = "UNKNOWN_PREFECTURE";
    /// Code for deductions that exceed the gross salary.
    pub const NEGATIVE_TAKE_HOME: &'static str = "NEGATIVE_TAKE_HOME";
}

/// The complete audit trace for a calculation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditTrace {
    /// The sequence of calculation steps.
    pub steps: Vec<AuditStep>,
    /// Any warnings generated during calculation.
    pub warnings: Vec<AuditWarning>,
    /// The total calculation duration in microseconds.
    pub duration_us: u64,
}

/// The complete result of a take-home calculation, as returned by the API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalculationResult {
    /// Unique identifier for this calculation.
    pub calculation_id: Uuid,
    /// When the calculation was performed.
    pub timestamp: DateTime<Utc>,
    /// The version of the engine that performed the calculation.
    pub engine_version: String,
    /// Revision label of the tables the calculation ran against.
    pub tables_revision: String,
    /// The itemised breakdown.
    pub breakdown: TakeHomeBreakdown,
    /// Gross salary split into take-home pay and deduction lines.
    pub deduction_shares: Vec<DeductionShare>,
    /// Complete audit trace of calculation decisions.
    pub audit_trace: AuditTrace,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_audit_step_serialization() {
        let step = AuditStep {
            step_number: 3,
            rule_id: "income_base".to_string(),
            rule_name: "Income Base".to_string(),
            source_ref: "Income Tax Act art. 28".to_string(),
            input: serde_json::json!({"monthly_salary": "300000"}),
            output: serde_json::json!({"salary_income": "2440000"}),
            reasoning: "3600000 - 1160000 = 2440000".to_string(),
        };

        let json = serde_json::to_value(&step).unwrap();
        assert_eq!(json["step_number"], 3);
        assert_eq!(json["source_ref"], "Income Tax Act art. 28");
        assert_eq!(json["output"]["salary_income"], "2440000");
    }

    #[test]
    fn test_audit_trace_round_trip() {
        let trace = AuditTrace {
            steps: vec![],
            warnings: vec![AuditWarning {
                code: AuditWarning::UNKNOWN_PREFECTURE.to_string(),
                message: "Prefecture code '99' is unknown".to_string(),
                severity: "medium".to_string(),
            }],
            duration_us: 42,
        };

        let json = serde_json::to_string(&trace).unwrap();
        let back: AuditTrace = serde_json::from_str(&json).unwrap();
        assert_eq!(back, trace);
        assert_eq!(back.warnings[0].code, "UNKNOWN_PREFECTURE");
    }
}
