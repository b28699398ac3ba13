//! The take-home pay pipeline.
//!
//! Runs the five stages in order and aggregates their output into a
//! [`TakeHomeBreakdown`]. The pipeline is pure and never fails: unknown
//! prefecture codes fall back to the default prefecture and the fallback is
//! reported as a warning.

use rust_decimal::Decimal;
use tracing::debug;

use super::income_base::build_income_base;
use super::income_tax::calculate_income_tax;
use super::resident_tax::calculate_resident_tax;
use super::social_insurance::calculate_social_insurance;
use super::standard_remuneration::resolve_standard_monthly;
use crate::config::{RateTables, builtin};
use crate::models::{AuditStep, AuditWarning, SalaryInput, TakeHomeBreakdown, percent_of};

/// A breakdown together with the audit trail that produced it.
#[derive(Debug, Clone)]
pub struct TakeHomeCalculation {
    /// The itemised result.
    pub breakdown: TakeHomeBreakdown,
    /// One step per stage, in execution order.
    pub audit_steps: Vec<AuditStep>,
    /// Warnings raised along the way.
    pub warnings: Vec<AuditWarning>,
}

/// Calculates take-home pay for `input` against `tables`.
///
/// `input` is not validated here; negative salaries are a caller error.
/// Use [`SalaryInput::validate`] first where input comes from outside.
///
/// # Examples
///
/// ```
/// use take_home_engine::calculation::calculate_take_home;
/// use take_home_engine::config::builtin;
/// use take_home_engine::models::SalaryInput;
/// use rust_decimal::Decimal;
///
/// let input = SalaryInput::new(Decimal::from(300_000), "13", false);
/// let calculation = calculate_take_home(&input, builtin());
///
/// assert_eq!(calculation.breakdown.monthly_take_home, Decimal::from(237_764));
/// assert_eq!(calculation.audit_steps.len(), 6);
/// assert!(calculation.warnings.is_empty());
/// ```
pub fn calculate_take_home(input: &SalaryInput, tables: &RateTables) -> TakeHomeCalculation {
    let salary = input.monthly_salary;
    let mut warnings = Vec::new();

    let resolved = tables.prefectures().resolve(&input.prefecture_code);
    let prefecture = resolved.prefecture;
    if resolved.used_default {
        debug!(
            requested = %input.prefecture_code,
            fallback = %prefecture.code,
            "Unknown prefecture code, using default"
        );
        warnings.push(AuditWarning {
            code: AuditWarning::UNKNOWN_PREFECTURE.to_string(),
            message: format!(
                "Prefecture code '{}' is unknown; rates for {} ({}) were used",
                input.prefecture_code, prefecture.name, prefecture.code
            ),
            severity: "medium".to_string(),
        });
    }

    let standard = resolve_standard_monthly(salary, tables, 1);
    let social = calculate_social_insurance(
        salary,
        &standard.amounts,
        prefecture,
        input.nursing_care,
        tables.social_insurance(),
        2,
    );
    let income_base =
        build_income_base(salary, social.premiums.total, tables.salary_deduction(), 3);
    let income_tax = calculate_income_tax(
        income_base.base.salary_income,
        income_base.base.social_insurance_deduction,
        tables.income_tax(),
        4,
    );
    let resident_tax = calculate_resident_tax(
        income_base.base.salary_income,
        income_base.base.social_insurance_deduction,
        tables.resident_tax(),
        5,
    );

    let total_monthly_deduction =
        social.premiums.total + income_tax.tax.monthly + resident_tax.tax.monthly;
    let monthly_take_home = salary - total_monthly_deduction;
    let take_home_ratio_percent = percent_of(monthly_take_home, salary);

    if monthly_take_home < Decimal::ZERO {
        warnings.push(AuditWarning {
            code: AuditWarning::NEGATIVE_TAKE_HOME.to_string(),
            message: format!(
                "Deductions of {} exceed the gross salary of {}",
                total_monthly_deduction,
                salary.normalize()
            ),
            severity: "high".to_string(),
        });
    }

    let aggregation_step = AuditStep {
        step_number: 6,
        rule_id: "take_home".to_string(),
        rule_name: "Take-Home Pay".to_string(),
        source_ref: "Aggregation".to_string(),
        input: serde_json::json!({
            "monthly_salary": salary.normalize().to_string(),
            "social_insurance": social.premiums.total.to_string(),
            "income_tax": income_tax.tax.monthly.to_string(),
            "resident_tax": resident_tax.tax.monthly.to_string()
        }),
        output: serde_json::json!({
            "total_monthly_deduction": total_monthly_deduction.to_string(),
            "monthly_take_home": monthly_take_home.normalize().to_string(),
            "take_home_ratio_percent": take_home_ratio_percent.to_string()
        }),
        reasoning: format!(
            "{} - ({} + {} + {}) = {}",
            salary.normalize(),
            social.premiums.total,
            income_tax.tax.monthly,
            resident_tax.tax.monthly,
            monthly_take_home.normalize()
        ),
    };

    let breakdown = TakeHomeBreakdown {
        monthly_salary: salary,
        prefecture_code: prefecture.code.clone(),
        prefecture_name: prefecture.name.clone(),
        used_default_prefecture: resolved.used_default,
        nursing_care: input.nursing_care,
        standard_monthly: standard.amounts,
        social_insurance: social.premiums,
        income_base: income_base.base,
        income_tax: income_tax.tax,
        resident_tax: resident_tax.tax,
        total_monthly_deduction,
        monthly_take_home,
        take_home_ratio_percent,
    };

    TakeHomeCalculation {
        breakdown,
        audit_steps: vec![
            standard.audit_step,
            social.audit_step,
            income_base.audit_step,
            income_tax.audit_step,
            resident_tax.audit_step,
            aggregation_step,
        ],
        warnings,
    }
}

/// Calculates take-home pay against the built-in tables.
///
/// # Examples
///
/// ```
/// use take_home_engine::calculation::calculate_salary;
/// use rust_decimal::Decimal;
///
/// let breakdown = calculate_salary(Decimal::from(300_000), "13", false);
/// assert_eq!(breakdown.monthly_take_home, Decimal::from(237_764));
/// ```
pub fn calculate_salary(
    monthly_salary: Decimal,
    prefecture_code: &str,
    nursing_care: bool,
) -> TakeHomeBreakdown {
    let input = SalaryInput::new(monthly_salary, prefecture_code, nursing_care);
    calculate_take_home(&input, builtin()).breakdown
}
