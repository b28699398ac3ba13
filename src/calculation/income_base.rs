//! Annual income base shared by income tax and resident tax.

use rust_decimal::Decimal;

use super::rounding::non_negative;
use crate::config::LinearSchedule;
use crate::models::{AuditStep, IncomeBase};

/// Months in a tax year.
pub const MONTHS_PER_YEAR: i64 = 12;

/// The result of building the income base.
#[derive(Debug, Clone)]
pub struct IncomeBaseResult {
    /// Annual income, salary deduction, salary income and the annual
    /// social insurance deduction.
    pub base: IncomeBase,
    /// The audit step recording this calculation.
    pub audit_step: AuditStep,
}

/// Annualises the salary and applies the salary-income deduction.
///
/// The deduction is taken from `salary_deduction` unrounded, and salary
/// income never drops below zero. The annual social insurance deduction is
/// the monthly total × 12.
///
/// # Examples
///
/// ```
/// use take_home_engine::calculation::build_income_base;
/// use take_home_engine::config::builtin;
/// use rust_decimal::Decimal;
///
/// let result = build_income_base(
///     Decimal::from(300_000),
///     Decimal::from(43_965),
///     builtin().salary_deduction(),
///     3,
/// );
/// assert_eq!(result.base.salary_income, Decimal::from(2_440_000));
/// ```
pub fn build_income_base(
    monthly_salary: Decimal,
    social_insurance_total: Decimal,
    salary_deduction: &LinearSchedule,
    step_number: u32,
) -> IncomeBaseResult {
    let months = Decimal::from(MONTHS_PER_YEAR);
    let annual_income = (monthly_salary * months).normalize();
    let deduction = salary_deduction.evaluate(annual_income);
    let salary_income = non_negative(annual_income - deduction);
    let social_insurance_deduction = (social_insurance_total * months).normalize();

    let audit_step = AuditStep {
        step_number,
        rule_id: "income_base".to_string(),
        rule_name: "Income Base".to_string(),
        source_ref: "Income Tax Act art. 28 (salary income deduction)".to_string(),
        input: serde_json::json!({
            "monthly_salary": monthly_salary.normalize().to_string(),
            "monthly_social_insurance": social_insurance_total.to_string()
        }),
        output: serde_json::json!({
            "annual_income": annual_income.to_string(),
            "salary_deduction": deduction.to_string(),
            "salary_income": salary_income.to_string(),
            "social_insurance_deduction": social_insurance_deduction.to_string()
        }),
        reasoning: format!(
            "{} x 12 = {}; {} - deduction {} = salary income {}; social insurance {} x 12 = {}",
            monthly_salary.normalize(),
            annual_income,
            annual_income,
            deduction,
            salary_income,
            social_insurance_total,
            social_insurance_deduction
        ),
    };

    IncomeBaseResult {
        base: IncomeBase {
            annual_income,
            salary_deduction: deduction,
            salary_income,
            social_insurance_deduction,
        },
        audit_step,
    }
}
