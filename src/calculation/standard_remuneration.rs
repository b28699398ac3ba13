//! Standard monthly remuneration lookup.
//!
//! Premiums are levied on a standard monthly amount rather than the raw
//! salary. The health scheme uses the grade table directly; the pension
//! scheme clamps the same amount into its own narrower range.

use rust_decimal::Decimal;

use crate::config::{RateTables, SocialInsuranceRates};
use crate::models::{AuditStep, StandardMonthlyAmounts};

/// The result of resolving the standard monthly amounts.
#[derive(Debug, Clone)]
pub struct StandardMonthlyResult {
    /// Health grade and both standard amounts.
    pub amounts: StandardMonthlyAmounts,
    /// The audit step recording this lookup.
    pub audit_step: AuditStep,
}

/// Clamps a health standard amount into the pension range.
pub fn pension_standard_monthly(health_standard: Decimal, rates: &SocialInsuranceRates) -> Decimal {
    health_standard
        .max(rates.pension_standard_floor)
        .min(rates.pension_standard_ceiling)
}

/// Finds the grade containing `monthly_salary` and derives both standard
/// amounts from it.
///
/// Salaries beyond the top grade saturate at the top grade. There is no
/// error case.
///
/// # Examples
///
/// ```
/// use take_home_engine::calculation::resolve_standard_monthly;
/// use take_home_engine::config::builtin;
/// use rust_decimal::Decimal;
///
/// let result = resolve_standard_monthly(Decimal::from(300_000), builtin(), 1);
/// assert_eq!(result.amounts.health_grade, 22);
/// assert_eq!(result.amounts.health, Decimal::from(300_000));
/// assert_eq!(result.amounts.pension, Decimal::from(300_000));
/// ```
pub fn resolve_standard_monthly(
    monthly_salary: Decimal,
    tables: &RateTables,
    step_number: u32,
) -> StandardMonthlyResult {
    let grade = tables.grades().grade_for(monthly_salary);
    let rates = tables.social_insurance();
    let pension = pension_standard_monthly(grade.standard_monthly, rates);
    let pension_clamped = pension != grade.standard_monthly;

    let range = match grade.upper_bound {
        Some(upper) => format!("[{}, {})", grade.lower_bound, upper),
        None => format!("[{}, ∞)", grade.lower_bound),
    };
    let mut reasoning = format!(
        "Salary {} falls in grade {} {} -> health standard {}",
        monthly_salary.normalize(),
        grade.grade,
        range,
        grade.standard_monthly
    );
    if pension_clamped {
        reasoning.push_str(&format!(
            "; pension standard clamped to {} (range {}..={})",
            pension, rates.pension_standard_floor, rates.pension_standard_ceiling
        ));
    }

    let audit_step = AuditStep {
        step_number,
        rule_id: "standard_monthly_remuneration".to_string(),
        rule_name: "Standard Monthly Remuneration".to_string(),
        source_ref: "Health Insurance Act art. 40; Employees' Pension Insurance Act art. 20"
            .to_string(),
        input: serde_json::json!({
            "monthly_salary": monthly_salary.normalize().to_string()
        }),
        output: serde_json::json!({
            "health_grade": grade.grade,
            "health_standard": grade.standard_monthly.to_string(),
            "pension_standard": pension.to_string(),
            "pension_clamped": pension_clamped
        }),
        reasoning,
    };

    StandardMonthlyResult {
        amounts: StandardMonthlyAmounts {
            health_grade: grade.grade,
            health: grade.standard_monthly,
            pension,
        },
        audit_step,
    }
}
