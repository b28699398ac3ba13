//! Resident tax calculation.
//!
//! Resident tax is a proportional income levy plus a fixed per-capita levy.
//! It uses its own basic deduction and, unlike income tax, does not truncate
//! the taxable base.

use rust_decimal::Decimal;

use super::income_base::MONTHS_PER_YEAR;
use super::rounding::{floor_yen, non_negative, round_yen};
use crate::config::ResidentTaxRules;
use crate::models::{AuditStep, ResidentTax};

/// The result of calculating resident tax.
#[derive(Debug, Clone)]
pub struct ResidentTaxResult {
    /// Every intermediate amount of the resident tax calculation.
    pub tax: ResidentTax,
    /// The audit step recording this calculation.
    pub audit_step: AuditStep,
}

/// Calculates annual and monthly resident tax.
///
/// The adjustment credit applies whenever taxable income is positive. The
/// per-capita levy applies unconditionally, so even a zero income owes it.
///
/// # Examples
///
/// ```
/// use take_home_engine::calculation::calculate_resident_tax;
/// use take_home_engine::config::builtin;
/// use rust_decimal::Decimal;
///
/// let result = calculate_resident_tax(
///     Decimal::from(2_440_000),
///     Decimal::from(527_580),
///     builtin().resident_tax(),
///     5,
/// );
/// assert_eq!(result.tax.annual, Decimal::from(151_242));
/// assert_eq!(result.tax.monthly, Decimal::from(12_604));
/// ```
pub fn calculate_resident_tax(
    salary_income: Decimal,
    social_insurance_deduction: Decimal,
    rules: &ResidentTaxRules,
    step_number: u32,
) -> ResidentTaxResult {
    let basic_deduction = rules.basic_deduction.amount_for(salary_income);
    let taxable_income =
        non_negative(salary_income - social_insurance_deduction - basic_deduction).normalize();
    let income_levy = floor_yen(taxable_income * rules.income_levy_rate);
    let adjustment_credit = if taxable_income > Decimal::ZERO {
        rules.adjustment_credit
    } else {
        Decimal::ZERO
    };
    let per_capita_levy = rules.per_capita_levy;
    let annual = non_negative(income_levy - adjustment_credit + per_capita_levy);
    let monthly = round_yen(annual / Decimal::from(MONTHS_PER_YEAR));

    let audit_step = AuditStep {
        step_number,
        rule_id: "resident_tax".to_string(),
        rule_name: "Resident Tax".to_string(),
        source_ref: "Local Tax Act art. 35, 37, 310, 314-3".to_string(),
        input: serde_json::json!({
            "salary_income": salary_income.normalize().to_string(),
            "social_insurance_deduction": social_insurance_deduction.normalize().to_string()
        }),
        output: serde_json::json!({
            "basic_deduction": basic_deduction.to_string(),
            "taxable_income": taxable_income.to_string(),
            "income_levy": income_levy.to_string(),
            "adjustment_credit": adjustment_credit.to_string(),
            "per_capita_levy": per_capita_levy.to_string(),
            "annual": annual.to_string(),
            "monthly": monthly.to_string()
        }),
        reasoning: format!(
            "Levy {} - credit {} + per-capita {} = {}; {} / 12 = {}",
            income_levy, adjustment_credit, per_capita_levy, annual, annual, monthly
        ),
    };

    ResidentTaxResult {
        tax: ResidentTax {
            basic_deduction,
            taxable_income,
            income_levy,
            adjustment_credit,
            per_capita_levy,
            annual,
            monthly,
        },
        audit_step,
    }
}
