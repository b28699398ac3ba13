//! National income tax calculation.
//!
//! Annual tax is computed on salary income less social insurance and the
//! basic deduction, using the quick-calculation bracket table, then the
//! reconstruction surtax is added and the total is spread over 12 months.

use rust_decimal::Decimal;

use super::income_base::MONTHS_PER_YEAR;
use super::rounding::{floor_yen, non_negative, round_yen, truncate_to_unit};
use crate::config::IncomeTaxRules;
use crate::models::{AuditStep, IncomeTax};

/// The result of calculating income tax.
#[derive(Debug, Clone)]
pub struct IncomeTaxResult {
    /// Every intermediate amount of the income tax calculation.
    pub tax: IncomeTax,
    /// The audit step recording this calculation.
    pub audit_step: AuditStep,
}

/// Calculates annual and monthly income tax.
///
/// 1. Basic deduction from the step schedule, keyed on salary income.
/// 2. Taxable income = `max(0, salary income − social insurance − basic)`.
/// 3. Truncate down to the truncation unit.
/// 4. Base tax = `floor(bracket rate × truncated − subtract)`, zero when the
///    truncated base is zero.
/// 5. Surtax = `floor(base tax × surtax rate)`.
/// 6. Monthly = `round((base tax + surtax) ÷ 12)`.
///
/// # Examples
///
/// ```
/// use take_home_engine::calculation::calculate_income_tax;
/// use take_home_engine::config::builtin;
/// use rust_decimal::Decimal;
///
/// let result = calculate_income_tax(
///     Decimal::from(2_440_000),
///     Decimal::from(527_580),
///     builtin().income_tax(),
///     4,
/// );
/// assert_eq!(result.tax.annual_total, Decimal::from(67_998));
/// assert_eq!(result.tax.monthly, Decimal::from(5_667));
/// ```
pub fn calculate_income_tax(
    salary_income: Decimal,
    social_insurance_deduction: Decimal,
    rules: &IncomeTaxRules,
    step_number: u32,
) -> IncomeTaxResult {
    let basic_deduction = rules.basic_deduction.amount_for(salary_income);
    let taxable_income =
        non_negative(salary_income - social_insurance_deduction - basic_deduction).normalize();
    let truncated_taxable_income = truncate_to_unit(taxable_income, rules.truncation_unit);

    let (base_tax, bracket_note) = if truncated_taxable_income > Decimal::ZERO {
        let bracket = rules.brackets.bracket_for(truncated_taxable_income);
        let tax = non_negative(floor_yen(bracket.apply(truncated_taxable_income)));
        let note = format!(
            "{} x {} - {}",
            truncated_taxable_income,
            bracket.rate.normalize(),
            bracket.subtract.normalize()
        );
        (tax, note)
    } else {
        (Decimal::ZERO, "no taxable income".to_string())
    };

    let surtax = floor_yen(base_tax * rules.surtax_rate);
    let annual_total = base_tax + surtax;
    let monthly = round_yen(annual_total / Decimal::from(MONTHS_PER_YEAR));

    let audit_step = AuditStep {
        step_number,
        rule_id: "income_tax".to_string(),
        rule_name: "Income Tax".to_string(),
        source_ref: "Income Tax Act art. 86, 89; Reconstruction Funding Act art. 13".to_string(),
        input: serde_json::json!({
            "salary_income": salary_income.normalize().to_string(),
            "social_insurance_deduction": social_insurance_deduction.normalize().to_string()
        }),
        output: serde_json::json!({
            "basic_deduction": basic_deduction.to_string(),
            "taxable_income": taxable_income.to_string(),
            "truncated_taxable_income": truncated_taxable_income.to_string(),
            "base_tax": base_tax.to_string(),
            "surtax": surtax.to_string(),
            "annual_total": annual_total.to_string(),
            "monthly": monthly.to_string()
        }),
        reasoning: format!(
            "Taxable {} truncated to {}; base tax {} = {}; surtax {}; {} / 12 = {}",
            taxable_income,
            truncated_taxable_income,
            bracket_note,
            base_tax,
            surtax,
            annual_total,
            monthly
        ),
    };

    IncomeTaxResult {
        tax: IncomeTax {
            basic_deduction,
            taxable_income,
            truncated_taxable_income,
            base_tax,
            surtax,
            annual_total,
            monthly,
        },
        audit_step,
    }
}
