//! Social insurance premium calculation.
//!
//! The employee pays half of the health, nursing care and pension premiums
//! and the full employee rate of employment insurance. Each line is rounded
//! to whole yen before the lines are summed.

use rust_decimal::Decimal;

use super::rounding::round_yen;
use crate::config::{Prefecture, SocialInsuranceRates};
use crate::models::{AuditStep, SocialInsurancePremiums, StandardMonthlyAmounts};

/// The result of calculating social insurance premiums.
#[derive(Debug, Clone)]
pub struct SocialInsuranceResult {
    /// The four premium lines and their total.
    pub premiums: SocialInsurancePremiums,
    /// The audit step recording this calculation.
    pub audit_step: AuditStep,
}

/// Calculates the employee's monthly social insurance premiums.
///
/// - health: `round(health standard × prefecture rate ÷ 100 ÷ 2)`
/// - nursing care: `round(health standard × nursing rate ÷ 2)` when
///   `nursing_care` is set, otherwise zero
/// - pension: `round(pension standard × pension rate ÷ 2)`
/// - employment: `round(monthly salary × employment rate)`
///
/// # Examples
///
/// ```
/// use take_home_engine::calculation::{calculate_social_insurance, resolve_standard_monthly};
/// use take_home_engine::config::builtin;
/// use rust_decimal::Decimal;
///
/// let tables = builtin();
/// let salary = Decimal::from(300_000);
/// let standard = resolve_standard_monthly(salary, tables, 1).amounts;
/// let tokyo = tables.prefectures().default_prefecture();
///
/// let result = calculate_social_insurance(
///     salary, &standard, tokyo, false, tables.social_insurance(), 2,
/// );
/// assert_eq!(result.premiums.total, Decimal::from(43_965));
/// ```
pub fn calculate_social_insurance(
    monthly_salary: Decimal,
    standard: &StandardMonthlyAmounts,
    prefecture: &Prefecture,
    nursing_care: bool,
    rates: &SocialInsuranceRates,
    step_number: u32,
) -> SocialInsuranceResult {
    let two = Decimal::from(2);
    let health_rate = prefecture.health_insurance_rate_percent / Decimal::ONE_HUNDRED;

    let health_insurance = round_yen(standard.health * health_rate / two);
    let nursing_care_insurance = if nursing_care {
        round_yen(standard.health * rates.nursing_care_rate / two)
    } else {
        Decimal::ZERO
    };
    let pension = round_yen(standard.pension * rates.pension_rate / two);
    let employment_insurance = round_yen(monthly_salary * rates.employment_insurance_rate);
    let total = health_insurance + nursing_care_insurance + pension + employment_insurance;

    let audit_step = AuditStep {
        step_number,
        rule_id: "social_insurance".to_string(),
        rule_name: "Social Insurance Premiums".to_string(),
        source_ref: "Health Insurance Act art. 161; Employees' Pension Insurance Act art. 82; \
                     Labour Insurance Premium Collection Act art. 31"
            .to_string(),
        input: serde_json::json!({
            "monthly_salary": monthly_salary.normalize().to_string(),
            "health_standard": standard.health.to_string(),
            "pension_standard": standard.pension.to_string(),
            "prefecture_code": prefecture.code,
            "health_insurance_rate_percent": prefecture.health_insurance_rate_percent.normalize().to_string(),
            "nursing_care": nursing_care
        }),
        output: serde_json::json!({
            "health_insurance": health_insurance.to_string(),
            "nursing_care_insurance": nursing_care_insurance.to_string(),
            "pension": pension.to_string(),
            "employment_insurance": employment_insurance.to_string(),
            "total": total.to_string()
        }),
        reasoning: format!(
            "Health {} + nursing care {} + pension {} + employment {} = {}",
            health_insurance, nursing_care_insurance, pension, employment_insurance, total
        ),
    };

    SocialInsuranceResult {
        premiums: SocialInsurancePremiums {
            health_insurance,
            nursing_care_insurance,
            pension,
            employment_insurance,
            total,
        },
        audit_step,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculation::resolve_standard_monthly;
    use crate::config::builtin;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn premiums_for(salary: &str, code: &str, nursing_care: bool) -> SocialInsurancePremiums {
        let tables = builtin();
        let salary = dec(salary);
        let standard = resolve_standard_monthly(salary, tables, 1).amounts;
        let prefecture = tables.prefectures().get(code).unwrap();
        calculate_social_insurance(
            salary,
            &standard,
            prefecture,
            nursing_care,
            tables.social_insurance(),
            2,
        )
        .premiums
    }

    #[test]
    fn test_tokyo_300000_without_nursing_care() {
        let premiums = premiums_for("300000", "13", false);

        assert_eq!(premiums.health_insurance, dec("14865"));
        assert_eq!(premiums.nursing_care_insurance, Decimal::ZERO);
        assert_eq!(premiums.pension, dec("27450"));
        assert_eq!(premiums.employment_insurance, dec("1650"));
        assert_eq!(premiums.total, dec("43965"));
    }

    #[test]
    fn test_nursing_care_adds_only_its_own_line() {
        let without = premiums_for("300000", "13", false);
        let with = premiums_for("300000", "13", true);

        assert_eq!(with.nursing_care_insurance, dec("2385"));
        assert_eq!(with.health_insurance, without.health_insurance);
        assert_eq!(with.pension, without.pension);
        assert_eq!(with.employment_insurance, without.employment_insurance);
        assert_eq!(with.total, without.total + dec("2385"));
    }

    #[test]
    fn test_lines_are_rounded_before_summing() {
        // 68000 × 9.91% ÷ 2 = 3369.4; 63700 × 0.55% = 350.35
        let premiums = premiums_for("63700", "13", false);

        assert_eq!(premiums.health_insurance, dec("3369"));
        assert_eq!(premiums.pension, dec("8052"));
        assert_eq!(premiums.employment_insurance, dec("350"));
        assert_eq!(premiums.total, dec("11771"));

        let unrounded = dec("3369.4") + dec("8052") + dec("350.35");
        assert_eq!(round_yen(unrounded), dec("11772"));
    }

    #[test]
    fn test_prefecture_rate_changes_health_line_only() {
        let tokyo = premiums_for("300000", "13", false);
        let saga = premiums_for("300000", "41", false);

        assert_ne!(tokyo.health_insurance, saga.health_insurance);
        assert_eq!(tokyo.pension, saga.pension);
        assert_eq!(tokyo.employment_insurance, saga.employment_insurance);
    }

    #[test]
    fn test_exact_half_yen_rounds_up() {
        // 1390000 × 9.79% ÷ 2 = 68040.5
        let chiba = premiums_for("1400000", "12", false);
        assert_eq!(chiba.health_insurance, dec("68041"));

        // 181000 × 0.55% = 995.5
        let tokyo = premiums_for("181000", "13", false);
        assert_eq!(tokyo.employment_insurance, dec("996"));
    }

    #[test]
    fn test_employment_uses_raw_salary() {
        // standard 300000 but raw 305000
        let premiums = premiums_for("305000", "13", false);
        assert_eq!(premiums.health_insurance, dec("14865"));
        assert_eq!(premiums.employment_insurance, dec("1678"));
    }

    #[test]
    fn test_audit_step_records_lines() {
        let tables = builtin();
        let salary = dec("300000");
        let standard = resolve_standard_monthly(salary, tables, 1).amounts;
        let result = calculate_social_insurance(
            salary,
            &standard,
            tables.prefectures().default_prefecture(),
            true,
            tables.social_insurance(),
            2,
        );

        assert_eq!(result.audit_step.step_number, 2);
        assert_eq!(result.audit_step.rule_id, "social_insurance");
        assert_eq!(result.audit_step.input["prefecture_code"], "13");
        assert_eq!(result.audit_step.input["nursing_care"], true);
        assert_eq!(result.audit_step.output["total"], "46350");
        assert!(result.audit_step.reasoning.contains("= 46350"));
    }
}
