//! Take-home breakdown models.
//!
//! [`TakeHomeBreakdown`] is the itemised result of one calculation: every
//! intermediate amount of the pipeline, grouped by stage. It is a plain
//! value with no identity; two calculations with the same input produce
//! equal breakdowns.

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

/// Standard monthly amounts used as premium bases.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StandardMonthlyAmounts {
    /// Health insurance grade number the salary falls in.
    pub health_grade: u32,
    /// Health insurance (and nursing care) standard monthly amount.
    pub health: Decimal,
    /// Pension standard monthly amount, clamped to the pension range.
    pub pension: Decimal,
}

/// Employee share of the monthly social insurance premiums.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SocialInsurancePremiums {
    /// Health insurance premium.
    pub health_insurance: Decimal,
    /// Nursing care premium; zero unless nursing care applies.
    pub nursing_care_insurance: Decimal,
    /// Employees' pension premium.
    pub pension: Decimal,
    /// Employment insurance premium.
    pub employment_insurance: Decimal,
    /// Sum of the four rounded lines.
    pub total: Decimal,
}

/// Annual income and the amounts both taxes start from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IncomeBase {
    /// Monthly salary × 12.
    pub annual_income: Decimal,
    /// Salary-income deduction for the annual income.
    pub salary_deduction: Decimal,
    /// Annual income less the salary-income deduction, never negative.
    pub salary_income: Decimal,
    /// Monthly social insurance total × 12.
    pub social_insurance_deduction: Decimal,
}

/// Annual and monthly national income tax.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IncomeTax {
    /// Basic deduction for the salary income.
    pub basic_deduction: Decimal,
    /// Taxable income before truncation.
    pub taxable_income: Decimal,
    /// Taxable income truncated down to the nearest 1,000 yen.
    pub truncated_taxable_income: Decimal,
    /// Tax from the bracket table, floored to whole yen.
    pub base_tax: Decimal,
    /// Reconstruction surtax on the base tax.
    pub surtax: Decimal,
    /// Base tax plus surtax.
    pub annual_total: Decimal,
    /// Annual total ÷ 12, rounded.
    pub monthly: Decimal,
}

/// Annual and monthly resident tax.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResidentTax {
    /// Basic deduction for the salary income.
    pub basic_deduction: Decimal,
    /// Taxable income (no truncation).
    pub taxable_income: Decimal,
    /// Proportional levy on the taxable income, floored.
    pub income_levy: Decimal,
    /// Flat adjustment credit; zero when taxable income is zero.
    pub adjustment_credit: Decimal,
    /// Fixed per-capita levy.
    pub per_capita_levy: Decimal,
    /// Annual resident tax, never negative.
    pub annual: Decimal,
    /// Annual ÷ 12, rounded.
    pub monthly: Decimal,
}

/// The itemised result of a take-home pay calculation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TakeHomeBreakdown {
    /// Gross monthly salary as supplied.
    pub monthly_salary: Decimal,
    /// Code of the prefecture whose rate was applied.
    pub prefecture_code: String,
    /// Name of the prefecture whose rate was applied.
    pub prefecture_name: String,
    /// True when the requested prefecture code was unknown.
    pub used_default_prefecture: bool,
    /// Whether nursing care insurance was included.
    pub nursing_care: bool,
    /// Standard monthly amounts.
    pub standard_monthly: StandardMonthlyAmounts,
    /// Monthly social insurance premiums.
    pub social_insurance: SocialInsurancePremiums,
    /// Annual income and deductions.
    pub income_base: IncomeBase,
    /// Income tax.
    pub income_tax: IncomeTax,
    /// Resident tax.
    pub resident_tax: ResidentTax,
    /// Social insurance + monthly income tax + monthly resident tax.
    pub total_monthly_deduction: Decimal,
    /// Gross salary less the total monthly deduction. May be negative.
    pub monthly_take_home: Decimal,
    /// Take-home pay as a percentage of gross, one decimal place.
    pub take_home_ratio_percent: Decimal,
}

/// A slice of the gross salary, for charting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShareCategory {
    /// Net pay.
    TakeHome,
    /// Health insurance premium.
    HealthInsurance,
    /// Nursing care premium.
    NursingCare,
    /// Pension premium.
    Pension,
    /// Employment insurance premium.
    EmploymentInsurance,
    /// Monthly income tax.
    IncomeTax,
    /// Monthly resident tax.
    ResidentTax,
}

/// One slice of the gross salary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeductionShare {
    /// What the slice represents.
    pub category: ShareCategory,
    /// Monthly amount.
    pub amount: Decimal,
    /// Share of the gross salary in percent, one decimal place.
    pub percent_of_gross: Decimal,
}

/// `part / whole × 100` to one decimal place; zero when `whole` is not positive.
pub(crate) fn percent_of(part: Decimal, whole: Decimal) -> Decimal {
    if whole <= Decimal::ZERO {
        return Decimal::ZERO;
    }
    (part / whole * Decimal::ONE_HUNDRED)
        .round_dp_with_strategy(1, RoundingStrategy::MidpointAwayFromZero)
}

impl TakeHomeBreakdown {
    /// Annual income (monthly salary × 12).
    pub fn annual_income(&self) -> Decimal {
        self.income_base.annual_income
    }

    /// Splits the gross salary into take-home pay and each deduction line.
    ///
    /// Slices with a zero or negative amount are left out, so nursing care
    /// only appears when it applies.
    ///
    /// # Example
    ///
    /// ```
    /// use take_home_engine::calculation::calculate_salary;
    /// use take_home_engine::models::ShareCategory;
    /// use rust_decimal::Decimal;
    ///
    /// let breakdown = calculate_salary(Decimal::from(300_000), "13", false);
    /// let shares = breakdown.deduction_shares();
    /// assert_eq!(shares[0].category, ShareCategory::TakeHome);
    /// assert!(shares.iter().all(|s| s.category != ShareCategory::NursingCare));
    /// ```
    pub fn deduction_shares(&self) -> Vec<DeductionShare> {
        let si = &self.social_insurance;
        [
            (ShareCategory::TakeHome, self.monthly_take_home),
            (ShareCategory::HealthInsurance, si.health_insurance),
            (ShareCategory::NursingCare, si.nursing_care_insurance),
            (ShareCategory::Pension, si.pension),
            (ShareCategory::EmploymentInsurance, si.employment_insurance),
            (ShareCategory::IncomeTax, self.income_tax.monthly),
            (ShareCategory::ResidentTax, self.resident_tax.monthly),
        ]
        .into_iter()
        .filter(|(_, amount)| *amount > Decimal::ZERO)
        .map(|(category, amount)| DeductionShare {
            category,
            amount,
            percent_of_gross: percent_of(amount, self.monthly_salary),
        })
        .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn sample_breakdown(nursing: &str, take_home: &str) -> TakeHomeBreakdown {
        TakeHomeBreakdown {
            monthly_salary: dec("300000"),
            prefecture_code: "13".to_string(),
            prefecture_name: "東京都".to_string(),
            used_default_prefecture: false,
            nursing_care: nursing != "0",
            standard_monthly: StandardMonthlyAmounts {
                health_grade: 22,
                health: dec("300000"),
                pension: dec("300000"),
            },
            social_insurance: SocialInsurancePremiums {
                health_insurance: dec("14865"),
                nursing_care_insurance: dec(nursing),
                pension: dec("27450"),
                employment_insurance: dec("1650"),
                total: dec("43965") + dec(nursing),
            },
            income_base: IncomeBase {
                annual_income: dec("3600000"),
                salary_deduction: dec("1160000"),
                salary_income: dec("2440000"),
                social_insurance_deduction: dec("527580"),
            },
            income_tax: IncomeTax {
                basic_deduction: dec("580000"),
                taxable_income: dec("1332420"),
                truncated_taxable_income: dec("1332000"),
                base_tax: dec("66600"),
                surtax: dec("1398"),
                annual_total: dec("67998"),
                monthly: dec("5667"),
            },
            resident_tax: ResidentTax {
                basic_deduction: dec("430000"),
                taxable_income: dec("1482420"),
                income_levy: dec("148242"),
                adjustment_credit: dec("2500"),
                per_capita_levy: dec("5500"),
                annual: dec("151242"),
                monthly: dec("12604"),
            },
            total_monthly_deduction: dec("62236"),
            monthly_take_home: dec(take_home),
            take_home_ratio_percent: dec("79.3"),
        }
    }

    #[test]
    fn test_percent_of_rounds_to_one_decimal() {
        assert_eq!(percent_of(dec("237764"), dec("300000")), dec("79.3"));
        assert_eq!(percent_of(dec("1"), dec("8")), dec("12.5"));
        assert_eq!(percent_of(dec("1"), dec("16")), dec("6.3"));
    }

    #[test]
    fn test_percent_of_zero_whole_is_zero() {
        assert_eq!(percent_of(dec("100"), dec("0")), Decimal::ZERO);
    }

    #[test]
    fn test_shares_skip_nursing_care_when_zero() {
        let shares = sample_breakdown("0", "237764").deduction_shares();

        assert_eq!(shares.len(), 6);
        assert!(shares.iter().all(|s| s.category != ShareCategory::NursingCare));
        assert_eq!(shares[0].category, ShareCategory::TakeHome);
        assert_eq!(shares[0].percent_of_gross, dec("79.3"));
    }

    #[test]
    fn test_shares_include_nursing_care_after_health() {
        let shares = sample_breakdown("2385", "235379").deduction_shares();

        assert_eq!(shares.len(), 7);
        assert_eq!(shares[1].category, ShareCategory::HealthInsurance);
        assert_eq!(shares[2].category, ShareCategory::NursingCare);
        assert_eq!(shares[2].amount, dec("2385"));
    }

    #[test]
    fn test_shares_skip_negative_take_home() {
        let shares = sample_breakdown("0", "-5").deduction_shares();
        assert!(shares.iter().all(|s| s.category != ShareCategory::TakeHome));
    }

    #[test]
    fn test_annual_income_accessor() {
        assert_eq!(sample_breakdown("0", "237764").annual_income(), dec("3600000"));
    }

    #[test]
    fn test_share_category_serialization() {
        let json = serde_json::to_string(&ShareCategory::EmploymentInsurance).unwrap();
        assert_eq!(json, "\"employment_insurance\"");
    }

    #[test]
    fn test_breakdown_serializes_amounts_as_strings() {
        let json = serde_json::to_value(sample_breakdown("0", "237764")).unwrap();
        assert_eq!(json["monthly_take_home"], "237764");
        assert_eq!(json["social_insurance"]["health_insurance"], "14865");
        assert_eq!(json["prefecture_name"], "東京都");
    }
}
