//! Reference table types for take-home pay calculation.
//!
//! The validated tables ([`GradeTable`], [`LinearSchedule`], [`StepSchedule`],
//! [`PrefectureTable`]) can only be built through constructors that check
//! their structural invariants, so every lookup on them is total: the final
//! entry of each table is unbounded and there are no gaps between entries.
//!
//! The `*File` structures mirror the YAML files one-to-one and are turned
//! into validated tables by the [`ConfigLoader`](super::ConfigLoader).

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

/// A statutory source backing one of the tables.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceReference {
    /// What the source covers (e.g., "income_tax_rates").
    pub topic: String,
    /// Where the source is published.
    pub url: String,
}

/// Identifying information about a table set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableMetadata {
    /// Short revision label (e.g., "FY2025").
    pub revision: String,
    /// Human-readable name of the table set.
    pub name: String,
    /// The date from which these tables apply.
    pub effective_date: NaiveDate,
    /// Statutory sources for the individual tables.
    #[serde(default)]
    pub sources: Vec<SourceReference>,
}

/// A prefecture and its health insurance premium rate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Prefecture {
    /// Two-digit prefecture code (e.g., "13" for Tokyo).
    pub code: String,
    /// Display name of the prefecture.
    pub name: String,
    /// Combined employer + employee health insurance rate, in percent.
    pub health_insurance_rate_percent: Decimal,
}

/// A prefecture resolved from a caller-supplied code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolvedPrefecture<'a> {
    /// The prefecture whose rate applies.
    pub prefecture: &'a Prefecture,
    /// True when the requested code was unknown and the default was used.
    pub used_default: bool,
}

/// All prefectures, with the default used for unknown codes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrefectureTable {
    pub(super) prefectures: Vec<Prefecture>,
    pub(super) default: Prefecture,
}

impl PrefectureTable {
    /// Builds a prefecture table, checking that codes are unique, rates are
    /// positive and the default code is one of the entries.
    pub fn new(default_code: &str, prefectures: Vec<Prefecture>) -> EngineResult<Self> {
        const TABLE: &str = "prefectures";

        for (i, prefecture) in prefectures.iter().enumerate() {
            if prefectures[..i].iter().any(|p| p.code == prefecture.code) {
                return Err(EngineError::invalid_table(
                    TABLE,
                    format!("duplicate prefecture code '{}'", prefecture.code),
                ));
            }
            if prefecture.health_insurance_rate_percent <= Decimal::ZERO {
                return Err(EngineError::invalid_table(
                    TABLE,
                    format!("rate for '{}' must be positive", prefecture.code),
                ));
            }
        }

        let default = prefectures
            .iter()
            .find(|p| p.code == default_code)
            .cloned()
            .ok_or_else(|| {
                EngineError::invalid_table(
                    TABLE,
                    format!("default code '{}' is not in the table", default_code),
                )
            })?;

        Ok(Self {
            prefectures,
            default,
        })
    }

    /// Returns every prefecture in table order, for UI enumeration.
    pub fn all(&self) -> &[Prefecture] {
        &self.prefectures
    }

    /// Returns the prefecture used when a code is not recognised.
    pub fn default_prefecture(&self) -> &Prefecture {
        &self.default
    }

    /// Looks up a prefecture by its exact code.
    pub fn get(&self, code: &str) -> Option<&Prefecture> {
        self.prefectures.iter().find(|p| p.code == code)
    }

    /// Resolves a code, substituting the default prefecture for unknown codes.
    pub fn resolve(&self, code: &str) -> ResolvedPrefecture<'_> {
        match self.get(code) {
            Some(prefecture) => ResolvedPrefecture {
                prefecture,
                used_default: false,
            },
            None => ResolvedPrefecture {
                prefecture: &self.default,
                used_default: true,
            },
        }
    }
}

/// One grade of the standard monthly remuneration table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GradeEntry {
    /// Grade number, starting at 1.
    pub grade: u32,
    /// The standard monthly amount used as the premium base.
    pub standard_monthly: Decimal,
    /// Lowest salary in this grade (inclusive).
    pub lower_bound: Decimal,
    /// Salary at which the next grade starts (exclusive). `None` for the top grade.
    #[serde(default)]
    pub upper_bound: Option<Decimal>,
}

impl GradeEntry {
    /// Returns true when `salary` falls in `[lower_bound, upper_bound)`.
    pub fn contains(&self, salary: Decimal) -> bool {
        salary >= self.lower_bound && self.upper_bound.is_none_or(|upper| salary < upper)
    }
}

/// A standard monthly remuneration table partitioning `[0, ∞)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GradeTable {
    pub(super) bounded: Vec<GradeEntry>,
    pub(super) top: GradeEntry,
}

impl GradeTable {
    /// Builds a grade table, checking that the grades are numbered from 1,
    /// start at zero, are contiguous, and end with a single unbounded grade.
    pub fn new(mut grades: Vec<GradeEntry>) -> EngineResult<Self> {
        const TABLE: &str = "remuneration_grades";

        let top = grades
            .pop()
            .ok_or_else(|| EngineError::invalid_table(TABLE, "no grades"))?;
        if top.upper_bound.is_some() {
            return Err(EngineError::invalid_table(
                TABLE,
                format!("top grade {} must be unbounded", top.grade),
            ));
        }

        let first = grades.first().unwrap_or(&top);
        if first.grade != 1 {
            return Err(EngineError::invalid_table(
                TABLE,
                format!("grades must be numbered from 1, found {}", first.grade),
            ));
        }
        if first.lower_bound != Decimal::ZERO {
            return Err(EngineError::invalid_table(
                TABLE,
                format!("first grade must start at 0, found {}", first.lower_bound),
            ));
        }

        let mut previous: Option<&GradeEntry> = None;
        for entry in grades.iter().chain(std::iter::once(&top)) {
            if let Some(prev) = previous {
                if entry.grade <= prev.grade {
                    return Err(EngineError::invalid_table(
                        TABLE,
                        format!("grade {} does not follow grade {}", entry.grade, prev.grade),
                    ));
                }
                if entry.standard_monthly <= prev.standard_monthly {
                    return Err(EngineError::invalid_table(
                        TABLE,
                        format!("standard amount of grade {} must increase", entry.grade),
                    ));
                }
                if prev.upper_bound != Some(entry.lower_bound) {
                    return Err(EngineError::invalid_table(
                        TABLE,
                        format!(
                            "grade {} must start where grade {} ends",
                            entry.grade, prev.grade
                        ),
                    ));
                }
            }
            match entry.upper_bound {
                Some(upper) if upper <= entry.lower_bound => {
                    return Err(EngineError::invalid_table(
                        TABLE,
                        format!("grade {} has an empty range", entry.grade),
                    ));
                }
                None if entry.grade != top.grade => {
                    return Err(EngineError::invalid_table(
                        TABLE,
                        format!("only the top grade may be unbounded, not {}", entry.grade),
                    ));
                }
                _ => {}
            }
            previous = Some(entry);
        }

        Ok(Self {
            bounded: grades,
            top,
        })
    }

    /// Returns the grade containing `salary`, saturating at the top grade.
    pub fn grade_for(&self, salary: Decimal) -> &GradeEntry {
        self.bounded
            .iter()
            .find(|g| g.contains(salary))
            .unwrap_or(&self.top)
    }

    /// Iterates every grade, lowest first.
    pub fn grades(&self) -> impl Iterator<Item = &GradeEntry> {
        self.bounded.iter().chain(std::iter::once(&self.top))
    }

    /// Returns the unbounded top grade.
    pub fn top(&self) -> &GradeEntry {
        &self.top
    }
}

/// An entry of a schedule keyed by an inclusive upper threshold.
trait Tiered {
    fn up_to(&self) -> Option<Decimal>;
}

/// Splits validated tiers into the bounded prefix and the unbounded final tier.
fn split_open_ended<E: Tiered>(table: &str, mut tiers: Vec<E>) -> EngineResult<(Vec<E>, E)> {
    let open = tiers
        .pop()
        .ok_or_else(|| EngineError::invalid_table(table, "no entries"))?;
    if let Some(limit) = open.up_to() {
        return Err(EngineError::invalid_table(
            table,
            format!("final entry must be unbounded, found limit {}", limit),
        ));
    }

    let mut previous: Option<Decimal> = None;
    for tier in &tiers {
        let Some(limit) = tier.up_to() else {
            return Err(EngineError::invalid_table(table, "only the final entry may be unbounded"));
        };
        if previous.is_some_and(|p| limit <= p) {
            return Err(EngineError::invalid_table(
                table,
                format!("threshold {} is not above the previous one", limit),
            ));
        }
        previous = Some(limit);
    }

    Ok((tiers, open))
}

/// First tier whose threshold is at or above `amount`, else the open tier.
fn find_tier<'a, E: Tiered>(bounded: &'a [E], open: &'a E, amount: Decimal) -> &'a E {
    bounded
        .iter()
        .find(|t| t.up_to().is_some_and(|limit| amount <= limit))
        .unwrap_or(open)
}

/// A bracket evaluated as `amount × rate − subtract`.
///
/// Flat tiers use a zero rate with a negative `subtract`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinearBracket {
    /// Inclusive upper threshold; `None` for the final bracket.
    #[serde(default)]
    pub up_to: Option<Decimal>,
    /// Marginal rate as a fraction.
    pub rate: Decimal,
    /// Constant subtracted after applying the rate.
    pub subtract: Decimal,
}

impl LinearBracket {
    /// Evaluates the bracket formula for `amount`.
    pub fn apply(&self, amount: Decimal) -> Decimal {
        (amount * self.rate - self.subtract).normalize()
    }
}

impl Tiered for LinearBracket {
    fn up_to(&self) -> Option<Decimal> {
        self.up_to
    }
}

/// An ordered, exhaustive list of [`LinearBracket`]s.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinearSchedule {
    pub(super) bounded: Vec<LinearBracket>,
    pub(super) open: LinearBracket,
}

impl LinearSchedule {
    /// Builds a schedule, checking thresholds increase and the last is unbounded.
    pub fn new(table: &str, brackets: Vec<LinearBracket>) -> EngineResult<Self> {
        let (bounded, open) = split_open_ended(table, brackets)?;
        Ok(Self { bounded, open })
    }

    /// Returns the bracket that applies to `amount`.
    pub fn bracket_for(&self, amount: Decimal) -> &LinearBracket {
        find_tier(&self.bounded, &self.open, amount)
    }

    /// Evaluates the schedule at `amount`.
    pub fn evaluate(&self, amount: Decimal) -> Decimal {
        self.bracket_for(amount).apply(amount)
    }

    /// Iterates every bracket, lowest first.
    pub fn brackets(&self) -> impl Iterator<Item = &LinearBracket> {
        self.bounded.iter().chain(std::iter::once(&self.open))
    }
}

/// A fixed amount granted up to an inclusive threshold.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StepTier {
    /// Inclusive upper threshold; `None` for the final tier.
    #[serde(default)]
    pub up_to: Option<Decimal>,
    /// Amount granted in this tier.
    pub amount: Decimal,
}

impl Tiered for StepTier {
    fn up_to(&self) -> Option<Decimal> {
        self.up_to
    }
}

/// A discontinuous step schedule. Values are never interpolated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepSchedule {
    pub(super) bounded: Vec<StepTier>,
    pub(super) open: StepTier,
}

impl StepSchedule {
    /// Builds a schedule, checking thresholds increase and the last is unbounded.
    pub fn new(table: &str, tiers: Vec<StepTier>) -> EngineResult<Self> {
        let (bounded, open) = split_open_ended(table, tiers)?;
        Ok(Self { bounded, open })
    }

    /// Returns the amount of the first tier whose threshold is at or above `amount`.
    pub fn amount_for(&self, amount: Decimal) -> Decimal {
        find_tier(&self.bounded, &self.open, amount).amount
    }

    /// Iterates every tier, lowest first.
    pub fn tiers(&self) -> impl Iterator<Item = &StepTier> {
        self.bounded.iter().chain(std::iter::once(&self.open))
    }
}

/// Fixed social insurance rates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SocialInsuranceRates {
    /// Employees' pension rate before the 50/50 split (0.183).
    pub pension_rate: Decimal,
    /// Nursing care rate before the 50/50 split (0.0159).
    pub nursing_care_rate: Decimal,
    /// Employee share of the employment insurance rate (0.0055).
    pub employment_insurance_rate: Decimal,
    /// Lowest pension standard monthly amount.
    pub pension_standard_floor: Decimal,
    /// Highest pension standard monthly amount.
    pub pension_standard_ceiling: Decimal,
}

impl SocialInsuranceRates {
    fn validate(&self) -> EngineResult<()> {
        if self.pension_standard_floor > self.pension_standard_ceiling {
            return Err(EngineError::invalid_table(
                "social_insurance",
                "pension floor is above the pension ceiling",
            ));
        }
        Ok(())
    }
}

/// National income tax rules.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IncomeTaxRules {
    /// Basic deduction keyed on salary income.
    pub basic_deduction: StepSchedule,
    /// Quick-calculation table applied to the truncated taxable income.
    pub brackets: LinearSchedule,
    /// Taxable income is truncated down to a multiple of this unit.
    pub truncation_unit: Decimal,
    /// Surtax rate applied to the base tax (0.021).
    pub surtax_rate: Decimal,
}

/// Resident (prefectural + municipal) tax rules.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResidentTaxRules {
    /// Basic deduction keyed on salary income.
    pub basic_deduction: StepSchedule,
    /// Proportional income levy rate (0.10).
    pub income_levy_rate: Decimal,
    /// Flat adjustment credit applied when taxable income is positive.
    pub adjustment_credit: Decimal,
    /// Fixed per-capita levy.
    pub per_capita_levy: Decimal,
}

/// The complete set of reference tables for one statutory revision.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RateTables {
    metadata: TableMetadata,
    prefectures: PrefectureTable,
    grades: GradeTable,
    social_insurance: SocialInsuranceRates,
    salary_deduction: LinearSchedule,
    income_tax: IncomeTaxRules,
    resident_tax: ResidentTaxRules,
}

impl RateTables {
    /// Assembles a table set from validated components.
    pub fn new(
        metadata: TableMetadata,
        prefectures: PrefectureTable,
        grades: GradeTable,
        social_insurance: SocialInsuranceRates,
        salary_deduction: LinearSchedule,
        income_tax: IncomeTaxRules,
        resident_tax: ResidentTaxRules,
    ) -> EngineResult<Self> {
        social_insurance.validate()?;
        if income_tax.truncation_unit <= Decimal::ZERO {
            return Err(EngineError::invalid_table(
                "income_tax",
                "truncation unit must be positive",
            ));
        }
        Ok(Self::from_parts(
            metadata,
            prefectures,
            grades,
            social_insurance,
            salary_deduction,
            income_tax,
            resident_tax,
        ))
    }

    pub(super) fn from_parts(
        metadata: TableMetadata,
        prefectures: PrefectureTable,
        grades: GradeTable,
        social_insurance: SocialInsuranceRates,
        salary_deduction: LinearSchedule,
        income_tax: IncomeTaxRules,
        resident_tax: ResidentTaxRules,
    ) -> Self {
        Self {
            metadata,
            prefectures,
            grades,
            social_insurance,
            salary_deduction,
            income_tax,
            resident_tax,
        }
    }

    /// Returns the table metadata.
    pub fn metadata(&self) -> &TableMetadata {
        &self.metadata
    }

    /// Returns the prefecture table.
    pub fn prefectures(&self) -> &PrefectureTable {
        &self.prefectures
    }

    /// Returns the health insurance standard monthly remuneration grades.
    pub fn grades(&self) -> &GradeTable {
        &self.grades
    }

    /// Returns the fixed social insurance rates.
    pub fn social_insurance(&self) -> &SocialInsuranceRates {
        &self.social_insurance
    }

    /// Returns the salary-income deduction schedule.
    pub fn salary_deduction(&self) -> &LinearSchedule {
        &self.salary_deduction
    }

    /// Returns the income tax rules.
    pub fn income_tax(&self) -> &IncomeTaxRules {
        &self.income_tax
    }

    /// Returns the resident tax rules.
    pub fn resident_tax(&self) -> &ResidentTaxRules {
        &self.resident_tax
    }
}

/// `prefectures.yaml`
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct PrefecturesFile {
    pub default_code: String,
    pub prefectures: Vec<Prefecture>,
}

/// `remuneration_grades.yaml`
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct GradesFile {
    pub grades: Vec<GradeEntry>,
}

/// `salary_deduction.yaml`
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct SalaryDeductionFile {
    pub brackets: Vec<LinearBracket>,
}

/// `income_tax.yaml`
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct IncomeTaxFile {
    pub basic_deduction: Vec<StepTier>,
    pub brackets: Vec<LinearBracket>,
    pub truncation_unit: Decimal,
    pub surtax_rate: Decimal,
}

/// `resident_tax.yaml`
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ResidentTaxFile {
    pub basic_deduction: Vec<StepTier>,
    pub income_levy_rate: Decimal,
    pub adjustment_credit: Decimal,
    pub per_capita_levy: Decimal,
}
