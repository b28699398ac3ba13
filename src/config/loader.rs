//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading a table set
//! from YAML files, for use in place of the [built-in](super::builtin) tables.

use std::fs;
use std::path::Path;

use crate::error::{EngineError, EngineResult};

use super::types::{
    GradeTable, GradesFile, IncomeTaxFile, IncomeTaxRules, LinearSchedule, PrefectureTable,
    PrefecturesFile, RateTables, ResidentTaxFile, ResidentTaxRules, SalaryDeductionFile,
    SocialInsuranceRates, StepSchedule, TableMetadata,
};

/// Loads and provides access to a table set.
///
/// # Directory Structure
///
/// ```text
/// config/fy2025/
/// ├── metadata.yaml             # Revision, effective date, sources
/// ├── prefectures.yaml          # Health insurance rate per prefecture
/// ├── remuneration_grades.yaml  # Standard monthly remuneration grades
/// ├── social_insurance.yaml     # Pension, nursing care, employment rates
/// ├── salary_deduction.yaml     # Salary-income deduction schedule
/// ├── income_tax.yaml           # Basic deduction, brackets, surtax
/// └── resident_tax.yaml         # Basic deduction, levy, credit, per-capita levy
/// ```
///
/// # Example
///
/// ```no_run
/// use take_home_engine::config::ConfigLoader;
///
/// let loader = ConfigLoader::load("./config/fy2025")?;
/// println!("Loaded tables: {}", loader.metadata().revision);
/// # Ok::<(), take_home_engine::error::EngineError>(())
/// ```
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    tables: RateTables,
}

impl ConfigLoader {
    /// Loads a table set from the specified directory.
    ///
    /// # Returns
    ///
    /// Returns a `ConfigLoader` on success, or an error if:
    /// - Any required file is missing (`ConfigNotFound`)
    /// - Any file contains invalid YAML or is missing a field (`ConfigParseError`)
    /// - Any table is structurally invalid (`InvalidTable`)
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();

        let metadata = Self::load_yaml::<TableMetadata>(&path.join("metadata.yaml"))?;

        let prefectures_file = Self::load_yaml::<PrefecturesFile>(&path.join("prefectures.yaml"))?;
        let prefectures =
            PrefectureTable::new(&prefectures_file.default_code, prefectures_file.prefectures)?;

        let grades_file = Self::load_yaml::<GradesFile>(&path.join("remuneration_grades.yaml"))?;
        let grades = GradeTable::new(grades_file.grades)?;

        let social_insurance =
            Self::load_yaml::<SocialInsuranceRates>(&path.join("social_insurance.yaml"))?;

        let salary_file =
            Self::load_yaml::<SalaryDeductionFile>(&path.join("salary_deduction.yaml"))?;
        let salary_deduction = LinearSchedule::new("salary_deduction", salary_file.brackets)?;

        let income_tax_file = Self::load_yaml::<IncomeTaxFile>(&path.join("income_tax.yaml"))?;
        let income_tax = IncomeTaxRules {
            basic_deduction: StepSchedule::new(
                "income_tax.basic_deduction",
                income_tax_file.basic_deduction,
            )?,
            brackets: LinearSchedule::new("income_tax.brackets", income_tax_file.brackets)?,
            truncation_unit: income_tax_file.truncation_unit,
            surtax_rate: income_tax_file.surtax_rate,
        };

        let resident_tax_file =
            Self::load_yaml::<ResidentTaxFile>(&path.join("resident_tax.yaml"))?;
        let resident_tax = ResidentTaxRules {
            basic_deduction: StepSchedule::new(
                "resident_tax.basic_deduction",
                resident_tax_file.basic_deduction,
            )?,
            income_levy_rate: resident_tax_file.income_levy_rate,
            adjustment_credit: resident_tax_file.adjustment_credit,
            per_capita_levy: resident_tax_file.per_capita_levy,
        };

        let tables = RateTables::new(
            metadata,
            prefectures,
            grades,
            social_insurance,
            salary_deduction,
            income_tax,
            resident_tax,
        )?;

        Ok(Self { tables })
    }

    /// Loads and parses a YAML file.
    fn load_yaml<T: serde::de::DeserializeOwned>(path: &Path) -> EngineResult<T> {
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| EngineError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        serde_yaml::from_str(&content).map_err(|e| EngineError::ConfigParseError {
            path: path_str,
            message: e.to_string(),
        })
    }

    /// Returns the loaded tables.
    pub fn tables(&self) -> &RateTables {
        &self.tables
    }

    /// Consumes the loader, returning the loaded tables.
    pub fn into_tables(self) -> RateTables {
        self.tables
    }

    /// Returns the table metadata.
    pub fn metadata(&self) -> &TableMetadata {
        self.tables.metadata()
    }
}
