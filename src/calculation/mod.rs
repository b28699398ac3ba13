//! Calculation logic for the Take-Home Pay Engine.
//!
//! This module contains the five pipeline stages (standard monthly
//! remuneration, social insurance, income base, income tax and resident
//! tax) and the [`calculate_take_home`] pipeline that runs them in order and
//! aggregates the result.

mod income_base;
mod income_tax;
mod resident_tax;
mod rounding;
mod social_insurance;
mod standard_remuneration;
mod take_home;

pub use income_base::{IncomeBaseResult, MONTHS_PER_YEAR, build_income_base};
pub use income_tax::{IncomeTaxResult, calculate_income_tax};
pub use resident_tax::{ResidentTaxResult, calculate_resident_tax};
pub use rounding::{floor_yen, non_negative, round_yen, truncate_to_unit};
pub use social_insurance::{SocialInsuranceResult, calculate_social_insurance};
pub use standard_remuneration::{
    StandardMonthlyResult, pension_standard_monthly, resolve_standard_monthly,
};
pub use take_home::{TakeHomeCalculation, calculate_salary, calculate_take_home};
