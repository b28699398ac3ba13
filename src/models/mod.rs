//! Core data models for the Take-Home Pay Engine.
//!
//! This module contains the calculation input, the itemised breakdown and
//! the audit envelope returned by the API.

mod breakdown;
mod calculation_result;
mod salary_input;

pub use breakdown::{
    DeductionShare, IncomeBase, IncomeTax, ResidentTax, ShareCategory, SocialInsurancePremiums,
    StandardMonthlyAmounts, TakeHomeBreakdown,
};
pub(crate) use breakdown::percent_of;
pub use calculation_result::{AuditStep, AuditTrace, AuditWarning, CalculationResult};
pub use salary_input::{MAX_MONTHLY_SALARY, SalaryInput};
