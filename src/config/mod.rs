//! Reference tables for the Take-Home Pay Engine.
//!
//! The engine runs against a [`RateTables`] set: prefecture health insurance
//! rates, standard monthly remuneration grades, fixed social insurance rates
//! and the income and resident tax schedules. The FY2025 set is built in
//! ([`builtin`]); other revisions can be loaded from YAML with [`ConfigLoader`].
//!
//! # Example
//!
//! ```no_run
//! use take_home_engine::config::ConfigLoader;
//!
//! let loader = ConfigLoader::load("./config/fy2025").unwrap();
//! println!("Loaded tables: {}", loader.metadata().name);
//! ```

mod loader;
mod statutory;
mod types;

pub use loader::ConfigLoader;
pub use statutory::{DEFAULT_PREFECTURE_CODE, builtin};
pub use types::{
    GradeEntry, GradeTable, IncomeTaxRules, LinearBracket, LinearSchedule, Prefecture,
    PrefectureTable, RateTables, ResidentTaxRules, ResolvedPrefecture, SocialInsuranceRates,
    SourceReference, StepSchedule, StepTier, TableMetadata,
};
