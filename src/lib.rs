//! Take-Home Pay Engine for Japanese salaried employees
//!
//! This crate calculates monthly take-home pay from a gross monthly salary:
//! social insurance premiums (health, nursing care, pension, employment),
//! national income tax with the reconstruction surtax, and resident tax,
//! using the FY2025 statutory tables.

#![warn(missing_docs)]

pub mod api;
pub mod calculation;
pub mod config;
pub mod error;
pub mod models;
