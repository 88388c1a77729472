//! Payroll Tax Calculation Engine
//!
//! This crate converts a gross-compensation record (base salary, allowances,
//! bonuses, overtime, dependents) into a net-salary breakdown using progressive
//! social-security withholding, single-bracket income tax, a flat-rate severance
//! fund contribution and overtime premium multipliers.

#![warn(missing_docs)]

pub mod calculation;
pub mod config;
pub mod error;
pub mod models;
