//! Core data models for the Payroll Engine.
//!
//! This module contains the compensation input, the payroll breakdown
//! produced from it, and the audit records attached to each breakdown.

mod audit;
mod breakdown;
mod compensation;

pub use audit::AuditStep;
pub use breakdown::{BreakdownDetails, PayrollBreakdown};
pub use compensation::{CompensationInput, OvertimeCategory};
