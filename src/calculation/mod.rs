//! Calculation logic for the Payroll Engine.
//!
//! This module contains input validation, cent rounding, progressive
//! withholding, single-bracket income tax, overtime premiums, the severance
//! fund contribution, and the aggregator that composes them into a
//! [`crate::models::PayrollBreakdown`].
//!
//! Every calculator is a pure function of its inputs and the immutable
//! tables, so calculations can run concurrently without coordination.

mod income_tax;
mod overtime;
mod payroll;
mod rounding;
mod severance;
mod validation;
mod withholding;

pub use income_tax::{IncomeTaxResult, compute_income_tax};
pub use overtime::{OvertimeResult, compute_overtime_value};
pub use payroll::{PayrollEngine, calculate_payroll};
pub use rounding::round_money;
pub use severance::{SeveranceResult, compute_severance_contribution};
pub use validation::{ValidationResult, validate};
pub use withholding::{WithholdingResult, compute_withholding};

pub(crate) use rounding::{add_money, mul_money, sub_money};
pub(crate) use withholding::cumulative_withholding;
