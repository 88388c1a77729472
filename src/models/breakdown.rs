//! Payroll breakdown model.
//!
//! This module contains the [`PayrollBreakdown`] produced by the engine for a
//! single compensation input, together with the [`BreakdownDetails`] that
//! record which rates were applied.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::AuditStep;
use crate::calculation::add_money;

/// Rates and echoed inputs recorded alongside a breakdown for auditability.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BreakdownDetails {
    /// Marginal rate of the highest withholding bracket reached.
    pub withholding_rate: Decimal,
    /// Rate of the income tax bracket the taxable base fell into.
    pub income_tax_rate: Decimal,
    /// Fixed deduction of that income tax bracket.
    pub income_tax_deduction: Decimal,
    /// Gross salary less dependent deductions.
    pub taxable_base: Decimal,
    /// Flat rate used for the severance fund contribution.
    pub severance_rate: Decimal,
    /// Hourly rate derived from the base salary.
    pub hourly_rate: Decimal,
    /// Overtime hours, echoed from the input.
    pub overtime_hours: Decimal,
    /// Overtime category label, echoed from the input.
    pub overtime_category: String,
    /// Multiplier applied to the overtime hours.
    pub overtime_multiplier: Decimal,
    /// Audit trail of each calculation stage, in pipeline order.
    pub audit_steps: Vec<AuditStep>,
}

/// The net-salary breakdown for one compensation input.
///
/// Every monetary field is rounded to two decimal places, and the net salary
/// always equals gross less withholding, income tax and other deductions.
/// The severance fund contribution is an employer-side accrual and is not
/// subtracted from the net salary.
///
/// # Example
///
/// ```
/// use payroll_engine::calculation::PayrollEngine;
/// use payroll_engine::models::CompensationInput;
/// use rust_decimal::Decimal;
///
/// let engine = PayrollEngine::official().unwrap();
/// let breakdown = engine.calculate_payroll(&CompensationInput::new(Decimal::new(1000, 0)));
///
/// assert_eq!(breakdown.withholding, Decimal::new(7500, 2));
/// assert_eq!(breakdown.net_salary, Decimal::new(92500, 2));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayrollBreakdown {
    /// The base salary.
    pub base_salary: Decimal,
    /// Allowances paid.
    pub allowances: Decimal,
    /// Bonuses paid.
    pub bonuses: Decimal,
    /// Overtime premium value.
    pub overtime_value: Decimal,
    /// Base salary plus allowances, bonuses and overtime.
    pub gross_salary: Decimal,
    /// Social-security withholding on the base salary.
    pub withholding: Decimal,
    /// Income tax on the gross salary.
    pub income_tax: Decimal,
    /// Employer severance fund contribution (informational).
    pub severance_fund_contribution: Decimal,
    /// Other employee-side deductions.
    pub other_deductions: Decimal,
    /// Gross less withholding, income tax and other deductions.
    pub net_salary: Decimal,
    /// Applied rates and the audit trail.
    pub details: BreakdownDetails,
}

impl PayrollBreakdown {
    /// Returns the sum of all employee-side deductions, saturating at
    /// `Decimal::MAX`.
    pub fn total_deductions(&self) -> Decimal {
        [self.income_tax, self.other_deductions]
            .into_iter()
            .fold(self.withholding, add_money)
    }
}
