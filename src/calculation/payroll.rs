//! Payroll aggregation.
//!
//! This module composes the individual calculators into a complete
//! [`PayrollBreakdown`] and provides the [`PayrollEngine`] that callers hold
//! on to for repeated calculations.

use std::sync::Arc;

use rayon::prelude::*;
use tracing::{debug, warn};

use crate::config::{PayrollTables, TablesLoader};
use crate::error::EngineResult;
use crate::models::{BreakdownDetails, CompensationInput, OvertimeCategory, PayrollBreakdown};

use super::{
    ValidationResult, add_money, compute_income_tax, compute_overtime_value,
    compute_severance_contribution, compute_withholding, round_money, sub_money, validate,
};

/// Calculates the payroll breakdown for one compensation input.
///
/// Monetary inputs are rounded to cents first and each derived amount is
/// rounded once where it is computed, so the net salary is exactly
/// `gross - withholding - income tax - other deductions`.
///
/// Withholding and the severance contribution use the base salary only;
/// income tax uses the gross salary. Input is not validated here: negative
/// values are calculated as given, and an unrecognized overtime category
/// falls back to the default category. Amounts too large for `Decimal`
/// saturate rather than panic.
pub fn calculate_payroll(input: &CompensationInput, tables: &PayrollTables) -> PayrollBreakdown {
    let base_salary = round_money(input.base_salary);
    let allowances = round_money(input.allowances);
    let bonuses = round_money(input.bonuses);
    let other_deductions = round_money(input.other_deductions);

    let category = input.category().unwrap_or_else(|err| {
        warn!(error = %err, "Falling back to default overtime category");
        OvertimeCategory::default()
    });

    let overtime = compute_overtime_value(
        base_salary,
        input.overtime_hours,
        category,
        tables.overtime(),
        1,
    );
    let gross_salary = round_money(
        [allowances, bonuses, overtime.amount]
            .into_iter()
            .fold(base_salary, add_money),
    );

    let withholding = compute_withholding(base_salary, tables.withholding(), 2);
    let income_tax = compute_income_tax(gross_salary, input.dependents, tables.income_tax(), 3);
    let severance = compute_severance_contribution(base_salary, tables.severance_rate(), 4);

    let net_salary = round_money(
        [withholding.amount, income_tax.amount, other_deductions]
            .into_iter()
            .fold(gross_salary, sub_money),
    );

    debug!(
        gross_salary = %gross_salary,
        withholding = %withholding.amount,
        income_tax = %income_tax.amount,
        net_salary = %net_salary,
        "Calculated payroll breakdown"
    );

    PayrollBreakdown {
        base_salary,
        allowances,
        bonuses,
        overtime_value: overtime.amount,
        gross_salary,
        withholding: withholding.amount,
        income_tax: income_tax.amount,
        severance_fund_contribution: severance.amount,
        other_deductions,
        net_salary,
        details: BreakdownDetails {
            withholding_rate: withholding.marginal_rate,
            income_tax_rate: income_tax.rate,
            income_tax_deduction: income_tax.fixed_deduction,
            taxable_base: income_tax.taxable_base,
            severance_rate: tables.severance_rate(),
            hourly_rate: overtime.hourly_rate,
            overtime_hours: input.overtime_hours,
            overtime_category: input.overtime_category.clone(),
            overtime_multiplier: overtime.multiplier,
            audit_steps: vec![
                overtime.audit_step,
                withholding.audit_step,
                income_tax.audit_step,
                severance.audit_step,
            ],
        },
    }
}

/// The payroll calculation engine.
///
/// Holds the immutable payroll tables behind an `Arc`, so the engine is cheap
/// to clone and can be shared across threads without locking.
///
/// # Example
///
/// ```
/// use payroll_engine::calculation::PayrollEngine;
/// use payroll_engine::models::CompensationInput;
/// use rust_decimal::Decimal;
///
/// let engine = PayrollEngine::official().unwrap();
/// let input = CompensationInput::new(Decimal::new(3000, 0));
///
/// assert!(engine.validate(&input).is_valid());
/// let breakdown = engine.calculate_payroll(&input);
/// assert_eq!(breakdown.severance_fund_contribution, Decimal::new(24000, 2));
/// ```
#[derive(Debug, Clone)]
pub struct PayrollEngine {
    tables: Arc<PayrollTables>,
}

impl PayrollEngine {
    /// Creates an engine from the given tables.
    pub fn new(tables: PayrollTables) -> Self {
        Self {
            tables: Arc::new(tables),
        }
    }

    /// Creates an engine from the tables compiled into this release.
    pub fn official() -> EngineResult<Self> {
        Ok(Self::new(TablesLoader::embedded()?))
    }

    /// Returns the tables this engine calculates with.
    pub fn tables(&self) -> &PayrollTables {
        &self.tables
    }

    /// Validates a compensation input. See [`validate`].
    pub fn validate(&self, input: &CompensationInput) -> ValidationResult {
        validate(input)
    }

    /// Calculates the payroll breakdown for one input. See [`calculate_payroll`].
    pub fn calculate_payroll(&self, input: &CompensationInput) -> PayrollBreakdown {
        calculate_payroll(input, &self.tables)
    }

    /// Validates the input and calculates its breakdown, returning
    /// [`crate::error::EngineError::InvalidInput`] if any violation is found.
    pub fn validate_and_calculate(
        &self,
        input: &CompensationInput,
    ) -> EngineResult<PayrollBreakdown> {
        self.validate(input).into_result()?;
        Ok(self.calculate_payroll(input))
    }

    /// Calculates breakdowns for many inputs in parallel.
    ///
    /// Results are returned in input order.
    pub fn calculate_batch(&self, inputs: &[CompensationInput]) -> Vec<PayrollBreakdown> {
        debug!(count = inputs.len(), "Calculating payroll batch");
        inputs
            .par_iter()
            .map(|input| calculate_payroll(input, &self.tables))
            .collect()
    }
}
