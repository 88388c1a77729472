//! Income tax calculation.
//!
//! Income tax is not cumulative: the taxable base falls in exactly one
//! bracket and the tax is `base x rate - fixed deduction`, where the fixed
//! deduction already absorbs the lower brackets.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::config::IncomeTaxTable;
use crate::models::AuditStep;

use super::{mul_money, round_money, sub_money};

/// The result of calculating income tax, including the audit step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IncomeTaxResult {
    /// The income tax amount, rounded to cents.
    pub amount: Decimal,
    /// Gross salary less dependent deductions.
    pub taxable_base: Decimal,
    /// The rate of the bracket applied (zero when nothing is taxable).
    pub rate: Decimal,
    /// The fixed deduction of the bracket applied.
    pub fixed_deduction: Decimal,
    /// The audit step recording this calculation.
    pub audit_step: AuditStep,
}

/// Calculates income tax on the gross salary.
///
/// # Arguments
///
/// * `gross_salary` - The gross monthly salary
/// * `dependents` - The number of declared dependents
/// * `table` - The income tax brackets and per-dependent deduction
/// * `step_number` - The step number for audit trail sequencing
///
/// # Returns
///
/// An [`IncomeTaxResult`]. The taxable base is `gross_salary` less
/// `dependents x per-dependent deduction`; a base of zero or less owes
/// nothing. Otherwise the single bracket containing the base is applied and
/// the result is clamped at zero before rounding.
///
/// # Examples
///
/// ```
/// use payroll_engine::calculation::compute_income_tax;
/// use payroll_engine::config::TablesLoader;
/// use rust_decimal::Decimal;
///
/// let tables = TablesLoader::embedded().unwrap();
/// let result = compute_income_tax(Decimal::new(5000, 0), 0, tables.income_tax(), 1);
///
/// // 5000 x 0.275 - 908.73
/// assert_eq!(result.amount, Decimal::new(46627, 2));
/// ```
pub fn compute_income_tax(
    gross_salary: Decimal,
    dependents: i32,
    table: &IncomeTaxTable,
    step_number: u32,
) -> IncomeTaxResult {
    let dependent_deduction = mul_money(Decimal::from(dependents), table.per_dependent_deduction());
    let taxable_base = sub_money(gross_salary, dependent_deduction);

    let input = serde_json::json!({
        "gross_salary": gross_salary.to_string(),
        "dependents": dependents,
        "dependent_deduction": dependent_deduction.to_string()
    });

    if taxable_base <= Decimal::ZERO {
        let amount = round_money(Decimal::ZERO);
        return IncomeTaxResult {
            amount,
            taxable_base,
            rate: Decimal::ZERO,
            fixed_deduction: Decimal::ZERO,
            audit_step: AuditStep {
                step_number,
                rule_id: "income_tax".to_string(),
                rule_name: "Income Tax".to_string(),
                input,
                output: serde_json::json!({
                    "amount": amount.to_string(),
                    "taxable_base": taxable_base.to_string()
                }),
                reasoning: format!("Taxable base ${} is not positive; no income tax", taxable_base),
            },
        };
    }

    let bracket = table.bracket_for(taxable_base);
    let raw = sub_money(mul_money(taxable_base, bracket.rate), bracket.fixed_deduction);
    let amount = round_money(raw.max(Decimal::ZERO));

    let audit_step = AuditStep {
        step_number,
        rule_id: "income_tax".to_string(),
        rule_name: "Income Tax".to_string(),
        input,
        output: serde_json::json!({
            "amount": amount.to_string(),
            "taxable_base": taxable_base.to_string(),
            "rate": bracket.rate.to_string(),
            "fixed_deduction": bracket.fixed_deduction.to_string()
        }),
        reasoning: format!(
            "${} x {} - ${} = ${}",
            taxable_base, bracket.rate, bracket.fixed_deduction, amount
        ),
    };

    IncomeTaxResult {
        amount,
        taxable_base,
        rate: bracket.rate,
        fixed_deduction: bracket.fixed_deduction,
        audit_step,
    }
}
