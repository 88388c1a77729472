//! Progressive social-security withholding.
//!
//! Withholding uses cumulative marginal brackets: the slice of the base salary
//! inside each bracket is taxed at that bracket's own rate and the slices are
//! summed. Salaries above the ceiling pay the table's maximum contribution.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::config::{WithholdingBracket, WithholdingTable};
use crate::models::AuditStep;

use super::{add_money, mul_money, round_money, sub_money};

/// Sums each bracket's slice of `amount` at its own rate, without rounding.
pub(crate) fn cumulative_withholding(brackets: &[WithholdingBracket], amount: Decimal) -> Decimal {
    let mut total = Decimal::ZERO;
    for bracket in brackets {
        if amount <= bracket.lower {
            break;
        }
        let slice = sub_money(amount.min(bracket.upper), bracket.lower);
        total = add_money(total, mul_money(slice, bracket.rate));
    }
    total
}

/// The result of calculating withholding, including the audit step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WithholdingResult {
    /// The withholding amount, rounded to cents.
    pub amount: Decimal,
    /// The marginal rate of the highest bracket reached (zero for no salary).
    pub marginal_rate: Decimal,
    /// Whether the salary exceeded the ceiling and the maximum was applied.
    pub capped: bool,
    /// The audit step recording this calculation.
    pub audit_step: AuditStep,
}

/// Calculates social-security withholding on the base salary.
///
/// # Arguments
///
/// * `base_salary` - The contractual monthly salary
/// * `table` - The withholding brackets and ceiling
/// * `step_number` - The step number for audit trail sequencing
///
/// # Returns
///
/// A [`WithholdingResult`] whose amount is the table's maximum contribution
/// when `base_salary` exceeds the ceiling, and otherwise the sum of every
/// bracket slice at its own rate, rounded once at the end. A salary exactly
/// on a bracket boundary is taxed entirely within the lower bracket.
///
/// # Examples
///
/// ```
/// use payroll_engine::calculation::compute_withholding;
/// use payroll_engine::config::TablesLoader;
/// use rust_decimal::Decimal;
///
/// let tables = TablesLoader::embedded().unwrap();
/// let result = compute_withholding(Decimal::new(1000, 0), tables.withholding(), 1);
///
/// assert_eq!(result.amount, Decimal::new(7500, 2));
/// assert_eq!(result.marginal_rate, Decimal::new(75, 3));
/// ```
pub fn compute_withholding(
    base_salary: Decimal,
    table: &WithholdingTable,
    step_number: u32,
) -> WithholdingResult {
    let capped = base_salary > table.ceiling();

    let amount = if capped {
        table.max_contribution()
    } else {
        round_money(cumulative_withholding(table.brackets(), base_salary))
    };

    let marginal_rate = table
        .brackets()
        .iter()
        .take_while(|b| base_salary > b.lower)
        .last()
        .map(|b| b.rate)
        .unwrap_or(Decimal::ZERO);

    let reasoning = if capped {
        format!(
            "${} exceeds the ceiling of ${}; maximum contribution ${} applies",
            base_salary,
            table.ceiling(),
            amount
        )
    } else {
        let slices: Vec<String> = table
            .brackets()
            .iter()
            .take_while(|b| base_salary > b.lower)
            .map(|b| format!("${} x {}", base_salary.min(b.upper) - b.lower, b.rate))
            .collect();
        if slices.is_empty() {
            format!("No withholding on ${}", base_salary)
        } else {
            format!("{} = ${}", slices.join(" + "), amount)
        }
    };

    let audit_step = AuditStep {
        step_number,
        rule_id: "withholding".to_string(),
        rule_name: "Progressive Withholding".to_string(),
        input: serde_json::json!({
            "base_salary": base_salary.to_string(),
            "ceiling": table.ceiling().to_string()
        }),
        output: serde_json::json!({
            "amount": amount.to_string(),
            "marginal_rate": marginal_rate.to_string(),
            "capped": capped
        }),
        reasoning,
    };

    WithholdingResult {
        amount,
        marginal_rate,
        capped,
        audit_step,
    }
}
