//! Severance fund contribution.
//!
//! The contribution is an employer-side accrual on the base salary. It is
//! reported on the breakdown but never deducted from net pay.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::AuditStep;

use super::{mul_money, round_money};

/// The result of calculating the severance fund contribution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeveranceResult {
    /// The contribution, rounded to cents.
    pub amount: Decimal,
    /// The audit step recording this calculation.
    pub audit_step: AuditStep,
}

/// Calculates the severance fund contribution as `base_salary x rate`.
///
/// # Examples
///
/// ```
/// use payroll_engine::calculation::compute_severance_contribution;
/// use rust_decimal::Decimal;
///
/// let result = compute_severance_contribution(Decimal::new(3000, 0), Decimal::new(8, 2), 1);
/// assert_eq!(result.amount, Decimal::new(24000, 2));
/// ```
pub fn compute_severance_contribution(
    base_salary: Decimal,
    rate: Decimal,
    step_number: u32,
) -> SeveranceResult {
    let amount = round_money(mul_money(base_salary, rate));

    SeveranceResult {
        amount,
        audit_step: AuditStep {
            step_number,
            rule_id: "severance_fund".to_string(),
            rule_name: "Severance Fund Contribution".to_string(),
            input: serde_json::json!({
                "base_salary": base_salary.to_string(),
                "rate": rate.to_string()
            }),
            output: serde_json::json!({
                "amount": amount.to_string(),
                "deducted_from_net": false
            }),
            reasoning: format!(
                "${} x {} = ${} (employer accrual, not deducted)",
                base_salary, rate, amount
            ),
        },
    }
}
