//! Overtime premium calculation.
//!
//! This module converts overtime hours into a monetary premium: the hourly
//! rate is the base salary spread over the standard month, and each category
//! carries its own multiplier.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::config::OvertimeRules;
use crate::models::{AuditStep, OvertimeCategory};

use super::{mul_money, round_money};

/// The result of calculating an overtime premium, including the audit step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OvertimeResult {
    /// The overtime premium, rounded to cents.
    pub amount: Decimal,
    /// The unrounded hourly rate derived from the base salary.
    pub hourly_rate: Decimal,
    /// The multiplier for the overtime category.
    pub multiplier: Decimal,
    /// The audit step recording this calculation.
    pub audit_step: AuditStep,
}

/// Calculates the overtime premium for a month.
///
/// # Arguments
///
/// * `base_salary` - The contractual monthly salary
/// * `overtime_hours` - Overtime hours worked
/// * `category` - The overtime premium tier
/// * `rules` - Standard monthly hours and per-category multipliers
/// * `step_number` - The step number for audit trail sequencing
///
/// # Returns
///
/// An [`OvertimeResult`] whose amount is
/// `hours x (base_salary / standard hours) x multiplier`, rounded once.
/// Zero hours yields zero regardless of category.
///
/// # Examples
///
/// ```
/// use payroll_engine::calculation::compute_overtime_value;
/// use payroll_engine::config::TablesLoader;
/// use payroll_engine::models::OvertimeCategory;
/// use rust_decimal::Decimal;
///
/// let tables = TablesLoader::embedded().unwrap();
/// let result = compute_overtime_value(
///     Decimal::new(3000, 0),
///     Decimal::new(10, 0),
///     OvertimeCategory::Standard100,
///     tables.overtime(),
///     1,
/// );
///
/// // (3000 / 220) x 10 x 2.0 = 272.7272...
/// assert_eq!(result.amount, Decimal::new(27273, 2));
/// ```
pub fn compute_overtime_value(
    base_salary: Decimal,
    overtime_hours: Decimal,
    category: OvertimeCategory,
    rules: &OvertimeRules,
    step_number: u32,
) -> OvertimeResult {
    let multiplier = rules.multipliers.for_category(category);
    let hourly_rate = per_standard_hour(base_salary, rules);

    // Multiply before dividing so the only inexact step is the final division.
    let amount = if overtime_hours.is_zero() {
        round_money(Decimal::ZERO)
    } else {
        let premium = mul_money(mul_money(overtime_hours, base_salary), multiplier);
        round_money(per_standard_hour(premium, rules))
    };

    let audit_step = AuditStep {
        step_number,
        rule_id: "overtime_premium".to_string(),
        rule_name: "Overtime Premium".to_string(),
        input: serde_json::json!({
            "base_salary": base_salary.to_string(),
            "overtime_hours": overtime_hours.to_string(),
            "category": category.label(),
            "standard_monthly_hours": rules.standard_monthly_hours.to_string()
        }),
        output: serde_json::json!({
            "amount": amount.to_string(),
            "multiplier": multiplier.to_string()
        }),
        reasoning: if overtime_hours.is_zero() {
            "No overtime hours worked".to_string()
        } else {
            format!(
                "{}h x (${} / {}h) x {} = ${}",
                overtime_hours.normalize(),
                base_salary,
                rules.standard_monthly_hours,
                multiplier,
                amount
            )
        },
    };

    OvertimeResult {
        amount,
        hourly_rate,
        multiplier,
        audit_step,
    }
}

/// Spreads an amount over the standard month. A division that cannot be
/// represented yields zero.
fn per_standard_hour(amount: Decimal, rules: &OvertimeRules) -> Decimal {
    amount
        .checked_div(rules.standard_monthly_hours)
        .unwrap_or_else(|| {
            warn!(
                amount = %amount,
                standard_monthly_hours = %rules.standard_monthly_hours,
                "Cannot divide by standard monthly hours, treating result as zero"
            );
            Decimal::ZERO
        })
}
