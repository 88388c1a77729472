//! Audit records attached to payroll breakdowns.

use serde::{Deserialize, Serialize};

/// A single step in the audit trail recording a calculation decision.
///
/// Each step captures the input, output, and reasoning for one stage of the
/// payroll pipeline.
///
/// # Example
///
/// ```
/// use payroll_engine::models::AuditStep;
///
/// let step = AuditStep {
///     step_number: 1,
///     rule_id: "withholding".to_string(),
///     rule_name: "Progressive Withholding".to_string(),
///     input: serde_json::json!({"base_salary": "1000.00"}),
///     output: serde_json::json!({"amount": "75.00"}),
///     reasoning: "$1000.00 x 0.075 = $75.00".to_string(),
/// };
/// assert_eq!(step.rule_id, "withholding");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditStep {
    /// The sequential step number.
    pub step_number: u32,
    /// The unique identifier of the rule that was applied.
    pub rule_id: String,
    /// The human-readable name of the rule.
    pub rule_name: String,
    /// The input data for this step.
    pub input: serde_json::Value,
    /// The output data from this step.
    pub output: serde_json::Value,
    /// Human-readable explanation of the decision.
    pub reasoning: String,
}
