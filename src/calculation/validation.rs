//! Compensation input validation.
//!
//! Validation never fails: it returns every violation it finds and leaves the
//! decision to reject or proceed to the caller.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};
use crate::models::CompensationInput;

/// The outcome of validating a compensation input.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationResult {
    violations: Vec<String>,
}

impl ValidationResult {
    /// Returns true when no violations were found.
    pub fn is_valid(&self) -> bool {
        self.violations.is_empty()
    }

    /// Returns the violations found, in field order.
    pub fn violations(&self) -> &[String] {
        &self.violations
    }

    /// Converts the result into `Ok(())` or [`EngineError::InvalidInput`].
    pub fn into_result(self) -> EngineResult<()> {
        if self.violations.is_empty() {
            Ok(())
        } else {
            Err(EngineError::InvalidInput {
                violations: self.violations,
            })
        }
    }
}

/// Checks a compensation input for structural problems.
///
/// Each failed check adds one distinct message: negative base salary,
/// allowances, bonuses, other deductions, dependents or overtime hours, and an
/// unrecognized overtime category.
///
/// # Examples
///
/// ```
/// use payroll_engine::calculation::validate;
/// use payroll_engine::models::CompensationInput;
/// use rust_decimal::Decimal;
///
/// let valid = CompensationInput::new(Decimal::new(3000, 0));
/// assert!(validate(&valid).is_valid());
///
/// let invalid = CompensationInput::new(Decimal::new(-1000, 0));
/// assert_eq!(validate(&invalid).violations(), ["base salary must not be negative"]);
/// ```
pub fn validate(input: &CompensationInput) -> ValidationResult {
    let mut violations = Vec::new();

    let monetary_fields = [
        (input.base_salary, "base salary must not be negative"),
        (input.allowances, "allowances must not be negative"),
        (input.bonuses, "bonuses must not be negative"),
        (input.other_deductions, "other deductions must not be negative"),
    ];
    for (value, message) in monetary_fields {
        if value < Decimal::ZERO {
            violations.push(message.to_string());
        }
    }

    if input.dependents < 0 {
        violations.push("number of dependents must not be negative".to_string());
    }

    if input.overtime_hours < Decimal::ZERO {
        violations.push("overtime hours must not be negative".to_string());
    }

    if let Err(err) = input.category() {
        violations.push(err.to_string());
    }

    ValidationResult { violations }
}
