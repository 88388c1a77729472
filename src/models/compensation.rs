//! Compensation input model and overtime categories.
//!
//! This module defines the [`CompensationInput`] record fed to the engine and
//! the closed set of [`OvertimeCategory`] premium tiers.

use std::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::EngineError;

/// An overtime premium tier.
///
/// Each tier maps to a multiplier in the overtime rules of the bracket
/// tables. The default is the highest standard tier, `standard-100%`.
///
/// # Example
///
/// ```
/// use payroll_engine::models::OvertimeCategory;
///
/// let category: OvertimeCategory = "night".parse().unwrap();
/// assert_eq!(category, OvertimeCategory::Night);
/// assert_eq!(OvertimeCategory::default().label(), "standard-100%");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum OvertimeCategory {
    /// Standard daytime overtime paid at 150%.
    #[serde(rename = "standard-50%")]
    Standard50,
    /// Enhanced overtime paid at 200% (rest days and holidays).
    #[default]
    #[serde(rename = "standard-100%")]
    Standard100,
    /// Night-shift overtime premium.
    #[serde(rename = "night")]
    Night,
}

impl OvertimeCategory {
    /// All recognized categories.
    pub const ALL: [OvertimeCategory; 3] = [
        OvertimeCategory::Standard50,
        OvertimeCategory::Standard100,
        OvertimeCategory::Night,
    ];

    /// Returns the label used for this category in inputs and breakdowns.
    pub fn label(&self) -> &'static str {
        match self {
            OvertimeCategory::Standard50 => "standard-50%",
            OvertimeCategory::Standard100 => "standard-100%",
            OvertimeCategory::Night => "night",
        }
    }
}

impl fmt::Display for OvertimeCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for OvertimeCategory {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let label = s.trim();
        OvertimeCategory::ALL
            .into_iter()
            .find(|category| category.label().eq_ignore_ascii_case(label))
            .ok_or_else(|| EngineError::UnknownOvertimeCategory {
                label: s.to_string(),
            })
    }
}

fn default_overtime_category() -> String {
    OvertimeCategory::default().label().to_string()
}

/// The gross-compensation record for one employee and one pay month.
///
/// Monetary fields are expected to be non-negative and `dependents` to be
/// zero or more; use [`crate::calculation::validate`] to check before
/// calculating. The overtime category is kept as the caller supplied it so
/// unrecognized labels can be reported rather than rejected at parse time.
///
/// # Example
///
/// ```
/// use payroll_engine::models::CompensationInput;
/// use rust_decimal::Decimal;
///
/// let input: CompensationInput = serde_json::from_str(r#"{"base_salary": "3000.00"}"#).unwrap();
/// assert_eq!(input.base_salary, Decimal::new(3000, 0));
/// assert_eq!(input.dependents, 0);
/// assert_eq!(input.overtime_category, "standard-100%");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompensationInput {
    /// The contractual monthly salary.
    pub base_salary: Decimal,
    /// Allowances paid on top of the base salary.
    #[serde(default)]
    pub allowances: Decimal,
    /// Bonuses paid this month.
    #[serde(default)]
    pub bonuses: Decimal,
    /// Employee-side deductions other than withholding and income tax.
    #[serde(default)]
    pub other_deductions: Decimal,
    /// The number of dependents declared for income tax.
    #[serde(default)]
    pub dependents: i32,
    /// Overtime hours worked this month.
    #[serde(default)]
    pub overtime_hours: Decimal,
    /// The overtime premium tier label (e.g., "standard-50%", "night").
    #[serde(default = "default_overtime_category")]
    pub overtime_category: String,
}

impl CompensationInput {
    /// Creates an input with only a base salary; all other fields take defaults.
    pub fn new(base_salary: Decimal) -> Self {
        Self {
            base_salary,
            allowances: Decimal::ZERO,
            bonuses: Decimal::ZERO,
            other_deductions: Decimal::ZERO,
            dependents: 0,
            overtime_hours: Decimal::ZERO,
            overtime_category: default_overtime_category(),
        }
    }

    /// Parses the overtime category label.
    pub fn category(&self) -> Result<OvertimeCategory, EngineError> {
        self.overtime_category.parse()
    }
}
