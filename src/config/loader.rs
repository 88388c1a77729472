//! Table loading functionality.
//!
//! This module provides the [`TablesLoader`] type for building validated
//! [`PayrollTables`] from YAML. The statutory tables are compiled into the
//! crate, so releasing new tables means releasing a new build.

use crate::error::{EngineError, EngineResult};

use super::types::{IncomeTaxTable, PayrollTables, TablesFile, WithholdingTable};

/// The statutory tables shipped with this release.
pub const EMBEDDED_TABLES: &str = include_str!("../../config/payroll_2026.yaml");

const EMBEDDED_SOURCE_NAME: &str = "payroll_2026.yaml";

/// Loads payroll tables from YAML.
///
/// # Document Structure
///
/// ```text
/// version: "2026.1"
/// effective_date: "2026-01-01"
/// withholding:
///   ceiling: "7786.02"
///   brackets: [{ lower, upper, rate }, ...]
/// income_tax:
///   per_dependent_deduction: "189.59"
///   brackets: [{ lower, upper (omitted on the top bracket), rate, fixed_deduction }, ...]
/// severance:
///   rate: "0.08"
/// overtime:
///   standard_monthly_hours: "220"
///   multipliers: { standard_50, standard_100, night }
/// ```
///
/// # Example
///
/// ```
/// use payroll_engine::config::TablesLoader;
///
/// let tables = TablesLoader::embedded().unwrap();
/// assert_eq!(tables.version(), "2026.1");
/// ```
#[derive(Debug, Clone, Copy)]
pub struct TablesLoader;

impl TablesLoader {
    /// Loads the tables compiled into this release.
    pub fn embedded() -> EngineResult<PayrollTables> {
        Self::from_yaml_str(EMBEDDED_SOURCE_NAME, EMBEDDED_TABLES)
    }

    /// Parses and validates tables from a YAML document.
    ///
    /// # Arguments
    ///
    /// * `source_name` - A name for the document, used in error messages
    /// * `yaml` - The YAML content
    ///
    /// # Returns
    ///
    /// Returns the validated tables, or an error if:
    /// - The document is not valid YAML or is missing required fields
    /// - Any bracket table has gaps, overlaps, or out-of-range rates
    /// - The severance rate or overtime rules are out of range
    pub fn from_yaml_str(source_name: &str, yaml: &str) -> EngineResult<PayrollTables> {
        let file: TablesFile =
            serde_yaml::from_str(yaml).map_err(|e| EngineError::ConfigParseError {
                source_name: source_name.to_string(),
                message: e.to_string(),
            })?;

        let withholding =
            WithholdingTable::new(file.withholding.brackets, file.withholding.ceiling)?;
        let income_tax = IncomeTaxTable::new(
            file.income_tax.brackets,
            file.income_tax.per_dependent_deduction,
        )?;

        PayrollTables::new(
            file.version,
            file.effective_date,
            withholding,
            income_tax,
            file.severance.rate,
            file.overtime,
        )
    }
}
