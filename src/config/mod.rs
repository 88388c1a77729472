//! Bracket tables and their loading for the Payroll Engine.
//!
//! This module provides the statutory tables the engine calculates with:
//! progressive withholding brackets, income tax brackets, the severance fund
//! rate and the overtime rules. Tables are validated when built and are
//! immutable afterwards.
//!
//! # Example
//!
//! ```
//! use payroll_engine::config::TablesLoader;
//!
//! let tables = TablesLoader::embedded().unwrap();
//! println!("Loaded tables: {}", tables.version());
//! ```

mod loader;
mod types;

pub use loader::{EMBEDDED_TABLES, TablesLoader};
pub use types::{
    IncomeTaxBracket, IncomeTaxSection, IncomeTaxTable, OvertimeMultipliers, OvertimeRules,
    PayrollTables, SeveranceSection, TablesFile, WithholdingBracket, WithholdingSection,
    WithholdingTable,
};
