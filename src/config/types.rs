//! Configuration types for the payroll bracket tables.
//!
//! This module contains the strongly-typed bracket tables. Raw section types
//! are deserialized from YAML; the validated table types can only be built
//! through constructors that check the table shape.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::calculation::{cumulative_withholding, round_money};
use crate::error::{EngineError, EngineResult};
use crate::models::OvertimeCategory;

/// A withholding bracket covering `(lower, upper]`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WithholdingBracket {
    /// The exclusive lower bound (the first bracket starts at zero).
    pub lower: Decimal,
    /// The inclusive upper bound.
    pub upper: Decimal,
    /// The marginal rate applied to the slice inside this bracket.
    pub rate: Decimal,
}

/// An income tax bracket covering `(lower, upper]`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IncomeTaxBracket {
    /// The exclusive lower bound (the first bracket starts at zero).
    pub lower: Decimal,
    /// The inclusive upper bound; `None` for the unbounded top bracket.
    #[serde(default)]
    pub upper: Option<Decimal>,
    /// The rate applied to the whole taxable base.
    pub rate: Decimal,
    /// The precomputed deduction absorbing the effect of lower brackets.
    pub fixed_deduction: Decimal,
}

/// Overtime multipliers for each premium tier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OvertimeMultipliers {
    /// Multiplier for standard daytime overtime.
    pub standard_50: Decimal,
    /// Multiplier for enhanced overtime.
    pub standard_100: Decimal,
    /// Multiplier for night overtime.
    pub night: Decimal,
}

impl OvertimeMultipliers {
    /// Returns the multiplier for a category.
    pub fn for_category(&self, category: OvertimeCategory) -> Decimal {
        match category {
            OvertimeCategory::Standard50 => self.standard_50,
            OvertimeCategory::Standard100 => self.standard_100,
            OvertimeCategory::Night => self.night,
        }
    }
}

/// Overtime rules: the standard month used to derive hourly rates and the
/// per-tier multipliers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OvertimeRules {
    /// Standard full-time hours in a month.
    pub standard_monthly_hours: Decimal,
    /// Multipliers per overtime category.
    pub multipliers: OvertimeMultipliers,
}

/// Withholding section as written in the tables file.
#[derive(Debug, Clone, Deserialize)]
pub struct WithholdingSection {
    /// The contribution ceiling.
    pub ceiling: Decimal,
    /// Brackets in ascending order.
    pub brackets: Vec<WithholdingBracket>,
}

/// Income tax section as written in the tables file.
#[derive(Debug, Clone, Deserialize)]
pub struct IncomeTaxSection {
    /// Amount deducted from the taxable base per dependent.
    pub per_dependent_deduction: Decimal,
    /// Brackets in ascending order.
    pub brackets: Vec<IncomeTaxBracket>,
}

/// Severance fund section as written in the tables file.
#[derive(Debug, Clone, Deserialize)]
pub struct SeveranceSection {
    /// Flat rate applied to the base salary.
    pub rate: Decimal,
}

/// The complete tables file.
#[derive(Debug, Clone, Deserialize)]
pub struct TablesFile {
    /// Release label of the tables.
    pub version: String,
    /// Date from which the tables apply.
    pub effective_date: NaiveDate,
    /// Withholding section.
    pub withholding: WithholdingSection,
    /// Income tax section.
    pub income_tax: IncomeTaxSection,
    /// Severance fund section.
    pub severance: SeveranceSection,
    /// Overtime rules.
    pub overtime: OvertimeRules,
}

/// Checks that ranges start at zero, are contiguous and strictly increasing,
/// and carry rates within `[0, 1]`. Only the last range may be unbounded.
fn validate_ranges(
    table: &str,
    ranges: &[(Decimal, Option<Decimal>, Decimal)],
) -> EngineResult<()> {
    let invalid = |message: String| EngineError::InvalidTable {
        table: table.to_string(),
        message,
    };

    let Some((first_lower, _, _)) = ranges.first() else {
        return Err(invalid("no brackets defined".to_string()));
    };
    if !first_lower.is_zero() {
        return Err(invalid(format!(
            "first bracket must start at 0, found {}",
            first_lower
        )));
    }

    let mut previous_upper: Option<Decimal> = None;
    for (index, (lower, upper, rate)) in ranges.iter().enumerate() {
        let number = index + 1;

        if *rate < Decimal::ZERO || *rate > Decimal::ONE {
            return Err(invalid(format!(
                "bracket {} rate {} is outside [0, 1]",
                number, rate
            )));
        }

        if index > 0 {
            match previous_upper {
                Some(prev) if prev == *lower => {}
                Some(prev) if prev < *lower => {
                    return Err(invalid(format!(
                        "gap between brackets {} and {}",
                        index, number
                    )));
                }
                Some(_) => {
                    return Err(invalid(format!(
                        "brackets {} and {} overlap",
                        index, number
                    )));
                }
                None => {
                    return Err(invalid(format!(
                        "bracket {} follows an unbounded bracket",
                        number
                    )));
                }
            }
        }

        if let Some(upper) = upper {
            if upper <= lower {
                return Err(invalid(format!(
                    "bracket {} upper bound {} is not above its lower bound {}",
                    number, upper, lower
                )));
            }
        }

        previous_upper = *upper;
    }

    Ok(())
}

/// The validated withholding table.
///
/// Holds the brackets, the ceiling, and the maximum contribution, which is
/// computed once from the brackets at the ceiling.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WithholdingTable {
    brackets: Vec<WithholdingBracket>,
    ceiling: Decimal,
    max_contribution: Decimal,
}

impl WithholdingTable {
    /// Builds a withholding table, checking that the brackets are contiguous
    /// from zero and that the last bracket ends at the ceiling.
    ///
    /// # Example
    ///
    /// ```
    /// use payroll_engine::config::{WithholdingBracket, WithholdingTable};
    /// use rust_decimal::Decimal;
    ///
    /// let table = WithholdingTable::new(
    ///     vec![
    ///         WithholdingBracket {
    ///             lower: Decimal::ZERO,
    ///             upper: Decimal::new(1000, 0),
    ///             rate: Decimal::new(10, 2),
    ///         },
    ///         WithholdingBracket {
    ///             lower: Decimal::new(1000, 0),
    ///             upper: Decimal::new(2000, 0),
    ///             rate: Decimal::new(20, 2),
    ///         },
    ///     ],
    ///     Decimal::new(2000, 0),
    /// ).unwrap();
    /// assert_eq!(table.max_contribution(), Decimal::new(30000, 2));
    /// ```
    pub fn new(brackets: Vec<WithholdingBracket>, ceiling: Decimal) -> EngineResult<Self> {
        let ranges: Vec<_> = brackets
            .iter()
            .map(|b| (b.lower, Some(b.upper), b.rate))
            .collect();
        validate_ranges("withholding", &ranges)?;

        let last_upper = brackets.last().map(|b| b.upper);
        if last_upper != Some(ceiling) {
            return Err(EngineError::InvalidTable {
                table: "withholding".to_string(),
                message: format!(
                    "last bracket must end at the ceiling {}, found {}",
                    ceiling,
                    last_upper.unwrap_or_default()
                ),
            });
        }

        let max_contribution = round_money(cumulative_withholding(&brackets, ceiling));

        Ok(Self {
            brackets,
            ceiling,
            max_contribution,
        })
    }

    /// Returns the brackets in ascending order.
    pub fn brackets(&self) -> &[WithholdingBracket] {
        &self.brackets
    }

    /// Returns the contribution ceiling.
    pub fn ceiling(&self) -> Decimal {
        self.ceiling
    }

    /// Returns the contribution due on any salary at or above the ceiling.
    pub fn max_contribution(&self) -> Decimal {
        self.max_contribution
    }
}

/// The validated income tax table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IncomeTaxTable {
    brackets: Vec<IncomeTaxBracket>,
    per_dependent_deduction: Decimal,
}

impl IncomeTaxTable {
    /// Builds an income tax table, checking that the brackets are contiguous
    /// from zero, that only the last bracket is unbounded, and that fixed
    /// deductions are non-negative.
    pub fn new(
        brackets: Vec<IncomeTaxBracket>,
        per_dependent_deduction: Decimal,
    ) -> EngineResult<Self> {
        let invalid = |message: String| EngineError::InvalidTable {
            table: "income_tax".to_string(),
            message,
        };

        let ranges: Vec<_> = brackets
            .iter()
            .map(|b| (b.lower, b.upper, b.rate))
            .collect();
        validate_ranges("income_tax", &ranges)?;

        if brackets.last().is_some_and(|b| b.upper.is_some()) {
            return Err(invalid("last bracket must be unbounded".to_string()));
        }
        if let Some(index) = brackets
            .iter()
            .position(|b| b.fixed_deduction < Decimal::ZERO)
        {
            return Err(invalid(format!(
                "bracket {} has a negative fixed deduction",
                index + 1
            )));
        }
        if per_dependent_deduction < Decimal::ZERO {
            return Err(invalid(
                "per-dependent deduction must not be negative".to_string(),
            ));
        }

        Ok(Self {
            brackets,
            per_dependent_deduction,
        })
    }

    /// Returns the brackets in ascending order.
    pub fn brackets(&self) -> &[IncomeTaxBracket] {
        &self.brackets
    }

    /// Returns the deduction per declared dependent.
    pub fn per_dependent_deduction(&self) -> Decimal {
        self.per_dependent_deduction
    }

    /// Finds the single bracket containing `amount`.
    ///
    /// Brackets are searched by upper bound, so a value exactly on a boundary
    /// falls in the lower bracket. An amount no bracket contains falls back to
    /// the highest bracket.
    pub fn bracket_for(&self, amount: Decimal) -> &IncomeTaxBracket {
        let index = self
            .brackets
            .partition_point(|b| b.upper.is_some_and(|upper| amount > upper));

        match self.brackets.get(index) {
            Some(bracket) => bracket,
            None => {
                warn!(
                    amount = %amount,
                    "No income tax bracket contains amount, using highest bracket"
                );
                &self.brackets[self.brackets.len() - 1]
            }
        }
    }
}

/// The complete set of payroll tables.
///
/// Tables are immutable once built and are shared read-only by every
/// calculation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PayrollTables {
    version: String,
    effective_date: NaiveDate,
    withholding: WithholdingTable,
    income_tax: IncomeTaxTable,
    severance_rate: Decimal,
    overtime: OvertimeRules,
}

impl PayrollTables {
    /// Assembles payroll tables from validated bracket tables, checking the
    /// severance rate and overtime rules.
    pub fn new(
        version: String,
        effective_date: NaiveDate,
        withholding: WithholdingTable,
        income_tax: IncomeTaxTable,
        severance_rate: Decimal,
        overtime: OvertimeRules,
    ) -> EngineResult<Self> {
        if severance_rate < Decimal::ZERO || severance_rate > Decimal::ONE {
            return Err(EngineError::InvalidTable {
                table: "severance".to_string(),
                message: format!("rate {} is outside [0, 1]", severance_rate),
            });
        }
        if overtime.standard_monthly_hours <= Decimal::ZERO {
            return Err(EngineError::InvalidTable {
                table: "overtime".to_string(),
                message: "standard monthly hours must be positive".to_string(),
            });
        }
        if let Some(category) = OvertimeCategory::ALL
            .into_iter()
            .find(|c| overtime.multipliers.for_category(*c) < Decimal::ZERO)
        {
            return Err(EngineError::InvalidTable {
                table: "overtime".to_string(),
                message: format!("multiplier for '{}' must not be negative", category),
            });
        }

        Ok(Self {
            version,
            effective_date,
            withholding,
            income_tax,
            severance_rate,
            overtime,
        })
    }

    /// Returns the release label of the tables.
    pub fn version(&self) -> &str {
        &self.version
    }

    /// Returns the date from which the tables apply.
    pub fn effective_date(&self) -> NaiveDate {
        self.effective_date
    }

    /// Returns the withholding table.
    pub fn withholding(&self) -> &WithholdingTable {
        &self.withholding
    }

    /// Returns the income tax table.
    pub fn income_tax(&self) -> &IncomeTaxTable {
        &self.income_tax
    }

    /// Returns the severance fund rate.
    pub fn severance_rate(&self) -> Decimal {
        self.severance_rate
    }

    /// Returns the overtime rules.
    pub fn overtime(&self) -> &OvertimeRules {
        &self.overtime
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn wb(lower: &str, upper: &str, rate: &str) -> WithholdingBracket {
        WithholdingBracket {
            lower: dec(lower),
            upper: dec(upper),
            rate: dec(rate),
        }
    }

    fn itb(lower: &str, upper: Option<&str>, rate: &str, deduction: &str) -> IncomeTaxBracket {
        IncomeTaxBracket {
            lower: dec(lower),
            upper: upper.map(dec),
            rate: dec(rate),
            fixed_deduction: dec(deduction),
        }
    }

    fn simple_income_tax() -> IncomeTaxTable {
        IncomeTaxTable::new(
            vec![
                itb("0", Some("1000"), "0", "0"),
                itb("1000", Some("2000"), "0.1", "100"),
                itb("2000", None, "0.2", "300"),
            ],
            dec("100"),
        )
        .unwrap()
    }

    #[test]
    fn test_withholding_table_precomputes_max_contribution() {
        let table = WithholdingTable::new(
            vec![wb("0", "1000", "0.05"), wb("1000", "3000", "0.1")],
            dec("3000"),
        )
        .unwrap();

        // 1000 x 0.05 + 2000 x 0.1
        assert_eq!(table.max_contribution(), dec("250.00"));
        assert_eq!(table.ceiling(), dec("3000"));
        assert_eq!(table.brackets().len(), 2);
    }

    #[test]
    fn test_withholding_table_rejects_empty() {
        let err = WithholdingTable::new(vec![], dec("1000")).unwrap_err();
        assert_eq!(err.to_string(), "Invalid withholding table: no brackets defined");
    }

    #[test]
    fn test_withholding_table_rejects_nonzero_start() {
        let err = WithholdingTable::new(vec![wb("100", "1000", "0.05")], dec("1000")).unwrap_err();
        assert!(err.to_string().contains("must start at 0"));
    }

    #[test]
    fn test_withholding_table_rejects_gap() {
        let err = WithholdingTable::new(
            vec![wb("0", "1000", "0.05"), wb("1000.01", "2000", "0.1")],
            dec("2000"),
        )
        .unwrap_err();
        assert!(err.to_string().contains("gap between brackets 1 and 2"));
    }

    #[test]
    fn test_withholding_table_rejects_overlap() {
        let err = WithholdingTable::new(
            vec![wb("0", "1000", "0.05"), wb("900", "2000", "0.1")],
            dec("2000"),
        )
        .unwrap_err();
        assert!(err.to_string().contains("overlap"));
    }

    #[test]
    fn test_withholding_table_rejects_ceiling_mismatch() {
        let err = WithholdingTable::new(vec![wb("0", "1000", "0.05")], dec("1500")).unwrap_err();
        assert!(err.to_string().contains("must end at the ceiling"));
    }

    #[test]
    fn test_withholding_table_rejects_rate_above_one() {
        let err = WithholdingTable::new(vec![wb("0", "1000", "1.5")], dec("1000")).unwrap_err();
        assert!(err.to_string().contains("outside [0, 1]"));
    }

    #[test]
    fn test_income_tax_table_rejects_bounded_top_bracket() {
        let err = IncomeTaxTable::new(
            vec![itb("0", Some("1000"), "0", "0")],
            dec("100"),
        )
        .unwrap_err();
        assert!(err.to_string().contains("must be unbounded"));
    }

    #[test]
    fn test_income_tax_table_rejects_unbounded_middle_bracket() {
        let err = IncomeTaxTable::new(
            vec![itb("0", None, "0", "0"), itb("1000", None, "0.1", "100")],
            dec("100"),
        )
        .unwrap_err();
        assert!(err.to_string().contains("follows an unbounded bracket"));
    }

    #[test]
    fn test_income_tax_table_rejects_negative_fixed_deduction() {
        let err = IncomeTaxTable::new(
            vec![itb("0", Some("1000"), "0", "0"), itb("1000", None, "0.1", "-5")],
            dec("100"),
        )
        .unwrap_err();
        assert!(err.to_string().contains("bracket 2 has a negative fixed deduction"));
    }

    #[test]
    fn test_bracket_for_boundary_falls_in_lower_bracket() {
        let table = simple_income_tax();

        assert_eq!(table.bracket_for(dec("1000")).rate, dec("0"));
        assert_eq!(table.bracket_for(dec("1000.01")).rate, dec("0.1"));
        assert_eq!(table.bracket_for(dec("2000")).rate, dec("0.1"));
        assert_eq!(table.bracket_for(dec("2000.01")).rate, dec("0.2"));
        assert_eq!(table.bracket_for(dec("1000000")).rate, dec("0.2"));
    }

    #[test]
    fn test_multipliers_for_each_category() {
        let multipliers = OvertimeMultipliers {
            standard_50: dec("1.5"),
            standard_100: dec("2.0"),
            night: dec("1.2"),
        };

        assert_eq!(multipliers.for_category(OvertimeCategory::Standard50), dec("1.5"));
        assert_eq!(multipliers.for_category(OvertimeCategory::Standard100), dec("2.0"));
        assert_eq!(multipliers.for_category(OvertimeCategory::Night), dec("1.2"));
    }

    #[test]
    fn test_payroll_tables_reject_zero_standard_hours() {
        let withholding =
            WithholdingTable::new(vec![wb("0", "1000", "0.05")], dec("1000")).unwrap();
        let err = PayrollTables::new(
            "test".to_string(),
            NaiveDate::from_ymd_opt(2026, 1, 1).unwrap(),
            withholding,
            simple_income_tax(),
            dec("0.08"),
            OvertimeRules {
                standard_monthly_hours: Decimal::ZERO,
                multipliers: OvertimeMultipliers {
                    standard_50: dec("1.5"),
                    standard_100: dec("2.0"),
                    night: dec("1.2"),
                },
            },
        )
        .unwrap_err();
        assert_eq!(
            err.to_string(),
            "Invalid overtime table: standard monthly hours must be positive"
        );
    }
}
