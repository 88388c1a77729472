//! Integration tests for the Payroll Engine.
//!
//! This test suite covers the public surface end to end:
//! - Reference payroll scenarios
//! - Withholding ceiling behaviour
//! - Dependents and income tax
//! - Overtime categories
//! - JSON input/output shape
//! - Validation
//! - Property tests (monotonicity, net identity, idempotence)

use proptest::prelude::*;
use rust_decimal::Decimal;
use serde_json::{Value, json};
use std::str::FromStr;

use payroll_engine::calculation::{
    PayrollEngine, compute_income_tax, compute_withholding, validate,
};
use payroll_engine::config::TablesLoader;
use payroll_engine::error::EngineError;
use payroll_engine::models::{CompensationInput, PayrollBreakdown};

// =============================================================================
// Test Helpers
// =============================================================================

fn decimal(s: &str) -> Decimal {
    Decimal::from_str(s).unwrap()
}

fn engine() -> PayrollEngine {
    PayrollEngine::official().expect("embedded tables must load")
}

fn calculate(base: &str) -> PayrollBreakdown {
    engine().calculate_payroll(&CompensationInput::new(decimal(base)))
}

fn calculate_json(body: Value) -> Value {
    let input: CompensationInput = serde_json::from_value(body).unwrap();
    serde_json::to_value(engine().calculate_payroll(&input)).unwrap()
}

// =============================================================================
// Reference Scenarios
// =============================================================================

#[test]
fn test_base_3000_no_extras() {
    let breakdown = calculate("3000");

    assert_eq!(breakdown.gross_salary, decimal("3000.00"));
    assert_eq!(breakdown.severance_fund_contribution, decimal("240.00"));
    assert!(breakdown.withholding > Decimal::ZERO);
    // 3000 x 0.15 - 394.16
    assert_eq!(breakdown.income_tax, decimal("55.84"));
    assert!(breakdown.net_salary < breakdown.gross_salary);
}

#[test]
fn test_base_1000_first_withholding_bracket_only() {
    let breakdown = calculate("1000");

    assert_eq!(breakdown.withholding, decimal("75.00"));
    assert_eq!(breakdown.income_tax, Decimal::ZERO);
}

#[test]
fn test_base_2000_second_bracket_is_higher() {
    assert!(calculate("2000").withholding > calculate("1000").withholding);
}

#[test]
fn test_base_2500_severance() {
    assert_eq!(calculate("2500").severance_fund_contribution, decimal("200.00"));
}

#[test]
fn test_base_3333_33_all_fields_are_whole_cents() {
    let breakdown = calculate("3333.33");

    for amount in [
        breakdown.withholding,
        breakdown.income_tax,
        breakdown.severance_fund_contribution,
        breakdown.gross_salary,
        breakdown.net_salary,
    ] {
        assert_eq!(amount, amount.round_dp(2));
        assert_eq!(amount.scale(), 2);
    }
}

// =============================================================================
// Withholding Ceiling
// =============================================================================

#[test]
fn test_base_10000_withholding_is_capped() {
    let tables = TablesLoader::embedded().unwrap();
    let cap = tables.withholding().max_contribution();

    assert_eq!(calculate("10000").withholding, cap);
    assert_eq!(calculate("50000").withholding, cap);
    assert_eq!(calculate("7786.03").withholding, cap);
}

#[test]
fn test_withholding_at_ceiling_equals_cap() {
    let tables = TablesLoader::embedded().unwrap();
    let at_ceiling = compute_withholding(
        tables.withholding().ceiling(),
        tables.withholding(),
        1,
    );

    assert_eq!(at_ceiling.amount, tables.withholding().max_contribution());
}

// =============================================================================
// Dependents and Income Tax
// =============================================================================

#[test]
fn test_base_5000_dependents_reduce_income_tax() {
    let without = calculate("5000");
    let with = engine().calculate_payroll(&CompensationInput {
        dependents: 2,
        ..CompensationInput::new(decimal("5000"))
    });

    assert!(with.income_tax < without.income_tax);
    assert_eq!(with.withholding, without.withholding);
    assert!(with.net_salary > without.net_salary);
}

#[test]
fn test_income_tax_uses_gross_not_base() {
    let base_only = calculate("2000");
    let with_bonus = engine().calculate_payroll(&CompensationInput {
        bonuses: decimal("3000"),
        ..CompensationInput::new(decimal("2000"))
    });

    assert_eq!(base_only.income_tax, Decimal::ZERO);
    // 5000 x 0.275 - 908.73
    assert_eq!(with_bonus.income_tax, decimal("466.27"));
    assert_eq!(with_bonus.withholding, base_only.withholding);
}

// =============================================================================
// Overtime
// =============================================================================

#[test]
fn test_base_3000_overtime_standard_100() {
    let breakdown = engine().calculate_payroll(&CompensationInput {
        overtime_hours: decimal("10"),
        overtime_category: "standard-100%".to_string(),
        ..CompensationInput::new(decimal("3000"))
    });

    // (3000 / 220) x 10 x 2.0 = 272.7272...
    assert_eq!(breakdown.overtime_value, decimal("272.73"));
    assert_eq!(breakdown.gross_salary, decimal("3272.73"));
}

#[test]
fn test_overtime_categories_rank_by_multiplier() {
    let value = |category: &str| {
        engine()
            .calculate_payroll(&CompensationInput {
                overtime_hours: decimal("10"),
                overtime_category: category.to_string(),
                ..CompensationInput::new(decimal("2200"))
            })
            .overtime_value
    };

    assert_eq!(value("night"), decimal("120.00"));
    assert_eq!(value("standard-50%"), decimal("150.00"));
    assert_eq!(value("standard-100%"), decimal("200.00"));
}

#[test]
fn test_default_category_is_standard_100() {
    let defaulted = calculate_json(json!({"base_salary": "2200", "overtime_hours": "10"}));

    assert_eq!(defaulted["overtime_value"], "200.00");
    assert_eq!(defaulted["details"]["overtime_category"], "standard-100%");
}

// =============================================================================
// JSON Shape
// =============================================================================

#[test]
fn test_breakdown_serializes_amounts_as_two_decimal_strings() {
    let output = calculate_json(json!({
        "base_salary": "3000",
        "allowances": "500",
        "other_deductions": "100"
    }));

    assert_eq!(output["base_salary"], "3000.00");
    assert_eq!(output["allowances"], "500.00");
    assert_eq!(output["bonuses"], "0.00");
    assert_eq!(output["gross_salary"], "3500.00");
    assert_eq!(output["other_deductions"], "100.00");
    assert_eq!(output["severance_fund_contribution"], "240.00");
    assert_eq!(output["details"]["severance_rate"], "0.08");
    assert_eq!(output["details"]["audit_steps"].as_array().unwrap().len(), 4);
}

#[test]
fn test_breakdown_round_trips_through_json() {
    let breakdown = calculate("4321.09");
    let json = serde_json::to_string(&breakdown).unwrap();
    let parsed: PayrollBreakdown = serde_json::from_str(&json).unwrap();

    assert_eq!(parsed, breakdown);
}

// =============================================================================
// Validation
// =============================================================================

#[test]
fn test_validation_reports_violations_without_failing() {
    let input: CompensationInput = serde_json::from_value(json!({
        "base_salary": "-1000",
        "bonuses": "-5",
        "dependents": -1,
        "overtime_category": "holiday"
    }))
    .unwrap();

    let result = validate(&input);
    assert_eq!(
        result.violations(),
        [
            "base salary must not be negative",
            "bonuses must not be negative",
            "number of dependents must not be negative",
            "Unrecognized overtime category: holiday",
        ]
    );

    // The aggregator still computes with the given numbers.
    let breakdown = engine().calculate_payroll(&input);
    assert_eq!(breakdown.withholding, Decimal::ZERO);
}

#[test]
fn test_validate_and_calculate_surfaces_violations() {
    let err = engine()
        .validate_and_calculate(&CompensationInput {
            overtime_hours: decimal("-3"),
            ..CompensationInput::new(decimal("3000"))
        })
        .unwrap_err();

    match err {
        EngineError::InvalidInput { violations } => {
            assert_eq!(violations, vec!["overtime hours must not be negative"]);
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_huge_valid_amounts_calculate_without_panicking() {
    let input: CompensationInput = serde_json::from_value(json!({
        "base_salary": "1000000000000000000",
        "overtime_hours": "100000000000",
        "overtime_category": "standard-100%"
    }))
    .unwrap();
    let engine = engine();

    assert!(engine.validate(&input).is_valid());
    let breakdown = engine.validate_and_calculate(&input).unwrap();

    assert_eq!(breakdown.withholding, decimal("908.86"));
    assert!(breakdown.gross_salary > breakdown.base_salary);
    assert!(breakdown.net_salary > Decimal::ZERO);
    assert!(serde_json::to_value(&breakdown).is_ok());
}

// =============================================================================
// Concurrency
// =============================================================================

#[test]
fn test_engine_is_shareable_across_threads() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<PayrollEngine>();

    let engine = engine();
    let handles: Vec<_> = (1..=4)
        .map(|i| {
            let engine = engine.clone();
            std::thread::spawn(move || {
                engine.calculate_payroll(&CompensationInput::new(Decimal::from(i * 1000)))
            })
        })
        .collect();

    let results: Vec<PayrollBreakdown> = handles.into_iter().map(|h| h.join().unwrap()).collect();
    assert_eq!(results[0].withholding, decimal("75.00"));
    assert_eq!(results[2].withholding, decimal("258.82"));
}

#[test]
fn test_batch_matches_individual_calculations() {
    let engine = engine();
    let inputs: Vec<CompensationInput> = (0..50)
        .map(|i| CompensationInput {
            dependents: i % 4,
            overtime_hours: Decimal::from(i % 7),
            ..CompensationInput::new(Decimal::new(150_000 + i64::from(i) * 17_311, 2))
        })
        .collect();

    let batch = engine.calculate_batch(&inputs);
    let individual: Vec<PayrollBreakdown> =
        inputs.iter().map(|i| engine.calculate_payroll(i)).collect();

    assert_eq!(batch, individual);
}

// =============================================================================
// Properties
// =============================================================================

fn cents(max: i64) -> impl Strategy<Value = Decimal> {
    (0..=max).prop_map(|c| Decimal::new(c, 2))
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    #[test]
    fn prop_withholding_is_monotonic(a in cents(2_000_000), b in cents(2_000_000)) {
        let tables = TablesLoader::embedded().unwrap();
        let (low, high) = if a <= b { (a, b) } else { (b, a) };

        let w_low = compute_withholding(low, tables.withholding(), 1).amount;
        let w_high = compute_withholding(high, tables.withholding(), 1).amount;
        prop_assert!(w_low <= w_high, "{} -> {}, {} -> {}", low, w_low, high, w_high);
    }

    #[test]
    fn prop_withholding_above_ceiling_is_cap(extra in cents(10_000_000)) {
        let tables = TablesLoader::embedded().unwrap();
        let table = tables.withholding();

        let amount = compute_withholding(table.ceiling() + extra, table, 1).amount;
        prop_assert_eq!(amount, table.max_contribution());
    }

    #[test]
    fn prop_income_tax_is_monotonic_in_gross(
        a in cents(2_000_000),
        b in cents(2_000_000),
        dependents in 0i32..6,
    ) {
        let tables = TablesLoader::embedded().unwrap();
        let (low, high) = if a <= b { (a, b) } else { (b, a) };

        let t_low = compute_income_tax(low, dependents, tables.income_tax(), 1).amount;
        let t_high = compute_income_tax(high, dependents, tables.income_tax(), 1).amount;
        prop_assert!(t_low <= t_high, "{} -> {}, {} -> {}", low, t_low, high, t_high);
    }

    #[test]
    fn prop_income_tax_non_increasing_in_dependents(
        gross in cents(2_000_000),
        dependents in 0i32..8,
    ) {
        let tables = TablesLoader::embedded().unwrap();

        let fewer = compute_income_tax(gross, dependents, tables.income_tax(), 1).amount;
        let more = compute_income_tax(gross, dependents + 1, tables.income_tax(), 1).amount;
        prop_assert!(more <= fewer);
    }

    #[test]
    fn prop_net_is_gross_less_deductions(
        base in cents(3_000_000),
        allowances in cents(500_000),
        bonuses in cents(500_000),
        other_deductions in cents(200_000),
        dependents in 0i32..6,
        overtime_tenths in 0i64..800,
    ) {
        let input = CompensationInput {
            allowances,
            bonuses,
            other_deductions,
            dependents,
            overtime_hours: Decimal::new(overtime_tenths, 1),
            ..CompensationInput::new(base)
        };
        let b = engine().calculate_payroll(&input);

        prop_assert_eq!(
            b.net_salary,
            b.gross_salary - b.withholding - b.income_tax - b.other_deductions
        );
        prop_assert_eq!(
            b.gross_salary,
            b.base_salary + b.allowances + b.bonuses + b.overtime_value
        );
    }

    #[test]
    fn prop_calculation_is_idempotent(base in cents(3_000_000), dependents in 0i32..6) {
        let engine = engine();
        let input = CompensationInput {
            dependents,
            overtime_hours: Decimal::new(5, 0),
            ..CompensationInput::new(base)
        };

        let first = serde_json::to_string(&engine.calculate_payroll(&input)).unwrap();
        let second = serde_json::to_string(&engine.calculate_payroll(&input)).unwrap();
        prop_assert_eq!(first, second);
    }

    #[test]
    fn prop_non_positive_base_pays_nothing(negative_cents in 0i64..1_000_000) {
        let input = CompensationInput::new(Decimal::new(-negative_cents, 2));
        let b = engine().calculate_payroll(&input);

        prop_assert_eq!(b.withholding, Decimal::ZERO);
        prop_assert_eq!(b.income_tax, Decimal::ZERO);
        prop_assert_eq!(b.net_salary, b.gross_salary);
    }
}
