//! Monetary rounding and overflow-safe arithmetic.
//!
//! `Decimal` operators panic on overflow. Amounts are unbounded, so the
//! calculators combine them through the helpers here, which saturate at
//! `Decimal::MAX` / `Decimal::MIN` and log a warning instead.

use rust_decimal::{Decimal, RoundingStrategy};
use tracing::warn;

/// Rounds a monetary amount to cents, half away from zero.
///
/// The result always carries exactly two fractional digits, so equal amounts
/// serialize identically.
///
/// # Examples
///
/// ```
/// use payroll_engine::calculation::round_money;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// assert_eq!(round_money(Decimal::from_str("272.7272").unwrap()).to_string(), "272.73");
/// assert_eq!(round_money(Decimal::from_str("0.125").unwrap()).to_string(), "0.13");
/// assert_eq!(round_money(Decimal::new(3000, 0)).to_string(), "3000.00");
/// ```
pub fn round_money(amount: Decimal) -> Decimal {
    let mut rounded = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    rounded.rescale(2);
    rounded
}

/// `lhs + rhs`, saturating on overflow.
pub(crate) fn add_money(lhs: Decimal, rhs: Decimal) -> Decimal {
    lhs.checked_add(rhs).unwrap_or_else(|| {
        warn!(lhs = %lhs, rhs = %rhs, "Decimal addition overflowed, saturating");
        lhs.saturating_add(rhs)
    })
}

/// `lhs - rhs`, saturating on overflow.
pub(crate) fn sub_money(lhs: Decimal, rhs: Decimal) -> Decimal {
    lhs.checked_sub(rhs).unwrap_or_else(|| {
        warn!(lhs = %lhs, rhs = %rhs, "Decimal subtraction overflowed, saturating");
        lhs.saturating_sub(rhs)
    })
}

/// `lhs x rhs`, saturating on overflow.
pub(crate) fn mul_money(lhs: Decimal, rhs: Decimal) -> Decimal {
    lhs.checked_mul(rhs).unwrap_or_else(|| {
        warn!(lhs = %lhs, rhs = %rhs, "Decimal multiplication overflowed, saturating");
        lhs.saturating_mul(rhs)
    })
}
