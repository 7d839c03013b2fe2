//! Shared building blocks for settlement components: rounding and line
//! construction.

use rust_decimal::{Decimal, RoundingStrategy};

use crate::models::{AuditStep, LineCategory, SettlementBreakdownLine};

/// The result of evaluating one settlement component.
///
/// `line` is `None` when the component does not apply (for example gratuity
/// before the qualifying service period). The audit step is recorded either way.
#[derive(Debug, Clone)]
pub struct ComponentResult {
    /// The breakdown line, if the component applies.
    pub line: Option<SettlementBreakdownLine>,
    /// The audit step recording this evaluation.
    pub audit_step: AuditStep,
}

impl ComponentResult {
    /// The line amount, or zero when the component was omitted.
    pub fn amount(&self) -> Decimal {
        self.line.as_ref().map_or(Decimal::ZERO, |line| line.amount)
    }
}

/// Rounds an amount to whole currency units, halves rounding up.
///
/// # Examples
///
/// ```
/// use settlement_engine::calculation::round_currency;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// assert_eq!(round_currency(Decimal::from_str("2776.67").unwrap()), Decimal::new(2777, 0));
/// assert_eq!(round_currency(Decimal::from_str("2.5").unwrap()), Decimal::new(3, 0));
/// assert_eq!(round_currency(Decimal::from_str("2.49").unwrap()), Decimal::new(2, 0));
/// ```
pub fn round_currency(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
}

/// Formats a decimal for audit output.
pub(crate) fn audit_value(value: Decimal) -> String {
    value.normalize().to_string()
}

/// Formats a rate for human-readable descriptions, two decimal places.
pub(crate) fn display_rate(value: Decimal) -> String {
    value
        .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
        .to_string()
}

pub(crate) fn earning(
    component: &str,
    name: &str,
    description: String,
    amount: Decimal,
) -> SettlementBreakdownLine {
    SettlementBreakdownLine {
        category: LineCategory::Earning,
        component: component.to_string(),
        name: name.to_string(),
        description,
        amount,
    }
}

pub(crate) fn deduction(
    component: &str,
    name: &str,
    description: String,
    amount: Decimal,
) -> SettlementBreakdownLine {
    SettlementBreakdownLine {
        category: LineCategory::Deduction,
        component: component.to_string(),
        name: name.to_string(),
        description,
        amount,
    }
}
