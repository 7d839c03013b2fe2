//! Tax deducted at source on the settlement earnings.

use rust_decimal::Decimal;

use crate::config::SettlementPolicy;
use crate::models::AuditStep;

use super::component::{ComponentResult, audit_value, deduction, round_currency};

/// Rule id and component id of the TDS line.
pub const TDS: &str = "tds";

/// Withholds a flat `tds_rate` of the already-rounded earning lines.
///
/// The TDS line is always present, even when the earnings are zero.
///
/// # Examples
///
/// ```
/// use settlement_engine::calculation::calculate_tds;
/// use settlement_engine::config::SettlementPolicy;
/// use rust_decimal::Decimal;
///
/// let result = calculate_tds(Decimal::new(234187, 0), &SettlementPolicy::default(), 12);
/// assert_eq!(result.amount(), Decimal::new(23419, 0));
/// ```
pub fn calculate_tds(
    taxable_earnings: Decimal,
    policy: &SettlementPolicy,
    step_number: u32,
) -> ComponentResult {
    let unrounded = taxable_earnings * policy.tds_rate;
    let amount = round_currency(unrounded);
    let description = format!(
        "{} of {} settlement earnings",
        audit_value(policy.tds_rate),
        audit_value(taxable_earnings)
    );

    ComponentResult {
        line: Some(deduction(TDS, "TDS", description.clone(), amount)),
        audit_step: AuditStep {
            step_number,
            rule_id: TDS.to_string(),
            rule_name: "Tax Deducted at Source".to_string(),
            input: serde_json::json!({
                "taxable_earnings": audit_value(taxable_earnings),
                "tds_rate": audit_value(policy.tds_rate)
            }),
            output: serde_json::json!({
                "unrounded": audit_value(unrounded),
                "amount": audit_value(amount)
            }),
            reasoning: format!("{} = {}", description, audit_value(amount)),
        },
    }
}
