//! Recovery deductions: unserved notice, salary advances and loans.
//!
//! Each line appears only when there is something to recover.

use rust_decimal::Decimal;

use crate::models::AuditStep;

use super::component::{ComponentResult, audit_value, deduction, display_rate, round_currency};
use super::service_period::DailyRateResult;

/// Rule id and component id of the notice recovery line.
pub const NOTICE_RECOVERY: &str = "notice_recovery";
/// Rule id and component id of the advance recovery line.
pub const ADVANCE_RECOVERY: &str = "advance_recovery";
/// Rule id and component id of the loan recovery line.
pub const LOAN_RECOVERY: &str = "loan_recovery";

/// Recovers the unserved notice days at the daily rate.
///
/// # Examples
///
/// ```
/// use settlement_engine::calculation::{calculate_daily_rate, calculate_notice_recovery};
/// use settlement_engine::config::SettlementPolicy;
/// use rust_decimal::Decimal;
///
/// let rate = calculate_daily_rate(Decimal::new(50000, 0), &SettlementPolicy::default(), 1);
/// let result = calculate_notice_recovery(&rate, 1, 8);
/// assert_eq!(result.amount(), Decimal::new(1667, 0));
///
/// let none = calculate_notice_recovery(&rate, 0, 8);
/// assert!(none.line.is_none());
/// ```
pub fn calculate_notice_recovery(
    rate: &DailyRateResult,
    shortfall_days: i64,
    step_number: u32,
) -> ComponentResult {
    let input = serde_json::json!({
        "daily_rate": audit_value(rate.daily_rate),
        "shortfall_days": shortfall_days
    });

    if shortfall_days <= 0 {
        return ComponentResult {
            line: None,
            audit_step: AuditStep {
                step_number,
                rule_id: NOTICE_RECOVERY.to_string(),
                rule_name: "Notice Period Recovery".to_string(),
                input,
                output: serde_json::json!({
                    "applies": false
                }),
                reasoning: "Notice period fully served - nothing to recover".to_string(),
            },
        };
    }

    let unrounded = rate.prorate(Decimal::from(shortfall_days));
    let amount = round_currency(unrounded);
    let description = format!(
        "{} unserved notice days at {}/day",
        shortfall_days,
        display_rate(rate.daily_rate)
    );

    ComponentResult {
        line: Some(deduction(
            NOTICE_RECOVERY,
            "Notice Period Recovery",
            description.clone(),
            amount,
        )),
        audit_step: AuditStep {
            step_number,
            rule_id: NOTICE_RECOVERY.to_string(),
            rule_name: "Notice Period Recovery".to_string(),
            input,
            output: serde_json::json!({
                "applies": true,
                "unrounded": audit_value(unrounded),
                "amount": audit_value(amount)
            }),
            reasoning: format!("{} = {}", description, audit_value(amount)),
        },
    }
}

/// Recovers the full outstanding salary advance.
pub fn calculate_advance_recovery(advance_balance: Decimal, step_number: u32) -> ComponentResult {
    recover_balance(
        ADVANCE_RECOVERY,
        "Advance Recovery",
        "salary advance",
        advance_balance,
        step_number,
    )
}

/// Recovers the full outstanding loan balance.
pub fn calculate_loan_recovery(loan_balance: Decimal, step_number: u32) -> ComponentResult {
    recover_balance(
        LOAN_RECOVERY,
        "Loan Recovery",
        "loan",
        loan_balance,
        step_number,
    )
}

fn recover_balance(
    component: &str,
    name: &str,
    what: &str,
    balance: Decimal,
    step_number: u32,
) -> ComponentResult {
    let input = serde_json::json!({
        "balance": audit_value(balance)
    });

    if balance <= Decimal::ZERO {
        return ComponentResult {
            line: None,
            audit_step: AuditStep {
                step_number,
                rule_id: component.to_string(),
                rule_name: name.to_string(),
                input,
                output: serde_json::json!({
                    "applies": false
                }),
                reasoning: format!("No outstanding {} - nothing to recover", what),
            },
        };
    }

    let amount = round_currency(balance);
    let description = format!("Outstanding {} balance", what);

    ComponentResult {
        line: Some(deduction(component, name, description.clone(), amount)),
        audit_step: AuditStep {
            step_number,
            rule_id: component.to_string(),
            rule_name: name.to_string(),
            input,
            output: serde_json::json!({
                "applies": true,
                "amount": audit_value(amount)
            }),
            reasoning: format!("{} = {}", description, audit_value(amount)),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculation::calculate_daily_rate;
    use crate::config::SettlementPolicy;
    use crate::models::LineCategory;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn rate(basic_salary: &str) -> DailyRateResult {
        calculate_daily_rate(dec(basic_salary), &SettlementPolicy::default(), 1)
    }

    #[test]
    fn test_notice_recovery_one_day_is_rounded_daily_rate() {
        let result = calculate_notice_recovery(&rate("50000"), 1, 8);
        let line = result.line.unwrap();

        assert_eq!(line.category, LineCategory::Deduction);
        assert_eq!(line.component, "notice_recovery");
        assert_eq!(line.amount, dec("1667"));
        assert_eq!(line.description, "1 unserved notice days at 1666.67/day");
    }

    #[test]
    fn test_notice_recovery_full_shortfall() {
        // 30 days x 1000/day
        let result = calculate_notice_recovery(&rate("30000"), 30, 8);
        assert_eq!(result.amount(), dec("30000"));
        assert!(result.audit_step.output["applies"].as_bool().unwrap());
    }

    #[test]
    fn test_notice_recovery_omitted_without_shortfall() {
        let result = calculate_notice_recovery(&rate("30000"), 0, 8);
        assert!(result.line.is_none());
        assert!(!result.audit_step.output["applies"].as_bool().unwrap());
    }

    #[test]
    fn test_advance_recovery_full_balance() {
        let result = calculate_advance_recovery(dec("5000"), 9);
        let line = result.line.unwrap();
        assert_eq!(line.component, "advance_recovery");
        assert_eq!(line.name, "Advance Recovery");
        assert_eq!(line.amount, dec("5000"));
    }

    #[test]
    fn test_advance_recovery_omitted_for_zero_balance() {
        let result = calculate_advance_recovery(Decimal::ZERO, 9);
        assert!(result.line.is_none());
        assert_eq!(result.audit_step.rule_id, "advance_recovery");
    }

    #[test]
    fn test_loan_recovery_full_balance() {
        let result = calculate_loan_recovery(dec("20000"), 10);
        assert_eq!(result.amount(), dec("20000"));
        assert_eq!(result.line.unwrap().category, LineCategory::Deduction);
    }

    #[test]
    fn test_loan_recovery_omitted_for_zero_balance() {
        assert!(calculate_loan_recovery(Decimal::ZERO, 10).line.is_none());
    }
}
