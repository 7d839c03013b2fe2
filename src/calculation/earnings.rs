//! Earning components of a full-and-final settlement.
//!
//! Salary for the final month, leave encashment, gratuity, pro-rata bonus and
//! reimbursements. Every amount is rounded to whole currency units on its own,
//! before any totals are taken.

use rust_decimal::Decimal;

use crate::config::SettlementPolicy;
use crate::models::AuditStep;

use super::component::{ComponentResult, audit_value, display_rate, earning, round_currency};
use super::service_period::DailyRateResult;

/// Rule id and component id of the final-month salary line.
pub const BASIC_SALARY: &str = "basic_salary";
/// Rule id and component id of the leave encashment line.
pub const LEAVE_ENCASHMENT: &str = "leave_encashment";
/// Rule id and component id of the gratuity line.
pub const GRATUITY: &str = "gratuity";
/// Rule id and component id of the bonus line.
pub const BONUS: &str = "bonus";
/// Rule id and component id of the reimbursements line.
pub const REIMBURSEMENTS: &str = "reimbursements";

/// Salary due for the days worked in the final month.
///
/// # Examples
///
/// ```
/// use settlement_engine::calculation::{calculate_basic_salary_due, calculate_daily_rate};
/// use settlement_engine::config::SettlementPolicy;
/// use rust_decimal::Decimal;
///
/// let rate = calculate_daily_rate(Decimal::new(50000, 0), &SettlementPolicy::default(), 1);
/// let result = calculate_basic_salary_due(&rate, 20, 3);
/// assert_eq!(result.amount(), Decimal::new(33333, 0));
/// ```
pub fn calculate_basic_salary_due(
    rate: &DailyRateResult,
    days_worked: u32,
    step_number: u32,
) -> ComponentResult {
    let unrounded = rate.prorate(Decimal::from(days_worked));
    let amount = round_currency(unrounded);

    let description = format!(
        "{} days at {}/day",
        days_worked,
        display_rate(rate.daily_rate)
    );

    ComponentResult {
        line: Some(earning(BASIC_SALARY, "Basic Salary", description.clone(), amount)),
        audit_step: AuditStep {
            step_number,
            rule_id: BASIC_SALARY.to_string(),
            rule_name: "Basic Salary".to_string(),
            input: serde_json::json!({
                "basic_salary": audit_value(rate.basic_salary),
                "daily_rate": audit_value(rate.daily_rate),
                "days_worked": days_worked
            }),
            output: serde_json::json!({
                "unrounded": audit_value(unrounded),
                "amount": audit_value(amount)
            }),
            reasoning: format!("{} = {}", description, audit_value(amount)),
        },
    }
}

/// Encashment of the unused leave balance at the daily rate. Always present,
/// possibly zero.
///
/// # Examples
///
/// ```
/// use settlement_engine::calculation::{calculate_daily_rate, calculate_leave_encashment};
/// use settlement_engine::config::SettlementPolicy;
/// use rust_decimal::Decimal;
///
/// let rate = calculate_daily_rate(Decimal::new(50000, 0), &SettlementPolicy::default(), 1);
/// let result = calculate_leave_encashment(&rate, Decimal::new(12, 0), 4);
/// assert_eq!(result.amount(), Decimal::new(20000, 0));
/// ```
pub fn calculate_leave_encashment(
    rate: &DailyRateResult,
    leave_balance: Decimal,
    step_number: u32,
) -> ComponentResult {
    let unrounded = rate.prorate(leave_balance);
    let amount = round_currency(unrounded);

    let description = format!(
        "{} days leave at {}/day",
        audit_value(leave_balance),
        display_rate(rate.daily_rate)
    );

    ComponentResult {
        line: Some(earning(
            LEAVE_ENCASHMENT,
            "Leave Encashment",
            description.clone(),
            amount,
        )),
        audit_step: AuditStep {
            step_number,
            rule_id: LEAVE_ENCASHMENT.to_string(),
            rule_name: "Leave Encashment".to_string(),
            input: serde_json::json!({
                "daily_rate": audit_value(rate.daily_rate),
                "leave_balance": audit_value(leave_balance)
            }),
            output: serde_json::json!({
                "unrounded": audit_value(unrounded),
                "amount": audit_value(amount)
            }),
            reasoning: format!("{} = {}", description, audit_value(amount)),
        },
    }
}

/// Gratuity for employees with at least `gratuity.min_years` completed years.
///
/// `basic × days_per_service_year × years / divisor`. Below the threshold the
/// line is omitted rather than zeroed.
///
/// # Examples
///
/// ```
/// use settlement_engine::calculation::calculate_gratuity;
/// use settlement_engine::config::SettlementPolicy;
/// use rust_decimal::Decimal;
///
/// let policy = SettlementPolicy::default();
/// let eligible = calculate_gratuity(Decimal::new(50000, 0), 6, &policy, 5);
/// assert_eq!(eligible.amount(), Decimal::new(173077, 0));
///
/// let not_eligible = calculate_gratuity(Decimal::new(50000, 0), 4, &policy, 5);
/// assert!(not_eligible.line.is_none());
/// ```
pub fn calculate_gratuity(
    basic_salary: Decimal,
    years_of_service: u32,
    policy: &SettlementPolicy,
    step_number: u32,
) -> ComponentResult {
    let gratuity = &policy.gratuity;
    let eligible = years_of_service >= gratuity.min_years;

    let input = serde_json::json!({
        "basic_salary": audit_value(basic_salary),
        "years_of_service": years_of_service,
        "min_years": gratuity.min_years
    });

    if !eligible {
        return ComponentResult {
            line: None,
            audit_step: AuditStep {
                step_number,
                rule_id: GRATUITY.to_string(),
                rule_name: "Gratuity".to_string(),
                input,
                output: serde_json::json!({
                    "eligible": false
                }),
                reasoning: format!(
                    "{} years of service is below the {} year minimum - no gratuity",
                    years_of_service, gratuity.min_years
                ),
            },
        };
    }

    let unrounded = basic_salary * gratuity.days_per_service_year * Decimal::from(years_of_service)
        / gratuity.divisor;
    let amount = round_currency(unrounded);

    let description = format!(
        "{} x {} x {} years / {}",
        audit_value(basic_salary),
        audit_value(gratuity.days_per_service_year),
        years_of_service,
        audit_value(gratuity.divisor)
    );

    ComponentResult {
        line: Some(earning(GRATUITY, "Gratuity", description.clone(), amount)),
        audit_step: AuditStep {
            step_number,
            rule_id: GRATUITY.to_string(),
            rule_name: "Gratuity".to_string(),
            input,
            output: serde_json::json!({
                "eligible": true,
                "unrounded": audit_value(unrounded),
                "amount": audit_value(amount)
            }),
            reasoning: format!("{} = {}", description, audit_value(amount)),
        },
    }
}

/// Pro-rata statutory bonus for the final month. Always present.
///
/// # Examples
///
/// ```
/// use settlement_engine::calculation::calculate_bonus;
/// use settlement_engine::config::SettlementPolicy;
/// use rust_decimal::Decimal;
///
/// let result = calculate_bonus(Decimal::new(50000, 0), 20, &SettlementPolicy::default(), 6);
/// assert_eq!(result.amount(), Decimal::new(2777, 0));
/// ```
pub fn calculate_bonus(
    basic_salary: Decimal,
    days_worked: u32,
    policy: &SettlementPolicy,
    step_number: u32,
) -> ComponentResult {
    let unrounded = basic_salary * policy.bonus_rate * Decimal::from(days_worked)
        / Decimal::from(policy.days_per_month);
    let amount = round_currency(unrounded);

    let description = format!(
        "{} x {} x {} / {} days",
        audit_value(basic_salary),
        audit_value(policy.bonus_rate),
        days_worked,
        policy.days_per_month
    );

    ComponentResult {
        line: Some(earning(BONUS, "Bonus", description.clone(), amount)),
        audit_step: AuditStep {
            step_number,
            rule_id: BONUS.to_string(),
            rule_name: "Pro-rata Bonus".to_string(),
            input: serde_json::json!({
                "basic_salary": audit_value(basic_salary),
                "bonus_rate": audit_value(policy.bonus_rate),
                "days_worked": days_worked
            }),
            output: serde_json::json!({
                "unrounded": audit_value(unrounded),
                "amount": audit_value(amount)
            }),
            reasoning: format!("{} = {}", description, audit_value(amount)),
        },
    }
}

/// Pass-through of approved reimbursements. Always present, possibly zero.
pub fn calculate_reimbursements(reimbursements: Decimal, step_number: u32) -> ComponentResult {
    let amount = round_currency(reimbursements);

    ComponentResult {
        line: Some(earning(
            REIMBURSEMENTS,
            "Reimbursements",
            "Approved expense claims".to_string(),
            amount,
        )),
        audit_step: AuditStep {
            step_number,
            rule_id: REIMBURSEMENTS.to_string(),
            rule_name: "Reimbursements".to_string(),
            input: serde_json::json!({
                "reimbursements": audit_value(reimbursements)
            }),
            output: serde_json::json!({
                "amount": audit_value(amount)
            }),
            reasoning: format!("Approved expense claims = {}", audit_value(amount)),
        },
    }
}
