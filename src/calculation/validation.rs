//! Input validation for the settlement calculation.
//!
//! Negative or out-of-range amounts and out-of-order dates are rejected with a
//! [`EngineError::ValidationError`] naming the field; nothing is clamped.
//! Within these bounds no settlement formula can overflow.

use rust_decimal::Decimal;

use crate::config::SettlementPolicy;
use crate::error::{EngineError, EngineResult};
use crate::models::{EmployeeRecord, SeparationContext};

/// Upper bound on any monetary input, in whole currency units.
pub const MAX_AMOUNT: i64 = 1_000_000_000_000;

/// Upper bound on the leave balance, the notice required and the magnitude
/// of the notice served, in days.
pub const MAX_DAYS: i64 = 36_500;

/// Checks the preconditions of [`compute_settlement`](super::compute_settlement).
///
/// # Errors
///
/// Returns `ValidationError` for the first violated precondition:
/// - `basic_salary`, `advance_balance`, `loan_balance` or `reimbursements`
///   is negative or above [`MAX_AMOUNT`]
/// - `leave_balance` is negative or above [`MAX_DAYS`]
/// - `required_notice_days` is above [`MAX_DAYS`], or `notice_days_served`
///   is outside `±MAX_DAYS`
/// - `last_working_date` precedes the date of joining or the request date
///
/// # Examples
///
/// ```
/// use settlement_engine::calculation::validate_inputs;
/// use settlement_engine::models::{EmployeeRecord, SeparationContext};
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
///
/// let employee = EmployeeRecord {
///     id: "EMP-001".to_string(),
///     designation: String::new(),
///     department: String::new(),
///     basic_salary: Decimal::new(-1, 0),
///     leave_balance: Decimal::ZERO,
///     advance_balance: Decimal::ZERO,
///     loan_balance: Decimal::ZERO,
///     date_of_joining: NaiveDate::from_ymd_opt(2020, 1, 1).unwrap(),
/// };
/// let separation = SeparationContext {
///     request_date: NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
///     last_working_date: NaiveDate::from_ymd_opt(2025, 1, 31).unwrap(),
///     required_notice_days: 30,
///     notice_days_served: 30,
///     reimbursements: Decimal::ZERO,
/// };
///
/// assert!(validate_inputs(&employee, &separation).is_err());
/// ```
pub fn validate_inputs(
    employee: &EmployeeRecord,
    separation: &SeparationContext,
) -> EngineResult<()> {
    let max_amount = Decimal::from(MAX_AMOUNT);
    let max_days = Decimal::from(MAX_DAYS);

    in_range("basic_salary", employee.basic_salary, max_amount)?;
    in_range("leave_balance", employee.leave_balance, max_days)?;
    in_range("advance_balance", employee.advance_balance, max_amount)?;
    in_range("loan_balance", employee.loan_balance, max_amount)?;
    in_range("reimbursements", separation.reimbursements, max_amount)?;

    if i64::from(separation.required_notice_days) > MAX_DAYS {
        return Err(EngineError::validation(
            "required_notice_days",
            format!("must not exceed {MAX_DAYS} (got {})", separation.required_notice_days),
        ));
    }
    if separation.notice_days_served.unsigned_abs() > MAX_DAYS.unsigned_abs() {
        return Err(EngineError::validation(
            "notice_days_served",
            format!(
                "must be within ±{MAX_DAYS} (got {})",
                separation.notice_days_served
            ),
        ));
    }

    if separation.last_working_date < employee.date_of_joining {
        return Err(EngineError::validation(
            "last_working_date",
            format!(
                "{} is before the date of joining {}",
                separation.last_working_date, employee.date_of_joining
            ),
        ));
    }

    if separation.last_working_date < separation.request_date {
        return Err(EngineError::validation(
            "last_working_date",
            format!(
                "{} is before the request date {}",
                separation.last_working_date, separation.request_date
            ),
        ));
    }

    Ok(())
}

/// Rejects policies that would make a formula undefined or a line negative.
///
/// # Errors
///
/// Returns `ValidationError` when:
/// - `days_per_month` or `days_per_year` is zero
/// - `gratuity.divisor` is below 1
/// - `gratuity.days_per_service_year` is negative or exceeds `days_per_year`
/// - `bonus_rate` or `tds_rate` is outside `0..=1`
pub fn validate_policy(policy: &SettlementPolicy) -> EngineResult<()> {
    if policy.days_per_month == 0 {
        return Err(EngineError::validation("policy.days_per_month", "must be positive"));
    }
    if policy.days_per_year == 0 {
        return Err(EngineError::validation("policy.days_per_year", "must be positive"));
    }
    if policy.gratuity.divisor < Decimal::ONE {
        return Err(EngineError::validation(
            "policy.gratuity.divisor",
            format!("must be at least 1 (got {})", policy.gratuity.divisor),
        ));
    }
    in_range(
        "policy.gratuity.days_per_service_year",
        policy.gratuity.days_per_service_year,
        Decimal::from(policy.days_per_year),
    )?;
    in_range("policy.bonus_rate", policy.bonus_rate, Decimal::ONE)?;
    in_range("policy.tds_rate", policy.tds_rate, Decimal::ONE)?;
    Ok(())
}

fn in_range(field: &str, value: Decimal, max: Decimal) -> EngineResult<()> {
    if value < Decimal::ZERO {
        return Err(EngineError::validation(
            field,
            format!("must not be negative (got {})", value),
        ));
    }
    if value > max {
        return Err(EngineError::validation(
            field,
            format!("must not exceed {} (got {})", max, value),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn create_employee() -> EmployeeRecord {
        EmployeeRecord {
            id: "EMP-001".to_string(),
            designation: "Engineer".to_string(),
            department: "Production".to_string(),
            basic_salary: dec("50000"),
            leave_balance: dec("12"),
            advance_balance: dec("0"),
            loan_balance: dec("0"),
            date_of_joining: date(2019, 1, 15),
        }
    }

    fn create_separation() -> SeparationContext {
        SeparationContext {
            request_date: date(2025, 2, 18),
            last_working_date: date(2025, 3, 20),
            required_notice_days: 30,
            notice_days_served: 30,
            reimbursements: dec("5000"),
        }
    }

    fn assert_field(result: EngineResult<()>, expected: &str) {
        match result {
            Err(EngineError::ValidationError { field, .. }) => assert_eq!(field, expected),
            other => panic!("Expected ValidationError for {expected}, got {other:?}"),
        }
    }

    #[test]
    fn test_valid_inputs_pass() {
        assert!(validate_inputs(&create_employee(), &create_separation()).is_ok());
    }

    #[test]
    fn test_zero_amounts_are_valid() {
        let mut employee = create_employee();
        employee.basic_salary = Decimal::ZERO;
        employee.leave_balance = Decimal::ZERO;
        let mut separation = create_separation();
        separation.reimbursements = Decimal::ZERO;

        assert!(validate_inputs(&employee, &separation).is_ok());
    }

    #[test]
    fn test_negative_basic_salary_rejected() {
        let mut employee = create_employee();
        employee.basic_salary = dec("-1");
        assert_field(validate_inputs(&employee, &create_separation()), "basic_salary");
    }

    #[test]
    fn test_negative_leave_balance_rejected() {
        let mut employee = create_employee();
        employee.leave_balance = dec("-0.5");
        assert_field(validate_inputs(&employee, &create_separation()), "leave_balance");
    }

    #[test]
    fn test_negative_balances_rejected() {
        let mut employee = create_employee();
        employee.advance_balance = dec("-100");
        assert_field(validate_inputs(&employee, &create_separation()), "advance_balance");

        let mut employee = create_employee();
        employee.loan_balance = dec("-100");
        assert_field(validate_inputs(&employee, &create_separation()), "loan_balance");
    }

    #[test]
    fn test_negative_reimbursements_rejected() {
        let mut separation = create_separation();
        separation.reimbursements = dec("-1");
        assert_field(validate_inputs(&create_employee(), &separation), "reimbursements");
    }

    #[test]
    fn test_last_working_date_before_joining_rejected() {
        let mut separation = create_separation();
        separation.request_date = date(2018, 1, 1);
        separation.last_working_date = date(2018, 12, 31);
        assert_field(
            validate_inputs(&create_employee(), &separation),
            "last_working_date",
        );
    }

    #[test]
    fn test_last_working_date_before_request_rejected() {
        let mut separation = create_separation();
        separation.request_date = date(2025, 3, 21);
        assert_field(
            validate_inputs(&create_employee(), &separation),
            "last_working_date",
        );
    }

    #[test]
    fn test_last_working_date_on_request_date_is_valid() {
        let mut separation = create_separation();
        separation.request_date = separation.last_working_date;
        assert!(validate_inputs(&create_employee(), &separation).is_ok());
    }

    #[test]
    fn test_amounts_above_bound_rejected() {
        let mut employee = create_employee();
        employee.basic_salary = Decimal::from(MAX_AMOUNT) + Decimal::ONE;
        assert_field(validate_inputs(&employee, &create_separation()), "basic_salary");

        let mut employee = create_employee();
        employee.loan_balance = dec("100000000000000000000");
        assert_field(validate_inputs(&employee, &create_separation()), "loan_balance");

        let mut separation = create_separation();
        separation.reimbursements = Decimal::MAX;
        assert_field(validate_inputs(&create_employee(), &separation), "reimbursements");
    }

    #[test]
    fn test_amounts_at_bound_are_valid() {
        let mut employee = create_employee();
        employee.basic_salary = Decimal::from(MAX_AMOUNT);
        employee.leave_balance = Decimal::from(MAX_DAYS);
        employee.advance_balance = Decimal::from(MAX_AMOUNT);
        employee.loan_balance = Decimal::from(MAX_AMOUNT);

        assert!(validate_inputs(&employee, &create_separation()).is_ok());
    }

    #[test]
    fn test_leave_balance_above_bound_rejected() {
        let mut employee = create_employee();
        employee.leave_balance = dec("1000000000000000000");
        assert_field(validate_inputs(&employee, &create_separation()), "leave_balance");
    }

    #[test]
    fn test_notice_days_outside_bounds_rejected() {
        let mut separation = create_separation();
        separation.notice_days_served = i64::MIN;
        assert_field(
            validate_inputs(&create_employee(), &separation),
            "notice_days_served",
        );

        let mut separation = create_separation();
        separation.notice_days_served = i64::MAX;
        assert_field(
            validate_inputs(&create_employee(), &separation),
            "notice_days_served",
        );

        let mut separation = create_separation();
        separation.required_notice_days = u32::MAX;
        assert_field(
            validate_inputs(&create_employee(), &separation),
            "required_notice_days",
        );
    }

    #[test]
    fn test_negative_notice_served_within_bound_is_valid() {
        let mut separation = create_separation();
        separation.notice_days_served = -MAX_DAYS;
        assert!(validate_inputs(&create_employee(), &separation).is_ok());
    }

    #[test]
    fn test_standard_policy_is_valid() {
        assert!(validate_policy(&SettlementPolicy::default()).is_ok());
    }

    #[test]
    fn test_policy_with_negative_rates_rejected() {
        let mut policy = SettlementPolicy::default();
        policy.tds_rate = dec("-0.10");
        assert_field(validate_policy(&policy), "policy.tds_rate");

        let mut policy = SettlementPolicy::default();
        policy.bonus_rate = dec("-0.0833");
        assert_field(validate_policy(&policy), "policy.bonus_rate");

        let mut policy = SettlementPolicy::default();
        policy.gratuity.days_per_service_year = dec("-15");
        assert_field(validate_policy(&policy), "policy.gratuity.days_per_service_year");
    }

    #[test]
    fn test_policy_with_rate_above_one_rejected() {
        let mut policy = SettlementPolicy::default();
        policy.tds_rate = dec("1.5");
        assert_field(validate_policy(&policy), "policy.tds_rate");
    }

    #[test]
    fn test_policy_with_fractional_divisor_rejected() {
        let mut policy = SettlementPolicy::default();
        policy.gratuity.divisor = dec("0.0000001");
        assert_field(validate_policy(&policy), "policy.gratuity.divisor");
    }

    #[test]
    fn test_policy_with_zero_divisor_rejected() {
        let mut policy = SettlementPolicy::default();
        policy.days_per_month = 0;
        assert_field(validate_policy(&policy), "policy.days_per_month");

        let mut policy = SettlementPolicy::default();
        policy.gratuity.divisor = Decimal::ZERO;
        assert_field(validate_policy(&policy), "policy.gratuity.divisor");
    }
}
