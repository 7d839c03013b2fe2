//! Full-and-final settlement calculation.
//!
//! This module runs the settlement pipeline: validate the inputs, derive the
//! daily rate and service period, evaluate each earning and deduction
//! component in a fixed order, then total the rounded lines.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use tracing::debug;

use crate::config::SettlementPolicy;
use crate::error::EngineResult;
use crate::models::{
    AuditStep, AuditTrace, EmployeeRecord, SeparationContext, SettlementBreakdownLine,
    SettlementResult, SettlementTotals,
};

use super::component::ComponentResult;
use super::earnings::{
    calculate_basic_salary_due, calculate_bonus, calculate_gratuity, calculate_leave_encashment,
    calculate_reimbursements,
};
use super::recoveries::{
    calculate_advance_recovery, calculate_loan_recovery, calculate_notice_recovery,
};
use super::service_period::{
    calculate_daily_rate, calculate_years_of_service, days_worked_in_final_month,
};
use super::tax::calculate_tds;
use super::validation::{validate_inputs, validate_policy};

/// Collects lines and audit steps in computation order.
#[derive(Default)]
struct Breakdown {
    lines: Vec<SettlementBreakdownLine>,
    steps: Vec<AuditStep>,
}

impl Breakdown {
    fn next_step(&self) -> u32 {
        self.steps.len() as u32 + 1
    }

    fn record(&mut self, step: AuditStep) {
        self.steps.push(step);
    }

    fn apply(&mut self, component: ComponentResult) {
        if let Some(line) = component.line {
            self.lines.push(line);
        }
        self.steps.push(component.audit_step);
    }

    fn earnings_total(&self) -> Decimal {
        self.lines
            .iter()
            .filter(|line| line.is_earning())
            .map(|line| line.amount)
            .sum()
    }
}

/// Computes the full-and-final settlement under the standard policy.
///
/// See [`compute_settlement_with_policy`].
///
/// # Examples
///
/// ```
/// use settlement_engine::calculation::compute_settlement;
/// use settlement_engine::models::{EmployeeRecord, SeparationContext};
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
///
/// let employee = EmployeeRecord {
///     id: "EMP-001".to_string(),
///     designation: "Engineer".to_string(),
///     department: "Production".to_string(),
///     basic_salary: Decimal::new(50000, 0),
///     leave_balance: Decimal::new(12, 0),
///     advance_balance: Decimal::new(5000, 0),
///     loan_balance: Decimal::new(20000, 0),
///     date_of_joining: NaiveDate::from_ymd_opt(2019, 1, 15).unwrap(),
/// };
/// let separation = SeparationContext {
///     request_date: NaiveDate::from_ymd_opt(2025, 2, 18).unwrap(),
///     last_working_date: NaiveDate::from_ymd_opt(2025, 3, 20).unwrap(),
///     required_notice_days: 30,
///     notice_days_served: 30,
///     reimbursements: Decimal::new(5000, 0),
/// };
/// let as_of = NaiveDate::from_ymd_opt(2025, 3, 31).unwrap();
///
/// let result = compute_settlement(&employee, &separation, as_of).unwrap();
/// assert_eq!(result.totals.total_earnings, Decimal::new(234187, 0));
/// assert_eq!(result.totals.total_deductions, Decimal::new(48419, 0));
/// assert_eq!(result.totals.net_payable, Decimal::new(185768, 0));
/// ```
pub fn compute_settlement(
    employee: &EmployeeRecord,
    separation: &SeparationContext,
    as_of: NaiveDate,
) -> EngineResult<SettlementResult> {
    compute_settlement_with_policy(employee, separation, as_of, &SettlementPolicy::default())
}

/// Computes the full-and-final settlement for one employee and separation.
///
/// Lines are produced in this order, each rounded to whole currency units
/// before summing: basic salary, leave encashment, gratuity (only with enough
/// service), bonus, reimbursements, notice recovery (only with a shortfall),
/// advance recovery and loan recovery (only with a balance), TDS on the sum
/// of the earning lines.
///
/// The function is pure: no I/O, no clock, no shared state. Calling it twice
/// with the same inputs returns equal results.
///
/// # Errors
///
/// Returns `ValidationError` naming the field when an input violates a
/// precondition (see [`validate_inputs`]) or the policy is unusable (see
/// [`validate_policy`]). Inputs that pass validation always produce a result.
pub fn compute_settlement_with_policy(
    employee: &EmployeeRecord,
    separation: &SeparationContext,
    as_of: NaiveDate,
    policy: &SettlementPolicy,
) -> EngineResult<SettlementResult> {
    validate_policy(policy)?;
    validate_inputs(employee, separation)?;

    let basic = employee.basic_salary;
    let mut breakdown = Breakdown::default();

    let rate = calculate_daily_rate(basic, policy, breakdown.next_step());
    breakdown.record(rate.audit_step.clone());

    let service = calculate_years_of_service(
        employee.date_of_joining,
        separation.last_working_date,
        policy,
        breakdown.next_step(),
    );
    breakdown.record(service.audit_step);

    let days_worked = days_worked_in_final_month(separation.last_working_date);

    // Earnings
    let step = breakdown.next_step();
    breakdown.apply(calculate_basic_salary_due(&rate, days_worked, step));
    let step = breakdown.next_step();
    breakdown.apply(calculate_leave_encashment(
        &rate,
        employee.leave_balance,
        step,
    ));
    let step = breakdown.next_step();
    breakdown.apply(calculate_gratuity(basic, service.years_of_service, policy, step));
    let step = breakdown.next_step();
    breakdown.apply(calculate_bonus(basic, days_worked, policy, step));
    let step = breakdown.next_step();
    breakdown.apply(calculate_reimbursements(separation.reimbursements, step));

    // Deductions
    let step = breakdown.next_step();
    breakdown.apply(calculate_notice_recovery(
        &rate,
        separation.notice_shortfall(),
        step,
    ));
    let step = breakdown.next_step();
    breakdown.apply(calculate_advance_recovery(employee.advance_balance, step));
    let step = breakdown.next_step();
    breakdown.apply(calculate_loan_recovery(employee.loan_balance, step));

    let taxable = breakdown.earnings_total();
    let step = breakdown.next_step();
    breakdown.apply(calculate_tds(taxable, policy, step));

    let totals = SettlementTotals::from_lines(&breakdown.lines);

    debug!(
        employee_id = %employee.id,
        daily_rate = %rate.daily_rate.round_dp(2),
        years_of_service = service.years_of_service,
        total_earnings = %totals.total_earnings,
        total_deductions = %totals.total_deductions,
        net_payable = %totals.net_payable,
        "Computed settlement"
    );

    Ok(SettlementResult {
        employee_id: employee.id.clone(),
        as_of,
        lines: breakdown.lines,
        totals,
        audit_trace: AuditTrace {
            steps: breakdown.steps,
        },
    })
}
