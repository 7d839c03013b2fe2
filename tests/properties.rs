//! Property-based tests for settlement invariants.
//!
//! Every generated employee and separation must produce a settlement whose
//! totals reconcile with its lines and whose conditional lines appear exactly
//! when their conditions hold.

use chrono::{Duration, NaiveDate};
use proptest::prelude::*;
use rust_decimal::Decimal;

use settlement_engine::calculation::{MAX_AMOUNT, MAX_DAYS, compute_settlement, round_currency};
use settlement_engine::models::{EmployeeRecord, SeparationContext, SettlementResult};

fn base_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2010, 1, 1).unwrap()
}

prop_compose! {
    fn employee_and_separation()(
        basic in prop_oneof![3 => 0i64..500_000i64, 1 => 0i64..=MAX_AMOUNT],
        leave_tenths in prop_oneof![3 => 0i64..1_000i64, 1 => 0i64..=MAX_DAYS * 10],
        advance in prop_oneof![3 => 0i64..100_000i64, 1 => 0i64..=MAX_AMOUNT],
        loan in prop_oneof![3 => 0i64..500_000i64, 1 => 0i64..=MAX_AMOUNT],
        joined_offset in 0i64..3_000i64,
        service_days in 0i64..6_000i64,
        notice_days in 0i64..120i64,
        required in prop_oneof![3 => prop_oneof![Just(30u32), Just(60u32)], 1 => 0u32..=36_500u32],
        reimbursement_paise in 0u32..5_000_000u32,
    ) -> (EmployeeRecord, SeparationContext) {
        let date_of_joining = base_date() + Duration::days(joined_offset);
        let last_working_date = date_of_joining + Duration::days(service_days);
        let request_date = last_working_date - Duration::days(notice_days);

        let employee = EmployeeRecord {
            id: "EMP-PROP".to_string(),
            designation: "Engineer".to_string(),
            department: "Production".to_string(),
            basic_salary: Decimal::from(basic),
            leave_balance: Decimal::new(leave_tenths, 1),
            advance_balance: Decimal::from(advance),
            loan_balance: Decimal::from(loan),
            date_of_joining,
        };
        let separation = SeparationContext {
            request_date,
            last_working_date,
            required_notice_days: required,
            notice_days_served: notice_days,
            reimbursements: Decimal::new(i64::from(reimbursement_paise), 2),
        };
        (employee, separation)
    }
}

fn settle(employee: &EmployeeRecord, separation: &SeparationContext) -> SettlementResult {
    compute_settlement(employee, separation, separation.last_working_date).unwrap()
}

proptest! {
    /// Property: net payable = total earnings - total deductions
    #[test]
    fn test_totals_reconcile((employee, separation) in employee_and_separation()) {
        let result = settle(&employee, &separation);

        let earnings: Decimal = result.earnings().map(|l| l.amount).sum();
        let deductions: Decimal = result.deductions().map(|l| l.amount).sum();

        prop_assert_eq!(result.totals.total_earnings, earnings);
        prop_assert_eq!(result.totals.total_deductions, deductions);
        prop_assert_eq!(result.totals.net_payable, earnings - deductions);
    }

    /// Property: every line is a non-negative whole currency amount
    #[test]
    fn test_lines_are_whole_and_non_negative((employee, separation) in employee_and_separation()) {
        let result = settle(&employee, &separation);

        for line in &result.lines {
            prop_assert!(line.amount >= Decimal::ZERO, "{} is negative", line.component);
            prop_assert_eq!(line.amount, line.amount.trunc());
        }
    }

    /// Property: gratuity appears exactly when service reaches five years
    #[test]
    fn test_gratuity_presence((employee, separation) in employee_and_separation()) {
        let result = settle(&employee, &separation);
        let years = (separation.last_working_date - employee.date_of_joining).num_days() / 365;

        prop_assert_eq!(result.line("gratuity").is_some(), years >= 5);
    }

    /// Property: notice recovery appears exactly when notice was short
    #[test]
    fn test_notice_recovery_presence((employee, separation) in employee_and_separation()) {
        let result = settle(&employee, &separation);
        let short = separation.notice_days_served < i64::from(separation.required_notice_days);

        prop_assert_eq!(result.line("notice_recovery").is_some(), short);
    }

    /// Property: advance and loan recoveries appear exactly for positive balances
    #[test]
    fn test_balance_recoveries((employee, separation) in employee_and_separation()) {
        let result = settle(&employee, &separation);

        match result.line("advance_recovery") {
            Some(line) => prop_assert_eq!(line.amount, employee.advance_balance),
            None => prop_assert!(employee.advance_balance.is_zero()),
        }
        match result.line("loan_recovery") {
            Some(line) => prop_assert_eq!(line.amount, employee.loan_balance),
            None => prop_assert!(employee.loan_balance.is_zero()),
        }
    }

    /// Property: exactly one TDS line, 10% of the rounded earnings
    #[test]
    fn test_single_tds_line((employee, separation) in employee_and_separation()) {
        let result = settle(&employee, &separation);

        let tds: Vec<_> = result.lines.iter().filter(|l| l.component == "tds").collect();
        prop_assert_eq!(tds.len(), 1);
        prop_assert_eq!(
            tds[0].amount,
            round_currency(result.totals.total_earnings * Decimal::new(10, 2))
        );
        prop_assert_eq!(result.lines.last().map(|l| l.component.as_str()), Some("tds"));
    }

    /// Property: identical inputs produce identical results
    #[test]
    fn test_deterministic((employee, separation) in employee_and_separation()) {
        prop_assert_eq!(settle(&employee, &separation), settle(&employee, &separation));
    }
}
