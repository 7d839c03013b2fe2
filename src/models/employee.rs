//! Employee record model.
//!
//! This module defines the [`EmployeeRecord`] struct: the compensation, leave
//! and loan data the employee directory supplies for a settlement.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Compensation and tenure data for an employee leaving the organisation.
///
/// All monetary fields are in whole currency units of the payroll currency.
///
/// # Example
///
/// ```
/// use settlement_engine::models::EmployeeRecord;
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
///
/// let employee = EmployeeRecord {
///     id: "EMP-001".to_string(),
///     designation: "Senior Engineer".to_string(),
///     department: "Production".to_string(),
///     basic_salary: Decimal::new(50000, 0),
///     leave_balance: Decimal::new(12, 0),
///     advance_balance: Decimal::ZERO,
///     loan_balance: Decimal::ZERO,
///     date_of_joining: NaiveDate::from_ymd_opt(2019, 1, 15).unwrap(),
/// };
/// assert!(!employee.has_outstanding_recoveries());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmployeeRecord {
    /// Unique identifier for the employee.
    pub id: String,
    /// Job title, used to derive the required notice period.
    #[serde(default)]
    pub designation: String,
    /// Department the employee belongs to.
    #[serde(default)]
    pub department: String,
    /// Monthly basic salary.
    pub basic_salary: Decimal,
    /// Accrued, unused leave in days.
    pub leave_balance: Decimal,
    /// Outstanding salary advance still owed to the company.
    #[serde(default)]
    pub advance_balance: Decimal,
    /// Outstanding loan balance still owed to the company.
    #[serde(default)]
    pub loan_balance: Decimal,
    /// The date the employee joined.
    pub date_of_joining: NaiveDate,
}

impl EmployeeRecord {
    /// Returns true if the employee owes an advance or a loan.
    pub fn has_outstanding_recoveries(&self) -> bool {
        self.advance_balance > Decimal::ZERO || self.loan_balance > Decimal::ZERO
    }
}
