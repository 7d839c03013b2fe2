//! Daily rate, final-month days and years of service.
//!
//! These are the inputs every settlement component is derived from. They use
//! fixed day-count conventions from [`SettlementPolicy`]: a month is always
//! `days_per_month` days and a year of service is always `days_per_year`
//! days, whatever the calendar says.

use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;

use crate::config::SettlementPolicy;
use crate::models::AuditStep;

use super::component::{audit_value, display_rate};

/// The daily rate derived from the monthly salary.
///
/// Components that pay or recover whole days take this value, so every
/// description and audit entry quotes the same rate.
#[derive(Debug, Clone)]
pub struct DailyRateResult {
    /// The monthly basic salary the rate was derived from.
    pub basic_salary: Decimal,
    /// The month convention the salary was divided by.
    pub days_per_month: u32,
    /// Monthly salary divided by the month convention, unrounded.
    pub daily_rate: Decimal,
    /// The audit step recording this calculation.
    pub audit_step: AuditStep,
}

impl DailyRateResult {
    /// `basic × days / days_per_month`: the daily rate applied to `days`
    /// without rounding the rate first, so exact halves stay exact.
    ///
    /// ```
    /// use settlement_engine::calculation::calculate_daily_rate;
    /// use settlement_engine::config::SettlementPolicy;
    /// use rust_decimal::Decimal;
    ///
    /// let rate = calculate_daily_rate(Decimal::new(25, 0), &SettlementPolicy::default(), 1);
    /// assert_eq!(rate.prorate(Decimal::new(3, 0)), Decimal::new(25, 1));
    /// ```
    pub fn prorate(&self, days: Decimal) -> Decimal {
        self.basic_salary * days / Decimal::from(self.days_per_month)
    }
}

/// Years of completed service at the last working date.
#[derive(Debug, Clone)]
pub struct ServicePeriodResult {
    /// Calendar days between joining and the last working date.
    pub days_of_service: i64,
    /// Completed years, floored.
    pub years_of_service: u32,
    /// The audit step recording this calculation.
    pub audit_step: AuditStep,
}

/// Divides the monthly basic salary by the fixed month length.
///
/// The result is kept at full precision; each component rounds its own amount.
///
/// # Examples
///
/// ```
/// use settlement_engine::calculation::calculate_daily_rate;
/// use settlement_engine::config::SettlementPolicy;
/// use rust_decimal::Decimal;
///
/// let result = calculate_daily_rate(Decimal::new(45000, 0), &SettlementPolicy::default(), 1);
/// assert_eq!(result.daily_rate, Decimal::new(1500, 0));
/// ```
pub fn calculate_daily_rate(
    basic_salary: Decimal,
    policy: &SettlementPolicy,
    step_number: u32,
) -> DailyRateResult {
    let daily_rate = basic_salary / Decimal::from(policy.days_per_month);

    let audit_step = AuditStep {
        step_number,
        rule_id: "daily_rate".to_string(),
        rule_name: "Daily Rate".to_string(),
        input: serde_json::json!({
            "basic_salary": audit_value(basic_salary),
            "days_per_month": policy.days_per_month
        }),
        output: serde_json::json!({
            "daily_rate": audit_value(daily_rate)
        }),
        reasoning: format!(
            "{} / {} days = {}/day",
            audit_value(basic_salary),
            policy.days_per_month,
            display_rate(daily_rate)
        ),
    };

    DailyRateResult {
        basic_salary,
        days_per_month: policy.days_per_month,
        daily_rate,
        audit_step,
    }
}

/// Days worked in the final month: the day-of-month of the last working date.
///
/// # Examples
///
/// ```
/// use settlement_engine::calculation::days_worked_in_final_month;
/// use chrono::NaiveDate;
///
/// let lwd = NaiveDate::from_ymd_opt(2025, 3, 20).unwrap();
/// assert_eq!(days_worked_in_final_month(lwd), 20);
/// ```
pub fn days_worked_in_final_month(last_working_date: NaiveDate) -> u32 {
    last_working_date.day()
}

/// Counts completed years of service as `floor(days / days_per_year)`.
///
/// Leap days are not adjusted for.
///
/// # Examples
///
/// ```
/// use settlement_engine::calculation::calculate_years_of_service;
/// use settlement_engine::config::SettlementPolicy;
/// use chrono::NaiveDate;
///
/// let joined = NaiveDate::from_ymd_opt(2019, 1, 15).unwrap();
/// let left = NaiveDate::from_ymd_opt(2025, 3, 20).unwrap();
/// let result = calculate_years_of_service(joined, left, &SettlementPolicy::default(), 2);
/// assert_eq!(result.years_of_service, 6);
/// ```
pub fn calculate_years_of_service(
    date_of_joining: NaiveDate,
    last_working_date: NaiveDate,
    policy: &SettlementPolicy,
    step_number: u32,
) -> ServicePeriodResult {
    let days_of_service = (last_working_date - date_of_joining).num_days().max(0);
    let years_of_service =
        u32::try_from(days_of_service / i64::from(policy.days_per_year)).unwrap_or(u32::MAX);

    let audit_step = AuditStep {
        step_number,
        rule_id: "years_of_service".to_string(),
        rule_name: "Years of Service".to_string(),
        input: serde_json::json!({
            "date_of_joining": date_of_joining.to_string(),
            "last_working_date": last_working_date.to_string(),
            "days_per_year": policy.days_per_year
        }),
        output: serde_json::json!({
            "days_of_service": days_of_service,
            "years_of_service": years_of_service
        }),
        reasoning: format!(
            "floor({} days / {}) = {} years",
            days_of_service, policy.days_per_year, years_of_service
        ),
    };

    ServicePeriodResult {
        days_of_service,
        years_of_service,
        audit_step,
    }
}
