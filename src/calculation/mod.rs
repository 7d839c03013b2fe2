//! Calculation logic for the Settlement Engine.
//!
//! This module contains the calculation functions for a full-and-final
//! settlement: input validation, the daily rate and service period, the
//! earning components (final-month salary, leave encashment, gratuity, bonus,
//! reimbursements), the recovery deductions (notice shortfall, advances,
//! loans), tax deducted at source, and the notice-period evaluation used
//! upstream to build the separation context.

mod component;
mod earnings;
mod notice_period;
mod recoveries;
mod service_period;
mod settlement;
mod tax;
mod validation;

pub use component::{ComponentResult, round_currency};
pub use earnings::{
    BASIC_SALARY, BONUS, GRATUITY, LEAVE_ENCASHMENT, REIMBURSEMENTS, calculate_basic_salary_due,
    calculate_bonus, calculate_gratuity, calculate_leave_encashment, calculate_reimbursements,
};
pub use notice_period::{required_notice_days, required_notice_days_with_policy};
pub use recoveries::{
    ADVANCE_RECOVERY, LOAN_RECOVERY, NOTICE_RECOVERY, calculate_advance_recovery,
    calculate_loan_recovery, calculate_notice_recovery,
};
pub use service_period::{
    DailyRateResult, ServicePeriodResult, calculate_daily_rate, calculate_years_of_service,
    days_worked_in_final_month,
};
pub use settlement::{compute_settlement, compute_settlement_with_policy};
pub use tax::{TDS, calculate_tds};
pub use validation::{MAX_AMOUNT, MAX_DAYS, validate_inputs, validate_policy};
