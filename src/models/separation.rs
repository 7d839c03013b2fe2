//! Separation models: the calculation context, the workflow status machine,
//! the clearance checklist and the separation request itself.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

use super::{FnfStatus, SettlementRecord};

/// The separation facts a settlement is computed against.
///
/// # Example
///
/// ```
/// use settlement_engine::models::SeparationContext;
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
///
/// let separation = SeparationContext {
///     request_date: NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
///     last_working_date: NaiveDate::from_ymd_opt(2025, 1, 20).unwrap(),
///     required_notice_days: 30,
///     notice_days_served: 19,
///     reimbursements: Decimal::ZERO,
/// };
/// assert_eq!(separation.notice_shortfall(), 11);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeparationContext {
    /// The date the resignation or termination was recorded.
    pub request_date: NaiveDate,
    /// The employee's final day of work.
    pub last_working_date: NaiveDate,
    /// Notice days the employee was required to serve.
    pub required_notice_days: u32,
    /// Notice days actually served. Negative when the request postdates the
    /// last working date in upstream data.
    pub notice_days_served: i64,
    /// Approved expense reimbursements to pay out with the settlement.
    #[serde(default)]
    pub reimbursements: Decimal,
}

impl SeparationContext {
    /// Notice days not served, never below zero. Saturates at `i64::MAX`.
    pub fn notice_shortfall(&self) -> i64 {
        i64::from(self.required_notice_days)
            .saturating_sub(self.notice_days_served)
            .max(0)
    }
}

/// Lifecycle of a separation request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SeparationStatus {
    /// Request recorded, clearance not started.
    Initiated,
    /// Departments are working through the clearance checklist.
    InProgress,
    /// All clearances done, awaiting full-and-final settlement.
    PendingFnf,
    /// Settlement paid out.
    Completed,
    /// Request withdrawn.
    Cancelled,
}

impl SeparationStatus {
    /// Returns true for states that admit no further transitions.
    pub fn is_terminal(self) -> bool {
        matches!(self, SeparationStatus::Completed | SeparationStatus::Cancelled)
    }

    /// Returns true if the state machine allows moving from `self` to `next`.
    ///
    /// ```
    /// use settlement_engine::models::SeparationStatus;
    ///
    /// assert!(SeparationStatus::Initiated.can_transition_to(SeparationStatus::InProgress));
    /// assert!(SeparationStatus::PendingFnf.can_transition_to(SeparationStatus::Cancelled));
    /// assert!(!SeparationStatus::Completed.can_transition_to(SeparationStatus::Cancelled));
    /// ```
    pub fn can_transition_to(self, next: SeparationStatus) -> bool {
        use SeparationStatus::*;

        match (self, next) {
            (Initiated, InProgress) | (InProgress, PendingFnf) | (PendingFnf, Completed) => true,
            (from, Cancelled) => !from.is_terminal(),
            _ => false,
        }
    }

    /// The snake_case name used in serialized form.
    pub fn as_str(self) -> &'static str {
        match self {
            SeparationStatus::Initiated => "initiated",
            SeparationStatus::InProgress => "in_progress",
            SeparationStatus::PendingFnf => "pending_fnf",
            SeparationStatus::Completed => "completed",
            SeparationStatus::Cancelled => "cancelled",
        }
    }
}

impl fmt::Display for SeparationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// State of a single department's clearance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClearanceStatus {
    /// The department has not signed off yet.
    Pending,
    /// The department has signed off.
    Cleared,
    /// The department has nothing to clear for this employee.
    NotApplicable,
}

impl ClearanceStatus {
    /// Returns true if this item no longer blocks settlement.
    pub fn is_resolved(self) -> bool {
        matches!(self, ClearanceStatus::Cleared | ClearanceStatus::NotApplicable)
    }
}

/// How the employee's notice period is being handled.
///
/// A waived notice is never recovered. A buyout recovers the unserved days
/// from the settlement like any other shortfall.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NoticePeriodStatus {
    /// The employee is working out the notice period.
    #[default]
    Serving,
    /// The employee pays for the unserved days.
    Buyout,
    /// The notice period has been served in full.
    Completed,
    /// The employer has released the employee from the notice period.
    Waived,
}

impl NoticePeriodStatus {
    /// The snake_case name used in serialized form.
    pub fn as_str(self) -> &'static str {
        match self {
            NoticePeriodStatus::Serving => "serving",
            NoticePeriodStatus::Buyout => "buyout",
            NoticePeriodStatus::Completed => "completed",
            NoticePeriodStatus::Waived => "waived",
        }
    }
}

impl fmt::Display for NoticePeriodStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Progress of the exit interview.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExitInterviewStatus {
    /// Not yet scheduled.
    #[default]
    Pending,
    /// A date has been set.
    Scheduled,
    /// The interview has taken place.
    Completed,
}

impl ExitInterviewStatus {
    /// Returns true until the interview has taken place.
    pub fn is_outstanding(self) -> bool {
        !matches!(self, ExitInterviewStatus::Completed)
    }

    /// The snake_case name used in serialized form.
    pub fn as_str(self) -> &'static str {
        match self {
            ExitInterviewStatus::Pending => "pending",
            ExitInterviewStatus::Scheduled => "scheduled",
            ExitInterviewStatus::Completed => "completed",
        }
    }
}

impl fmt::Display for ExitInterviewStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One department's entry on the clearance checklist.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClearanceItem {
    /// The department responsible (e.g. "IT", "Finance").
    pub department: String,
    /// Current state of the sign-off.
    pub status: ClearanceStatus,
    /// Free-text remarks from the department.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub remarks: Option<String>,
    /// When the item last changed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl ClearanceItem {
    /// Creates a pending item for the given department.
    pub fn pending(department: impl Into<String>) -> Self {
        Self {
            department: department.into(),
            status: ClearanceStatus::Pending,
            remarks: None,
            updated_at: None,
        }
    }
}

/// A separation request as stored by the separation registry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeparationRequest {
    /// Unique identifier for the request.
    pub id: Uuid,
    /// The departing employee.
    pub employee_id: String,
    /// The employee's designation at the time of the request.
    pub designation: String,
    /// Reason given for the separation.
    pub reason: String,
    /// The date the request was recorded.
    pub request_date: NaiveDate,
    /// The employee's final day of work.
    pub last_working_date: NaiveDate,
    /// Workflow status.
    pub status: SeparationStatus,
    /// Department clearance checklist.
    pub clearances: Vec<ClearanceItem>,
    /// How the notice period is being handled.
    #[serde(default)]
    pub notice_period_status: NoticePeriodStatus,
    /// Progress of the exit interview.
    #[serde(default)]
    pub exit_interview_status: ExitInterviewStatus,
    /// The full-and-final settlement, once calculated.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub settlement: Option<SettlementRecord>,
    /// When the request was created.
    pub created_at: DateTime<Utc>,
    /// When the request last changed.
    pub updated_at: DateTime<Utc>,
}

impl SeparationRequest {
    /// Departments whose clearance still blocks the move to `pending_fnf`.
    pub fn pending_clearances(&self) -> Vec<String> {
        self.clearances
            .iter()
            .filter(|item| !item.status.is_resolved())
            .map(|item| item.department.clone())
            .collect()
    }

    /// Returns true when every clearance item is cleared or not applicable.
    pub fn is_fully_cleared(&self) -> bool {
        self.clearances.iter().all(|item| item.status.is_resolved())
    }

    /// Settlement status, `pending` until a settlement is calculated.
    pub fn fnf_status(&self) -> FnfStatus {
        self.settlement
            .as_ref()
            .map_or(FnfStatus::Pending, SettlementRecord::status)
    }

    /// Days between the request and the last working date.
    pub fn notice_days_served(&self) -> i64 {
        (self.last_working_date - self.request_date).num_days()
    }
}
