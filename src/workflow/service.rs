//! The separation workflow service.
//!
//! [`SeparationService`] drives a separation request from initiation through
//! the clearance checklist to a calculated, approved and paid full-and-final
//! settlement. Storage is reached only through the registry traits.

use std::sync::Arc;

use chrono::{NaiveDate, Utc};
use rust_decimal::Decimal;
use tracing::{info, warn};
use uuid::Uuid;

use crate::calculation::{compute_settlement_with_policy, required_notice_days_with_policy};
use crate::config::SettlementConfig;
use crate::error::{EngineError, EngineResult};
use crate::models::{
    ClearanceItem, ClearanceStatus, ExitInterviewStatus, FnfStatus, NoticePeriodStatus,
    SeparationContext, SeparationRequest, SeparationStatus, SettlementRecord,
};
use crate::registry::{EmployeeDirectory, SeparationRepository};

use super::summary::OffboardingSummary;

/// Orchestrates separation requests and their settlements.
#[derive(Clone)]
pub struct SeparationService {
    employees: Arc<dyn EmployeeDirectory>,
    separations: Arc<dyn SeparationRepository>,
    config: Arc<SettlementConfig>,
}

impl SeparationService {
    /// Creates a service over the given directory, repository and policy.
    pub fn new(
        employees: Arc<dyn EmployeeDirectory>,
        separations: Arc<dyn SeparationRepository>,
        config: SettlementConfig,
    ) -> Self {
        Self {
            employees,
            separations,
            config: Arc::new(config),
        }
    }

    /// Returns the policy the service calculates with.
    pub fn config(&self) -> &SettlementConfig {
        &self.config
    }

    /// Records a new separation request in the `initiated` state.
    ///
    /// The clearance checklist is seeded with every configured department.
    ///
    /// # Errors
    ///
    /// - `EmployeeNotFound` if the directory has no such employee
    /// - `ValidationError` if the last working date precedes the request date
    ///   or the date of joining, or the employee already has an open request
    pub fn initiate(
        &self,
        employee_id: &str,
        request_date: NaiveDate,
        last_working_date: NaiveDate,
        reason: impl Into<String>,
    ) -> EngineResult<SeparationRequest> {
        let employee = self.employees.get_employee(employee_id)?;

        if last_working_date < request_date {
            return Err(EngineError::validation(
                "last_working_date",
                format!("{last_working_date} is before the request date {request_date}"),
            ));
        }
        if last_working_date < employee.date_of_joining {
            return Err(EngineError::validation(
                "last_working_date",
                format!(
                    "{last_working_date} is before the date of joining {}",
                    employee.date_of_joining
                ),
            ));
        }

        let now = Utc::now();
        let request = SeparationRequest {
            id: Uuid::new_v4(),
            employee_id: employee.id.clone(),
            designation: employee.designation.clone(),
            reason: reason.into(),
            request_date,
            last_working_date,
            status: SeparationStatus::Initiated,
            clearances: self
                .config
                .clearance()
                .departments
                .iter()
                .map(|department| ClearanceItem::pending(department.as_str()))
                .collect(),
            notice_period_status: NoticePeriodStatus::default(),
            exit_interview_status: ExitInterviewStatus::default(),
            settlement: None,
            created_at: now,
            updated_at: now,
        };
        self.separations.create(request.clone())?;

        info!(
            separation_id = %request.id,
            employee_id = %request.employee_id,
            last_working_date = %request.last_working_date,
            "Separation initiated"
        );
        Ok(request)
    }

    /// Opens the clearance checklist: `initiated → in_progress`.
    pub fn start_clearance(&self, id: Uuid) -> EngineResult<SeparationRequest> {
        self.separations.update(id, &mut |request| {
            Self::transition(request, SeparationStatus::InProgress)
        })
    }

    /// Records a department's clearance decision while clearance is open.
    ///
    /// # Errors
    ///
    /// - `InvalidTransition` if the request is not `in_progress`
    /// - `ValidationError` if the department is not on the checklist
    pub fn update_clearance(
        &self,
        id: Uuid,
        department: &str,
        status: ClearanceStatus,
        remarks: Option<String>,
    ) -> EngineResult<SeparationRequest> {
        let updated = self.separations.update(id, &mut |request| {
            if request.status != SeparationStatus::InProgress {
                return Err(EngineError::InvalidTransition {
                    entity: "clearance".to_string(),
                    from: request.status.to_string(),
                    to: format!("{department}:{}", clearance_label(status)),
                });
            }

            let item = request
                .clearances
                .iter_mut()
                .find(|item| item.department.eq_ignore_ascii_case(department))
                .ok_or_else(|| {
                    EngineError::validation(
                        "department",
                        format!("'{department}' is not on the clearance checklist"),
                    )
                })?;

            let now = Utc::now();
            item.status = status;
            item.remarks = remarks.clone();
            item.updated_at = Some(now);
            request.updated_at = now;
            Ok(())
        })?;

        info!(
            separation_id = %id,
            department = %department,
            status = clearance_label(status),
            "Clearance updated"
        );
        Ok(updated)
    }

    /// Closes clearance: `in_progress → pending_fnf`.
    ///
    /// # Errors
    ///
    /// `ClearancePending` naming every department not yet cleared or marked
    /// not applicable.
    pub fn submit_for_settlement(&self, id: Uuid) -> EngineResult<SeparationRequest> {
        self.separations.update(id, &mut |request| {
            if request.status == SeparationStatus::InProgress {
                let pending = request.pending_clearances();
                if !pending.is_empty() {
                    warn!(
                        separation_id = %id,
                        pending = ?pending,
                        "Settlement blocked by open clearances"
                    );
                    return Err(EngineError::ClearancePending {
                        departments: pending,
                    });
                }
            }

            Self::transition(request, SeparationStatus::PendingFnf)
        })
    }

    /// Records how the notice period is being handled.
    ///
    /// A waived notice period removes the notice recovery from the settlement;
    /// the status is therefore frozen once a settlement has been calculated.
    ///
    /// # Errors
    ///
    /// - `InvalidTransition` if the request is completed or cancelled
    /// - `SettlementAlreadyCalculated` if a settlement exists
    pub fn update_notice_period(
        &self,
        id: Uuid,
        status: NoticePeriodStatus,
    ) -> EngineResult<SeparationRequest> {
        let updated = self.separations.update(id, &mut |request| {
            Self::ensure_open(request, "notice_period", status.as_str())?;
            if request.settlement.is_some() {
                return Err(EngineError::SettlementAlreadyCalculated { id });
            }

            request.notice_period_status = status;
            request.updated_at = Utc::now();
            Ok(())
        })?;

        info!(separation_id = %id, status = %status, "Notice period status updated");
        Ok(updated)
    }

    /// Records the progress of the exit interview.
    ///
    /// # Errors
    ///
    /// `InvalidTransition` if the request is completed or cancelled.
    pub fn update_exit_interview(
        &self,
        id: Uuid,
        status: ExitInterviewStatus,
    ) -> EngineResult<SeparationRequest> {
        let updated = self.separations.update(id, &mut |request| {
            Self::ensure_open(request, "exit_interview", status.as_str())?;

            request.exit_interview_status = status;
            request.updated_at = Utc::now();
            Ok(())
        })?;

        info!(separation_id = %id, status = %status, "Exit interview status updated");
        Ok(updated)
    }

    /// Computes and stores the full-and-final settlement.
    ///
    /// The required notice comes from the designation captured at initiation
    /// (zero when the notice period was waived), the days served from the
    /// request and last working dates, and the balances from the employee
    /// directory at calculation time.
    ///
    /// # Errors
    ///
    /// - `InvalidTransition` unless the request is `pending_fnf`
    /// - `SettlementAlreadyCalculated` if a settlement exists
    /// - `ValidationError` from the calculation
    pub fn calculate_settlement(
        &self,
        id: Uuid,
        reimbursements: Decimal,
        as_of: NaiveDate,
    ) -> EngineResult<SettlementRecord> {
        let employee_id = self.separations.get(id)?.employee_id;
        let employee = self.employees.get_employee(&employee_id)?;

        let updated = self.separations.update(id, &mut |request| {
            if request.status != SeparationStatus::PendingFnf {
                return Err(EngineError::InvalidTransition {
                    entity: "settlement".to_string(),
                    from: request.status.to_string(),
                    to: FnfStatus::Calculated.to_string(),
                });
            }
            if request.settlement.is_some() {
                return Err(EngineError::SettlementAlreadyCalculated { id });
            }

            let separation = self.separation_context(request, reimbursements);
            let result = compute_settlement_with_policy(
                &employee,
                &separation,
                as_of,
                self.config.settlement(),
            )
            .inspect_err(|err| {
                warn!(separation_id = %id, error = %err, "Settlement calculation rejected");
            })?;

            info!(
                separation_id = %id,
                employee_id = %employee.id,
                notice_period_status = %request.notice_period_status,
                notice_shortfall = separation.notice_shortfall(),
                net_payable = %result.totals.net_payable,
                "Settlement calculated"
            );

            let now = Utc::now();
            request.settlement = Some(SettlementRecord::calculated(result, now));
            request.updated_at = now;
            Ok(())
        })?;

        updated
            .settlement
            .ok_or(EngineError::SettlementMissing { id })
    }

    /// Approves the calculated settlement of a request awaiting settlement.
    ///
    /// # Errors
    ///
    /// - `InvalidTransition` unless the request is `pending_fnf` and its
    ///   settlement is `calculated`
    /// - `SettlementMissing` if no settlement has been calculated
    pub fn approve_settlement(&self, id: Uuid, approver: &str) -> EngineResult<SettlementRecord> {
        let updated = self.separations.update(id, &mut |request| {
            if request.status != SeparationStatus::PendingFnf {
                return Err(EngineError::InvalidTransition {
                    entity: "settlement".to_string(),
                    from: request.status.to_string(),
                    to: FnfStatus::Approved.to_string(),
                });
            }

            let now = Utc::now();
            request
                .settlement
                .as_mut()
                .ok_or(EngineError::SettlementMissing { id })?
                .approve(approver, now)?;
            request.updated_at = now;
            Ok(())
        })?;

        info!(separation_id = %id, approver = %approver, "Settlement approved");
        updated
            .settlement
            .ok_or(EngineError::SettlementMissing { id })
    }

    /// Records payment of the approved settlement and completes the separation.
    ///
    /// # Errors
    ///
    /// - `InvalidTransition` unless the request is `pending_fnf` and its
    ///   settlement is `approved`
    /// - `SettlementMissing` if no settlement has been calculated
    pub fn mark_paid(&self, id: Uuid, payment_reference: &str) -> EngineResult<SeparationRequest> {
        let updated = self.separations.update(id, &mut |request| {
            if !request.status.can_transition_to(SeparationStatus::Completed) {
                return Err(EngineError::InvalidTransition {
                    entity: "separation".to_string(),
                    from: request.status.to_string(),
                    to: SeparationStatus::Completed.to_string(),
                });
            }

            request
                .settlement
                .as_mut()
                .ok_or(EngineError::SettlementMissing { id })?
                .mark_paid(payment_reference, Utc::now())?;
            Self::transition(request, SeparationStatus::Completed)
        })?;

        info!(
            separation_id = %id,
            payment_reference = %payment_reference,
            net_payable = ?updated.settlement.as_ref().map(|s| s.result().totals.net_payable),
            "Settlement paid"
        );
        Ok(updated)
    }

    /// Withdraws a request that has not completed.
    pub fn cancel(&self, id: Uuid) -> EngineResult<SeparationRequest> {
        self.separations.update(id, &mut |request| {
            Self::transition(request, SeparationStatus::Cancelled)
        })
    }

    /// Returns one request.
    pub fn get(&self, id: Uuid) -> EngineResult<SeparationRequest> {
        self.separations.get(id)
    }

    /// Returns all requests, oldest first.
    pub fn list(&self) -> EngineResult<Vec<SeparationRequest>> {
        self.separations.list()
    }

    /// Dashboard counts over all requests.
    pub fn summary(&self) -> EngineResult<OffboardingSummary> {
        Ok(OffboardingSummary::from_requests(&self.separations.list()?))
    }

    fn separation_context(
        &self,
        request: &SeparationRequest,
        reimbursements: Decimal,
    ) -> SeparationContext {
        let required_notice_days = match request.notice_period_status {
            NoticePeriodStatus::Waived => 0,
            _ => required_notice_days_with_policy(&request.designation, self.config.notice()),
        };

        SeparationContext {
            request_date: request.request_date,
            last_working_date: request.last_working_date,
            required_notice_days,
            notice_days_served: request.notice_days_served(),
            reimbursements,
        }
    }

    fn ensure_open(request: &SeparationRequest, entity: &str, to: &str) -> EngineResult<()> {
        if request.status.is_terminal() {
            return Err(EngineError::InvalidTransition {
                entity: entity.to_string(),
                from: request.status.to_string(),
                to: to.to_string(),
            });
        }
        Ok(())
    }

    fn transition(request: &mut SeparationRequest, next: SeparationStatus) -> EngineResult<()> {
        if !request.status.can_transition_to(next) {
            warn!(
                separation_id = %request.id,
                from = %request.status,
                to = %next,
                "Rejected separation transition"
            );
            return Err(EngineError::InvalidTransition {
                entity: "separation".to_string(),
                from: request.status.to_string(),
                to: next.to_string(),
            });
        }

        info!(
            separation_id = %request.id,
            from = %request.status,
            to = %next,
            "Separation status changed"
        );
        request.status = next;
        request.updated_at = Utc::now();
        Ok(())
    }
}

fn clearance_label(status: ClearanceStatus) -> &'static str {
    match status {
        ClearanceStatus::Pending => "pending",
        ClearanceStatus::Cleared => "cleared",
        ClearanceStatus::NotApplicable => "not_applicable",
    }
}
