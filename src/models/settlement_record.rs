//! Settlement lifecycle: approval and payment metadata attached to a computed
//! [`SettlementResult`].

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::SettlementResult;
use crate::error::{EngineError, EngineResult};

/// Status of a full-and-final settlement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FnfStatus {
    /// Not yet calculated.
    Pending,
    /// Breakdown computed, awaiting approval.
    Calculated,
    /// Approved for payment.
    Approved,
    /// Paid out to the employee.
    Paid,
}

impl FnfStatus {
    /// The snake_case name used in serialized form.
    pub fn as_str(self) -> &'static str {
        match self {
            FnfStatus::Pending => "pending",
            FnfStatus::Calculated => "calculated",
            FnfStatus::Approved => "approved",
            FnfStatus::Paid => "paid",
        }
    }
}

impl fmt::Display for FnfStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A computed settlement together with its approval and payment metadata.
///
/// The wrapped result is private and only readable: approving or paying a
/// settlement attaches metadata but never touches the breakdown.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SettlementRecord {
    result: SettlementResult,
    status: FnfStatus,
    calculated_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    approved_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    approved_by: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    paid_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    payment_reference: Option<String>,
}

impl SettlementRecord {
    /// Wraps a freshly computed result in the `calculated` state.
    pub fn calculated(result: SettlementResult, calculated_at: DateTime<Utc>) -> Self {
        Self {
            result,
            status: FnfStatus::Calculated,
            calculated_at,
            approved_at: None,
            approved_by: None,
            paid_at: None,
            payment_reference: None,
        }
    }

    /// The computed breakdown.
    pub fn result(&self) -> &SettlementResult {
        &self.result
    }

    /// Current lifecycle status.
    pub fn status(&self) -> FnfStatus {
        self.status
    }

    /// When the breakdown was computed.
    pub fn calculated_at(&self) -> DateTime<Utc> {
        self.calculated_at
    }

    /// When the settlement was approved.
    pub fn approved_at(&self) -> Option<DateTime<Utc>> {
        self.approved_at
    }

    /// Who approved the settlement.
    pub fn approved_by(&self) -> Option<&str> {
        self.approved_by.as_deref()
    }

    /// When the settlement was paid.
    pub fn paid_at(&self) -> Option<DateTime<Utc>> {
        self.paid_at
    }

    /// The payment reference recorded at payout.
    pub fn payment_reference(&self) -> Option<&str> {
        self.payment_reference.as_deref()
    }

    /// Moves `calculated → approved`.
    pub fn approve(&mut self, approver: impl Into<String>, at: DateTime<Utc>) -> EngineResult<()> {
        self.advance(FnfStatus::Calculated, FnfStatus::Approved)?;
        self.approved_by = Some(approver.into());
        self.approved_at = Some(at);
        Ok(())
    }

    /// Moves `approved → paid`.
    pub fn mark_paid(
        &mut self,
        reference: impl Into<String>,
        at: DateTime<Utc>,
    ) -> EngineResult<()> {
        self.advance(FnfStatus::Approved, FnfStatus::Paid)?;
        self.payment_reference = Some(reference.into());
        self.paid_at = Some(at);
        Ok(())
    }

    fn advance(&mut self, expected: FnfStatus, next: FnfStatus) -> EngineResult<()> {
        if self.status != expected {
            return Err(EngineError::InvalidTransition {
                entity: "settlement".to_string(),
                from: self.status.to_string(),
                to: next.to_string(),
            });
        }
        self.status = next;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{AuditTrace, SettlementTotals};
    use chrono::NaiveDate;

    fn create_record() -> SettlementRecord {
        let result = SettlementResult {
            employee_id: "EMP-001".to_string(),
            as_of: NaiveDate::from_ymd_opt(2025, 3, 31).unwrap(),
            lines: vec![],
            totals: SettlementTotals::from_lines(&[]),
            audit_trace: AuditTrace::default(),
        };
        SettlementRecord::calculated(result, Utc::now())
    }

    #[test]
    fn test_new_record_is_calculated() {
        let record = create_record();
        assert_eq!(record.status(), FnfStatus::Calculated);
        assert!(record.approved_at().is_none());
        assert!(record.paid_at().is_none());
    }

    #[test]
    fn test_approve_then_pay() {
        let mut record = create_record();
        let before = record.result().clone();

        record.approve("hr.manager", Utc::now()).unwrap();
        assert_eq!(record.status(), FnfStatus::Approved);
        assert_eq!(record.approved_by(), Some("hr.manager"));

        record.mark_paid("NEFT-0042", Utc::now()).unwrap();
        assert_eq!(record.status(), FnfStatus::Paid);
        assert_eq!(record.payment_reference(), Some("NEFT-0042"));

        assert_eq!(record.result(), &before);
    }

    #[test]
    fn test_pay_before_approval_is_rejected() {
        let mut record = create_record();
        let err = record.mark_paid("NEFT-0042", Utc::now()).unwrap_err();

        match err {
            EngineError::InvalidTransition { entity, from, to } => {
                assert_eq!(entity, "settlement");
                assert_eq!(from, "calculated");
                assert_eq!(to, "paid");
            }
            other => panic!("Expected InvalidTransition, got {other:?}"),
        }
        assert!(record.paid_at().is_none());
    }

    #[test]
    fn test_double_approval_is_rejected() {
        let mut record = create_record();
        record.approve("hr.manager", Utc::now()).unwrap();
        assert!(record.approve("someone.else", Utc::now()).is_err());
        assert_eq!(record.approved_by(), Some("hr.manager"));
    }

    #[test]
    fn test_fnf_status_serialization() {
        assert_eq!(
            serde_json::to_string(&FnfStatus::Calculated).unwrap(),
            "\"calculated\""
        );
    }
}
