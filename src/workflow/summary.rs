//! Offboarding dashboard counts.

use serde::{Deserialize, Serialize};

use crate::models::{FnfStatus, SeparationRequest, SeparationStatus};

/// Headline counts across all separation requests.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OffboardingSummary {
    /// All requests, whatever their state.
    pub total: usize,
    /// Requests not yet completed or cancelled.
    pub active: usize,
    /// Requests in clearance with at least one department outstanding.
    pub clearance_pending: usize,
    /// Non-cancelled requests whose settlement is not yet approved.
    pub fnf_pending: usize,
    /// Requests paid out and closed.
    pub completed: usize,
    /// Requests withdrawn.
    pub cancelled: usize,
    /// Non-cancelled requests whose exit interview has not taken place.
    pub exit_interview_pending: usize,
}

impl OffboardingSummary {
    /// Tallies the given requests.
    pub fn from_requests(requests: &[SeparationRequest]) -> Self {
        let mut summary = Self {
            total: requests.len(),
            ..Self::default()
        };

        for request in requests {
            match request.status {
                SeparationStatus::Completed => summary.completed += 1,
                SeparationStatus::Cancelled => summary.cancelled += 1,
                _ => summary.active += 1,
            }

            if request.status == SeparationStatus::InProgress && !request.is_fully_cleared() {
                summary.clearance_pending += 1;
            }

            if request.status != SeparationStatus::Cancelled
                && matches!(request.fnf_status(), FnfStatus::Pending | FnfStatus::Calculated)
            {
                summary.fnf_pending += 1;
            }

            if request.status != SeparationStatus::Cancelled
                && request.exit_interview_status.is_outstanding()
            {
                summary.exit_interview_pending += 1;
            }
        }

        summary
    }
}
