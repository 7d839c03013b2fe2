//! Core data models for the Settlement Engine.
//!
//! This module contains all the domain models used throughout the engine.

mod employee;
mod separation;
mod settlement_record;
mod settlement_result;

pub use employee::EmployeeRecord;
pub use separation::{
    ClearanceItem, ClearanceStatus, ExitInterviewStatus, NoticePeriodStatus, SeparationContext,
    SeparationRequest, SeparationStatus,
};
pub use settlement_record::{FnfStatus, SettlementRecord};
pub use settlement_result::{
    AuditStep, AuditTrace, LineCategory, SettlementBreakdownLine, SettlementResult,
    SettlementTotals,
};
