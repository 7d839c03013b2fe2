//! Storage seams for the separation workflow.
//!
//! The workflow only talks to these traits: [`EmployeeDirectory`] supplies
//! employee data by ID and [`SeparationRepository`] stores separation
//! requests. The in-memory implementations back tests and embedding callers
//! that bring no database of their own.

mod memory;

pub use memory::{InMemoryEmployeeDirectory, InMemorySeparationRepository};

use uuid::Uuid;

use crate::error::EngineResult;
use crate::models::{EmployeeRecord, SeparationRequest};

/// Read-only source of employee compensation and tenure data.
pub trait EmployeeDirectory: Send + Sync {
    /// Returns the employee, or `EmployeeNotFound`.
    fn get_employee(&self, employee_id: &str) -> EngineResult<EmployeeRecord>;
}

/// Store of separation requests keyed by ID.
///
/// `create` and `update` are atomic: concurrent callers never observe or
/// overwrite a half-applied change.
pub trait SeparationRepository: Send + Sync {
    /// Returns the request, or `SeparationNotFound`.
    fn get(&self, id: Uuid) -> EngineResult<SeparationRequest>;
    /// Inserts or replaces the request with the same ID.
    fn save(&self, request: SeparationRequest) -> EngineResult<()>;
    /// Inserts a new request unless its employee already has an open one
    /// (`ValidationError` on `employee_id`) or the ID is taken (`StorageError`).
    fn create(&self, request: SeparationRequest) -> EngineResult<()>;
    /// Applies `apply` to the stored request and returns the result.
    ///
    /// When `apply` fails the stored request is left untouched and its error
    /// is returned.
    fn update(
        &self,
        id: Uuid,
        apply: &mut dyn FnMut(&mut SeparationRequest) -> EngineResult<()>,
    ) -> EngineResult<SeparationRequest>;
    /// Returns all requests, oldest first.
    fn list(&self) -> EngineResult<Vec<SeparationRequest>>;
}
