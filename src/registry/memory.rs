//! In-memory registry implementations.

use std::collections::HashMap;
use std::sync::{PoisonError, RwLock};

use uuid::Uuid;

use crate::error::{EngineError, EngineResult};
use crate::models::{EmployeeRecord, SeparationRequest};

use super::{EmployeeDirectory, SeparationRepository};

fn poisoned<T>(_: PoisonError<T>) -> EngineError {
    EngineError::StorageError {
        message: "lock poisoned".to_string(),
    }
}

/// Employee directory held in a `HashMap`.
#[derive(Debug, Default)]
pub struct InMemoryEmployeeDirectory {
    employees: RwLock<HashMap<String, EmployeeRecord>>,
}

impl InMemoryEmployeeDirectory {
    /// Creates an empty directory.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds or replaces an employee.
    pub fn insert(&self, employee: EmployeeRecord) -> EngineResult<()> {
        self.employees
            .write()
            .map_err(poisoned)?
            .insert(employee.id.clone(), employee);
        Ok(())
    }
}

impl FromIterator<EmployeeRecord> for InMemoryEmployeeDirectory {
    fn from_iter<I: IntoIterator<Item = EmployeeRecord>>(iter: I) -> Self {
        let employees = iter
            .into_iter()
            .map(|employee| (employee.id.clone(), employee))
            .collect();
        Self {
            employees: RwLock::new(employees),
        }
    }
}

impl EmployeeDirectory for InMemoryEmployeeDirectory {
    fn get_employee(&self, employee_id: &str) -> EngineResult<EmployeeRecord> {
        self.employees
            .read()
            .map_err(poisoned)?
            .get(employee_id)
            .cloned()
            .ok_or_else(|| EngineError::EmployeeNotFound {
                employee_id: employee_id.to_string(),
            })
    }
}

/// Separation repository held in a `HashMap`.
#[derive(Debug, Default)]
pub struct InMemorySeparationRepository {
    requests: RwLock<HashMap<Uuid, SeparationRequest>>,
}

impl InMemorySeparationRepository {
    /// Creates an empty repository.
    pub fn new() -> Self {
        Self::default()
    }
}

impl SeparationRepository for InMemorySeparationRepository {
    fn get(&self, id: Uuid) -> EngineResult<SeparationRequest> {
        self.requests
            .read()
            .map_err(poisoned)?
            .get(&id)
            .cloned()
            .ok_or(EngineError::SeparationNotFound { id })
    }

    fn save(&self, request: SeparationRequest) -> EngineResult<()> {
        self.requests
            .write()
            .map_err(poisoned)?
            .insert(request.id, request);
        Ok(())
    }

    fn create(&self, request: SeparationRequest) -> EngineResult<()> {
        let mut requests = self.requests.write().map_err(poisoned)?;

        if requests.contains_key(&request.id) {
            return Err(EngineError::StorageError {
                message: format!("separation request {} already exists", request.id),
            });
        }
        let has_open_request = requests.values().any(|existing| {
            existing.employee_id == request.employee_id && !existing.status.is_terminal()
        });
        if has_open_request {
            return Err(EngineError::validation(
                "employee_id",
                format!("{} already has an open separation request", request.employee_id),
            ));
        }

        requests.insert(request.id, request);
        Ok(())
    }

    fn update(
        &self,
        id: Uuid,
        apply: &mut dyn FnMut(&mut SeparationRequest) -> EngineResult<()>,
    ) -> EngineResult<SeparationRequest> {
        let mut requests = self.requests.write().map_err(poisoned)?;
        let stored = requests
            .get_mut(&id)
            .ok_or(EngineError::SeparationNotFound { id })?;

        let mut updated = stored.clone();
        apply(&mut updated)?;
        *stored = updated.clone();
        Ok(updated)
    }

    fn list(&self) -> EngineResult<Vec<SeparationRequest>> {
        let mut requests: Vec<SeparationRequest> =
            self.requests.read().map_err(poisoned)?.values().cloned().collect();
        requests.sort_by(|a, b| a.created_at.cmp(&b.created_at).then(a.id.cmp(&b.id)));
        Ok(requests)
    }
}
