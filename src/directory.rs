//! In-memory staffing directory.
//!
//! Implements every collaborator trait over employees, weekly plannings and
//! commitments held in memory. Suitable for unit tests and for embedding
//! when the host application loads its data up front.
//!
//! Employees are returned in insertion order.

use chrono::NaiveDate;
use std::collections::{HashMap, HashSet};
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::availability::{
    conflicted_employees, CommitmentIndex, CommitmentLedger, EmployeePool, PlanningLookup,
};
use crate::config::OverlapConvention;
use crate::error::{StaffingError, StaffingResult};
use crate::models::{
    Commitment, DayPlanning, Employee, OperationStatus, TimeInterval, WeeklyPlanning,
};
use crate::validation::{validate_input, ValidationResult};

/// In-memory directory of employees, plannings and commitments.
///
/// Cloning shares the underlying data.
#[derive(Debug, Clone, Default)]
pub struct LocalDirectory {
    data: Arc<RwLock<DirectoryData>>,
}

#[derive(Debug)]
struct DirectoryData {
    employees: Vec<Employee>,
    plannings: HashMap<String, WeeklyPlanning>,
    commitments: Vec<Commitment>,
    is_healthy: bool,
}

impl Default for DirectoryData {
    fn default() -> Self {
        Self {
            employees: Vec::new(),
            plannings: HashMap::new(),
            commitments: Vec::new(),
            is_healthy: true,
        }
    }
}

impl LocalDirectory {
    /// Creates an empty directory.
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> RwLockReadGuard<'_, DirectoryData> {
        self.data.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, DirectoryData> {
        self.data.write().unwrap_or_else(PoisonError::into_inner)
    }

    fn checked_read(&self) -> StaffingResult<RwLockReadGuard<'_, DirectoryData>> {
        let data = self.read();
        if !data.is_healthy {
            return Err(StaffingError::Collaborator("directory unavailable".into()));
        }
        Ok(data)
    }

    /// Adds an employee at the end of the pool.
    pub fn add_employee(&self, employee: Employee) {
        self.write().employees.push(employee);
    }

    /// Adds or replaces a weekly planning.
    pub fn add_planning(&self, planning: WeeklyPlanning) {
        self.write().plannings.insert(planning.id.clone(), planning);
    }

    /// Adds an existing commitment.
    pub fn add_commitment(&self, commitment: Commitment) {
        self.write().commitments.push(commitment);
    }

    /// Propagates an operation's status to its commitments.
    ///
    /// Returns the number of commitments updated.
    pub fn set_operation_status(&self, operation_id: &str, status: OperationStatus) -> usize {
        let mut data = self.write();
        let mut updated = 0;
        for c in data
            .commitments
            .iter_mut()
            .filter(|c| c.operation_id == operation_id)
        {
            c.status = status;
            updated += 1;
        }
        updated
    }

    /// Simulates an unavailable backend for failure tests.
    pub fn set_healthy(&self, healthy: bool) {
        self.write().is_healthy = healthy;
    }

    /// Commitments held by an employee.
    pub fn commitments_for(&self, employee_id: &str) -> Vec<Commitment> {
        self.read()
            .commitments
            .iter()
            .filter(|c| c.employee_id == employee_id)
            .cloned()
            .collect()
    }

    /// Number of stored commitments.
    pub fn commitment_count(&self) -> usize {
        self.read().commitments.len()
    }

    /// Number of stored employees.
    pub fn employee_count(&self) -> usize {
        self.read().employees.len()
    }

    /// Validates the stored data.
    pub fn validate(&self) -> ValidationResult {
        let data = self.read();
        let plannings: Vec<WeeklyPlanning> = data.plannings.values().cloned().collect();
        validate_input(&data.employees, &plannings, &data.commitments)
    }
}

impl CommitmentIndex for LocalDirectory {
    fn find_overlapping_commitments(
        &self,
        interval: &TimeInterval,
        convention: OverlapConvention,
    ) -> StaffingResult<HashSet<String>> {
        let data = self.checked_read()?;
        Ok(conflicted_employees(&data.commitments, interval, convention))
    }
}

impl EmployeePool for LocalDirectory {
    fn employees_excluding(&self, conflicted: &HashSet<String>) -> StaffingResult<Vec<Employee>> {
        let data = self.checked_read()?;
        Ok(data
            .employees
            .iter()
            .filter(|e| !conflicted.contains(&e.id))
            .cloned()
            .collect())
    }
}

impl PlanningLookup for LocalDirectory {
    fn day_planning_for(
        &self,
        weekly_planning_id: &str,
        date: NaiveDate,
    ) -> StaffingResult<Option<DayPlanning>> {
        let data = self.checked_read()?;
        let planning = data
            .plannings
            .get(weekly_planning_id)
            .ok_or_else(|| StaffingError::UnknownPlanning(weekly_planning_id.to_string()))?;
        Ok(planning.day_planning(date).cloned())
    }
}

impl CommitmentLedger for LocalDirectory {
    fn record_commitment(&self, commitment: Commitment) -> StaffingResult<()> {
        let mut data = self.write();
        if !data.is_healthy {
            return Err(StaffingError::Collaborator("directory unavailable".into()));
        }
        data.commitments.push(commitment);
        Ok(())
    }

    fn reschedule_operation(
        &self,
        operation_id: &str,
        interval: &TimeInterval,
    ) -> StaffingResult<()> {
        let mut data = self.write();
        if !data.is_healthy {
            return Err(StaffingError::Collaborator("directory unavailable".into()));
        }
        for c in data
            .commitments
            .iter_mut()
            .filter(|c| c.operation_id == operation_id)
        {
            c.interval = *interval;
        }
        Ok(())
    }

    fn release_operation(&self, operation_id: &str) -> StaffingResult<usize> {
        let mut data = self.write();
        if !data.is_healthy {
            return Err(StaffingError::Collaborator("directory unavailable".into()));
        }
        let before = data.commitments.len();
        data.commitments.retain(|c| c.operation_id != operation_id);
        Ok(before - data.commitments.len())
    }
}
