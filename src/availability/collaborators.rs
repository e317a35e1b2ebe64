//! Collaborator interfaces.
//!
//! The resolver never reaches for global state: commitment queries, the
//! employee pool and working-hour lookups are injected through these
//! traits. Shared references and `Arc`s of an implementation implement the
//! traits too, so one store can back several collaborators at once.

use chrono::NaiveDate;
use std::collections::HashSet;
use std::sync::Arc;

use crate::config::OverlapConvention;
use crate::error::StaffingResult;
use crate::models::{Commitment, DayPlanning, Employee, TimeInterval};

/// Read side of the commitment store.
pub trait CommitmentIndex {
    /// Ids of employees holding an active commitment overlapping `interval`.
    fn find_overlapping_commitments(
        &self,
        interval: &TimeInterval,
        convention: OverlapConvention,
    ) -> StaffingResult<HashSet<String>>;
}

/// Source of candidate employees.
pub trait EmployeePool {
    /// All employees except `conflicted`, in the store's own order.
    fn employees_excluding(&self, conflicted: &HashSet<String>) -> StaffingResult<Vec<Employee>>;
}

/// Working-hour calendar lookup.
pub trait PlanningLookup {
    /// Day planning of a weekly planning for a date.
    ///
    /// `Ok(None)` when that day is not planned. Fails only when
    /// `weekly_planning_id` does not resolve.
    fn day_planning_for(
        &self,
        weekly_planning_id: &str,
        date: NaiveDate,
    ) -> StaffingResult<Option<DayPlanning>>;
}

/// Write side of the commitment store.
pub trait CommitmentLedger {
    /// Records a new commitment.
    fn record_commitment(&self, commitment: Commitment) -> StaffingResult<()>;

    /// Moves every commitment of an operation to a new interval.
    fn reschedule_operation(
        &self,
        operation_id: &str,
        interval: &TimeInterval,
    ) -> StaffingResult<()>;

    /// Drops every commitment of an operation. Returns how many were dropped.
    fn release_operation(&self, operation_id: &str) -> StaffingResult<usize>;
}

macro_rules! forward_collaborators {
    ($($ptr:ty),*) => {$(
        impl<T: CommitmentIndex + ?Sized> CommitmentIndex for $ptr {
            fn find_overlapping_commitments(
                &self,
                interval: &TimeInterval,
                convention: OverlapConvention,
            ) -> StaffingResult<HashSet<String>> {
                (**self).find_overlapping_commitments(interval, convention)
            }
        }

        impl<T: EmployeePool + ?Sized> EmployeePool for $ptr {
            fn employees_excluding(
                &self,
                conflicted: &HashSet<String>,
            ) -> StaffingResult<Vec<Employee>> {
                (**self).employees_excluding(conflicted)
            }
        }

        impl<T: PlanningLookup + ?Sized> PlanningLookup for $ptr {
            fn day_planning_for(
                &self,
                weekly_planning_id: &str,
                date: NaiveDate,
            ) -> StaffingResult<Option<DayPlanning>> {
                (**self).day_planning_for(weekly_planning_id, date)
            }
        }

        impl<T: CommitmentLedger + ?Sized> CommitmentLedger for $ptr {
            fn record_commitment(&self, commitment: Commitment) -> StaffingResult<()> {
                (**self).record_commitment(commitment)
            }

            fn reschedule_operation(
                &self,
                operation_id: &str,
                interval: &TimeInterval,
            ) -> StaffingResult<()> {
                (**self).reschedule_operation(operation_id, interval)
            }

            fn release_operation(&self, operation_id: &str) -> StaffingResult<usize> {
                (**self).release_operation(operation_id)
            }
        }
    )*};
}

forward_collaborators!(&T, Arc<T>);
