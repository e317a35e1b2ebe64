//! Allocation builder.
//!
//! Turns resolver selections into staffed allocations and keeps the
//! commitment ledger in step with them.
//!
//! # Algorithm
//!
//! 1. Create one allocation per human-resource template of the work center.
//! 2. If the operation is planned, select an employee with
//!    [`AvailabilityResolver::resolve_one`].
//! 3. Record the employee's commitment before releasing the commit lock.
//! 4. If any allocation fails, release the commitments already recorded
//!    for the operation.
//!
//! # Concurrency
//! Selection and commit run under one lock, so builders sharing that lock
//! never hand the same employee two overlapping operations. Builders over
//! the same ledger must share the lock (see [`AssignmentBuilder::with_commit_lock`]).

use log::{debug, warn};
use std::sync::{Arc, Mutex, PoisonError};

use crate::availability::{
    AvailabilityResolver, CommitmentIndex, CommitmentLedger, EmployeePool, PlanningLookup,
};
use crate::error::{StaffingError, StaffingResult};
use crate::models::{
    Commitment, ManufacturingOrder, Operation, OperationStatus, ProcessLine, ResourceAllocation,
    TimeInterval, WorkCenter,
};

/// Builds and re-synchronizes staffed allocations.
///
/// # Example
///
/// ```
/// use chrono::{NaiveDate, NaiveTime};
/// use u_staffing::assignment::AssignmentBuilder;
/// use u_staffing::availability::AvailabilityResolver;
/// use u_staffing::directory::LocalDirectory;
/// use u_staffing::models::*;
///
/// let t = |h| NaiveTime::from_hms_opt(h, 0, 0).unwrap();
/// let dir = LocalDirectory::new();
/// dir.add_planning(WeeklyPlanning::new("WP1").with_weekdays(
///     DayPlanning::new().with_morning(t(8), t(12)),
/// ));
/// dir.add_employee(Employee::new("E1").with_weekly_planning("WP1"));
///
/// let builder = AssignmentBuilder::new(AvailabilityResolver::new(&dir, &dir, &dir), &dir);
///
/// let day = NaiveDate::from_ymd_opt(2024, 1, 10).unwrap();
/// let order = ManufacturingOrder::new("1").with_sequence("MO-1");
/// let line = ProcessLine::new("Cutting", 10).with_work_center("WC1");
/// let center = WorkCenter::new("WC1").with_human_resource(ResourceAllocation::new(0));
/// let planned = TimeInterval::new(day.and_time(t(9)), day.and_time(t(10)));
///
/// let op = builder
///     .create_operation("OP1", &order, &line, &[center], Some(planned))
///     .unwrap();
/// assert_eq!(op.name, "MO-1-10-Cutting");
/// assert_eq!(op.allocations[0].employee.as_deref(), Some("E1"));
/// assert_eq!(dir.commitment_count(), 1);
/// ```
#[derive(Debug)]
pub struct AssignmentBuilder<C, P, W, L> {
    resolver: AvailabilityResolver<C, P, W>,
    ledger: L,
    commit_lock: Arc<Mutex<()>>,
}

impl<C, P, W, L> AssignmentBuilder<C, P, W, L>
where
    C: CommitmentIndex,
    P: EmployeePool,
    W: PlanningLookup,
    L: CommitmentLedger,
{
    /// Creates a builder with its own commit lock.
    pub fn new(resolver: AvailabilityResolver<C, P, W>, ledger: L) -> Self {
        Self {
            resolver,
            ledger,
            commit_lock: Arc::new(Mutex::new(())),
        }
    }

    /// Shares a commit lock with other builders over the same ledger.
    pub fn with_commit_lock(mut self, lock: Arc<Mutex<()>>) -> Self {
        self.commit_lock = lock;
        self
    }

    /// Handle to this builder's commit lock.
    pub fn commit_lock(&self) -> Arc<Mutex<()>> {
        Arc::clone(&self.commit_lock)
    }

    /// Underlying resolver.
    pub fn resolver(&self) -> &AvailabilityResolver<C, P, W> {
        &self.resolver
    }

    /// Creates a draft operation for a process line, staffed from the
    /// work center's human-resource templates.
    ///
    /// # Errors
    /// - [`StaffingError::MissingWorkCenter`] if the line has no work center.
    /// - [`StaffingError::UnknownWorkCenter`] if it is not in `work_centers`.
    /// - Any resolver or ledger error while staffing. Commitments already
    ///   recorded for the operation are released first.
    pub fn create_operation(
        &self,
        id: impl Into<String>,
        order: &ManufacturingOrder,
        line: &ProcessLine,
        work_centers: &[WorkCenter],
        planned: Option<TimeInterval>,
    ) -> StaffingResult<Operation> {
        let Some(work_center_id) = line.work_center.as_deref() else {
            return Err(StaffingError::MissingWorkCenter {
                process: line.process_code.clone().unwrap_or_else(|| "null".into()),
                line: line.name.clone(),
            });
        };
        let work_center = work_centers
            .iter()
            .find(|wc| wc.id == work_center_id)
            .ok_or_else(|| StaffingError::UnknownWorkCenter(work_center_id.to_string()))?;

        debug!(
            "Creation of operation {} for manufacturing order {}",
            line.priority,
            order.display_sequence()
        );

        let mut operation = Operation::new(id, order.id.clone());
        operation.name = Operation::compute_name(order, line.priority, &line.name);
        operation.operation_name = line.name.clone();
        operation.priority = line.priority;
        operation.work_center_id = Some(work_center.id.clone());
        operation.machine = work_center.machine.clone();
        operation.machine_tool = line.machine_tool.clone();
        operation.status = OperationStatus::Draft;
        operation.is_to_invoice = order.is_to_invoice;
        if let Some(interval) = planned {
            operation.reschedule(interval);
        }

        let staffed: StaffingResult<Vec<ResourceAllocation>> = work_center
            .human_resources
            .iter()
            .map(|template| self.create_allocation(template, &operation))
            .collect();
        match staffed {
            Ok(allocations) => operation.allocations = allocations,
            Err(err) => {
                if let Err(release_err) = self.ledger.release_operation(&operation.id) {
                    warn!(
                        "Commitments of operation {} not released: {}",
                        operation.id, release_err
                    );
                }
                return Err(err);
            }
        }

        Ok(operation)
    }

    /// Creates an allocation for `operation` from a template.
    ///
    /// Takes the template's product and the operation's planned duration.
    /// The template's employee is not carried over; an employee is resolved
    /// only when the operation has a planned interval.
    pub fn create_allocation(
        &self,
        template: &ResourceAllocation,
        operation: &Operation,
    ) -> StaffingResult<ResourceAllocation> {
        let mut allocation = ResourceAllocation::new(operation.planned_duration_secs)
            .with_operation(operation.id.clone());
        allocation.product = template.product.clone();

        allocation.employee =
            self.staff(&operation.id, operation.planned.as_ref(), operation.status)?;
        Ok(allocation)
    }

    /// Copies an allocation (product, duration, employee), detached from
    /// its operation. No commitment is recorded for the copy.
    pub fn copy_allocation(&self, allocation: &ResourceAllocation) -> ResourceAllocation {
        allocation.duplicate()
    }

    /// Brings allocations in line with a (re)planned operation.
    ///
    /// Every allocation takes the operation's planned duration; unstaffed
    /// ones are offered to the resolver again. Staffed allocations are kept
    /// as they are, even if their employee now conflicts.
    ///
    /// An inverted planned interval is rejected before the ledger is touched.
    pub fn resynchronize(&self, operation: &mut Operation) -> StaffingResult<()> {
        if let Some(interval) = &operation.planned {
            interval.validate()?;
            self.ledger.reschedule_operation(&operation.id, interval)?;
        }

        let planned = operation.planned;
        let duration = operation.planned_duration_secs;
        for allocation in operation.allocations.iter_mut() {
            allocation.duration_secs = duration;
            if allocation.is_staffed() {
                continue;
            }
            allocation.employee = self.staff(&operation.id, planned.as_ref(), operation.status)?;
        }
        Ok(())
    }

    /// Re-synchronizes every operation of a manufacturing order.
    pub fn update_operations(&self, order: &mut ManufacturingOrder) -> StaffingResult<()> {
        for operation in order.operations.iter_mut() {
            if operation.allocations.is_empty() {
                continue;
            }
            self.resynchronize(operation)?;
        }
        Ok(())
    }

    /// Selects an employee and records the commitment under the lock.
    fn staff(
        &self,
        operation_id: &str,
        planned: Option<&TimeInterval>,
        status: OperationStatus,
    ) -> StaffingResult<Option<String>> {
        let Some(interval) = planned else {
            return Ok(None);
        };

        let _guard = self
            .commit_lock
            .lock()
            .unwrap_or_else(PoisonError::into_inner);

        let Some(employee) = self.resolver.resolve_one(Some(interval))? else {
            warn!("Operation {operation_id} left without employee");
            return Ok(None);
        };

        self.ledger.record_commitment(Commitment::new(
            employee.id.clone(),
            operation_id,
            *interval,
            status,
        ))?;
        debug!("Employee {} committed to operation {}", employee.id, operation_id);
        Ok(Some(employee.id))
    }
}
