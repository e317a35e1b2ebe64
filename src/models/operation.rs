//! Manufacturing operation model.
//!
//! An operation is the schedulable unit staffed by the resolver. It is
//! created from a process line of a manufacturing order, runs on a work
//! center, and carries one [`ResourceAllocation`] per human-resource
//! template of that work center.
//!
//! | Type | Role |
//! |------|------|
//! | `ManufacturingOrder` | Owns operations |
//! | `ProcessLine` | Routing step an operation is created from |
//! | `WorkCenter` | Supplies machine and human-resource templates |
//! | `Operation` | Planned interval + allocations |

use serde::{Deserialize, Serialize};

use super::{ResourceAllocation, TimeInterval};

/// Lifecycle status of an operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum OperationStatus {
    /// Created, not yet planned.
    #[default]
    Draft,
    /// Abandoned. Its allocations no longer commit anyone.
    Cancelled,
    /// Planned on the shop floor calendar.
    Planned,
    /// Started.
    InProgress,
    /// Paused.
    StandBy,
    /// Completed.
    Finished,
    /// Merged into another operation.
    Merged,
}

impl OperationStatus {
    /// Whether allocations under this status are ignored by conflict checks.
    #[inline]
    pub fn is_cancelled(self) -> bool {
        self == OperationStatus::Cancelled
    }
}

/// A manufacturing order (job) owning a list of operations.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ManufacturingOrder {
    /// Unique order identifier.
    pub id: String,
    /// Order sequence number (e.g. "MO-0042"), used in operation names.
    pub sequence: Option<String>,
    /// Whether operations of this order are invoiced to the customer.
    pub is_to_invoice: bool,
    /// Operations of this order.
    pub operations: Vec<Operation>,
}

impl ManufacturingOrder {
    /// Creates an order without sequence or operations.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Default::default()
        }
    }

    /// Sets the order sequence.
    pub fn with_sequence(mut self, sequence: impl Into<String>) -> Self {
        self.sequence = Some(sequence.into());
        self
    }

    /// Marks the order as invoiced.
    pub fn with_invoicing(mut self, is_to_invoice: bool) -> Self {
        self.is_to_invoice = is_to_invoice;
        self
    }

    /// Adds an operation.
    pub fn with_operation(mut self, operation: Operation) -> Self {
        self.operations.push(operation);
        self
    }

    /// Sequence if set, otherwise the order id.
    pub fn display_sequence(&self) -> &str {
        self.sequence.as_deref().unwrap_or(&self.id)
    }
}

/// A routing step of a production process.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProcessLine {
    /// Operation name.
    pub name: String,
    /// Position in the routing.
    pub priority: i32,
    /// Work center running this step.
    pub work_center: Option<String>,
    /// Code of the owning production process.
    pub process_code: Option<String>,
    /// Machine tool used by this step.
    pub machine_tool: Option<String>,
}

impl ProcessLine {
    /// Creates a process line.
    pub fn new(name: impl Into<String>, priority: i32) -> Self {
        Self {
            name: name.into(),
            priority,
            ..Default::default()
        }
    }

    /// Sets the work center.
    pub fn with_work_center(mut self, work_center_id: impl Into<String>) -> Self {
        self.work_center = Some(work_center_id.into());
        self
    }

    /// Sets the process code.
    pub fn with_process_code(mut self, code: impl Into<String>) -> Self {
        self.process_code = Some(code.into());
        self
    }

    /// Sets the machine tool.
    pub fn with_machine_tool(mut self, tool: impl Into<String>) -> Self {
        self.machine_tool = Some(tool.into());
        self
    }
}

/// A work center with its human-resource templates.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WorkCenter {
    /// Unique work center identifier.
    pub id: String,
    /// Human-readable name.
    pub name: String,
    /// Machine installed in the work center.
    pub machine: Option<String>,
    /// Human resources each operation on this work center needs.
    pub human_resources: Vec<ResourceAllocation>,
}

impl WorkCenter {
    /// Creates a work center with no templates.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Default::default()
        }
    }

    /// Sets the name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Sets the machine.
    pub fn with_machine(mut self, machine: impl Into<String>) -> Self {
        self.machine = Some(machine.into());
        self
    }

    /// Adds a human-resource template.
    pub fn with_human_resource(mut self, template: ResourceAllocation) -> Self {
        self.human_resources.push(template);
        self
    }
}

/// A schedulable operation needing staffed allocations.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Operation {
    /// Unique operation identifier.
    pub id: String,
    /// Full name: `"{order sequence}-{priority}-{operation name}"`.
    pub name: String,
    /// Name of the process step.
    pub operation_name: String,
    /// Position in the routing.
    pub priority: i32,
    /// Owning manufacturing order.
    pub manuf_order_id: String,
    /// Work center running the operation.
    pub work_center_id: Option<String>,
    /// Machine used.
    pub machine: Option<String>,
    /// Machine tool used.
    pub machine_tool: Option<String>,
    /// Lifecycle status.
    pub status: OperationStatus,
    /// Whether the operation is invoiced.
    pub is_to_invoice: bool,
    /// Planned interval. `None` = not yet scheduled.
    pub planned: Option<TimeInterval>,
    /// Planned duration (seconds).
    pub planned_duration_secs: i64,
    /// Staffed human resources.
    pub allocations: Vec<ResourceAllocation>,
}

impl Operation {
    /// Creates a draft operation.
    pub fn new(id: impl Into<String>, manuf_order_id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            manuf_order_id: manuf_order_id.into(),
            ..Default::default()
        }
    }

    /// Sets the planned interval and derives the planned duration.
    pub fn with_planned(mut self, interval: TimeInterval) -> Self {
        self.reschedule(interval);
        self
    }

    /// Sets the status.
    pub fn with_status(mut self, status: OperationStatus) -> Self {
        self.status = status;
        self
    }

    /// Adds an allocation.
    pub fn with_allocation(mut self, allocation: ResourceAllocation) -> Self {
        self.allocations.push(allocation);
        self
    }

    /// Moves the operation to a new interval.
    ///
    /// Allocations are not touched; run a resynchronization afterwards.
    pub fn reschedule(&mut self, interval: TimeInterval) {
        self.planned = Some(interval);
        self.planned_duration_secs = interval.duration_secs();
    }

    /// Builds the operation name.
    pub fn compute_name(order: &ManufacturingOrder, priority: i32, operation_name: &str) -> String {
        format!("{}-{}-{}", order.display_sequence(), priority, operation_name)
    }

    /// Number of allocations with an employee.
    pub fn staffed_count(&self) -> usize {
        self.allocations.iter().filter(|a| a.is_staffed()).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::interval::dt;

    #[test]
    fn test_compute_name() {
        let order = ManufacturingOrder::new("42").with_sequence("MO-0042");
        assert_eq!(Operation::compute_name(&order, 10, "Cutting"), "MO-0042-10-Cutting");

        let unsequenced = ManufacturingOrder::new("42");
        assert_eq!(Operation::compute_name(&unsequenced, 20, "Welding"), "42-20-Welding");
    }

    #[test]
    fn test_reschedule_sets_duration() {
        let mut op = Operation::new("OP1", "MO1");
        assert_eq!(op.planned, None);
        assert_eq!(op.status, OperationStatus::Draft);

        op.reschedule(TimeInterval::new(dt("2024-01-10T09:00"), dt("2024-01-10T10:30")));
        assert_eq!(op.planned_duration_secs, 5_400);
    }

    #[test]
    fn test_status_cancelled() {
        assert!(OperationStatus::Cancelled.is_cancelled());
        assert!(!OperationStatus::Planned.is_cancelled());
        assert!(!OperationStatus::Finished.is_cancelled());
    }

    #[test]
    fn test_work_center_builder() {
        let wc = WorkCenter::new("WC1")
            .with_name("Assembly")
            .with_machine("M1")
            .with_human_resource(ResourceAllocation::new(3_600).with_product("Operator"));
        assert_eq!(wc.machine.as_deref(), Some("M1"));
        assert_eq!(wc.human_resources.len(), 1);
    }
}
