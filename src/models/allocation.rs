//! Resource allocation and commitment models.
//!
//! A [`ResourceAllocation`] links an operation to a human resource for a
//! duration. Once it names an employee, that employee holds a
//! [`Commitment`] for the operation's planned interval until the
//! operation is cancelled.

use serde::{Deserialize, Serialize};

use super::{OperationStatus, TimeInterval};

/// A human-resource line of an operation (or a work-center template).
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ResourceAllocation {
    /// Product describing the resource (e.g. a labour-hour article).
    pub product: Option<String>,
    /// Assigned employee. Never cleared automatically once set.
    pub employee: Option<String>,
    /// Owning operation. `None` for templates and detached copies.
    pub operation_id: Option<String>,
    /// Allocated duration (seconds).
    pub duration_secs: i64,
}

impl ResourceAllocation {
    /// Creates an unstaffed allocation.
    pub fn new(duration_secs: i64) -> Self {
        Self {
            duration_secs,
            ..Default::default()
        }
    }

    /// Sets the product.
    pub fn with_product(mut self, product: impl Into<String>) -> Self {
        self.product = Some(product.into());
        self
    }

    /// Sets the employee.
    pub fn with_employee(mut self, employee_id: impl Into<String>) -> Self {
        self.employee = Some(employee_id.into());
        self
    }

    /// Attaches the allocation to an operation.
    pub fn with_operation(mut self, operation_id: impl Into<String>) -> Self {
        self.operation_id = Some(operation_id.into());
        self
    }

    /// Whether an employee is assigned.
    #[inline]
    pub fn is_staffed(&self) -> bool {
        self.employee.is_some()
    }

    /// Duplicates product, duration and employee, detached from any operation.
    pub fn duplicate(&self) -> Self {
        Self {
            product: self.product.clone(),
            employee: self.employee.clone(),
            operation_id: None,
            duration_secs: self.duration_secs,
        }
    }
}

/// An employee's hold on an interval through an operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Commitment {
    /// Committed employee.
    pub employee_id: String,
    /// Operation the commitment comes from.
    pub operation_id: String,
    /// Committed interval (the operation's planned interval).
    pub interval: TimeInterval,
    /// Status of the owning operation.
    pub status: OperationStatus,
}

impl Commitment {
    /// Creates a commitment.
    pub fn new(
        employee_id: impl Into<String>,
        operation_id: impl Into<String>,
        interval: TimeInterval,
        status: OperationStatus,
    ) -> Self {
        Self {
            employee_id: employee_id.into(),
            operation_id: operation_id.into(),
            interval,
            status,
        }
    }

    /// Whether the commitment takes part in conflict checks.
    #[inline]
    pub fn is_active(&self) -> bool {
        !self.status.is_cancelled()
    }
}
