//! Staffing domain models.
//!
//! Provides the data types the resolver reads and the assignment builder
//! writes. Only the attributes needed for staffing are modelled; the rest
//! of the manufacturing domain belongs to the host application.
//!
//! # Domain Mappings
//!
//! | u-staffing | Manufacturing | Healthcare |
//! |------------|---------------|------------|
//! | Operation | Operation order | Procedure |
//! | ManufacturingOrder | Manufacturing order | Patient case |
//! | Employee | Operator | Nurse |
//! | WeeklyPlanning | Working-hours calendar | Duty roster |
//! | ResourceAllocation | Human-resource line | Staffing slot |

mod allocation;
mod employee;
pub(crate) mod interval;
mod operation;
pub(crate) mod planning;

pub use allocation::{Commitment, ResourceAllocation};
pub use employee::Employee;
pub use interval::TimeInterval;
pub use operation::{ManufacturingOrder, Operation, OperationStatus, ProcessLine, WorkCenter};
pub use planning::{DayPlanning, Shift, WeeklyPlanning};
