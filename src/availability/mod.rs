//! Employee availability resolution.
//!
//! Decides which employees can staff a requested interval: nobody already
//! committed to an overlapping interval, and only people whose working
//! hours cover the whole interval inside a single shift.
//!
//! # Components
//!
//! - **Overlap predicate** ([`intervals_overlap`]): the one boundary test
//!   used by every conflict check.
//! - **Containment check** ([`check_containment`]): single-shift coverage
//!   against the employee's day planning.
//! - **Resolver** ([`AvailabilityResolver`]): single-candidate and
//!   candidate-set modes over injected collaborators.
//!
//! # Concurrency
//!
//! Resolution is a read-only, bounded scan. It gives no exclusivity on its
//! own; selection and commit must be serialized by the caller (see
//! [`AssignmentBuilder`](crate::assignment::AssignmentBuilder)).

mod collaborators;
mod containment;
mod overlap;
mod resolver;

pub use collaborators::{CommitmentIndex, CommitmentLedger, EmployeePool, PlanningLookup};
pub use containment::{check_containment, Containment};
pub use overlap::{conflicted_employees, has_conflict, intervals_overlap};
pub use resolver::{AvailabilityResolver, CandidateSet};
