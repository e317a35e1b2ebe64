//! Employee availability and assignment for the U-Engine ecosystem.
//!
//! Staffs manufacturing operations with employees so that nobody is
//! double-booked and every assignment falls inside the employee's working
//! hours. The host application supplies operations, work-center templates
//! and working-hour calendars through collaborator traits, and persists
//! the results.
//!
//! # Modules
//!
//! - **`models`**: Domain types — `Employee`, `WeeklyPlanning`,
//!   `DayPlanning`, `Operation`, `ResourceAllocation`, `Commitment`
//! - **`availability`**: Overlap predicate, working-hours containment check
//!   and `AvailabilityResolver`
//! - **`assignment`**: `AssignmentBuilder` — staffs allocations and records
//!   commitments under a commit lock
//! - **`directory`**: `LocalDirectory`, an in-memory implementation of every
//!   collaborator trait
//! - **`config`**: `ResolverConfig` (overlap convention, selection order)
//! - **`validation`**: Input integrity checks (duplicate IDs, dangling
//!   references, inverted bounds)
//!
//! # Scope
//!
//! Intervals spanning midnight are never staffed. Candidate selection is
//! first-fit; there is no load balancing across employees.

pub mod assignment;
pub mod availability;
pub mod config;
pub mod directory;
pub mod error;
pub mod models;
pub mod validation;

pub use error::{StaffingError, StaffingResult};
