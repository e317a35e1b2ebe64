//! Input validation for staffing data.
//!
//! Checks the structural integrity of employees, weekly plannings and
//! commitments before they are handed to the resolver. Detects:
//! - Duplicate IDs
//! - Employees pointing to unknown weekly plannings
//! - Shifts whose start is after their end
//! - Commitments with inverted intervals
//! - Commitments held by unknown employees

use crate::models::{Commitment, Employee, WeeklyPlanning};
use std::collections::HashSet;

/// Validation result.
pub type ValidationResult = Result<(), Vec<ValidationError>>;

/// A validation error.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    /// Error category.
    pub kind: ValidationErrorKind,
    /// Human-readable description.
    pub message: String,
}

/// Categories of validation errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationErrorKind {
    /// Two entities share the same ID.
    DuplicateId,
    /// An employee references a weekly planning that doesn't exist.
    UnknownPlanning,
    /// A shift ends before it starts.
    InvertedShift,
    /// A commitment ends before it starts.
    InvalidInterval,
    /// A commitment references an employee that doesn't exist.
    UnknownEmployee,
}

impl ValidationError {
    fn new(kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

/// Validates staffing input data.
///
/// Checks:
/// 1. No duplicate weekly planning IDs
/// 2. No duplicate employee IDs
/// 3. Every employee's weekly planning exists
/// 4. Every shift has `from <= to`
/// 5. Every commitment has `start <= end`
/// 6. Every commitment belongs to a known employee
///
/// # Returns
/// `Ok(())` if all checks pass, `Err(errors)` with all detected issues.
pub fn validate_input(
    employees: &[Employee],
    plannings: &[WeeklyPlanning],
    commitments: &[Commitment],
) -> ValidationResult {
    let mut errors = Vec::new();

    let mut planning_ids = HashSet::new();
    for p in plannings {
        if !planning_ids.insert(p.id.as_str()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateId,
                format!("Duplicate weekly planning ID: {}", p.id),
            ));
        }

        for (weekday, day) in &p.days {
            for shift in day.inverted_shifts() {
                errors.push(ValidationError::new(
                    ValidationErrorKind::InvertedShift,
                    format!("Planning '{}' has an inverted {shift:?} shift on {weekday}", p.id),
                ));
            }
        }
    }

    let mut employee_ids = HashSet::new();
    for e in employees {
        if !employee_ids.insert(e.id.as_str()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateId,
                format!("Duplicate employee ID: {}", e.id),
            ));
        }

        if let Some(planning) = &e.weekly_planning {
            if !planning_ids.contains(planning.as_str()) {
                errors.push(ValidationError::new(
                    ValidationErrorKind::UnknownPlanning,
                    format!(
                        "Employee '{}' references unknown weekly planning '{}'",
                        e.id, planning
                    ),
                ));
            }
        }
    }

    for c in commitments {
        if c.interval.validate().is_err() {
            errors.push(ValidationError::new(
                ValidationErrorKind::InvalidInterval,
                format!(
                    "Commitment of '{}' on operation '{}' ends before it starts",
                    c.employee_id, c.operation_id
                ),
            ));
        }

        if !employee_ids.contains(c.employee_id.as_str()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::UnknownEmployee,
                format!(
                    "Operation '{}' commits unknown employee '{}'",
                    c.operation_id, c.employee_id
                ),
            ));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
