//! Working-hours containment check.

use serde::{Deserialize, Serialize};

use super::PlanningLookup;
use crate::error::StaffingResult;
use crate::models::{Employee, Shift, TimeInterval};

/// Outcome of checking an interval against an employee's working hours.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Containment {
    /// The interval lies entirely within this shift.
    Contained(Shift),
    /// Evaluated: no single shift covers the interval.
    Rejected,
    /// Employee has no weekly planning.
    NoCalendar,
    /// Weekly planning has no entry for the interval's date.
    DayOff,
    /// Interval spans several dates and was not evaluated.
    MultiDay,
}

impl Containment {
    /// Whether the employee can work the whole interval.
    #[inline]
    pub fn is_contained(&self) -> bool {
        matches!(self, Containment::Contained(_))
    }

    /// Whether the working hours were actually compared.
    #[inline]
    pub fn was_evaluated(&self) -> bool {
        matches!(self, Containment::Contained(_) | Containment::Rejected)
    }
}

/// Checks whether `interval` fits inside one of `employee`'s shifts.
///
/// Missing calendars and multi-day intervals are reported as outcomes,
/// not errors. Only a failing planning lookup is an error.
pub fn check_containment<W: PlanningLookup + ?Sized>(
    plannings: &W,
    employee: &Employee,
    interval: &TimeInterval,
) -> StaffingResult<Containment> {
    let Some(planning_id) = employee.weekly_planning.as_deref() else {
        return Ok(Containment::NoCalendar);
    };
    let Some((start, end)) = interval.time_span() else {
        return Ok(Containment::MultiDay);
    };
    let Some(day) = plannings.day_planning_for(planning_id, interval.start_date())? else {
        return Ok(Containment::DayOff);
    };

    Ok(match day.covering_shift(start, end) {
        Some(shift) => Containment::Contained(shift),
        None => Containment::Rejected,
    })
}
