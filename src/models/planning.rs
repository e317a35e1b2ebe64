//! Working-hour calendars.
//!
//! A [`WeeklyPlanning`] assigns at most one [`DayPlanning`] to each
//! weekday. A day has up to two shifts (morning and afternoon); either
//! half may be absent when the employee does not work that part of the day.
//!
//! # Containment
//! An interval is covered by a day only if it fits entirely inside one
//! shift. Intervals straddling the midday gap are never covered, even when
//! both shifts together would span them.

use chrono::{Datelike, NaiveDate, NaiveTime, Weekday};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Half of a working day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Shift {
    /// First period of the day.
    Morning,
    /// Second period of the day.
    Afternoon,
}

/// Working-hour bounds for one day.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayPlanning {
    /// Start of the morning shift.
    pub morning_from: Option<NaiveTime>,
    /// End of the morning shift.
    pub morning_to: Option<NaiveTime>,
    /// Start of the afternoon shift.
    pub afternoon_from: Option<NaiveTime>,
    /// End of the afternoon shift.
    pub afternoon_to: Option<NaiveTime>,
}

impl DayPlanning {
    /// Creates a day with no working hours.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the morning shift.
    pub fn with_morning(mut self, from: NaiveTime, to: NaiveTime) -> Self {
        self.morning_from = Some(from);
        self.morning_to = Some(to);
        self
    }

    /// Sets the afternoon shift.
    pub fn with_afternoon(mut self, from: NaiveTime, to: NaiveTime) -> Self {
        self.afternoon_from = Some(from);
        self.afternoon_to = Some(to);
        self
    }

    /// Bounds of a shift, if both ends are set.
    pub fn shift_bounds(&self, shift: Shift) -> Option<(NaiveTime, NaiveTime)> {
        let (from, to) = match shift {
            Shift::Morning => (self.morning_from, self.morning_to),
            Shift::Afternoon => (self.afternoon_from, self.afternoon_to),
        };
        Some((from?, to?))
    }

    /// Returns the shift that fully covers `[start, end]`, morning first.
    pub fn covering_shift(&self, start: NaiveTime, end: NaiveTime) -> Option<Shift> {
        [Shift::Morning, Shift::Afternoon]
            .into_iter()
            .find(|&shift| match self.shift_bounds(shift) {
                Some((from, to)) => from <= start && to >= end,
                None => false,
            })
    }

    /// Shifts whose `from` is later than `to`.
    pub fn inverted_shifts(&self) -> Vec<Shift> {
        [Shift::Morning, Shift::Afternoon]
            .into_iter()
            .filter(|&shift| matches!(self.shift_bounds(shift), Some((from, to)) if from > to))
            .collect()
    }
}

/// An employee's weekly working-hour calendar.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeeklyPlanning {
    /// Unique planning identifier.
    pub id: String,
    /// Human-readable name.
    pub name: String,
    /// Day plannings keyed by weekday.
    pub days: HashMap<Weekday, DayPlanning>,
}

impl WeeklyPlanning {
    /// Creates an empty planning (no working days).
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: String::new(),
            days: HashMap::new(),
        }
    }

    /// Sets the planning name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Sets the planning for a weekday.
    pub fn with_day(mut self, weekday: Weekday, day: DayPlanning) -> Self {
        self.days.insert(weekday, day);
        self
    }

    /// Applies the same day planning Monday through Friday.
    pub fn with_weekdays(mut self, day: DayPlanning) -> Self {
        for weekday in [
            Weekday::Mon,
            Weekday::Tue,
            Weekday::Wed,
            Weekday::Thu,
            Weekday::Fri,
        ] {
            self.days.insert(weekday, day.clone());
        }
        self
    }

    /// Day planning for a calendar date, if that weekday is planned.
    pub fn day_planning(&self, date: NaiveDate) -> Option<&DayPlanning> {
        self.days.get(&date.weekday())
    }
}

#[cfg(test)]
pub(crate) fn hm(h: u32, m: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(h, m, 0).unwrap()
}

#[cfg(test)]
pub(crate) fn office_day() -> DayPlanning {
    DayPlanning::new()
        .with_morning(hm(8, 0), hm(12, 0))
        .with_afternoon(hm(13, 0), hm(17, 0))
}
