//! Time interval model.
//!
//! Operations and commitments are scheduled on wall-clock date-times
//! (no time zone). An interval is *single-day* when both endpoints fall
//! on the same calendar date; only single-day intervals can be matched
//! against an employee's working hours.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::error::{StaffingError, StaffingResult};

/// A planned time interval `[start, end)`.
///
/// Construct with [`TimeInterval::try_new`] to enforce `start <= end`.
/// The fields stay public for deserialization, so the resolver
/// re-validates every interval it receives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TimeInterval {
    /// Planned start.
    pub start: NaiveDateTime,
    /// Planned end.
    pub end: NaiveDateTime,
}

impl TimeInterval {
    /// Creates an interval without checking `start <= end`.
    pub fn new(start: NaiveDateTime, end: NaiveDateTime) -> Self {
        Self { start, end }
    }

    /// Creates an interval, rejecting `start > end`.
    pub fn try_new(start: NaiveDateTime, end: NaiveDateTime) -> StaffingResult<Self> {
        let interval = Self::new(start, end);
        interval.validate()?;
        Ok(interval)
    }

    /// Checks the `start <= end` invariant.
    pub fn validate(&self) -> StaffingResult<()> {
        if self.start > self.end {
            return Err(StaffingError::InvalidInterval {
                start: self.start,
                end: self.end,
            });
        }
        Ok(())
    }

    /// Length of the interval in whole seconds.
    #[inline]
    pub fn duration_secs(&self) -> i64 {
        (self.end - self.start).num_seconds()
    }

    /// Whether both endpoints fall on the same calendar date.
    #[inline]
    pub fn is_single_day(&self) -> bool {
        self.start.date() == self.end.date()
    }

    /// Calendar date of the start.
    #[inline]
    pub fn start_date(&self) -> NaiveDate {
        self.start.date()
    }

    /// Time-of-day span, available only for single-day intervals.
    pub fn time_span(&self) -> Option<(NaiveTime, NaiveTime)> {
        if self.is_single_day() {
            Some((self.start.time(), self.end.time()))
        } else {
            None
        }
    }

    /// Whether a date-time falls within `[start, end)`.
    #[inline]
    pub fn contains(&self, at: NaiveDateTime) -> bool {
        at >= self.start && at < self.end
    }
}

#[cfg(test)]
pub(crate) fn dt(s: &str) -> NaiveDateTime {
    NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M").unwrap()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_try_new_rejects_inverted() {
        let err = TimeInterval::try_new(dt("2024-01-10T10:00"), dt("2024-01-10T09:00"))
            .unwrap_err();
        assert!(matches!(err, StaffingError::InvalidInterval { .. }));

        assert!(TimeInterval::try_new(dt("2024-01-10T10:00"), dt("2024-01-10T10:00")).is_ok());
    }

    #[test]
    fn test_duration_and_contains() {
        let i = TimeInterval::new(dt("2024-01-10T09:00"), dt("2024-01-10T11:00"));
        assert_eq!(i.duration_secs(), 7_200);
        assert!(i.contains(dt("2024-01-10T09:00")));
        assert!(!i.contains(dt("2024-01-10T11:00"))); // exclusive end
    }

    #[test]
    fn test_single_day() {
        let same = TimeInterval::new(dt("2024-01-10T09:00"), dt("2024-01-10T17:00"));
        assert!(same.is_single_day());
        assert_eq!(
            same.time_span(),
            Some((dt("2024-01-10T09:00").time(), dt("2024-01-10T17:00").time()))
        );

        let overnight = TimeInterval::new(dt("2024-01-10T22:00"), dt("2024-01-11T02:00"));
        assert!(!overnight.is_single_day());
        assert_eq!(overnight.time_span(), None);
    }
}
