//! Commitment overlap predicate.
//!
//! Every conflict check goes through [`intervals_overlap`], so the
//! single-candidate and candidate-set paths agree at exact boundaries.

use std::collections::HashSet;

use crate::config::OverlapConvention;
use crate::models::{Commitment, TimeInterval};

/// Canonical overlap test between two intervals.
///
/// Under [`OverlapConvention::HalfOpen`] this is `a.start < b.end &&
/// b.start < a.end`, with a zero-length interval colliding when its instant
/// lies in the other's `[start, end)`. Under [`OverlapConvention::Inclusive`]
/// touching endpoints collide too.
///
/// # Examples
/// ```
/// use chrono::NaiveDate;
/// use u_staffing::availability::intervals_overlap;
/// use u_staffing::config::OverlapConvention;
/// use u_staffing::models::TimeInterval;
///
/// let day = NaiveDate::from_ymd_opt(2024, 1, 10).unwrap();
/// let at = |h| day.and_hms_opt(h, 0, 0).unwrap();
///
/// let a = TimeInterval::new(at(9), at(10));
/// let b = TimeInterval::new(at(10), at(11));
/// assert!(!intervals_overlap(&a, &b, OverlapConvention::HalfOpen));
/// assert!(intervals_overlap(&a, &b, OverlapConvention::Inclusive));
/// ```
#[inline]
pub fn intervals_overlap(a: &TimeInterval, b: &TimeInterval, convention: OverlapConvention) -> bool {
    convention.overlaps(a, b)
}

/// Whether `employee_id` holds an active commitment overlapping `interval`.
pub fn has_conflict(
    commitments: &[Commitment],
    employee_id: &str,
    interval: &TimeInterval,
    convention: OverlapConvention,
) -> bool {
    commitments.iter().any(|c| {
        c.employee_id == employee_id
            && c.is_active()
            && intervals_overlap(&c.interval, interval, convention)
    })
}

/// Ids of every employee with an active commitment overlapping `interval`.
pub fn conflicted_employees<'a>(
    commitments: impl IntoIterator<Item = &'a Commitment>,
    interval: &TimeInterval,
    convention: OverlapConvention,
) -> HashSet<String> {
    commitments
        .into_iter()
        .filter(|c| c.is_active() && intervals_overlap(&c.interval, interval, convention))
        .map(|c| c.employee_id.clone())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::interval::dt;
    use crate::models::OperationStatus;
    use proptest::prelude::*;

    fn iv(s: &str, e: &str) -> TimeInterval {
        TimeInterval::new(dt(s), dt(e))
    }

    fn committed(employee: &str, s: &str, e: &str, status: OperationStatus) -> Commitment {
        Commitment::new(employee, "OP", iv(s, e), status)
    }

    #[test]
    fn test_has_conflict() {
        let commitments = vec![committed(
            "E1",
            "2024-01-10T09:00",
            "2024-01-10T10:00",
            OperationStatus::Planned,
        )];
        let nested = iv("2024-01-10T09:30", "2024-01-10T09:45");
        let touching = iv("2024-01-10T10:00", "2024-01-10T11:00");

        assert!(has_conflict(&commitments, "E1", &nested, OverlapConvention::HalfOpen));
        assert!(!has_conflict(&commitments, "E2", &nested, OverlapConvention::HalfOpen));
        assert!(!has_conflict(&commitments, "E1", &touching, OverlapConvention::HalfOpen));
        assert!(has_conflict(&commitments, "E1", &touching, OverlapConvention::Inclusive));
    }

    #[test]
    fn test_zero_length_request_at_commitment_start() {
        let commitments = vec![committed(
            "E1",
            "2024-01-10T09:00",
            "2024-01-10T10:00",
            OperationStatus::Planned,
        )];
        for instant in ["2024-01-10T09:00", "2024-01-10T09:30"] {
            let point = iv(instant, instant);
            assert!(has_conflict(&commitments, "E1", &point, OverlapConvention::HalfOpen));
        }
        let at_end = iv("2024-01-10T10:00", "2024-01-10T10:00");
        assert!(!has_conflict(&commitments, "E1", &at_end, OverlapConvention::HalfOpen));
    }

    #[test]
    fn test_cancelled_commitments_ignored() {
        let commitments = vec![
            committed("E1", "2024-01-10T09:00", "2024-01-10T10:00", OperationStatus::Cancelled),
            committed("E2", "2024-01-10T09:00", "2024-01-10T10:00", OperationStatus::InProgress),
        ];
        let conflicted = conflicted_employees(
            &commitments,
            &iv("2024-01-10T09:00", "2024-01-10T10:00"),
            OverlapConvention::HalfOpen,
        );
        assert_eq!(conflicted, HashSet::from(["E2".to_string()]));
    }

    fn interval_strategy() -> impl Strategy<Value = TimeInterval> {
        (0i64..10_000, 0i64..500).prop_map(|(start, len)| {
            let base = dt("2024-01-01T00:00");
            TimeInterval::new(
                base + chrono::Duration::minutes(start),
                base + chrono::Duration::minutes(start + len),
            )
        })
    }

    proptest! {
        #[test]
        fn prop_overlap_symmetric(a in interval_strategy(), b in interval_strategy()) {
            for convention in [OverlapConvention::HalfOpen, OverlapConvention::Inclusive] {
                prop_assert_eq!(
                    intervals_overlap(&a, &b, convention),
                    intervals_overlap(&b, &a, convention)
                );
            }
        }

        #[test]
        fn prop_disjoint_never_conflicts(
            first in interval_strategy(),
            gap in 0i64..600,
            len in 1i64..600,
        ) {
            prop_assume!(first.start < first.end);
            let start = first.end + chrono::Duration::minutes(gap);
            let later = TimeInterval::new(start, start + chrono::Duration::minutes(len));
            let commitments = vec![Commitment::new("E1", "OP", first, OperationStatus::Planned)];
            prop_assert!(!has_conflict(&commitments, "E1", &later, OverlapConvention::HalfOpen));
        }

        #[test]
        fn prop_half_open_implies_inclusive(a in interval_strategy(), b in interval_strategy()) {
            if intervals_overlap(&a, &b, OverlapConvention::HalfOpen) {
                prop_assert!(intervals_overlap(&a, &b, OverlapConvention::Inclusive));
            }
        }
    }
}
