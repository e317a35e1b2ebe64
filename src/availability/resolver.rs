//! Availability resolver.
//!
//! # Algorithm
//!
//! 1. Ask the commitment index who is already busy during the interval.
//! 2. Fetch every other employee from the pool.
//! 3. Keep employees whose working hours cover the interval within one shift.
//!
//! `resolve_one` stops at the first match; `resolve_candidates` collects
//! all of them.
//!
//! # Complexity
//! O(c + n) collaborator work where c = commitments scanned by the index
//! and n = employees in the pool, plus one planning lookup per employee.

use log::{debug, trace};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use super::{check_containment, CommitmentIndex, EmployeePool, PlanningLookup};
use crate::config::{ResolverConfig, SelectionOrder};
use crate::error::StaffingResult;
use crate::models::{Employee, TimeInterval};

/// Employees eligible for an allocation, as exposed to a selection widget.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum CandidateSet {
    /// The operation has no schedule; any employee may be picked.
    Unrestricted,
    /// Only these employees may be picked. Empty = nobody.
    Restricted(BTreeSet<String>),
}

impl CandidateSet {
    /// Whether `employee_id` may be selected.
    pub fn allows(&self, employee_id: &str) -> bool {
        match self {
            CandidateSet::Unrestricted => true,
            CandidateSet::Restricted(ids) => ids.contains(employee_id),
        }
    }

    /// Whether no employee at all may be selected.
    pub fn matches_nothing(&self) -> bool {
        matches!(self, CandidateSet::Restricted(ids) if ids.is_empty())
    }

    /// Restricted ids, or `None` when unrestricted.
    pub fn ids(&self) -> Option<&BTreeSet<String>> {
        match self {
            CandidateSet::Unrestricted => None,
            CandidateSet::Restricted(ids) => Some(ids),
        }
    }
}

/// Finds employees who are free and on shift for a requested interval.
///
/// The resolver only reads; it does not record anything. Two calls with the
/// same interval may return the same employee until a commitment is
/// recorded, which is why staffing goes through
/// [`AssignmentBuilder`](crate::assignment::AssignmentBuilder).
///
/// # Example
///
/// ```
/// use chrono::{NaiveDate, NaiveTime};
/// use u_staffing::availability::AvailabilityResolver;
/// use u_staffing::directory::LocalDirectory;
/// use u_staffing::models::{DayPlanning, Employee, TimeInterval, WeeklyPlanning};
///
/// let t = |h| NaiveTime::from_hms_opt(h, 0, 0).unwrap();
/// let dir = LocalDirectory::new();
/// dir.add_planning(WeeklyPlanning::new("WP1").with_weekdays(
///     DayPlanning::new().with_morning(t(8), t(12)).with_afternoon(t(13), t(17)),
/// ));
/// dir.add_employee(Employee::new("E1").with_weekly_planning("WP1"));
///
/// let day = NaiveDate::from_ymd_opt(2024, 1, 10).unwrap();
/// let interval = TimeInterval::new(day.and_time(t(9)), day.and_time(t(11)));
///
/// let resolver = AvailabilityResolver::new(&dir, &dir, &dir);
/// let chosen = resolver.resolve_one(Some(&interval)).unwrap();
/// assert_eq!(chosen.map(|e| e.id), Some("E1".to_string()));
/// ```
#[derive(Debug, Clone)]
pub struct AvailabilityResolver<C, P, W> {
    commitments: C,
    pool: P,
    plannings: W,
    config: ResolverConfig,
}

impl<C, P, W> AvailabilityResolver<C, P, W>
where
    C: CommitmentIndex,
    P: EmployeePool,
    W: PlanningLookup,
{
    /// Creates a resolver with the default configuration.
    pub fn new(commitments: C, pool: P, plannings: W) -> Self {
        Self {
            commitments,
            pool,
            plannings,
            config: ResolverConfig::default(),
        }
    }

    /// Sets the configuration.
    pub fn with_config(mut self, config: ResolverConfig) -> Self {
        self.config = config;
        self
    }

    /// Active configuration.
    pub fn config(&self) -> &ResolverConfig {
        &self.config
    }

    /// Selects one employee free and on shift for the whole interval.
    ///
    /// Returns `Ok(None)` when `interval` is absent, nobody is free, or
    /// nobody's working hours cover it. Multi-day intervals never match.
    pub fn resolve_one(&self, interval: Option<&TimeInterval>) -> StaffingResult<Option<Employee>> {
        let Some(interval) = interval else {
            return Ok(None);
        };

        for employee in self.free_employees(interval)? {
            let containment = check_containment(&self.plannings, &employee, interval)?;
            if containment.is_contained() {
                debug!(
                    "Selected employee {} for {} - {} ({:?})",
                    employee.id, interval.start, interval.end, containment
                );
                return Ok(Some(employee));
            }
            trace!("Skipped employee {}: {:?}", employee.id, containment);
        }

        debug!("No employee available for {} - {}", interval.start, interval.end);
        Ok(None)
    }

    /// Collects every employee free and on shift for the whole interval.
    ///
    /// An absent interval yields [`CandidateSet::Unrestricted`].
    pub fn resolve_candidates(&self, interval: Option<&TimeInterval>) -> StaffingResult<CandidateSet> {
        let Some(interval) = interval else {
            return Ok(CandidateSet::Unrestricted);
        };

        let mut ids = BTreeSet::new();
        for employee in self.free_employees(interval)? {
            if check_containment(&self.plannings, &employee, interval)?.is_contained() {
                ids.insert(employee.id);
            }
        }

        debug!(
            "{} candidate(s) for {} - {}",
            ids.len(),
            interval.start,
            interval.end
        );
        Ok(CandidateSet::Restricted(ids))
    }

    /// Validated pool of employees without an overlapping commitment.
    fn free_employees(&self, interval: &TimeInterval) -> StaffingResult<Vec<Employee>> {
        interval.validate()?;

        let conflicted = self
            .commitments
            .find_overlapping_commitments(interval, self.config.overlap)?;
        trace!("{} employee(s) already committed", conflicted.len());

        let mut pool = self.pool.employees_excluding(&conflicted)?;
        if self.config.selection == SelectionOrder::LowestId {
            pool.sort_by(|a, b| a.id.cmp(&b.id));
        }
        Ok(pool)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::OverlapConvention;
    use crate::directory::LocalDirectory;
    use crate::error::StaffingError;
    use crate::models::interval::dt;
    use crate::models::planning::{hm, office_day};
    use crate::models::{Commitment, DayPlanning, OperationStatus, WeeklyPlanning};
    use proptest::prelude::*;

    fn iv(s: &str, e: &str) -> TimeInterval {
        TimeInterval::new(dt(s), dt(e))
    }

    /// E has 08:00-12:00 / 13:00-17:00 on weekdays.
    fn office() -> LocalDirectory {
        let dir = LocalDirectory::new();
        dir.add_planning(WeeklyPlanning::new("WP1").with_weekdays(office_day()));
        dir.add_employee(Employee::new("E").with_weekly_planning("WP1"));
        dir
    }

    fn resolve_id(dir: &LocalDirectory, interval: &TimeInterval) -> Option<String> {
        AvailabilityResolver::new(dir, dir, dir)
            .resolve_one(Some(interval))
            .unwrap()
            .map(|e| e.id)
    }

    #[test]
    fn test_resolve_within_morning() {
        let dir = office();
        assert_eq!(
            resolve_id(&dir, &iv("2024-01-10T09:00", "2024-01-10T11:00")),
            Some("E".into())
        );
    }

    #[test]
    fn test_resolve_rejects_midday_gap() {
        let dir = office();
        assert_eq!(resolve_id(&dir, &iv("2024-01-10T11:30", "2024-01-10T13:30")), None);
    }

    #[test]
    fn test_resolve_rejects_multi_day() {
        let dir = office();
        assert_eq!(resolve_id(&dir, &iv("2024-01-10T09:00", "2024-01-11T09:00")), None);
    }

    #[test]
    fn test_nested_commitment_excludes() {
        let dir = office();
        dir.add_commitment(Commitment::new(
            "E",
            "OP0",
            iv("2024-01-10T09:00", "2024-01-10T10:00"),
            OperationStatus::Planned,
        ));
        assert_eq!(resolve_id(&dir, &iv("2024-01-10T09:30", "2024-01-10T09:45")), None);
    }

    #[test]
    fn test_touching_commitment_depends_on_convention() {
        let dir = office();
        dir.add_commitment(Commitment::new(
            "E",
            "OP0",
            iv("2024-01-10T09:00", "2024-01-10T10:00"),
            OperationStatus::Planned,
        ));
        let touching = iv("2024-01-10T10:00", "2024-01-10T11:00");

        let half_open = AvailabilityResolver::new(&dir, &dir, &dir);
        assert!(half_open.resolve_one(Some(&touching)).unwrap().is_some());
        assert!(half_open.resolve_candidates(Some(&touching)).unwrap().allows("E"));

        let inclusive = AvailabilityResolver::new(&dir, &dir, &dir)
            .with_config(ResolverConfig::new().with_overlap(OverlapConvention::Inclusive));
        assert!(inclusive.resolve_one(Some(&touching)).unwrap().is_none());
        assert!(inclusive.resolve_candidates(Some(&touching)).unwrap().matches_nothing());
    }

    #[test]
    fn test_cancelled_commitment_does_not_block() {
        let dir = office();
        dir.add_commitment(Commitment::new(
            "E",
            "OP0",
            iv("2024-01-10T09:00", "2024-01-10T12:00"),
            OperationStatus::Cancelled,
        ));
        assert_eq!(
            resolve_id(&dir, &iv("2024-01-10T09:00", "2024-01-10T10:00")),
            Some("E".into())
        );
    }

    #[test]
    fn test_absent_interval() {
        let dir = office();
        dir.set_healthy(false); // collaborators must not be queried
        let resolver = AvailabilityResolver::new(&dir, &dir, &dir);
        assert_eq!(resolver.resolve_one(None).unwrap(), None);
        assert_eq!(resolver.resolve_candidates(None).unwrap(), CandidateSet::Unrestricted);
    }

    #[test]
    fn test_invalid_interval() {
        let dir = office();
        let resolver = AvailabilityResolver::new(&dir, &dir, &dir);
        let inverted = iv("2024-01-10T11:00", "2024-01-10T09:00");
        assert!(matches!(
            resolver.resolve_one(Some(&inverted)),
            Err(StaffingError::InvalidInterval { .. })
        ));
        assert!(matches!(
            resolver.resolve_candidates(Some(&inverted)),
            Err(StaffingError::InvalidInterval { .. })
        ));
    }

    #[test]
    fn test_collaborator_failure_propagates() {
        let dir = office();
        dir.set_healthy(false);
        let resolver = AvailabilityResolver::new(&dir, &dir, &dir);
        let err = resolver
            .resolve_one(Some(&iv("2024-01-10T09:00", "2024-01-10T10:00")))
            .unwrap_err();
        assert!(matches!(err, StaffingError::Collaborator(_)));
    }

    #[test]
    fn test_empty_pool() {
        let dir = LocalDirectory::new();
        let resolver = AvailabilityResolver::new(&dir, &dir, &dir);
        let interval = iv("2024-01-10T09:00", "2024-01-10T10:00");
        assert_eq!(resolver.resolve_one(Some(&interval)).unwrap(), None);
        assert!(resolver.resolve_candidates(Some(&interval)).unwrap().matches_nothing());
    }

    #[test]
    fn test_skips_unqualified_and_picks_first_qualified() {
        let dir = LocalDirectory::new();
        dir.add_planning(WeeklyPlanning::new("WP1").with_weekdays(office_day()));
        dir.add_planning(WeeklyPlanning::new("WP-late").with_weekdays(
            DayPlanning::new().with_afternoon(hm(14, 0), hm(22, 0)),
        ));
        dir.add_employee(Employee::new("E-none"));
        dir.add_employee(Employee::new("E-late").with_weekly_planning("WP-late"));
        dir.add_employee(Employee::new("E-office").with_weekly_planning("WP1"));
        dir.add_employee(Employee::new("E-office2").with_weekly_planning("WP1"));

        let morning = iv("2024-01-10T09:00", "2024-01-10T10:00");
        assert_eq!(resolve_id(&dir, &morning), Some("E-office".into()));

        let resolver = AvailabilityResolver::new(&dir, &dir, &dir);
        let candidates = resolver.resolve_candidates(Some(&morning)).unwrap();
        assert_eq!(
            candidates.ids().unwrap().iter().cloned().collect::<Vec<_>>(),
            vec!["E-office".to_string(), "E-office2".to_string()]
        );
        assert!(!candidates.allows("E-late"));
    }

    #[test]
    fn test_lowest_id_selection() {
        let dir = LocalDirectory::new();
        dir.add_planning(WeeklyPlanning::new("WP1").with_weekdays(office_day()));
        dir.add_employee(Employee::new("E9").with_weekly_planning("WP1"));
        dir.add_employee(Employee::new("E2").with_weekly_planning("WP1"));

        let interval = iv("2024-01-10T09:00", "2024-01-10T10:00");
        assert_eq!(resolve_id(&dir, &interval), Some("E9".into()));

        let resolver = AvailabilityResolver::new(&dir, &dir, &dir)
            .with_config(ResolverConfig::new().with_selection(SelectionOrder::LowestId));
        let chosen = resolver.resolve_one(Some(&interval)).unwrap();
        assert_eq!(chosen.map(|e| e.id), Some("E2".into()));
    }

    #[test]
    fn test_candidate_set_helpers() {
        let restricted = CandidateSet::Restricted(BTreeSet::from(["E1".to_string()]));
        assert!(restricted.allows("E1"));
        assert!(!restricted.allows("E2"));
        assert!(!restricted.matches_nothing());

        assert!(CandidateSet::Unrestricted.allows("anyone"));
        assert!(!CandidateSet::Unrestricted.matches_nothing());
        assert_eq!(CandidateSet::Unrestricted.ids(), None);
    }

    proptest! {
        #[test]
        fn prop_multi_day_never_matches(start_min in 0i64..1_440, days in 1i64..5, end_min in 0i64..1_440) {
            let dir = LocalDirectory::new();
            dir.add_planning(WeeklyPlanning::new("WP24").with_weekdays(
                DayPlanning::new().with_morning(hm(0, 0), hm(23, 59)),
            ));
            dir.add_employee(Employee::new("E").with_weekly_planning("WP24"));

            let base = dt("2024-01-08T00:00");
            let start = base + chrono::Duration::minutes(start_min);
            let end = base + chrono::Duration::days(days) + chrono::Duration::minutes(end_min);
            let interval = TimeInterval::new(start, end);

            let resolver = AvailabilityResolver::new(&dir, &dir, &dir);
            prop_assert_eq!(resolver.resolve_one(Some(&interval)).unwrap(), None);
            prop_assert!(resolver.resolve_candidates(Some(&interval)).unwrap().matches_nothing());
        }
    }
}
