//! Resolver configuration.
//!
//! Settings can be built in code or read from a TOML table:
//!
//! ```toml
//! overlap = "inclusive"
//! selection = "lowest_id"
//! ```
//!
//! Missing keys fall back to the defaults: half-open overlap, pool order.

use serde::{Deserialize, Serialize};

use crate::error::StaffingResult;
use crate::models::TimeInterval;

/// Boundary convention of the overlap predicate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OverlapConvention {
    /// `[s, e)` intervals: touching endpoints do not overlap.
    /// A zero-length interval at `t` overlaps any interval with `s <= t < e`,
    /// and another zero-length interval at the same `t`.
    #[default]
    HalfOpen,
    /// `[s, e]` intervals: touching endpoints overlap.
    Inclusive,
}

impl OverlapConvention {
    /// Whether two intervals overlap under this convention. Symmetric.
    pub fn overlaps(self, a: &TimeInterval, b: &TimeInterval) -> bool {
        match self {
            OverlapConvention::HalfOpen => match (a.start == a.end, b.start == b.end) {
                (false, false) => a.start < b.end && b.start < a.end,
                (true, true) => a.start == b.start,
                (true, false) => b.start <= a.start && a.start < b.end,
                (false, true) => a.start <= b.start && b.start < a.end,
            },
            OverlapConvention::Inclusive => a.start <= b.end && b.start <= a.end,
        }
    }
}

/// Order in which qualifying employees are considered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SelectionOrder {
    /// Order returned by the employee pool.
    #[default]
    PoolOrder,
    /// Ascending employee id, independent of the pool.
    LowestId,
}

/// Resolver settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ResolverConfig {
    /// Overlap convention shared by every conflict check.
    pub overlap: OverlapConvention,
    /// Candidate ordering for single-candidate resolution.
    pub selection: SelectionOrder,
}

impl ResolverConfig {
    /// Creates the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the overlap convention.
    pub fn with_overlap(mut self, overlap: OverlapConvention) -> Self {
        self.overlap = overlap;
        self
    }

    /// Sets the selection order.
    pub fn with_selection(mut self, selection: SelectionOrder) -> Self {
        self.selection = selection;
        self
    }

    /// Parses a TOML document.
    pub fn from_toml_str(s: &str) -> StaffingResult<Self> {
        Ok(toml::from_str(s)?)
    }
}
