//! Employee model.
//!
//! Employees are the human resources staffed onto operations. The resolver
//! only reads an employee's identity and the weekly planning it points to;
//! everything else is carried for the surrounding application.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// An employee that can be assigned to operations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Employee {
    /// Unique employee identifier.
    pub id: String,
    /// Human-readable name.
    pub name: String,
    /// Working-hour calendar (weekly planning id). `None` = never available.
    pub weekly_planning: Option<String>,
    /// Domain-specific metadata.
    pub attributes: HashMap<String, String>,
}

impl Employee {
    /// Creates a new employee without a working-hour calendar.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: String::new(),
            weekly_planning: None,
            attributes: HashMap::new(),
        }
    }

    /// Sets the employee name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Sets the weekly planning reference.
    pub fn with_weekly_planning(mut self, planning_id: impl Into<String>) -> Self {
        self.weekly_planning = Some(planning_id.into());
        self
    }

    /// Adds a domain-specific attribute.
    pub fn with_attribute(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(key.into(), value.into());
        self
    }

    /// Whether a working-hour calendar is attached.
    pub fn has_planning(&self) -> bool {
        self.weekly_planning.is_some()
    }
}
