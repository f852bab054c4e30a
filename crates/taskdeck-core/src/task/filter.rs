//! Task filter state and the pure filtered-view computation.
//!
//! Filter state is sourced from navigable query parameters so it is
//! shareable and survives reload. The filtered view is a pure function of
//! (task snapshot, filter state) and is never persisted independently.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};

use super::model::{Task, TaskPriority};

/// Completion-status filter.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, Display, EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum StatusFilter {
    #[default]
    All,
    Pending,
    Completed,
}

/// Priority filter; `Only` matches a task's priority exactly.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum PriorityFilter {
    #[default]
    All,
    Only(TaskPriority),
}

impl fmt::Display for PriorityFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PriorityFilter::All => write!(f, "all"),
            PriorityFilter::Only(priority) => write!(f, "{}", priority),
        }
    }
}

impl FromStr for PriorityFilter {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("all") {
            Ok(PriorityFilter::All)
        } else {
            s.parse::<TaskPriority>()
                .map(PriorityFilter::Only)
                .map_err(|_| ())
        }
    }
}

/// The combined filter state for a task list view.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskFilter {
    pub status: StatusFilter,
    pub priority: PriorityFilter,
}

impl TaskFilter {
    /// Builds a filter from URL-style query pairs.
    ///
    /// Recognized keys are `status` and `priority`; unknown keys and
    /// unparseable values fall back to `All`, so a stale bookmark never
    /// breaks the view.
    pub fn from_query_pairs<'a>(pairs: impl IntoIterator<Item = (&'a str, &'a str)>) -> Self {
        let mut filter = TaskFilter::default();
        for (key, value) in pairs {
            match key {
                "status" => filter.status = value.parse().unwrap_or_default(),
                "priority" => filter.priority = value.parse().unwrap_or_default(),
                _ => {}
            }
        }
        filter
    }

    /// Builds a filter from a raw query string such as
    /// `status=pending&priority=urgent`.
    pub fn from_query(query: &str) -> Self {
        Self::from_query_pairs(
            query
                .split('&')
                .filter_map(|pair| pair.split_once('=')),
        )
    }

    /// Renders the filter back to a query string, omitting `All` values.
    ///
    /// The default filter renders as an empty string.
    pub fn to_query(&self) -> String {
        let mut parts = Vec::new();
        if self.status != StatusFilter::All {
            parts.push(format!("status={}", self.status));
        }
        if self.priority != PriorityFilter::All {
            parts.push(format!("priority={}", self.priority));
        }
        parts.join("&")
    }
}

/// Computes the visible task set for a filter.
///
/// Applies the status predicate, then the priority predicate (a task with
/// no stored priority counts as `Normal`), then sorts by `created_at`
/// descending. The sort is stable, so equal timestamps keep their snapshot
/// order. `All`/`All` returns the input re-sorted only.
pub fn filter_tasks(tasks: &[Task], filter: &TaskFilter) -> Vec<Task> {
    let mut result: Vec<Task> = tasks
        .iter()
        .filter(|task| match filter.status {
            StatusFilter::All => true,
            StatusFilter::Pending => !task.completed,
            StatusFilter::Completed => task.completed,
        })
        .filter(|task| match filter.priority {
            PriorityFilter::All => true,
            PriorityFilter::Only(priority) => task.priority == priority,
        })
        .cloned()
        .collect();

    result.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    result
}
