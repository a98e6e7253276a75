//! Task domain model.
//!
//! This module contains the core Task entity and its value objects: one
//! job-application action item per task, owned by a single user.

use std::cmp::Ordering;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::color::TaskColor;

/// Progress of a job-application action item.
///
/// The set is closed; the view layer maps each variant to a localized label.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    /// Work on this item has not begun.
    #[default]
    NotStarted,
    /// The item is actively being worked on.
    InProgress,
    /// The item is finished.
    Done,
}

impl TaskStatus {
    /// Display label for this status.
    pub fn label(&self) -> &'static str {
        match self {
            Self::NotStarted => "Not started",
            Self::InProgress => "In progress",
            Self::Done => "Done",
        }
    }
}

/// A single job-application task as stored in the document store.
///
/// `id` and `created_at` are assigned by the store on creation and are
/// immutable afterwards. `deadline` and `created_at` use canonical RFC3339
/// strings; an absent deadline means "no deadline".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    /// Store-assigned unique identifier.
    pub id: String,
    /// Non-empty display title.
    pub title: String,
    /// Free-text company name, may be empty.
    pub company_name: String,
    /// Progress status.
    pub status: TaskStatus,
    /// Optional deadline, canonical RFC3339 string.
    pub deadline: Option<String>,
    /// Color tag; unrecognized stored values resolve to the default entry.
    pub color: TaskColor,
    /// Completion flag, independent of `status`.
    pub completed: bool,
    /// Store-assigned creation timestamp, RFC3339.
    pub created_at: String,
}

impl Task {
    /// Parses the deadline back into a timestamp, if one is set and valid.
    pub fn deadline_at(&self) -> Option<DateTime<Utc>> {
        self.deadline
            .as_deref()
            .and_then(|raw| DateTime::parse_from_rfc3339(raw).ok())
            .map(|dt| dt.with_timezone(&Utc))
    }
}

/// Input for creating a task. The store assigns `id` and `created_at`;
/// the mutation layer presets `completed = false`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTask {
    pub title: String,
    pub company_name: String,
    pub status: TaskStatus,
    pub deadline: Option<DateTime<Utc>>,
    pub color: TaskColor,
}

/// Input for editing a task. Every listed field is rewritten; the
/// completion flag is not part of an edit and stays untouched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskUpdate {
    pub title: String,
    pub company_name: String,
    pub status: TaskStatus,
    pub deadline: Option<DateTime<Utc>>,
    pub color: TaskColor,
}

/// Orderings the store can apply to a task query.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortOrder {
    /// Newest first. The default view.
    #[default]
    CreatedAtDesc,
    /// Earliest deadline first; tasks without a deadline sort last.
    DeadlineAsc,
    /// Latest deadline first; tasks without a deadline sort last.
    DeadlineDesc,
}

impl SortOrder {
    /// The view-layer key for this order.
    pub fn as_key(&self) -> &'static str {
        match self {
            Self::CreatedAtDesc => "createdAt_desc",
            Self::DeadlineAsc => "deadline_asc",
            Self::DeadlineDesc => "deadline_desc",
        }
    }

    /// Resolves a view-layer key; unrecognized keys fall back to the
    /// default order.
    pub fn from_key(key: &str) -> Self {
        match key {
            "deadline_asc" => Self::DeadlineAsc,
            "deadline_desc" => Self::DeadlineDesc,
            _ => Self::CreatedAtDesc,
        }
    }

    /// Sorts a result set the way the store orders this query.
    ///
    /// Deadlines compare as canonical RFC3339 UTC strings. Tasks without a
    /// deadline sort after every dated task under both deadline orders; the
    /// sort is stable, so ties keep their insertion order.
    pub fn sort(&self, tasks: &mut [Task]) {
        match self {
            Self::CreatedAtDesc => tasks.sort_by(|a, b| b.created_at.cmp(&a.created_at)),
            Self::DeadlineAsc => tasks.sort_by(|a, b| compare_deadlines(a, b, false)),
            Self::DeadlineDesc => tasks.sort_by(|a, b| compare_deadlines(a, b, true)),
        }
    }
}

fn compare_deadlines(a: &Task, b: &Task, descending: bool) -> Ordering {
    match (&a.deadline, &b.deadline) {
        (Some(x), Some(y)) => {
            if descending {
                y.cmp(x)
            } else {
                x.cmp(y)
            }
        }
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn task(id: &str, created_at: &str, deadline: Option<&str>) -> Task {
        Task {
            id: id.to_string(),
            title: format!("Task {}", id),
            company_name: String::new(),
            status: TaskStatus::NotStarted,
            deadline: deadline.map(|d| d.to_string()),
            color: TaskColor::Default,
            completed: false,
            created_at: created_at.to_string(),
        }
    }

    #[test]
    fn test_sort_created_at_desc() {
        let mut tasks = vec![
            task("a", "2025-01-01T00:00:00+00:00", None),
            task("b", "2025-01-03T00:00:00+00:00", None),
            task("c", "2025-01-02T00:00:00+00:00", None),
        ];
        SortOrder::CreatedAtDesc.sort(&mut tasks);
        let ids: Vec<&str> = tasks.iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, ["b", "c", "a"]);
    }

    #[test]
    fn test_sort_deadline_asc_places_undated_last() {
        let mut tasks = vec![
            task("none", "2025-01-01T00:00:00+00:00", None),
            task("late", "2025-01-02T00:00:00+00:00", Some("2025-06-01T00:00:00+00:00")),
            task("soon", "2025-01-03T00:00:00+00:00", Some("2025-02-01T00:00:00+00:00")),
        ];
        SortOrder::DeadlineAsc.sort(&mut tasks);
        let ids: Vec<&str> = tasks.iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, ["soon", "late", "none"]);
    }

    #[test]
    fn test_sort_deadline_desc_places_undated_last() {
        let mut tasks = vec![
            task("none", "2025-01-01T00:00:00+00:00", None),
            task("soon", "2025-01-02T00:00:00+00:00", Some("2025-02-01T00:00:00+00:00")),
            task("late", "2025-01-03T00:00:00+00:00", Some("2025-06-01T00:00:00+00:00")),
        ];
        SortOrder::DeadlineDesc.sort(&mut tasks);
        let ids: Vec<&str> = tasks.iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, ["late", "soon", "none"]);
    }

    #[test]
    fn test_sort_order_keys() {
        assert_eq!(SortOrder::from_key("deadline_asc"), SortOrder::DeadlineAsc);
        assert_eq!(SortOrder::from_key("deadline_desc"), SortOrder::DeadlineDesc);
        assert_eq!(SortOrder::from_key("createdAt_desc"), SortOrder::CreatedAtDesc);
        // Anything unrecognized falls back to the default view.
        assert_eq!(SortOrder::from_key("bogus"), SortOrder::CreatedAtDesc);
        for order in [
            SortOrder::CreatedAtDesc,
            SortOrder::DeadlineAsc,
            SortOrder::DeadlineDesc,
        ] {
            assert_eq!(SortOrder::from_key(order.as_key()), order);
        }
    }

    #[test]
    fn test_task_serde_uses_camel_case_fields() {
        let t = task("t1", "2025-01-01T00:00:00+00:00", Some("2025-03-01T09:00:00+00:00"));
        let json = serde_json::to_value(&t).unwrap();
        assert!(json.get("companyName").is_some());
        assert!(json.get("createdAt").is_some());
        assert_eq!(json["status"], "not_started");
    }

    #[test]
    fn test_deadline_at_parses_canonical_string() {
        let t = task("t1", "2025-01-01T00:00:00+00:00", Some("2025-03-01T09:30:00+00:00"));
        let parsed = t.deadline_at().unwrap();
        assert_eq!(parsed.to_rfc3339(), "2025-03-01T09:30:00+00:00");
        assert!(task("t2", "2025-01-01T00:00:00+00:00", None).deadline_at().is_none());
    }
}
