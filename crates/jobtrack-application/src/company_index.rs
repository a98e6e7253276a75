//! Company names index.
//!
//! A pure projection over the current task snapshot: the distinct set of
//! company names, sorted, with optional case-insensitive substring
//! filtering. Recomputed by the caller whenever the snapshot or the search
//! term changes; there is no independent lifecycle and no stored index.

use std::collections::BTreeSet;

use jobtrack_core::task::Task;

/// The distinct, sorted company names appearing in a task snapshot.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CompanyIndex {
    companies: Vec<String>,
}

impl CompanyIndex {
    /// Builds the index from a task snapshot. Empty company names are
    /// skipped; duplicates collapse; the result is lexicographically sorted.
    pub fn from_tasks(tasks: &[Task]) -> Self {
        let companies: BTreeSet<&str> = tasks
            .iter()
            .map(|task| task.company_name.as_str())
            .filter(|name| !name.is_empty())
            .collect();
        Self {
            companies: companies.into_iter().map(str::to_string).collect(),
        }
    }

    /// All company names, sorted.
    pub fn all(&self) -> &[String] {
        &self.companies
    }

    /// Names containing `term`, case-insensitively. An empty term matches
    /// everything.
    pub fn filter(&self, term: &str) -> Vec<String> {
        let needle = term.to_lowercase();
        self.companies
            .iter()
            .filter(|company| company.to_lowercase().contains(&needle))
            .cloned()
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jobtrack_core::task::{TaskColor, TaskStatus};

    fn task_for(company: &str) -> Task {
        Task {
            id: format!("task-{}", company),
            title: "Apply".to_string(),
            company_name: company.to_string(),
            status: TaskStatus::NotStarted,
            deadline: None,
            color: TaskColor::Default,
            completed: false,
            created_at: "2025-01-01T00:00:00+00:00".to_string(),
        }
    }

    #[test]
    fn test_distinct_sorted_and_skips_empty() {
        let tasks = vec![
            task_for("Globex"),
            task_for("Initech"),
            task_for(""),
            task_for("Globex"),
            task_for("Acme"),
        ];
        let index = CompanyIndex::from_tasks(&tasks);
        assert_eq!(index.all().to_vec(), ["Acme", "Globex", "Initech"]);
    }

    #[test]
    fn test_filter_is_case_insensitive_substring() {
        let index = CompanyIndex::from_tasks(&[
            task_for("Initech"),
            task_for("Initrode"),
            task_for("Globex"),
        ]);
        assert_eq!(index.filter("init"), ["Initech", "Initrode"]);
        assert_eq!(index.filter("TECH"), ["Initech"]);
        assert!(index.filter("acme").is_empty());
    }

    #[test]
    fn test_empty_term_matches_everything() {
        let index = CompanyIndex::from_tasks(&[task_for("Globex"), task_for("Acme")]);
        assert_eq!(index.filter(""), index.all().to_vec());
    }
}
