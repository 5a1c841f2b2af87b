//! Derived views: equality filters, sort keys, and aggregate counts.

use std::cmp::Ordering;
use std::str::FromStr;

use feruca::Collator;
use serde::{Deserialize, Serialize};

use crate::domain::{Category, Priority, Task};
use crate::error::{Result, TaskError};

/// Completion-status filter.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatusFilter {
    #[default]
    All,
    Completed,
    Pending,
}

impl StatusFilter {
    fn matches(&self, task: &Task) -> bool {
        match self {
            StatusFilter::All => true,
            StatusFilter::Completed => task.completed,
            StatusFilter::Pending => !task.completed,
        }
    }
}

impl FromStr for StatusFilter {
    type Err = TaskError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "all" => Ok(StatusFilter::All),
            "completed" => Ok(StatusFilter::Completed),
            "pending" => Ok(StatusFilter::Pending),
            other => Err(TaskError::Validation(format!("unknown status filter: {:?}", other))),
        }
    }
}

/// Independent equality filters; `None` means "no filter" for that field.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TaskFilter {
    pub category: Option<Category>,
    pub priority: Option<Priority>,
    pub status: StatusFilter,
}

impl TaskFilter {
    pub fn all() -> Self {
        Self::default()
    }

    pub fn category(mut self, category: Category) -> Self {
        self.category = Some(category);
        self
    }

    pub fn priority(mut self, priority: Priority) -> Self {
        self.priority = Some(priority);
        self
    }

    pub fn status(mut self, status: StatusFilter) -> Self {
        self.status = status;
        self
    }

    /// Check if a task passes every active filter.
    pub fn matches(&self, task: &Task) -> bool {
        self.category.is_none_or(|c| task.category == c)
            && self.priority.is_none_or(|p| task.priority == p)
            && self.status.matches(task)
    }
}

/// Sort order for a derived view.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SortKey {
    /// Canonical (manually reordered) order
    #[default]
    Manual,
    DateAsc,
    DateDesc,
    /// high > medium > low
    PriorityHigh,
    PriorityLow,
    /// Locale-aware title order (CLDR root collation)
    Title,
}

impl SortKey {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortKey::Manual => "manual",
            SortKey::DateAsc => "date-asc",
            SortKey::DateDesc => "date-desc",
            SortKey::PriorityHigh => "priority-high",
            SortKey::PriorityLow => "priority-low",
            SortKey::Title => "title",
        }
    }

    /// Compare two tasks under this key. Ties return `Equal` so a stable
    /// sort keeps canonical order.
    pub fn compare(&self, a: &Task, b: &Task) -> Ordering {
        self.compare_with(a, b, &mut Collator::default())
    }

    fn compare_with(&self, a: &Task, b: &Task, collator: &mut Collator) -> Ordering {
        match self {
            SortKey::Manual => Ordering::Equal,
            SortKey::DateAsc => a.due_date.cmp(&b.due_date),
            SortKey::DateDesc => b.due_date.cmp(&a.due_date),
            SortKey::PriorityHigh => b.priority.rank().cmp(&a.priority.rank()),
            SortKey::PriorityLow => a.priority.rank().cmp(&b.priority.rank()),
            SortKey::Title => collator.collate(a.title.as_str(), b.title.as_str()),
        }
    }
}

impl std::fmt::Display for SortKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for SortKey {
    type Err = TaskError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "manual" => Ok(SortKey::Manual),
            "date-asc" => Ok(SortKey::DateAsc),
            "date-desc" => Ok(SortKey::DateDesc),
            "priority-high" => Ok(SortKey::PriorityHigh),
            "priority-low" => Ok(SortKey::PriorityLow),
            "title" => Ok(SortKey::Title),
            other => Err(TaskError::Validation(format!("unknown sort key: {:?}", other))),
        }
    }
}

/// Aggregate counters over the whole collection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Stats {
    pub total: usize,
    pub completed: usize,
    pub pending: usize,
}

impl Stats {
    pub fn from_tasks(tasks: &[Task]) -> Self {
        let total = tasks.len();
        let completed = tasks.iter().filter(|t| t.completed).count();
        Self {
            total,
            completed,
            pending: total - completed,
        }
    }
}

/// Filter in canonical order, then stable-sort by `sort`.
pub(crate) fn select<'a>(tasks: &'a [Task], filter: &TaskFilter, sort: SortKey) -> Vec<&'a Task> {
    let mut view: Vec<&Task> = tasks.iter().filter(|t| filter.matches(t)).collect();
    let mut collator = Collator::default();
    view.sort_by(|a, b| sort.compare_with(a, b, &mut collator));
    view
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, TimeZone, Utc};

    fn task(id: &str, title: &str, priority: Priority, day: u32, completed: bool) -> Task {
        Task {
            id: id.to_string(),
            title: title.to_string(),
            category: Category::Work,
            priority,
            due_date: NaiveDate::from_ymd_opt(2026, 11, day).unwrap(),
            description: None,
            completed,
            created_at: Utc.timestamp_opt(0, 0).unwrap(),
            updated_at: None,
            completed_at: completed.then(|| Utc.timestamp_opt(10, 0).unwrap()),
        }
    }

    fn ids(view: &[&Task]) -> Vec<String> {
        view.iter().map(|t| t.id.clone()).collect()
    }

    #[test]
    fn test_title_sort_is_case_folded() {
        let tasks = vec![
            task("1", "Banana", Priority::Low, 1, false),
            task("2", "apple", Priority::Low, 1, false),
            task("3", "Cherry", Priority::Low, 1, false),
        ];
        let view = select(&tasks, &TaskFilter::all(), SortKey::Title);
        let titles: Vec<&str> = view.iter().map(|t| t.title.as_str()).collect();
        assert_eq!(titles, vec!["apple", "Banana", "Cherry"]);
    }

    #[test]
    fn test_title_sort_is_locale_aware() {
        let tasks = vec![
            task("1", "zebra", Priority::Low, 1, false),
            task("2", "éclair", Priority::Low, 1, false),
            task("3", "Apple", Priority::Low, 1, false),
            task("4", "apple", Priority::Low, 1, false),
        ];
        let view = select(&tasks, &TaskFilter::all(), SortKey::Title);
        let titles: Vec<&str> = view.iter().map(|t| t.title.as_str()).collect();
        assert_eq!(titles, vec!["apple", "Apple", "éclair", "zebra"]);
    }

    #[test]
    fn test_title_ties_keep_canonical_order() {
        let tasks = vec![
            task("c", "Report", Priority::Low, 1, false),
            task("a", "Budget", Priority::Low, 1, false),
            task("b", "Report", Priority::High, 2, false),
            task("d", "Report", Priority::Medium, 3, false),
        ];
        let view = select(&tasks, &TaskFilter::all(), SortKey::Title);
        assert_eq!(ids(&view), vec!["a", "c", "b", "d"]);
        assert_eq!(SortKey::Title.compare(&tasks[0], &tasks[2]), Ordering::Equal);
    }

    #[test]
    fn test_priority_high_ties_keep_canonical_order() {
        let tasks = vec![
            task("a", "x", Priority::Medium, 1, false),
            task("b", "x", Priority::High, 1, false),
            task("c", "x", Priority::Medium, 1, false),
            task("d", "x", Priority::High, 1, false),
            task("e", "x", Priority::Low, 1, false),
        ];
        let view = select(&tasks, &TaskFilter::all(), SortKey::PriorityHigh);
        assert_eq!(ids(&view), vec!["b", "d", "a", "c", "e"]);

        let view = select(&tasks, &TaskFilter::all(), SortKey::PriorityLow);
        assert_eq!(ids(&view), vec!["e", "a", "c", "b", "d"]);
    }

    #[test]
    fn test_date_sorts() {
        let tasks = vec![
            task("a", "x", Priority::Low, 3, false),
            task("b", "x", Priority::Low, 1, false),
            task("c", "x", Priority::Low, 2, false),
        ];
        assert_eq!(ids(&select(&tasks, &TaskFilter::all(), SortKey::DateAsc)), vec!["b", "c", "a"]);
        assert_eq!(ids(&select(&tasks, &TaskFilter::all(), SortKey::DateDesc)), vec!["a", "c", "b"]);
        assert_eq!(ids(&select(&tasks, &TaskFilter::all(), SortKey::Manual)), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_status_filter_keeps_relative_order() {
        let tasks = vec![
            task("1", "x", Priority::Low, 1, false),
            task("2", "x", Priority::Low, 1, true),
            task("3", "x", Priority::Low, 1, false),
            task("4", "x", Priority::Low, 1, true),
            task("5", "x", Priority::Low, 1, false),
        ];
        let done = select(&tasks, &TaskFilter::all().status(StatusFilter::Completed), SortKey::Manual);
        assert_eq!(ids(&done), vec!["2", "4"]);

        let pending = select(&tasks, &TaskFilter::all().status(StatusFilter::Pending), SortKey::Manual);
        assert_eq!(ids(&pending), vec!["1", "3", "5"]);
    }

    #[test]
    fn test_combined_filters() {
        let mut tasks = vec![
            task("1", "x", Priority::High, 1, false),
            task("2", "x", Priority::High, 1, false),
            task("3", "x", Priority::Low, 1, false),
        ];
        tasks[1].category = Category::Personal;

        let filter = TaskFilter::all().category(Category::Work).priority(Priority::High);
        assert_eq!(ids(&select(&tasks, &filter, SortKey::Manual)), vec!["1"]);
    }

    #[test]
    fn test_sort_key_parse_roundtrip() {
        for key in [
            SortKey::Manual,
            SortKey::DateAsc,
            SortKey::DateDesc,
            SortKey::PriorityHigh,
            SortKey::PriorityLow,
            SortKey::Title,
        ] {
            assert_eq!(key.as_str().parse::<SortKey>().unwrap(), key);
        }
        assert!("newest".parse::<SortKey>().is_err());
    }

    #[test]
    fn test_stats() {
        let tasks = vec![
            task("1", "x", Priority::Low, 1, true),
            task("2", "x", Priority::Low, 1, false),
            task("3", "x", Priority::Low, 1, true),
        ];
        let stats = Stats::from_tasks(&tasks);
        assert_eq!(stats, Stats { total: 3, completed: 2, pending: 1 });
        assert_eq!(Stats::from_tasks(&[]), Stats::default());
    }
}
