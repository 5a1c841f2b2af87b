use chrono::NaiveDate;

use crate::domain::Task;

/// Format a due date the way task cards show it, e.g. `Oct 16, 2026`.
pub fn format_due_date(date: NaiveDate) -> String {
    date.format("%b %-d, %Y").to_string()
}

/// A pending task whose due date is strictly before `today`.
pub fn is_overdue(task: &Task, today: NaiveDate) -> bool {
    !task.completed && task.due_date < today
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Category, Priority};
    use chrono::{TimeZone, Utc};

    fn task_due(date: NaiveDate, completed: bool) -> Task {
        Task {
            id: "1".to_string(),
            title: "t".to_string(),
            category: Category::Other,
            priority: Priority::Low,
            due_date: date,
            description: None,
            completed,
            created_at: Utc.timestamp_opt(0, 0).unwrap(),
            updated_at: None,
            completed_at: completed.then(|| Utc.timestamp_opt(1, 0).unwrap()),
        }
    }

    #[test]
    fn test_format_due_date() {
        let date = NaiveDate::from_ymd_opt(2026, 10, 6).unwrap();
        assert_eq!(format_due_date(date), "Oct 6, 2026");
    }

    #[test]
    fn test_is_overdue() {
        let today = NaiveDate::from_ymd_opt(2026, 10, 16).unwrap();
        let yesterday = today.pred_opt().unwrap();

        assert!(is_overdue(&task_due(yesterday, false), today));
        assert!(!is_overdue(&task_due(today, false), today));
        assert!(!is_overdue(&task_due(yesterday, true), today));
    }
}
