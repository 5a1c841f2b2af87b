//! Task record and related types
//!
//! A Task is persisted as a camelCase JSON object inside the collection
//! array. `updatedAt` is omitted until the first edit; `completedAt` is
//! always written and is `null` while the task is pending.

use std::str::FromStr;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{Result, TaskError};

/// A single to-do item
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    //=== Identity ===
    /// Opaque unique identifier, never reused or mutated
    pub id: String,

    //=== Content ===
    pub title: String,
    pub category: Category,
    pub priority: Priority,
    pub due_date: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    //=== State ===
    pub completed: bool,

    //=== Timestamps ===
    pub created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
    /// Non-null if and only if `completed` is true
    #[serde(default)]
    pub completed_at: Option<DateTime<Utc>>,
}

impl Task {
    /// Build a new pending task from validated fields.
    pub(crate) fn new(id: String, fields: ValidFields, now: DateTime<Utc>) -> Self {
        Self {
            id,
            title: fields.title,
            category: fields.category,
            priority: fields.priority,
            due_date: fields.due_date,
            description: fields.description,
            completed: false,
            created_at: now,
            updated_at: None,
            completed_at: None,
        }
    }

    /// Merge a validated patch over this record and stamp `updated_at`.
    pub(crate) fn apply(&mut self, patch: TaskPatch, now: DateTime<Utc>) {
        if let Some(title) = patch.title {
            self.title = title.trim().to_string();
        }
        if let Some(category) = patch.category {
            self.category = category;
        }
        if let Some(priority) = patch.priority {
            self.priority = priority;
        }
        if let Some(due_date) = patch.due_date {
            self.due_date = due_date;
        }
        if let Some(description) = patch.description {
            self.description = normalize_description(Some(description));
        }
        self.updated_at = Some(now);
    }

    /// Flip completion and keep `completed_at` in step with it.
    pub(crate) fn toggle(&mut self, now: DateTime<Utc>) {
        self.completed = !self.completed;
        self.completed_at = if self.completed { Some(now) } else { None };
    }
}

/// Fixed set of task categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Work,
    Personal,
    Shopping,
    Health,
    Education,
    Other,
}

impl Category {
    pub const ALL: [Category; 6] = [
        Category::Work,
        Category::Personal,
        Category::Shopping,
        Category::Health,
        Category::Education,
        Category::Other,
    ];

    /// Get the string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Work => "work",
            Category::Personal => "personal",
            Category::Shopping => "shopping",
            Category::Health => "health",
            Category::Education => "education",
            Category::Other => "other",
        }
    }

    /// Marker shown next to the category on a task card.
    pub fn emoji(&self) -> &'static str {
        match self {
            Category::Work => "💼",
            Category::Personal => "👤",
            Category::Shopping => "🛒",
            Category::Health => "💪",
            Category::Education => "📚",
            Category::Other => "📌",
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Category {
    type Err = TaskError;

    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim().to_ascii_lowercase();
        Category::ALL
            .into_iter()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| TaskError::Validation(format!("unknown category: {:?}", s)))
    }
}

/// Task priority, ordered low < medium < high.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    Medium,
    High,
}

impl Priority {
    /// Get the string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::Low => "low",
            Priority::Medium => "medium",
            Priority::High => "high",
        }
    }

    /// Numeric rank used for sorting: high=3, medium=2, low=1.
    pub fn rank(&self) -> u8 {
        match self {
            Priority::Low => 1,
            Priority::Medium => 2,
            Priority::High => 3,
        }
    }
}

impl std::fmt::Display for Priority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Priority {
    type Err = TaskError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "low" => Ok(Priority::Low),
            "medium" => Ok(Priority::Medium),
            "high" => Ok(Priority::High),
            other => Err(TaskError::Validation(format!("unknown priority: {:?}", other))),
        }
    }
}

/// Input for creating a task.
///
/// Required fields are optional here so a missing one surfaces as a
/// validation error from the store rather than a construction error.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskFields {
    pub title: Option<String>,
    pub category: Option<Category>,
    pub priority: Option<Priority>,
    pub due_date: Option<NaiveDate>,
    pub description: Option<String>,
}

impl TaskFields {
    pub fn new(title: impl Into<String>, category: Category, priority: Priority, due_date: NaiveDate) -> Self {
        Self {
            title: Some(title.into()),
            category: Some(category),
            priority: Some(priority),
            due_date: Some(due_date),
            description: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Check required fields and normalize text.
    pub(crate) fn validate(self) -> Result<ValidFields> {
        let title = validate_title(self.title.as_deref())?;
        let category = self
            .category
            .ok_or_else(|| TaskError::validation("category is required"))?;
        let priority = self
            .priority
            .ok_or_else(|| TaskError::validation("priority is required"))?;
        let due_date = self
            .due_date
            .ok_or_else(|| TaskError::validation("due date is required"))?;

        Ok(ValidFields {
            title,
            category,
            priority,
            due_date,
            description: normalize_description(self.description),
        })
    }
}

/// Fields that passed validation, ready to become a Task.
#[derive(Debug)]
pub(crate) struct ValidFields {
    title: String,
    category: Category,
    priority: Priority,
    due_date: NaiveDate,
    description: Option<String>,
}

/// Partial update for an existing task; `None` leaves a field unchanged.
///
/// An empty `description` clears it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskPatch {
    pub title: Option<String>,
    pub category: Option<Category>,
    pub priority: Option<Priority>,
    pub due_date: Option<NaiveDate>,
    pub description: Option<String>,
}

impl TaskPatch {
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.category.is_none()
            && self.priority.is_none()
            && self.due_date.is_none()
            && self.description.is_none()
    }

    pub(crate) fn validate(&self) -> Result<()> {
        if let Some(title) = &self.title {
            validate_title(Some(title))?;
        }
        Ok(())
    }
}

fn validate_title(title: Option<&str>) -> Result<String> {
    match title.map(str::trim) {
        Some(t) if !t.is_empty() => Ok(t.to_string()),
        _ => Err(TaskError::validation("title must not be empty")),
    }
}

fn normalize_description(description: Option<String>) -> Option<String> {
    description
        .map(|d| d.trim().to_string())
        .filter(|d| !d.is_empty())
}
