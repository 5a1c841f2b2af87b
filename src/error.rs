//! Error types for the task planner
//!
//! Centralized error handling using thiserror.

use thiserror::Error;

/// All error types that can occur in task store operations
#[derive(Debug, Error)]
pub enum TaskError {
    /// Missing or empty required field, or malformed reorder input
    #[error("Validation failed: {0}")]
    Validation(String),

    /// Operation targeted an id that is not in the collection
    #[error("Task not found: {0}")]
    TaskNotFound(String),

    /// Underlying key-value storage could not be read or written
    #[error("Persistence error: {0}")]
    Persistence(String),
}

impl TaskError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn persistence(msg: impl std::fmt::Display) -> Self {
        Self::Persistence(msg.to_string())
    }
}

/// Result type alias for task store operations
pub type Result<T> = std::result::Result<T, TaskError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_error() {
        let err = TaskError::validation("title must not be empty");
        assert_eq!(err.to_string(), "Validation failed: title must not be empty");
    }

    #[test]
    fn test_task_not_found_error() {
        let err = TaskError::TaskNotFound("1738300800123-a1b2".to_string());
        assert_eq!(err.to_string(), "Task not found: 1738300800123-a1b2");
    }

    #[test]
    fn test_persistence_error_from_io() {
        let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "read-only");
        let err = TaskError::persistence(io_err);
        assert!(matches!(err, TaskError::Persistence(_)));
        assert!(err.to_string().contains("read-only"));
    }

    #[test]
    fn test_result_type_alias() {
        fn returns_ok() -> Result<i32> {
            Ok(42)
        }

        fn returns_err() -> Result<i32> {
            Err(TaskError::TaskNotFound("x".to_string()))
        }

        assert!(returns_ok().is_ok());
        assert!(returns_err().is_err());
    }
}
