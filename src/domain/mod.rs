//! Domain types for the task planner
//!
//! - Task: the single to-do record, plus its Category and Priority enums
//! - TaskFields / TaskPatch: caller-supplied input for create and update

pub mod task;

pub use task::{Category, Priority, Task, TaskFields, TaskPatch};
