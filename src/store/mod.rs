//! The task store: owns the canonical ordered collection and derives
//! filtered/sorted views and counters from it.

mod query;
mod task_store;

pub use query::{SortKey, Stats, StatusFilter, TaskFilter};
pub use task_store::{DEFAULT_STORAGE_KEY, TaskStore};
