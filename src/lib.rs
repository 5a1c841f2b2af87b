//! Taskplanner - a to-do list manager
//!
//! A single task store owns an ordered collection of tasks, persists it
//! wholesale after every mutation, and derives filtered/sorted views and
//! counters on demand.

pub mod domain;
pub mod error;
pub mod id;
pub mod storage;
pub mod store;
pub mod view;

pub use error::{Result, TaskError};
