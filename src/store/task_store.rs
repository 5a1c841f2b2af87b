//! TaskStore implementation with write-through JSON persistence.
//!
//! The store owns the canonical ordered collection. Every mutating
//! operation changes memory first and then rewrites the whole collection
//! under a single key. A failed write is returned to the caller with the
//! in-memory state kept; nothing is retried.

use std::collections::{HashMap, HashSet};

use chrono::Utc;
use log::{debug, info};

use super::query::{self, SortKey, Stats, TaskFilter};
use crate::domain::{Task, TaskFields, TaskPatch};
use crate::error::{Result, TaskError};
use crate::id::generate_task_id;
use crate::storage::KeyValueStore;

/// Well-known key the collection is stored under.
pub const DEFAULT_STORAGE_KEY: &str = "tasks";

/// Owns the task collection and its backing storage.
#[derive(Debug)]
pub struct TaskStore<S: KeyValueStore> {
    storage: S,
    key: String,
    tasks: Vec<Task>,
}

impl<S: KeyValueStore> TaskStore<S> {
    /// Load the collection from `storage` under the default key.
    pub fn open(storage: S) -> Result<Self> {
        Self::open_with_key(storage, DEFAULT_STORAGE_KEY)
    }

    /// Load the collection from `storage` under `key`.
    ///
    /// An absent key yields an empty collection. Malformed data, duplicate
    /// ids, blank titles, and a `completedAt` that disagrees with `completed`
    /// are errors: the store refuses to start rather than overwrite what is
    /// on disk.
    pub fn open_with_key(storage: S, key: impl Into<String>) -> Result<Self> {
        let key = key.into();
        let tasks = match storage.get(&key)? {
            None => Vec::new(),
            Some(raw) => parse_collection(&raw)
                .map_err(|e| TaskError::Persistence(format!("Malformed task data under {:?}: {}", key, e)))?,
        };

        let mut seen = HashSet::new();
        if let Some(dup) = tasks.iter().find(|t| !seen.insert(t.id.as_str())) {
            return Err(TaskError::Persistence(format!(
                "Duplicate task id {:?} under {:?}",
                dup.id, key
            )));
        }

        if let Some(bad) = tasks.iter().find(|t| t.title.trim().is_empty()) {
            return Err(TaskError::Persistence(format!(
                "Task {:?} under {:?} has an empty title",
                bad.id, key
            )));
        }
        if let Some(bad) = tasks.iter().find(|t| t.completed != t.completed_at.is_some()) {
            return Err(TaskError::Persistence(format!(
                "Task {:?} under {:?} has completed={} but completedAt is {}",
                bad.id,
                key,
                bad.completed,
                if bad.completed_at.is_some() { "set" } else { "missing" }
            )));
        }

        debug!("Loaded {} tasks from {:?}", tasks.len(), key);
        Ok(Self { storage, key, tasks })
    }

    /// Tasks in canonical order.
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn into_storage(self) -> S {
        self.storage
    }

    /// Look up a task by id, e.g. to load it for editing.
    pub fn get(&self, id: &str) -> Result<&Task> {
        self.tasks
            .iter()
            .find(|t| t.id == id)
            .ok_or_else(|| TaskError::TaskNotFound(id.to_string()))
    }

    /// Validate `fields`, append a new pending task, and persist.
    pub fn create(&mut self, fields: TaskFields) -> Result<Task> {
        let fields = fields.validate()?;
        let id = self.fresh_id();
        let task = Task::new(id, fields, Utc::now());

        info!("Creating task {} ({:?})", task.id, task.title);
        self.tasks.push(task.clone());
        self.persist()?;
        Ok(task)
    }

    /// Merge `patch` over an existing task, stamp `updated_at`, and persist.
    pub fn update(&mut self, id: &str, patch: TaskPatch) -> Result<Task> {
        patch.validate()?;
        let index = self.index_of(id)?;

        let task = &mut self.tasks[index];
        task.apply(patch, Utc::now());
        let task = task.clone();

        info!("Updated task {}", id);
        self.persist()?;
        Ok(task)
    }

    /// Remove a task. An unknown id is `TaskNotFound` and changes nothing.
    pub fn delete(&mut self, id: &str) -> Result<()> {
        let index = self.index_of(id)?;
        self.tasks.remove(index);

        info!("Deleted task {}", id);
        self.persist()
    }

    /// Flip completion, keeping `completed_at` in step, and persist.
    pub fn toggle_complete(&mut self, id: &str) -> Result<Task> {
        let index = self.index_of(id)?;

        let task = &mut self.tasks[index];
        task.toggle(Utc::now());
        let task = task.clone();

        info!(
            "Task {} marked {}",
            id,
            if task.completed { "completed" } else { "pending" }
        );
        self.persist()?;
        Ok(task)
    }

    /// Empty the collection and persist.
    pub fn clear_all(&mut self) -> Result<()> {
        info!("Clearing {} tasks", self.tasks.len());
        self.tasks.clear();
        self.persist()
    }

    /// Rewrite canonical order: `ids` first in the given order, then every
    /// unlisted task in its original relative order.
    ///
    /// Unknown or repeated ids are rejected and leave the order untouched.
    pub fn reorder<K: AsRef<str>>(&mut self, ids: &[K]) -> Result<()> {
        let positions: HashMap<&str, usize> = self
            .tasks
            .iter()
            .enumerate()
            .map(|(i, t)| (t.id.as_str(), i))
            .collect();

        let mut order = Vec::with_capacity(ids.len());
        let mut seen = HashSet::new();
        for id in ids {
            let id = id.as_ref();
            let index = *positions
                .get(id)
                .ok_or_else(|| TaskError::Validation(format!("reorder names unknown task id {:?}", id)))?;
            if !seen.insert(index) {
                return Err(TaskError::Validation(format!("reorder repeats task id {:?}", id)));
            }
            order.push(index);
        }

        let mut slots: Vec<Option<Task>> = std::mem::take(&mut self.tasks).into_iter().map(Some).collect();
        let mut reordered = Vec::with_capacity(slots.len());
        for index in order {
            if let Some(task) = slots[index].take() {
                reordered.push(task);
            }
        }
        reordered.extend(slots.into_iter().flatten());
        self.tasks = reordered;

        info!("Reordered tasks ({} positioned explicitly)", ids.len());
        self.persist()
    }

    /// Derived view: filter in canonical order, then stable-sort.
    pub fn query(&self, filter: &TaskFilter, sort: SortKey) -> Vec<&Task> {
        let view = query::select(&self.tasks, filter, sort);
        debug!("Query {:?} sorted by {} -> {} tasks", filter, sort, view.len());
        view
    }

    pub fn stats(&self) -> Stats {
        Stats::from_tasks(&self.tasks)
    }

    fn index_of(&self, id: &str) -> Result<usize> {
        self.tasks
            .iter()
            .position(|t| t.id == id)
            .ok_or_else(|| TaskError::TaskNotFound(id.to_string()))
    }

    fn fresh_id(&self) -> String {
        loop {
            let id = generate_task_id();
            if !self.tasks.iter().any(|t| t.id == id) {
                return id;
            }
        }
    }

    fn persist(&mut self) -> Result<()> {
        let json = serde_json::to_string_pretty(&self.tasks).map_err(TaskError::persistence)?;
        self.storage.set(&self.key, &json)
    }
}

fn parse_collection(raw: &str) -> serde_json::Result<Vec<Task>> {
    serde_json::from_str(raw)
}
