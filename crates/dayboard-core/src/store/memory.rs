use std::collections::BTreeMap;

use chrono::NaiveDate;
use uuid::Uuid;

use crate::error::CoreError;
use crate::models::Task;

use super::{in_window, prepared, sorted_rows, TaskStore};

/// In-memory task store. Backs unit tests and any embedding that brings its
/// own persistence.
#[derive(Debug, Default)]
pub struct MemoryStore {
    tasks: BTreeMap<Uuid, Task>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }
}

impl TaskStore for MemoryStore {
    fn list_window(&self, from: NaiveDate, to: NaiveDate) -> Result<Vec<Task>, CoreError> {
        Ok(sorted_rows(
            self.tasks.values().filter(|task| in_window(task, from, to)),
        ))
    }

    fn list(&self) -> Result<Vec<Task>, CoreError> {
        Ok(sorted_rows(self.tasks.values()))
    }

    fn get(&self, id: Uuid) -> Result<Option<Task>, CoreError> {
        Ok(self.tasks.get(&id).cloned())
    }

    fn upsert(&mut self, task: Task) -> Result<Task, CoreError> {
        let (id, task) = prepared(task);
        self.tasks.insert(id, task.clone());
        Ok(task)
    }

    fn delete(&mut self, id: Uuid) -> Result<(), CoreError> {
        self.tasks
            .remove(&id)
            .map(|_| ())
            .ok_or_else(|| CoreError::NotFound(id.to_string()))
    }
}
