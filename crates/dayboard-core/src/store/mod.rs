mod json;
mod memory;

pub use json::JsonFileStore;
pub use memory::MemoryStore;

use chrono::NaiveDate;
use uuid::Uuid;

use crate::error::CoreError;
use crate::models::Task;

/// Persistence port for master task rows.
///
/// Callers materialize occurrences themselves; the store only answers which
/// masters could matter for a window. `list_window` returns non-recurring
/// rows anchored inside `[from, to]` plus every recurring row anchored on or
/// before `to`, since a recurring master anchored years ago may still fire
/// inside the window.
pub trait TaskStore {
    fn list_window(&self, from: NaiveDate, to: NaiveDate) -> Result<Vec<Task>, CoreError>;
    fn list(&self) -> Result<Vec<Task>, CoreError>;
    fn get(&self, id: Uuid) -> Result<Option<Task>, CoreError>;
    /// Inserts or replaces a row, assigning an id when the task has none.
    /// Returns the stored row.
    fn upsert(&mut self, task: Task) -> Result<Task, CoreError>;
    fn delete(&mut self, id: Uuid) -> Result<(), CoreError>;
}

pub(crate) fn in_window(task: &Task, from: NaiveDate, to: NaiveDate) -> bool {
    if task.rule.is_never() {
        from <= task.date_key && task.date_key <= to
    } else {
        task.date_key <= to
    }
}

/// Readies a row for storage: assigns an id when missing and renormalizes
/// the rule. Applied on every write and on every file load.
pub(crate) fn prepared(mut task: Task) -> (Uuid, Task) {
    let id = task.id.unwrap_or_else(Uuid::now_v7);
    task.id = Some(id);
    task.rule = task.rule.normalized();
    (id, task)
}

pub(crate) fn sorted_rows<'a>(rows: impl Iterator<Item = &'a Task>) -> Vec<Task> {
    let mut rows: Vec<Task> = rows.cloned().collect();
    rows.sort_by_key(|task| (task.date_key, task.id));
    rows
}
