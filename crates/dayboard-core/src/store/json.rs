use std::collections::BTreeMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use uuid::Uuid;

use crate::error::CoreError;
use crate::models::Task;

use super::{in_window, prepared, sorted_rows, TaskStore};

/// JSON-file-backed task store.
///
/// The file holds a flat array of master rows. It is read once on open and
/// rewritten after every mutation; rules are renormalized on load so files
/// written by hand or by older versions degrade safely instead of refusing
/// to parse.
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    tasks: BTreeMap<Uuid, Task>,
}

impl JsonFileStore {
    /// Opens the store at `path`, loading the file when it exists. A missing
    /// file is an empty store; it is created on the first write.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, CoreError> {
        let path = path.into();
        let tasks = match fs::read_to_string(&path) {
            Ok(raw) => load_rows(&raw)?,
            Err(err) if err.kind() == ErrorKind::NotFound => BTreeMap::new(),
            Err(err) => return Err(err.into()),
        };
        Ok(Self { path, tasks })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Rewrites the data file through a sibling temp file and a rename, so
    /// an interrupted write cannot truncate existing data.
    fn save(&self) -> Result<(), CoreError> {
        let rows: Vec<&Task> = self.tasks.values().collect();
        let json = serde_json::to_string_pretty(&rows)?;
        let mut tmp = self.path.as_os_str().to_os_string();
        tmp.push(".tmp");
        let tmp = PathBuf::from(tmp);
        fs::write(&tmp, json)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}

fn load_rows(raw: &str) -> Result<BTreeMap<Uuid, Task>, CoreError> {
    if raw.trim().is_empty() {
        return Ok(BTreeMap::new());
    }
    let rows: Vec<Task> = serde_json::from_str(raw)?;
    Ok(rows.into_iter().map(prepared).collect())
}

impl TaskStore for JsonFileStore {
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
        self.save()?;
        Ok(task)
    }

    fn delete(&mut self, id: Uuid) -> Result<(), CoreError> {
        self.tasks
            .remove(&id)
            .ok_or_else(|| CoreError::NotFound(id.to_string()))?;
        self.save()
    }
}
