//! The task store.
//!
//! Owns the canonical task list in `.hyd/tasks.json`. Every other
//! component receives snapshots from here and writes back through here;
//! nothing else touches the document.

use tracing::warn;

use crate::error::{Error, Result};
use crate::storage::Storage;
use crate::task::{seed_tasks, Board, Task};

#[derive(Debug, Clone)]
pub struct TaskStore {
    storage: Storage,
}

impl TaskStore {
    pub fn new(storage: Storage) -> Self {
        Self { storage }
    }

    pub fn storage(&self) -> &Storage {
        &self.storage
    }

    /// Load the task list.
    ///
    /// A missing, empty, or unreadable document falls back to the seed
    /// set, which is persisted immediately so the next read is clean.
    /// Corruption is recovered silently (a warning in the log, never an
    /// error to the caller).
    pub fn load(&self) -> Result<Vec<Task>> {
        let path = self.storage.tasks_file();
        if !path.exists() {
            return self.reseed();
        }

        let raw = std::fs::read_to_string(&path)?;
        let tasks: Vec<Task> = match serde_json::from_str(&raw) {
            Ok(tasks) => tasks,
            Err(err) => {
                warn!(path = %path.display(), %err, "task store unreadable, restoring seed data");
                return self.reseed();
            }
        };

        if tasks.is_empty() {
            return self.reseed();
        }

        Ok(tasks)
    }

    /// Persist the full list, replacing prior content. No merge, no
    /// retry: a refused write surfaces once as an operation failure.
    pub fn save(&self, tasks: &[Task]) -> Result<()> {
        self.storage.init()?;
        self.storage.write_json(&self.storage.tasks_file(), &tasks)
    }

    /// Discard persisted state and restore the seed set. With a board,
    /// only that board's records are restored; the other board keeps its
    /// current contents.
    pub fn reset(&self, board: Option<Board>) -> Result<Vec<Task>> {
        let Some(board) = board else {
            return self.reseed();
        };

        let mut tasks: Vec<Task> = self
            .load()?
            .into_iter()
            .filter(|task| task.board != board)
            .collect();
        tasks.extend(
            seed_tasks()?
                .into_iter()
                .filter(|task| task.board == board),
        );
        self.save(&tasks)?;
        Ok(tasks)
    }

    /// Fetch one task by id.
    pub fn get(&self, id: &str) -> Result<Task> {
        self.load()?
            .into_iter()
            .find(|task| task.id == id)
            .ok_or_else(|| Error::TaskNotFound(id.to_string()))
    }

    fn reseed(&self) -> Result<Vec<Task>> {
        let tasks = seed_tasks()?;
        self.save(&tasks)?;
        Ok(tasks)
    }
}
