//! The task editor.
//!
//! The only write path into the store besides a reset: validated
//! creation, in-place update of an existing record, and the one-click
//! complete shortcut. Every successful mutation persists immediately.

use chrono::NaiveDate;

use crate::config::TasksConfig;
use crate::error::{Error, Result};
use crate::store::TaskStore;
use crate::task::{Board, Priority, Status, Task, TaskKind};

/// Fields collected for a new task. Required: hydrant id, kind,
/// description, assignee. The rest default.
#[derive(Debug, Clone, Default)]
pub struct TaskDraft {
    pub hydrant_id: String,
    pub title: Option<String>,
    pub kind: Option<TaskKind>,
    pub priority: Option<Priority>,
    pub status: Option<Status>,
    pub assigned_to: String,
    pub location: String,
    pub scheduled_date: Option<NaiveDate>,
    pub estimated_duration: Option<String>,
    pub description: String,
}

/// Validate and append a new task.
///
/// Any missing required field aborts with a validation error before the
/// store is touched. On success the task gets a fresh id derived from
/// the current collection size and the full list is persisted.
pub fn create(
    store: &TaskStore,
    config: &TasksConfig,
    board: Board,
    draft: TaskDraft,
    today: NaiveDate,
) -> Result<Task> {
    let mut missing = Vec::new();
    if draft.hydrant_id.trim().is_empty() {
        missing.push("hydrant_id".to_string());
    }
    if draft.kind.is_none() {
        missing.push("kind".to_string());
    }
    if draft.description.trim().is_empty() {
        missing.push("description".to_string());
    }
    if draft.assigned_to.trim().is_empty() {
        missing.push("assigned_to".to_string());
    }
    if !missing.is_empty() {
        return Err(Error::MissingFields(missing));
    }

    let mut tasks = store.load()?;

    let status = draft.status.unwrap_or(Status::Pending);
    let task = Task {
        id: format!("{}{:03}", config.id_prefix, tasks.len() + 1),
        board,
        hydrant_id: draft.hydrant_id,
        title: draft.title,
        // Checked non-empty above.
        kind: draft.kind.unwrap_or(TaskKind::Inspection),
        priority: draft.priority.unwrap_or(Priority::Medium),
        status,
        assigned_to: draft.assigned_to,
        location: draft.location,
        scheduled_date: draft.scheduled_date.unwrap_or(today),
        estimated_duration: draft
            .estimated_duration
            .unwrap_or_else(|| config.default_duration.clone()),
        progress: (status == Status::InProgress).then_some(0),
        description: draft.description,
    };

    tasks.push(task.clone());
    store.save(&tasks)?;
    Ok(task)
}

/// Replace the record matching `updated.id` in place.
///
/// An unknown id is rejected; the editor never upserts.
pub fn update(store: &TaskStore, updated: Task) -> Result<Task> {
    let mut tasks = store.load()?;
    let slot = tasks
        .iter_mut()
        .find(|task| task.id == updated.id)
        .ok_or_else(|| Error::TaskNotFound(updated.id.clone()))?;
    *slot = updated.clone();
    store.save(&tasks)?;
    Ok(updated)
}

/// Mark a task completed: status -> completed, progress -> 100.
/// Idempotent; completing a completed task changes nothing.
pub fn complete(store: &TaskStore, id: &str) -> Result<Task> {
    let mut tasks = store.load()?;
    let slot = tasks
        .iter_mut()
        .find(|task| task.id == id)
        .ok_or_else(|| Error::TaskNotFound(id.to_string()))?;
    slot.status = Status::Completed;
    slot.progress = Some(100);
    let done = slot.clone();
    store.save(&tasks)?;
    Ok(done)
}
