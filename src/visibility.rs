//! The role gate.
//!
//! Technicians see only the tasks assigned to them, matched on the
//! exact display name; every other role sees the whole list. Applied
//! before the filter engine, so a technician's search and filters
//! operate within their own tasks only.

use crate::actor::{Identity, Role};
use crate::task::Task;

/// Narrow a task list to what the given identity may see.
pub fn visible_tasks(tasks: Vec<Task>, identity: &Identity) -> Vec<Task> {
    if identity.role != Role::Technician {
        return tasks;
    }

    tasks
        .into_iter()
        .filter(|task| task.assigned_to == identity.name)
        .collect()
}
