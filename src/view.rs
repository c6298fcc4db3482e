//! View arrangement: kanban partition and timeline ordering.

use serde::Serialize;

use crate::task::{Status, Task, KANBAN_STATUSES};

/// One kanban column: a progression status and the tasks parked there,
/// in input order.
#[derive(Debug, Clone, Serialize)]
pub struct KanbanColumn {
    pub status: Status,
    pub tasks: Vec<Task>,
}

/// The four-column kanban board.
///
/// Cancelled tasks have no column here; they stay reachable through the
/// timeline and the status filter.
#[derive(Debug, Clone, Serialize)]
pub struct KanbanBoard {
    pub columns: Vec<KanbanColumn>,
}

pub fn kanban(tasks: &[Task]) -> KanbanBoard {
    let columns = KANBAN_STATUSES
        .iter()
        .map(|&status| KanbanColumn {
            status,
            tasks: tasks
                .iter()
                .filter(|task| task.status == status)
                .cloned()
                .collect(),
        })
        .collect();

    KanbanBoard { columns }
}

/// Chronological ordering by scheduled date, ascending. The sort is
/// stable: tasks on the same day keep their input order. Cancelled
/// tasks are included.
pub fn timeline(tasks: &[Task]) -> Vec<Task> {
    let mut ordered = tasks.to_vec();
    ordered.sort_by_key(|task| task.scheduled_date);
    ordered
}
