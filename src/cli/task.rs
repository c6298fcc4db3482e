//! hyd task command implementations.

use serde::Serialize;

use crate::cli::Context;
use crate::editor;
use crate::error::{Error, Result};
use crate::events::{Event, EventDestination, EventKind};
use crate::filter::TaskFilter;
use crate::output::{emit_success, HumanOutput, OutputOptions};
use crate::task::{
    compute_stats, parse_scheduled_date, Board, Priority, Status, Task, TaskKind, TaskStats,
};
use crate::view::{kanban, timeline, KanbanBoard};
use crate::visibility::visible_tasks;

pub struct ListOptions {
    pub search: Option<String>,
    pub status: Option<String>,
    pub priority: Option<String>,
    pub board: Option<String>,
    pub view: String,
}

pub struct NewOptions {
    pub hydrant: Option<String>,
    pub kind: Option<String>,
    pub title: Option<String>,
    pub description: Option<String>,
    pub assigned_to: Option<String>,
    pub location: Option<String>,
    pub priority: Option<String>,
    pub status: Option<String>,
    pub date: Option<String>,
    pub duration: Option<String>,
    pub board: Option<String>,
}

pub struct EditOptions {
    pub id: String,
    pub status: Option<String>,
    pub priority: Option<String>,
    pub progress: Option<u8>,
    pub description: Option<String>,
    pub assigned_to: Option<String>,
    pub title: Option<String>,
    pub location: Option<String>,
    pub date: Option<String>,
    pub duration: Option<String>,
}

/// Resolve the board a command operates on: explicit flag, else the
/// configured default.
pub(crate) fn resolve_board(context: &Context, flag: Option<&str>) -> Result<Board> {
    match flag {
        Some(raw) => Board::parse(raw),
        None => Board::parse(&context.config.tasks.default_board)
            .map_err(|_| {
                Error::InvalidConfig(format!(
                    "unknown default board '{}'",
                    context.config.tasks.default_board
                ))
            }),
    }
}

pub(crate) fn build_filter(
    search: Option<String>,
    status: Option<&str>,
    priority: Option<&str>,
) -> Result<TaskFilter> {
    Ok(TaskFilter {
        search,
        status: status.map(Status::parse).transpose()?,
        priority: priority.map(Priority::parse).transpose()?,
    })
}

/// The read pipeline: board slice, then the role gate, then the filter.
pub(crate) fn visible_filtered(
    context: &Context,
    board: Board,
    filter: &TaskFilter,
) -> Result<Vec<Task>> {
    let tasks: Vec<Task> = context
        .store
        .load()?
        .into_iter()
        .filter(|task| task.board == board)
        .collect();
    let gated = visible_tasks(tasks, &context.identity);
    Ok(filter.apply(gated))
}

fn emit_event(events: Option<&str>, event: Event) -> Result<()> {
    if let Some(destination) = EventDestination::parse(events) {
        destination.open()?.emit(&event)?;
    }
    Ok(())
}

fn task_line(task: &Task) -> String {
    format!(
        "{}  {}  {}  {}  {}  {}  {}",
        task.id,
        task.kind.label(),
        task.status.label(),
        task.priority.label(),
        task.scheduled_date,
        task.hydrant_id,
        if task.is_unassigned() {
            "(unassigned)"
        } else {
            task.assigned_to.as_str()
        },
    )
}

#[derive(Serialize)]
struct ListData {
    board: Board,
    view: &'static str,
    tasks: Vec<Task>,
}

#[derive(Serialize)]
struct KanbanData {
    board: Board,
    #[serde(flatten)]
    kanban: KanbanBoard,
}

pub fn run_list(context: &Context, output: OutputOptions, options: ListOptions) -> Result<()> {
    let board = resolve_board(context, options.board.as_deref())?;
    let filter = build_filter(
        options.search,
        options.status.as_deref(),
        options.priority.as_deref(),
    )?;
    let tasks = visible_filtered(context, board, &filter)?;

    match options.view.trim().to_ascii_lowercase().as_str() {
        "list" => {
            let mut human = HumanOutput::new(format!("Tasks on the {} board", board.label()));
            human.push_summary("total", tasks.len().to_string());
            for task in &tasks {
                human.push_detail(task_line(task));
            }
            let data = ListData {
                board,
                view: "list",
                tasks,
            };
            emit_success(output, "task list", &data, Some(&human))
        }
        "kanban" => {
            let board_view = kanban(&tasks);
            let mut human = HumanOutput::new(format!("Kanban for the {} board", board.label()));
            for column in &board_view.columns {
                human.push_summary(
                    column.status.label(),
                    format!("{} task(s)", column.tasks.len()),
                );
                for task in &column.tasks {
                    human.push_detail(format!("[{}] {}", column.status.label(), task_line(task)));
                }
            }
            let data = KanbanData {
                board,
                kanban: board_view,
            };
            emit_success(output, "task list", &data, Some(&human))
        }
        "timeline" => {
            let ordered = timeline(&tasks);
            let mut human = HumanOutput::new(format!("Timeline for the {} board", board.label()));
            human.push_summary("total", ordered.len().to_string());
            for task in &ordered {
                human.push_detail(format!("{} | {}", task.scheduled_date, task_line(task)));
            }
            let data = ListData {
                board,
                view: "timeline",
                tasks: ordered,
            };
            emit_success(output, "task list", &data, Some(&human))
        }
        other => Err(Error::InvalidArgument(format!(
            "unknown view '{other}' (expected list, kanban or timeline)"
        ))),
    }
}

pub fn run_new(
    context: &Context,
    output: OutputOptions,
    events: Option<&str>,
    options: NewOptions,
) -> Result<()> {
    let board = resolve_board(context, options.board.as_deref())?;
    let draft = editor::TaskDraft {
        hydrant_id: options.hydrant.unwrap_or_default(),
        title: options.title,
        kind: options.kind.as_deref().map(TaskKind::parse).transpose()?,
        priority: options
            .priority
            .as_deref()
            .map(Priority::parse)
            .transpose()?,
        status: options.status.as_deref().map(Status::parse).transpose()?,
        assigned_to: options.assigned_to.unwrap_or_default(),
        location: options.location.unwrap_or_default(),
        scheduled_date: options
            .date
            .as_deref()
            .map(parse_scheduled_date)
            .transpose()?,
        estimated_duration: options.duration,
        description: options.description.unwrap_or_default(),
    };

    let today = chrono::Local::now().date_naive();
    let task = editor::create(&context.store, &context.config.tasks, board, draft, today)?;

    emit_event(
        events,
        Event::for_task(
            EventKind::TaskCreated,
            &task,
            Some(context.identity.name.clone()),
        )?,
    )?;

    let mut human = HumanOutput::new(format!("Task created: {}", task.id));
    human.push_summary("board", board.label());
    human.push_summary("hydrant", task.hydrant_id.as_str());
    human.push_summary("kind", task.kind.label());
    human.push_summary("status", task.status.label());
    human.push_summary("scheduled", task.scheduled_date.to_string());
    human.push_summary("assigned to", task.assigned_to.as_str());
    human.push_next_step(format!("hyd task show {}", task.id));
    emit_success(output, "task new", &task, Some(&human))
}

pub fn run_show(context: &Context, output: OutputOptions, id: &str) -> Result<()> {
    let task = context.store.get(id)?;

    let mut human = HumanOutput::new(format!("{} - {}", task.id, task.display_label()));
    human.push_summary("board", task.board.label());
    human.push_summary("hydrant", task.hydrant_id.as_str());
    human.push_summary("kind", task.kind.label());
    human.push_summary("status", task.status.label());
    human.push_summary("priority", task.priority.label());
    human.push_summary("scheduled", task.scheduled_date.to_string());
    human.push_summary("duration", task.estimated_duration.as_str());
    human.push_summary("location", task.location.as_str());
    if task.is_unassigned() {
        human.push_summary("assigned to", "(unassigned)");
    } else {
        human.push_summary("assigned to", task.assigned_to.as_str());
    }
    if let Some(progress) = task.progress {
        human.push_summary("progress", format!("{progress}%"));
    }
    human.push_detail(task.description.clone());
    human.push_next_step(format!("hydrant detail: {}", task.hydrant_id));
    emit_success(output, "task show", &task, Some(&human))
}

pub fn run_edit(
    context: &Context,
    output: OutputOptions,
    events: Option<&str>,
    options: EditOptions,
) -> Result<()> {
    let mut task = context.store.get(&options.id)?;

    if let Some(raw) = options.status.as_deref() {
        task.status = Status::parse(raw)?;
    }
    if let Some(raw) = options.priority.as_deref() {
        task.priority = Priority::parse(raw)?;
    }
    if let Some(raw) = options.date.as_deref() {
        task.scheduled_date = parse_scheduled_date(raw)?;
    }
    if let Some(description) = options.description {
        task.description = description;
    }
    if let Some(assigned_to) = options.assigned_to {
        task.assigned_to = assigned_to;
    }
    if let Some(title) = options.title {
        task.title = Some(title);
    }
    if let Some(location) = options.location {
        task.location = location;
    }
    if let Some(duration) = options.duration {
        task.estimated_duration = duration;
    }
    if let Some(progress) = options.progress {
        if progress > 100 {
            return Err(Error::InvalidField(
                "progress must be between 0 and 100".to_string(),
            ));
        }
        if task.status != Status::InProgress {
            return Err(Error::InvalidField(
                "progress can only be edited while a task is in progress".to_string(),
            ));
        }
        task.progress = Some(progress);
    } else if task.status == Status::InProgress && task.progress.is_none() {
        task.progress = Some(0);
    }

    let task = editor::update(&context.store, task)?;

    emit_event(
        events,
        Event::for_task(
            EventKind::TaskEdited,
            &task,
            Some(context.identity.name.clone()),
        )?,
    )?;

    let mut human = HumanOutput::new(format!("Task updated: {}", task.id));
    human.push_summary("status", task.status.label());
    human.push_summary("priority", task.priority.label());
    if let Some(progress) = task.progress {
        human.push_summary("progress", format!("{progress}%"));
    }
    emit_success(output, "task edit", &task, Some(&human))
}

pub fn run_complete(
    context: &Context,
    output: OutputOptions,
    events: Option<&str>,
    id: &str,
) -> Result<()> {
    let task = editor::complete(&context.store, id)?;

    emit_event(
        events,
        Event::for_task(
            EventKind::TaskCompleted,
            &task,
            Some(context.identity.name.clone()),
        )?,
    )?;

    let mut human = HumanOutput::new(format!("Task completed: {}", task.id));
    human.push_summary("status", task.status.label());
    human.push_summary("progress", "100%");
    emit_success(output, "task complete", &task, Some(&human))
}

#[derive(Serialize)]
struct StatsData {
    board: Board,
    #[serde(flatten)]
    stats: TaskStats,
}

pub fn run_stats(context: &Context, output: OutputOptions, board: Option<&str>) -> Result<()> {
    let board = resolve_board(context, board)?;
    let tasks = visible_filtered(context, board, &TaskFilter::default())?;
    let stats = compute_stats(&tasks);

    let mut human = HumanOutput::new(format!("Stats for the {} board", board.label()));
    human.push_summary("total", stats.total.to_string());
    human.push_summary("pending", stats.pending.to_string());
    human.push_summary("assigned", stats.assigned.to_string());
    human.push_summary("in progress", stats.in_progress.to_string());
    human.push_summary("completed", stats.completed.to_string());
    if stats.cancelled > 0 {
        human.push_summary("cancelled", stats.cancelled.to_string());
    }
    human.push_summary("urgent", stats.urgent.to_string());
    human.push_summary(
        "average progress",
        format!("{:.0}%", stats.average_progress),
    );
    human.push_summary("hydrants serviced", stats.hydrants_serviced.to_string());
    let data = StatsData { board, stats };
    emit_success(output, "task stats", &data, Some(&human))
}

#[derive(Serialize)]
struct ResetData {
    #[serde(skip_serializing_if = "Option::is_none")]
    board: Option<Board>,
    total: usize,
}

pub fn run_reset(
    context: &Context,
    output: OutputOptions,
    events: Option<&str>,
    board: Option<&str>,
) -> Result<()> {
    let board = board.map(Board::parse).transpose()?;
    let tasks = context.store.reset(board)?;

    emit_event(
        events,
        Event::new(EventKind::StoreReset, Some(context.identity.name.clone())).with_data(
            serde_json::json!({
                "board": board,
                "total": tasks.len(),
            }),
        )?,
    )?;

    let mut human = HumanOutput::new("Seed data restored");
    match board {
        Some(board) => human.push_summary("board", board.label()),
        None => human.push_summary("board", "all"),
    }
    human.push_summary("total", tasks.len().to_string());
    let data = ResetData {
        board,
        total: tasks.len(),
    };
    emit_success(output, "task reset", &data, Some(&human))
}
