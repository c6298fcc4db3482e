//! hyd calendar command implementation.

use serde::Serialize;

use crate::calendar::{month_view, tasks_on, MonthAnchor, MonthView};
use crate::cli::Context;
use crate::error::Result;
use crate::output::{emit_success, HumanOutput, OutputOptions};
use crate::task::{parse_scheduled_date, Board, Task};

pub struct CalendarOptions {
    pub month: Option<String>,
    pub day: Option<String>,
    pub board: Option<String>,
    pub shift: Option<i32>,
    pub search: Option<String>,
    pub status: Option<String>,
    pub priority: Option<String>,
}

#[derive(Serialize)]
struct CalendarData {
    board: Board,
    #[serde(flatten)]
    view: MonthView,
    #[serde(skip_serializing_if = "Option::is_none")]
    selected_day: Option<chrono::NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    selected_tasks: Option<Vec<Task>>,
}

pub fn run(context: &Context, output: OutputOptions, options: CalendarOptions) -> Result<()> {
    let board = super::task::resolve_board(context, options.board.as_deref())?;
    let filter = super::task::build_filter(
        options.search,
        options.status.as_deref(),
        options.priority.as_deref(),
    )?;
    let tasks = super::task::visible_filtered(context, board, &filter)?;

    let selected_day = options
        .day
        .as_deref()
        .map(parse_scheduled_date)
        .transpose()?;

    // Anchor resolution: explicit month, else the selected day's month,
    // else the current month. A shift moves the anchor only; the
    // selected day stays where it is, even outside the shown month.
    let mut anchor = match options.month.as_deref() {
        Some(raw) => MonthAnchor::parse(raw)?,
        None => match selected_day {
            Some(day) => MonthAnchor::of(day),
            None => MonthAnchor::of(chrono::Local::now().date_naive()),
        },
    };
    if let Some(shift) = options.shift {
        for _ in 0..shift.abs() {
            anchor = if shift < 0 { anchor.prev() } else { anchor.next() };
        }
    }

    let view = month_view(anchor, &tasks)?;
    let selected_tasks = selected_day.map(|day| tasks_on(day, &tasks));

    let mut human = HumanOutput::new(format!(
        "Calendar {} ({} board)",
        anchor,
        board.label()
    ));
    let in_month: usize = view.days.iter().map(|cell| cell.tasks.len()).sum();
    human.push_summary("tasks this month", in_month.to_string());
    for cell in view.days.iter().filter(|cell| !cell.tasks.is_empty()) {
        let dots: Vec<&str> = cell.dots.iter().map(|priority| priority.label()).collect();
        let mut line = format!("{}: {} task(s) [{}]", cell.date, cell.tasks.len(), dots.join(", "));
        if cell.overflow > 0 {
            line.push_str(&format!(" +{}", cell.overflow));
        }
        human.push_detail(line);
    }

    if let (Some(day), Some(day_tasks)) = (selected_day, selected_tasks.as_ref()) {
        human.push_summary("selected day", day.to_string());
        if !anchor.contains(day) {
            human.push_warning(format!("selected day {day} is outside the shown month"));
        }
        if day_tasks.is_empty() {
            human.push_detail(format!("{day}: no tasks scheduled"));
        }
        for task in day_tasks {
            human.push_detail(format!(
                "{day}: {} {} ({}, {})",
                task.id,
                task.display_label(),
                task.priority.label(),
                task.estimated_duration
            ));
        }
    }

    let data = CalendarData {
        board,
        view,
        selected_day,
        selected_tasks,
    };
    emit_success(output, "calendar", &data, Some(&human))
}
