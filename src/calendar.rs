//! The calendar bucketer.
//!
//! Groups a filtered task set by calendar day for one anchor month:
//! per-day buckets drive the indicator dots (at most three, colored by
//! priority, with a "+N" overflow) and the day-detail list. Month
//! navigation moves the anchor by one month and never corrects the
//! selected day, so a selection outside the displayed month is accepted.

use std::fmt;

use chrono::{Datelike, NaiveDate};
use serde::Serialize;

use crate::error::{Error, Result};
use crate::task::{Priority, Task};

/// Visible indicator dots per day cell; the rest collapse into "+N".
pub const MAX_DAY_DOTS: usize = 3;

/// A year-month pair anchoring the displayed grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MonthAnchor {
    pub year: i32,
    pub month: u32,
}

impl MonthAnchor {
    /// Parse a `YYYY-MM` anchor.
    pub fn parse(raw: &str) -> Result<MonthAnchor> {
        let invalid =
            || Error::InvalidArgument(format!("invalid month '{raw}' (expected YYYY-MM)"));

        let (year, month) = raw.trim().split_once('-').ok_or_else(invalid)?;
        let year: i32 = year.parse().map_err(|_| invalid())?;
        let month: u32 = month.parse().map_err(|_| invalid())?;
        if !(1..=12).contains(&month) {
            return Err(invalid());
        }
        Ok(MonthAnchor { year, month })
    }

    /// Anchor for the month containing the given date.
    pub fn of(date: NaiveDate) -> MonthAnchor {
        MonthAnchor {
            year: date.year(),
            month: date.month(),
        }
    }

    pub fn prev(self) -> MonthAnchor {
        if self.month == 1 {
            MonthAnchor {
                year: self.year - 1,
                month: 12,
            }
        } else {
            MonthAnchor {
                year: self.year,
                month: self.month - 1,
            }
        }
    }

    pub fn next(self) -> MonthAnchor {
        if self.month == 12 {
            MonthAnchor {
                year: self.year + 1,
                month: 1,
            }
        } else {
            MonthAnchor {
                year: self.year,
                month: self.month + 1,
            }
        }
    }

    pub fn contains(self, date: NaiveDate) -> bool {
        date.year() == self.year && date.month() == self.month
    }

    fn first_day(self) -> Result<NaiveDate> {
        NaiveDate::from_ymd_opt(self.year, self.month, 1)
            .ok_or_else(|| Error::InvalidArgument(format!("invalid month '{self}'")))
    }
}

impl fmt::Display for MonthAnchor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

/// One day cell of the grid.
#[derive(Debug, Clone, Serialize)]
pub struct DayCell {
    pub day: u32,
    pub date: NaiveDate,
    /// Tasks scheduled on exactly this day, in input order.
    pub tasks: Vec<Task>,
    /// Priorities of the visible indicator dots, capped at [`MAX_DAY_DOTS`].
    pub dots: Vec<Priority>,
    /// Count of tasks beyond the visible dots ("+N" badge).
    pub overflow: usize,
}

/// The grid for one month.
#[derive(Debug, Clone, Serialize)]
pub struct MonthView {
    pub year: i32,
    pub month: u32,
    /// Blank cells before day 1 in a Sunday-first week grid.
    pub leading_blanks: usize,
    pub days: Vec<DayCell>,
}

/// Bucket the task set into the anchor month's day cells.
pub fn month_view(anchor: MonthAnchor, tasks: &[Task]) -> Result<MonthView> {
    let first = anchor.first_day()?;
    let next_first = anchor.next().first_day()?;
    let days_in_month = next_first.signed_duration_since(first).num_days() as u32;
    let leading_blanks = first.weekday().num_days_from_sunday() as usize;

    let mut days = Vec::with_capacity(days_in_month as usize);
    for day in 1..=days_in_month {
        // Every day in 1..=days_in_month exists by construction.
        let date = first + chrono::Duration::days(i64::from(day) - 1);
        let day_tasks: Vec<Task> = tasks
            .iter()
            .filter(|task| task.scheduled_date == date)
            .cloned()
            .collect();
        let dots: Vec<Priority> = day_tasks
            .iter()
            .take(MAX_DAY_DOTS)
            .map(|task| task.priority)
            .collect();
        let overflow = day_tasks.len().saturating_sub(MAX_DAY_DOTS);
        days.push(DayCell {
            day,
            date,
            tasks: day_tasks,
            dots,
            overflow,
        });
    }

    Ok(MonthView {
        year: anchor.year,
        month: anchor.month,
        leading_blanks,
        days,
    })
}

/// Tasks scheduled on exactly the given day, in input order. Used for
/// the day-detail list; the date may lie outside the displayed month.
pub fn tasks_on(date: NaiveDate, tasks: &[Task]) -> Vec<Task> {
    tasks
        .iter()
        .filter(|task| task.scheduled_date == date)
        .cloned()
        .collect()
}
