//! Due-date classification.
//!
//! Days are counted in calendar days of the observer's time zone (the zone
//! of `now`), never persisted.

use std::cmp::Ordering;

use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use serde::Serialize;

use crate::entities::{parse_timestamp, Task};

/// Due-date tier, ordered from no pressure to past due.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DueStatus {
    None,
    Overdue,
    Today,
    Tomorrow,
    Soon,
    Upcoming,
}

/// Display information for a task's due date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DueDateInfo {
    pub status: DueStatus,
    pub label: String,
    /// 0 (none) to 3 (overdue)
    pub urgency: u8,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub days: Option<i64>,
}

impl DueDateInfo {
    fn none(label: &str) -> Self {
        Self {
            status: DueStatus::None,
            label: label.to_string(),
            urgency: 0,
            days: None,
        }
    }
}

/// Classify a due date relative to `now`.
pub fn classify<Tz: TimeZone>(due: Option<DateTime<Utc>>, now: &DateTime<Tz>) -> DueDateInfo {
    let Some(due) = due else {
        return DueDateInfo::none("No due date");
    };

    let today = now.date_naive();
    let due_day = due.with_timezone(&now.timezone()).date_naive();
    let days = (due_day - today).num_days();

    if days < 0 {
        DueDateInfo {
            status: DueStatus::Overdue,
            label: "Overdue".to_string(),
            urgency: 3,
            days: Some(days.abs()),
        }
    } else if days == 0 {
        DueDateInfo {
            status: DueStatus::Today,
            label: "Due today".to_string(),
            urgency: 2,
            days: Some(0),
        }
    } else if days == 1 {
        DueDateInfo {
            status: DueStatus::Tomorrow,
            label: "Due tomorrow".to_string(),
            urgency: 1,
            days: Some(1),
        }
    } else if days <= 7 {
        DueDateInfo {
            status: DueStatus::Soon,
            label: format!("Due in {days} days"),
            urgency: 1,
            days: Some(days),
        }
    } else {
        DueDateInfo {
            status: DueStatus::Upcoming,
            label: format_due_date(due_day),
            urgency: 0,
            days: Some(days),
        }
    }
}

/// Classify a raw, possibly malformed, due-date string.
///
/// Blank input means "no due date"; unparseable input is reported as
/// "Invalid date" instead of failing.
pub fn classify_raw<Tz: TimeZone>(raw: Option<&str>, now: &DateTime<Tz>) -> DueDateInfo {
    match raw.map(str::trim).filter(|raw| !raw.is_empty()) {
        None => classify(None, now),
        Some(raw) => match parse_timestamp(raw) {
            Some(due) => classify(Some(due), now),
            None => DueDateInfo::none("Invalid date"),
        },
    }
}

/// `Mar 01, 2025`
pub fn format_due_date(day: NaiveDate) -> String {
    day.format("%b %d, %Y").to_string()
}

/// Past due on a previous calendar day.
pub fn is_overdue<Tz: TimeZone>(due: Option<DateTime<Utc>>, now: &DateTime<Tz>) -> bool {
    classify(due, now).status == DueStatus::Overdue
}

/// Overdue tasks first, then by due date ascending, undated tasks last.
pub fn sort_by_due_date<Tz: TimeZone>(tasks: &mut [Task], now: &DateTime<Tz>) {
    tasks.sort_by(|a, b| match (a.due_date, b.due_date) {
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Greater,
        (Some(_), None) => Ordering::Less,
        (Some(x), Some(y)) => {
            let x_overdue = is_overdue(Some(x), now);
            let y_overdue = is_overdue(Some(y), now);
            y_overdue.cmp(&x_overdue).then(x.cmp(&y))
        }
    });
}
