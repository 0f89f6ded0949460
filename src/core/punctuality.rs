//! Punctuality of actual start/end instants against a routine's schedule.
//!
//! The scheduled time of day is placed on the actual instant's own calendar
//! day, in the instant's own UTC offset, and the signed difference
//! `actual - scheduled` is rounded to whole minutes (half away from zero).
//! A time is on time when that difference lies within `±grace` minutes,
//! bounds included.

use crate::models::completion::{Punctuality, TaskCompletion};
use crate::models::routine::Routine;
use crate::utils::time::parse_clock_12h;
use chrono::{DateTime, FixedOffset};

/// Signed minutes between `actual` and the scheduled `"h:mm AM/PM"` time on
/// the same day. `None` when the scheduled string cannot be parsed.
pub fn minutes_off(scheduled: &str, actual: &DateTime<FixedOffset>) -> Option<i64> {
    let time = parse_clock_12h(scheduled)?;
    let scheduled_at = actual.date_naive().and_time(time);
    let diff = actual.naive_local() - scheduled_at;
    Some((diff.num_milliseconds() as f64 / 60_000.0).round() as i64)
}

/// Classify one actual time.
///
/// - no actual time: `None`
/// - malformed scheduled time: `Some(false)`
pub fn is_on_time(
    scheduled: &str,
    actual: Option<&DateTime<FixedOffset>>,
    grace_minutes: i64,
) -> Option<bool> {
    let actual = actual?;
    Some(
        minutes_off(scheduled, actual)
            .map(|delta| delta.abs() <= grace_minutes)
            .unwrap_or(false),
    )
}

/// Evaluate both ends of a completion. The task as a whole is on time only
/// when both its start and its end are.
pub fn evaluate(routine: &Routine, completion: &TaskCompletion, grace_minutes: i64) -> Punctuality {
    let start = completion.actual_start_time.as_ref();
    let end = completion.actual_end_time.as_ref();

    let start_on_time = is_on_time(&routine.start_time, start, grace_minutes);
    let end_on_time = is_on_time(&routine.end_time, end, grace_minutes);

    let on_time = match (start_on_time, end_on_time) {
        (Some(s), Some(e)) => Some(s && e),
        _ => None,
    };

    Punctuality {
        start_delta_minutes: start.and_then(|t| minutes_off(&routine.start_time, t)),
        end_delta_minutes: end.and_then(|t| minutes_off(&routine.end_time, t)),
        start_on_time,
        end_on_time,
        on_time,
    }
}
