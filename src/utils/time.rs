//! Time utilities: 12-hour clock parsing, wall-clock entry, minute formatting.

use crate::errors::{AppError, AppResult};
use chrono::{DateTime, FixedOffset, Local, NaiveDate, NaiveTime, TimeZone, Timelike};

/// Parse a scheduled time such as `"8:00 AM"` or `"12:30 pm"`.
///
/// Hours run 1..=12; `12 AM` is midnight and `12 PM` is noon.
pub fn parse_clock_12h(t: &str) -> Option<NaiveTime> {
    let (time_part, meridiem) = t.trim().split_once(' ')?;
    let (h, m) = time_part.split_once(':')?;

    let (h, m) = (h.trim(), m.trim());
    if h.is_empty() || m.len() != 2 || !h.bytes().chain(m.bytes()).all(|b| b.is_ascii_digit()) {
        return None;
    }

    let hour: u32 = h.parse().ok()?;
    let minute: u32 = m.parse().ok()?;
    if !(1..=12).contains(&hour) {
        return None;
    }

    let hour = match meridiem.trim().to_ascii_uppercase().as_str() {
        "AM" => hour % 12,
        "PM" => hour % 12 + 12,
        _ => return None,
    };

    NaiveTime::from_hms_opt(hour, minute, 0)
}

/// Parse a wall-clock entry (`HH:MM`, 24h) typed on the command line.
pub fn parse_hhmm(t: &str) -> Option<NaiveTime> {
    NaiveTime::parse_from_str(t.trim(), "%H:%M").ok()
}

/// Combine a date and a local wall-clock time into an instant.
pub fn local_instant(date: NaiveDate, time: NaiveTime) -> AppResult<DateTime<FixedOffset>> {
    Local
        .from_local_datetime(&date.and_time(time))
        .earliest()
        .map(|dt| dt.fixed_offset())
        .ok_or_else(|| AppError::InvalidTime(format!("{} {}", date, time.format("%H:%M"))))
}

/// Parse an optional `HH:MM` entry for `date` into an instant.
pub fn parse_optional_entry(
    input: Option<&String>,
    date: NaiveDate,
) -> AppResult<Option<DateTime<FixedOffset>>> {
    if let Some(s) = input {
        let t = parse_hhmm(s).ok_or_else(|| AppError::InvalidTime(s.to_string()))?;
        Ok(Some(local_instant(date, t)?))
    } else {
        Ok(None)
    }
}

/// Minutes of day for sorting; unparseable times sort after everything else.
pub fn sort_key(scheduled: &str) -> u32 {
    parse_clock_12h(scheduled)
        .map(|t| t.num_seconds_from_midnight() / 60)
        .unwrap_or(u32::MAX)
}

/// Signed minute delta rendered for humans: `on time`, `+12 min`, `-3 min`.
pub fn format_delta(mins: i64) -> String {
    match mins {
        0 => "on time".to_string(),
        m if m > 0 => format!("+{} min", m),
        m => format!("{} min", m),
    }
}
