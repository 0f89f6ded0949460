use crate::errors::{AppError, AppResult};
use chrono::{Datelike, Duration, NaiveDate};

pub fn today() -> NaiveDate {
    chrono::Local::now().date_naive()
}

pub fn parse_date(s: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d").ok()
}

/// Parse an optional `YYYY-MM-DD` value, defaulting to today.
pub fn parse_date_or_today(s: Option<&str>) -> AppResult<NaiveDate> {
    match s {
        Some(raw) if !raw.trim().is_empty() => {
            parse_date(raw).ok_or_else(|| AppError::InvalidDate(raw.to_string()))
        }
        _ => Ok(today()),
    }
}

/// `date` shifted by `days`, or `InvalidDate` when that leaves the calendar range.
fn shift(date: NaiveDate, days: i64) -> AppResult<NaiveDate> {
    date.checked_add_signed(Duration::days(days))
        .ok_or_else(|| AppError::InvalidDate(date_str(date)))
}

/// Monday of the week containing `date`.
pub fn week_start(date: NaiveDate) -> AppResult<NaiveDate> {
    shift(date, -i64::from(date.weekday().num_days_from_monday()))
}

/// Monday through Friday of the week containing `date`.
pub fn working_week(date: NaiveDate) -> AppResult<Vec<NaiveDate>> {
    let monday = week_start(date)?;
    (0..5).map(|i| shift(monday, i)).collect()
}

/// Inclusive range `[end - days, end]`.
pub fn trailing_range(end: NaiveDate, days: i64) -> AppResult<(NaiveDate, NaiveDate)> {
    Ok((shift(end, -days)?, end))
}

pub fn date_str(d: NaiveDate) -> String {
    d.format("%Y-%m-%d").to_string()
}
