use crate::errors::AppError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Day of the week as stored in `routine_schedules.day_of_week`
/// (0 = Sunday … 6 = Saturday).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "u8")]
pub enum DayOfWeek {
    Sunday = 0,
    Monday = 1,
    Tuesday = 2,
    Wednesday = 3,
    Thursday = 4,
    Friday = 5,
    Saturday = 6,
}

impl DayOfWeek {
    pub const ALL: [DayOfWeek; 7] = [
        DayOfWeek::Sunday,
        DayOfWeek::Monday,
        DayOfWeek::Tuesday,
        DayOfWeek::Wednesday,
        DayOfWeek::Thursday,
        DayOfWeek::Friday,
        DayOfWeek::Saturday,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            DayOfWeek::Sunday => "Sunday",
            DayOfWeek::Monday => "Monday",
            DayOfWeek::Tuesday => "Tuesday",
            DayOfWeek::Wednesday => "Wednesday",
            DayOfWeek::Thursday => "Thursday",
            DayOfWeek::Friday => "Friday",
            DayOfWeek::Saturday => "Saturday",
        }
    }

    /// Convert enum → DB integer
    pub fn to_db(&self) -> i64 {
        *self as i64
    }

    /// Convert DB integer → enum
    pub fn from_db(v: i64) -> Option<Self> {
        usize::try_from(v)
            .ok()
            .and_then(|i| Self::ALL.get(i).copied())
    }

    /// Helper for CLI input: `3`, `wed`, `Wednesday` (case-insensitive).
    pub fn from_input(s: &str) -> Option<Self> {
        let s = s.trim();
        if let Ok(n) = s.parse::<i64>() {
            return Self::from_db(n);
        }
        let lower = s.to_lowercase();
        if lower.len() < 3 {
            return None;
        }
        Self::ALL
            .iter()
            .copied()
            .find(|d| d.name().to_lowercase().starts_with(&lower))
    }
}

impl From<chrono::Weekday> for DayOfWeek {
    fn from(w: chrono::Weekday) -> Self {
        Self::ALL[w.num_days_from_sunday() as usize]
    }
}

impl TryFrom<i64> for DayOfWeek {
    type Error = AppError;

    fn try_from(v: i64) -> Result<Self, Self::Error> {
        Self::from_db(v).ok_or_else(|| AppError::InvalidDayOfWeek(v.to_string()))
    }
}

impl From<DayOfWeek> for u8 {
    fn from(d: DayOfWeek) -> Self {
        d as u8
    }
}

impl fmt::Display for DayOfWeek {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_numbers_and_names() {
        assert_eq!(DayOfWeek::from_input("0"), Some(DayOfWeek::Sunday));
        assert_eq!(DayOfWeek::from_input("wed"), Some(DayOfWeek::Wednesday));
        assert_eq!(DayOfWeek::from_input("SATURDAY"), Some(DayOfWeek::Saturday));
        assert_eq!(DayOfWeek::from_input("7"), None);
        assert_eq!(DayOfWeek::from_input("-1"), None);
        assert_eq!(DayOfWeek::from_input("t"), None);
    }

    #[test]
    fn serializes_as_integer_and_rejects_out_of_range() {
        assert_eq!(serde_json::to_string(&DayOfWeek::Friday).unwrap(), "5");
        let d: DayOfWeek = serde_json::from_str("1").unwrap();
        assert_eq!(d, DayOfWeek::Monday);
        assert!(serde_json::from_str::<DayOfWeek>("9").is_err());
    }

    #[test]
    fn chrono_weekday_maps_sunday_first() {
        assert_eq!(DayOfWeek::from(chrono::Weekday::Sun), DayOfWeek::Sunday);
        assert_eq!(DayOfWeek::from(chrono::Weekday::Sat), DayOfWeek::Saturday);
    }
}
