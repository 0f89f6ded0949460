use crate::models::routine::RoutineDraft;

/// The routine every user gets back after a reset: nine blocks covering
/// a full day, midnight to midnight.
pub const DEFAULT_ROUTINE: [(&str, &str, &str); 9] = [
    ("Sleep", "12:00 AM", "8:00 AM"),
    ("Morning & Breakfast", "8:00 AM", "10:00 AM"),
    ("Work 1", "10:00 AM", "12:00 PM"),
    ("Gym", "12:00 PM", "2:00 PM"),
    ("Lunch", "2:00 PM", "3:00 PM"),
    ("Work 2", "3:00 PM", "5:00 PM"),
    ("Break", "5:00 PM", "6:00 PM"),
    ("Work 3", "6:00 PM", "8:00 PM"),
    ("Dinner & Rest", "8:00 PM", "12:00 AM"),
];

pub fn default_routine() -> Vec<RoutineDraft> {
    DEFAULT_ROUTINE
        .iter()
        .map(|(name, start, end)| RoutineDraft::new(name, start, end))
        .collect()
}
