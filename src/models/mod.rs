pub mod completion;
pub mod day_of_week;
pub mod performance;
pub mod routine;
pub mod schedule;
pub mod user;
