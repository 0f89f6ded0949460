pub mod completion;
pub mod config;
pub mod defaults;
pub mod log;
pub mod performance;
pub mod punctuality;
pub mod routine;
pub mod schedule;
