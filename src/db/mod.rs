pub mod completions;
pub mod initialize;
pub mod log;
pub mod migrate;
pub mod pool;
pub mod routines;
pub mod schedules;
pub mod stats;
pub mod users;

use crate::errors::AppError;

/// Wrap a parse failure on a stored column into a rusqlite conversion error.
pub(crate) fn conversion_error(idx: usize, err: AppError) -> rusqlite::Error {
    rusqlite::Error::FromSqlConversionFailure(idx, rusqlite::types::Type::Text, Box::new(err))
}
