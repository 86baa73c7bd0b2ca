//! Application result alias.

use crate::error::AppError;

/// Convenience alias used by all GramDrive crates.
pub type AppResult<T> = Result<T, AppError>;
