//! Stable exit codes for library CLI commands.

/// Command succeeded.
pub const OK: i32 = 0;
/// Command failed due to invalid config, unreadable records or other errors.
pub const INVALID: i32 = 1;
/// A catalog rule refused the requested change (duplicate, on loan, ...).
pub const REJECTED: i32 = 2;
