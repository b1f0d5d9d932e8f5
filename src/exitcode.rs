//! Process exit codes
//!
//! Classified request errors carry their own status, which is used verbatim
//! and is therefore not listed here.

/// Successful termination
pub const OK: i32 = 0;

/// Generic failure, also used for requests that ended with the soft status
pub const FAILURE: i32 = 1;

/// Request status that is reported as a warning rather than a failure
pub const SOFT_STATUS: i32 = 1;
