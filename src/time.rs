//! Time, in the view of the nozzle

use chrono::Utc;

/// The current time in UTC seconds since the Unix epoch. Used to stamp metric
/// samples whose source envelope carries no timestamp of its own.
pub fn now() -> i64 {
    Utc::now().timestamp()
}
