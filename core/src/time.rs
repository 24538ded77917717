//! Time related utils.

use chrono::Utc;

/// DateTime is the alias for chrono::DateTime<Utc>.
pub type DateTime = chrono::DateTime<Utc>;

/// Create a new DateTime with current time.
pub fn now() -> DateTime {
    Utc::now()
}

/// Format time into seconds since the unix epoch: "1700000000"
pub fn format_unix_timestamp(t: DateTime) -> String {
    t.timestamp().to_string()
}
