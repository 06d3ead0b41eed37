//! Attendance Model

use serde::{Deserialize, Serialize};

/// One check-in event (签到记录)
///
/// Identity is the `(session_date, member_id)` pair — enforced by a
/// UNIQUE constraint, so a second check-in for the same pair is a no-op.
/// `display_name_snapshot` is captured at check-in time and deliberately
/// never updated, so historical exports stay stable across renames and
/// merges.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Attendance {
    /// Session occurrence date, ISO `YYYY-MM-DD`
    pub session_date: String,
    pub member_id: i64,
    pub display_name_snapshot: String,
    pub submitted_at: i64,
}

/// Result of a check-in attempt
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct CheckInOutcome {
    pub already_registered: bool,
}
