//! Session Model

use serde::{Deserialize, Serialize};

/// Derived view of the current session occurrence — never stored,
/// recomputed on demand from wall-clock time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionInfo {
    /// ISO date (`YYYY-MM-DD`) identifying the occurrence
    #[serde(rename = "sessionDateISO")]
    pub session_date_iso: String,
    /// Human-readable long form, e.g. "Saturday, 7 June 2025"
    #[serde(rename = "displayDate")]
    pub display_date: String,
}

/// Per-session dashboard view for the operator (§ admin)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdminAttendanceData {
    pub active: Vec<super::MemberSummary>,
    pub provisional: Vec<super::MemberSummary>,
    pub requests: Vec<super::NewMemberRequest>,
    pub counts: AttendanceCounts,
}

/// Bucket sizes for the dashboard header
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct AttendanceCounts {
    pub active: usize,
    pub provisional: usize,
    pub total: usize,
}
