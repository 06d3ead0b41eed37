//! New Member Request Model

use serde::{Deserialize, Serialize};

/// A third-party "please add this person" request (代人申请)
///
/// Approval happens exactly once: `approved`, `approved_at` and
/// `admin_user` are set together and never reverted. Approved requests
/// drop out of the pending view but stay in the table for audit.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct NewMemberRequest {
    pub id: i64,
    pub requested_name: String,
    pub contact: Option<String>,
    pub requested_at: i64,
    pub approved: bool,
    pub approved_at: Option<i64>,
    pub admin_user: Option<String>,
}
