//! Admin API Handlers
//!
//! Read-only composition over the ledger, the directory and the request
//! queue — nothing here caches or mutates.

use axum::{
    Json,
    extract::{Path, State},
    http::header,
    response::{IntoResponse, Response},
};
use sqlx::SqlitePool;

use crate::core::ServerState;
use crate::db::repository::{RepoResult, attendance, member, request};
use crate::utils::AppResult;
use crate::utils::validation::parse_session_date;
use shared::models::{AdminAttendanceData, AttendanceCounts, MemberStatus, MemberSummary};

/// GET /api/admin/attendance/{date} - 场次管理视图
pub async fn report(
    State(state): State<ServerState>,
    Path(date): Path<String>,
) -> AppResult<Json<AdminAttendanceData>> {
    let session_date = parse_session_date(&date)?;
    let data = build_report(state.pool(), &session_date.format("%Y-%m-%d").to_string()).await?;
    Ok(Json(data))
}

/// Compose the per-session dashboard view: that session's check-ins
/// joined with the directory, bucketed by *current* status. Members whose
/// status is neither active nor provisional (e.g. inactive) are a display
/// filter — their attendance rows stay in the ledger.
pub async fn build_report(pool: &SqlitePool, session_date: &str) -> RepoResult<AdminAttendanceData> {
    let rows = attendance::find_by_session(pool, session_date).await?;

    let mut active = Vec::new();
    let mut provisional = Vec::new();
    for row in &rows {
        // Merged-away attendee ids no longer resolve; skip them like any
        // other non-displayable status.
        let Some(m) = member::find_by_id(pool, row.member_id).await? else {
            continue;
        };
        let summary = MemberSummary {
            member_id: m.id,
            display_name: m.display_name,
        };
        match m.status {
            MemberStatus::Active => active.push(summary),
            MemberStatus::Provisional => provisional.push(summary),
            MemberStatus::Inactive => {}
        }
    }

    let requests = request::find_pending(pool).await?;
    let counts = AttendanceCounts {
        active: active.len(),
        provisional: provisional.len(),
        total: active.len() + provisional.len(),
    };

    Ok(AdminAttendanceData {
        active,
        provisional,
        requests,
        counts,
    })
}

/// GET /api/admin/attendance/{date}/export.csv - 导出该场次签到 CSV
///
/// Known limitation: fields are not quoted, so a display name containing
/// a comma shifts its row (kept for output-compatibility with the
/// existing export consumers).
pub async fn export_csv(
    State(state): State<ServerState>,
    Path(date): Path<String>,
) -> AppResult<Response> {
    let session_date = parse_session_date(&date)?;
    let iso = session_date.format("%Y-%m-%d").to_string();
    let rows = attendance::find_by_session(state.pool(), &iso).await?;

    let mut csv = String::from("display_name,member_id,submitted_at\r\n");
    for row in &rows {
        csv.push_str(&format!(
            "{},{},{}\r\n",
            row.display_name_snapshot,
            row.member_id,
            shared::util::millis_to_rfc3339(row.submitted_at)
        ));
    }

    let headers = [
        (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
        (
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"attendance_{iso}.csv\""),
        ),
    ];
    Ok((headers, csv).into_response())
}
