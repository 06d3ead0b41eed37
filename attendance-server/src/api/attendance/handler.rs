//! Attendance API Handlers

use axum::{Json, extract::State};
use serde::{Deserialize, Serialize};

use crate::core::ServerState;
use crate::db::repository::attendance;
use crate::utils::AppResult;
use crate::utils::validation::parse_session_date;

#[derive(Deserialize)]
pub struct RecordPayload {
    pub member_id: i64,
    #[serde(rename = "sessionDateISO")]
    pub session_date_iso: String,
}

#[derive(Serialize)]
pub struct RecordResponse {
    pub ok: bool,
    #[serde(rename = "alreadyRegistered")]
    pub already_registered: bool,
}

/// POST /api/attendance - 签到
///
/// Idempotent: checking in twice for the same session reports
/// `alreadyRegistered` instead of failing.
pub async fn record(
    State(state): State<ServerState>,
    Json(payload): Json<RecordPayload>,
) -> AppResult<Json<RecordResponse>> {
    let session_date = parse_session_date(&payload.session_date_iso)?;

    let outcome = attendance::check_in(
        state.pool(),
        payload.member_id,
        &session_date.format("%Y-%m-%d").to_string(),
    )
    .await?;

    Ok(Json(RecordResponse {
        ok: true,
        already_registered: outcome.already_registered,
    }))
}
