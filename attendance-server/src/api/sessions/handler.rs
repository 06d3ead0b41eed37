//! Session API Handlers

use axum::{Json, extract::State};
use chrono::Utc;

use crate::core::ServerState;
use shared::models::SessionInfo;

/// Past (and current) occurrences shown on the admin date picker
const PAST_SESSION_COUNT: usize = 8;

/// GET /api/sessions/next - 当前场次 (日期 + 显示用长格式)
pub async fn next(State(state): State<ServerState>) -> Json<SessionInfo> {
    Json(state.schedule.session_info(Utc::now()))
}

/// GET /api/sessions/past - 最近 8 个场次日期，最新在前
pub async fn past(State(state): State<ServerState>) -> Json<Vec<String>> {
    let dates = state
        .schedule
        .past_occurrences(Utc::now(), PAST_SESSION_COUNT)
        .iter()
        .map(|d| d.format("%Y-%m-%d").to_string())
        .collect();
    Json(dates)
}
