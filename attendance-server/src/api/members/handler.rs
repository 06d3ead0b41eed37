//! Member API Handlers

use axum::{
    Json,
    extract::{Query, State},
};
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::core::ServerState;
use crate::db::repository::{attendance, member};
use crate::reconcile;
use crate::utils::validation::{
    MAX_EMAIL_LEN, MAX_NAME_LEN, MAX_SHORT_TEXT_LEN, parse_session_date, validate_has_contact,
    validate_optional_text, validate_required_text,
};
use crate::utils::{AppError, AppResult, normalize_name};
use shared::models::{Member, MemberCreate, MemberSource, MemberStatus, MemberSummary};

#[derive(Deserialize)]
pub struct SearchQuery {
    pub q: String,
}

#[derive(Serialize)]
pub struct SearchResponse {
    pub members: Vec<MemberSummary>,
}

/// GET /api/members/search?q=xxx - 搜索 active 会员 (规范化子串匹配)
pub async fn search(
    State(state): State<ServerState>,
    Query(query): Query<SearchQuery>,
) -> AppResult<Json<SearchResponse>> {
    let normalized = normalize_name(&query.q);
    let members = member::search(state.pool(), &normalized, MemberStatus::Active).await?;
    Ok(Json(SearchResponse { members }))
}

/// GET /api/members - 全部会员按姓名排序 (合并候选列表用)
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<Vec<Member>>> {
    let members = member::find_all_sorted(state.pool()).await?;
    Ok(Json(members))
}

#[derive(Deserialize)]
pub struct SelfAddPayload {
    pub full_name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    #[serde(rename = "sessionDateISO")]
    pub session_date_iso: String,
}

#[derive(Serialize)]
pub struct SelfAddResponse {
    pub ok: bool,
    pub member_id: i64,
    pub status: MemberStatus,
}

/// POST /api/members/self-add - 自助登记并签到
///
/// Creates a provisional member and records attendance for the given
/// session through the same idempotent check-in path as the main flow.
pub async fn self_add(
    State(state): State<ServerState>,
    Json(payload): Json<SelfAddPayload>,
) -> AppResult<Json<SelfAddResponse>> {
    validate_required_text(&payload.full_name, "full_name", MAX_NAME_LEN)?;
    validate_optional_text(&payload.email, "email", MAX_EMAIL_LEN)?;
    validate_optional_text(&payload.phone, "phone", MAX_SHORT_TEXT_LEN)?;
    validate_has_contact(&payload.email, &payload.phone)?;
    let session_date = parse_session_date(&payload.session_date_iso)?;

    let created = member::create(
        state.pool(),
        MemberCreate {
            display_name: payload.full_name.trim().to_string(),
            email: payload.email,
            phone: payload.phone,
            status: MemberStatus::Provisional,
            source: MemberSource::SelfAdd,
        },
    )
    .await?;

    attendance::check_in(
        state.pool(),
        created.id,
        &session_date.format("%Y-%m-%d").to_string(),
    )
    .await?;

    tracing::info!(member_id = created.id, "Self-added provisional member");

    Ok(Json(SelfAddResponse {
        ok: true,
        member_id: created.id,
        status: MemberStatus::Provisional,
    }))
}

#[derive(Deserialize)]
pub struct MergePayload {
    pub from_member_id: i64,
    pub to_member_id: i64,
}

#[derive(Serialize)]
pub struct OkResponse {
    pub ok: bool,
}

/// POST /api/members/merge - 合并重复会员 (签到记录迁移，旧记录删除)
pub async fn merge(
    State(state): State<ServerState>,
    Json(payload): Json<MergePayload>,
) -> AppResult<Json<OkResponse>> {
    if payload.from_member_id == payload.to_member_id {
        return Err(AppError::validation("Cannot merge a member into itself"));
    }
    member::merge(state.pool(), payload.from_member_id, payload.to_member_id).await?;
    tracing::info!(
        from = payload.from_member_id,
        to = payload.to_member_id,
        "Merged members"
    );
    Ok(Json(OkResponse { ok: true }))
}

#[derive(Serialize)]
pub struct ReconcileResponse {
    pub ok: bool,
    #[serde(rename = "promotedCount")]
    pub promoted_count: u32,
}

/// POST /api/members/reconcile - 核对报名表并转正 provisional 会员
pub async fn reconcile(State(state): State<ServerState>) -> AppResult<Json<ReconcileResponse>> {
    let roster = reconcile::load_roster(Path::new(&state.config.roster_path))?;
    let promoted_count = reconcile::reconcile(state.pool(), &roster).await?;
    tracing::info!(promoted = promoted_count, "Reconciliation run complete");
    Ok(Json(ReconcileResponse {
        ok: true,
        promoted_count,
    }))
}
