//! New Member Request API Handlers

use axum::{Json, extract::State};
use serde::{Deserialize, Serialize};

use crate::core::ServerState;
use crate::db::repository::{member, request};
use crate::utils::AppResult;
use crate::utils::validation::{
    MAX_NAME_LEN, MAX_SHORT_TEXT_LEN, validate_optional_text, validate_required_text,
};
use shared::models::{MemberCreate, MemberSource, MemberStatus, NewMemberRequest};

/// Operator identity recorded on approval. The real session-auth boundary
/// lives outside this service; until it lands every approval is booked to
/// the shared operator account.
const ADMIN_USER: &str = "admin";

#[derive(Deserialize)]
pub struct RequestPayload {
    pub requested_name: String,
    pub contact: Option<String>,
}

#[derive(Serialize)]
pub struct OkResponse {
    pub ok: bool,
}

/// POST /api/requests - 提交代人申请
pub async fn submit(
    State(state): State<ServerState>,
    Json(payload): Json<RequestPayload>,
) -> AppResult<Json<OkResponse>> {
    validate_required_text(&payload.requested_name, "requested_name", MAX_NAME_LEN)?;
    validate_optional_text(&payload.contact, "contact", MAX_SHORT_TEXT_LEN)?;

    request::create(state.pool(), payload.requested_name.trim(), payload.contact).await?;
    Ok(Json(OkResponse { ok: true }))
}

/// GET /api/requests/pending - 未审批的申请列表
pub async fn pending(State(state): State<ServerState>) -> AppResult<Json<Vec<NewMemberRequest>>> {
    let requests = request::find_pending(state.pool()).await?;
    Ok(Json(requests))
}

/// POST /api/requests/approve - 审批申请并创建 provisional 会员
///
/// The first pending request matching the name exactly is claimed;
/// re-approving an already-approved request fails NotFound, so approval
/// can never double-create a member.
pub async fn approve(
    State(state): State<ServerState>,
    Json(payload): Json<RequestPayload>,
) -> AppResult<Json<OkResponse>> {
    validate_required_text(&payload.requested_name, "requested_name", MAX_NAME_LEN)?;

    let approved = request::approve(state.pool(), &payload.requested_name, ADMIN_USER).await?;

    // Contact splits into email vs phone on the presence of '@'
    let (email, phone) = match &payload.contact {
        Some(c) if c.contains('@') => (Some(c.clone()), None),
        Some(c) => (None, Some(c.clone())),
        None => (None, None),
    };

    let created = member::create(
        state.pool(),
        MemberCreate {
            display_name: payload.requested_name.trim().to_string(),
            email,
            phone,
            status: MemberStatus::Provisional,
            source: MemberSource::AdminApproved,
        },
    )
    .await?;

    tracing::info!(
        request_id = approved.id,
        member_id = created.id,
        "Approved member request"
    );

    Ok(Json(OkResponse { ok: true }))
}
