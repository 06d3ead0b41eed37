//! New Member Request Repository

use super::{RepoError, RepoResult};
use shared::models::NewMemberRequest;
use sqlx::SqlitePool;

const REQUEST_SELECT: &str = "SELECT id, requested_name, contact, requested_at, approved, approved_at, admin_user FROM member_request";

pub async fn create(
    pool: &SqlitePool,
    requested_name: &str,
    contact: Option<String>,
) -> RepoResult<NewMemberRequest> {
    let now = shared::util::now_millis();
    let result = sqlx::query(
        "INSERT INTO member_request (requested_name, contact, requested_at, approved) VALUES (?1, ?2, ?3, 0)",
    )
    .bind(requested_name)
    .bind(&contact)
    .bind(now)
    .execute(pool)
    .await?;
    let id = result.last_insert_rowid();
    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to create request".into()))
}

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<NewMemberRequest>> {
    let sql = format!("{REQUEST_SELECT} WHERE id = ?");
    let row = sqlx::query_as::<_, NewMemberRequest>(&sql)
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(row)
}

/// Pending requests only, in submission order. Approved rows stay in the
/// table for audit but never reappear here.
pub async fn find_pending(pool: &SqlitePool) -> RepoResult<Vec<NewMemberRequest>> {
    let sql = format!("{REQUEST_SELECT} WHERE approved = 0 ORDER BY requested_at, id");
    let rows = sqlx::query_as::<_, NewMemberRequest>(&sql)
        .fetch_all(pool)
        .await?;
    Ok(rows)
}

/// Claim the first pending request whose name matches exactly
/// (case-sensitive, oldest first) and mark it approved.
///
/// The claim is an `UPDATE ... WHERE approved = 0` with a rows-affected
/// check, so two concurrent approvals of the same request resolve to one
/// winner; the loser (and any re-approval of an already-approved request)
/// gets `NotFound`.
pub async fn approve(
    pool: &SqlitePool,
    requested_name: &str,
    admin_user: &str,
) -> RepoResult<NewMemberRequest> {
    let sql = format!(
        "{REQUEST_SELECT} WHERE requested_name = ? AND approved = 0 ORDER BY requested_at, id LIMIT 1"
    );
    let pending = sqlx::query_as::<_, NewMemberRequest>(&sql)
        .bind(requested_name)
        .fetch_optional(pool)
        .await?
        .ok_or_else(|| {
            RepoError::NotFound(format!("No pending request for '{requested_name}'"))
        })?;

    let now = shared::util::now_millis();
    let rows = sqlx::query(
        "UPDATE member_request SET approved = 1, approved_at = ?1, admin_user = ?2 WHERE id = ?3 AND approved = 0",
    )
    .bind(now)
    .bind(admin_user)
    .bind(pending.id)
    .execute(pool)
    .await?;
    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!(
            "No pending request for '{requested_name}'"
        )));
    }

    find_by_id(pool, pending.id)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to load approved request".into()))
}
