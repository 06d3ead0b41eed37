//! Attendance Repository

use super::{RepoError, RepoResult};
use shared::models::{Attendance, CheckInOutcome};
use sqlx::SqlitePool;

const ATTENDANCE_SELECT: &str =
    "SELECT session_date, member_id, display_name_snapshot, submitted_at FROM attendance";

/// Record a check-in for `(member_id, session_date)`.
///
/// Idempotent: a repeat check-in is reported as `already_registered`,
/// never an error. INSERT OR IGNORE against the unique pair constraint
/// makes the check-and-insert a single atomic step, so two concurrent
/// check-ins for the same pair insert exactly one row. The snapshot read
/// and the insert share one transaction, so a merge that retires the
/// member cannot slip between them.
pub async fn check_in(
    pool: &SqlitePool,
    member_id: i64,
    session_date: &str,
) -> RepoResult<CheckInOutcome> {
    let mut tx = pool.begin().await?;

    let snapshot: Option<(String,)> =
        sqlx::query_as("SELECT display_name FROM member WHERE id = ?")
            .bind(member_id)
            .fetch_optional(&mut *tx)
            .await?;
    let Some((display_name,)) = snapshot else {
        return Err(RepoError::NotFound(format!("Member {member_id} not found")));
    };

    let now = shared::util::now_millis();
    let rows = sqlx::query(
        "INSERT OR IGNORE INTO attendance (session_date, member_id, display_name_snapshot, submitted_at) VALUES (?1, ?2, ?3, ?4)",
    )
    .bind(session_date)
    .bind(member_id)
    .bind(&display_name)
    .bind(now)
    .execute(&mut *tx)
    .await?;

    tx.commit().await?;
    Ok(CheckInOutcome {
        already_registered: rows.rows_affected() == 0,
    })
}

/// All check-ins for one session occurrence.
pub async fn find_by_session(pool: &SqlitePool, session_date: &str) -> RepoResult<Vec<Attendance>> {
    let sql = format!("{ATTENDANCE_SELECT} WHERE session_date = ? ORDER BY submitted_at");
    let rows = sqlx::query_as::<_, Attendance>(&sql)
        .bind(session_date)
        .fetch_all(pool)
        .await?;
    Ok(rows)
}

/// All check-ins for one member (merge verification and admin tooling).
pub async fn find_by_member(pool: &SqlitePool, member_id: i64) -> RepoResult<Vec<Attendance>> {
    let sql = format!("{ATTENDANCE_SELECT} WHERE member_id = ? ORDER BY session_date");
    let rows = sqlx::query_as::<_, Attendance>(&sql)
        .bind(member_id)
        .fetch_all(pool)
        .await?;
    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::repository::{member, test_pool};
    use shared::models::{MemberCreate, MemberSource, MemberStatus};

    async fn seed_member(pool: &SqlitePool, name: &str) -> i64 {
        member::create(
            pool,
            MemberCreate {
                display_name: name.to_string(),
                email: None,
                phone: None,
                status: MemberStatus::Active,
                source: MemberSource::OnboardingForm,
            },
        )
        .await
        .unwrap()
        .id
    }

    #[tokio::test]
    async fn test_double_check_in_is_idempotent() {
        let pool = test_pool().await;
        let id = seed_member(&pool, "Ada Lovelace").await;

        let first = check_in(&pool, id, "2024-06-01").await.unwrap();
        assert!(!first.already_registered);

        let second = check_in(&pool, id, "2024-06-01").await.unwrap();
        assert!(second.already_registered);

        let rows = find_by_session(&pool, "2024-06-01").await.unwrap();
        assert_eq!(rows.len(), 1);
    }

    #[tokio::test]
    async fn test_check_in_unknown_member_fails() {
        let pool = test_pool().await;
        let err = check_in(&pool, 12345, "2024-06-01").await.unwrap_err();
        assert!(matches!(err, RepoError::NotFound(_)));
        assert!(find_by_session(&pool, "2024-06-01").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_check_in_after_merge_retires_member_fails() {
        let pool = test_pool().await;
        let from = seed_member(&pool, "Ada Dup").await;
        let to = seed_member(&pool, "Ada Lovelace").await;
        member::merge(&pool, from, to).await.unwrap();

        let err = check_in(&pool, from, "2024-06-01").await.unwrap_err();
        assert!(matches!(err, RepoError::NotFound(_)));
        assert!(find_by_member(&pool, from).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_snapshot_survives_rename() {
        let pool = test_pool().await;
        let id = seed_member(&pool, "Ada Lovelace").await;
        check_in(&pool, id, "2024-06-01").await.unwrap();

        sqlx::query("UPDATE member SET display_name = 'Ada King' WHERE id = ?")
            .bind(id)
            .execute(&pool)
            .await
            .unwrap();

        let rows = find_by_session(&pool, "2024-06-01").await.unwrap();
        assert_eq!(rows[0].display_name_snapshot, "Ada Lovelace");
    }

    #[tokio::test]
    async fn test_same_member_different_sessions() {
        let pool = test_pool().await;
        let id = seed_member(&pool, "Ada Lovelace").await;
        assert!(!check_in(&pool, id, "2024-06-01").await.unwrap().already_registered);
        assert!(!check_in(&pool, id, "2024-06-08").await.unwrap().already_registered);
        assert_eq!(find_by_member(&pool, id).await.unwrap().len(), 2);
    }
}
