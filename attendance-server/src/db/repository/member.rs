//! Member Repository

use super::{RepoError, RepoResult};
use crate::utils::normalize_name;
use shared::models::{Member, MemberCreate, MemberSource, MemberStatus, MemberSummary};
use sqlx::SqlitePool;

const MEMBER_SELECT: &str = "SELECT id, display_name, name_norm, email, phone, status, source, created_at, updated_at FROM member";

/// Search result cap — the UI never pages beyond this.
const SEARCH_LIMIT: i64 = 50;

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<Member>> {
    let sql = format!("{MEMBER_SELECT} WHERE id = ?");
    let row = sqlx::query_as::<_, Member>(&sql)
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(row)
}

/// Escape LIKE metacharacters so the query is matched literally.
fn escape_like(query: &str) -> String {
    let mut escaped = String::with_capacity(query.len());
    for c in query.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

/// Substring search over normalized names, filtered to one status.
///
/// `query` must already be normalized by the caller. `%` and `_` in the
/// query match themselves, never as wildcards.
pub async fn search(
    pool: &SqlitePool,
    query: &str,
    status: MemberStatus,
) -> RepoResult<Vec<MemberSummary>> {
    let pattern = format!("%{}%", escape_like(query));
    let rows = sqlx::query_as::<_, MemberSummary>(
        "SELECT id AS member_id, display_name FROM member WHERE status = ?1 AND name_norm LIKE ?2 ESCAPE '\\' LIMIT ?3",
    )
    .bind(status)
    .bind(&pattern)
    .bind(SEARCH_LIMIT)
    .fetch_all(pool)
    .await?;
    Ok(rows)
}

/// All members ordered by display name — merge-candidate pickers.
pub async fn find_all_sorted(pool: &SqlitePool) -> RepoResult<Vec<Member>> {
    let sql = format!("{MEMBER_SELECT} ORDER BY display_name COLLATE NOCASE");
    let rows = sqlx::query_as::<_, Member>(&sql).fetch_all(pool).await?;
    Ok(rows)
}

pub async fn find_by_status(pool: &SqlitePool, status: MemberStatus) -> RepoResult<Vec<Member>> {
    let sql = format!("{MEMBER_SELECT} WHERE status = ?");
    let rows = sqlx::query_as::<_, Member>(&sql)
        .bind(status)
        .fetch_all(pool)
        .await?;
    Ok(rows)
}

pub async fn create(pool: &SqlitePool, data: MemberCreate) -> RepoResult<Member> {
    let now = shared::util::now_millis();
    let id = shared::util::snowflake_id();
    let name_norm = normalize_name(&data.display_name);
    sqlx::query(
        "INSERT INTO member (id, display_name, name_norm, email, phone, status, source, created_at, updated_at) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?8)",
    )
    .bind(id)
    .bind(&data.display_name)
    .bind(&name_norm)
    .bind(&data.email)
    .bind(&data.phone)
    .bind(data.status)
    .bind(data.source)
    .bind(now)
    .execute(pool)
    .await?;
    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to create member".into()))
}

pub async fn set_status(pool: &SqlitePool, id: i64, status: MemberStatus) -> RepoResult<()> {
    let now = shared::util::now_millis();
    let rows = sqlx::query("UPDATE member SET status = ?1, updated_at = ?2 WHERE id = ?3")
        .bind(status)
        .bind(now)
        .bind(id)
        .execute(pool)
        .await?;
    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!("Member {id} not found")));
    }
    Ok(())
}

pub async fn update_contact(
    pool: &SqlitePool,
    id: i64,
    email: Option<String>,
    phone: Option<String>,
) -> RepoResult<()> {
    let now = shared::util::now_millis();
    let rows = sqlx::query("UPDATE member SET email = ?1, phone = ?2, updated_at = ?3 WHERE id = ?4")
        .bind(&email)
        .bind(&phone)
        .bind(now)
        .bind(id)
        .execute(pool)
        .await?;
    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!("Member {id} not found")));
    }
    Ok(())
}

/// Promote a provisional member matched against the onboarding roster:
/// status → active, source → onboarding_form, contact overwritten from
/// the roster entry.
pub async fn promote(
    pool: &SqlitePool,
    id: i64,
    email: Option<String>,
    phone: Option<String>,
) -> RepoResult<()> {
    let now = shared::util::now_millis();
    let rows = sqlx::query(
        "UPDATE member SET status = ?1, source = ?2, email = ?3, phone = ?4, updated_at = ?5 WHERE id = ?6",
    )
    .bind(MemberStatus::Active)
    .bind(MemberSource::OnboardingForm)
    .bind(&email)
    .bind(&phone)
    .bind(now)
    .bind(id)
    .execute(pool)
    .await?;
    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!("Member {id} not found")));
    }
    Ok(())
}

/// Consolidate two member records: move every attendance row from `from`
/// to `to`, then delete the `from` record. Runs in one transaction so a
/// half-applied merge can never be observed.
pub async fn merge(pool: &SqlitePool, from: i64, to: i64) -> RepoResult<()> {
    let mut tx = pool.begin().await?;

    for id in [from, to] {
        let exists: Option<(i64,)> = sqlx::query_as("SELECT id FROM member WHERE id = ?")
            .bind(id)
            .fetch_optional(&mut *tx)
            .await?;
        if exists.is_none() {
            return Err(RepoError::NotFound(format!("Member {id} not found")));
        }
    }

    // Rows already present for (session_date, to) would collide with the
    // unique pair constraint; those duplicates are dropped, not moved.
    sqlx::query(
        "DELETE FROM attendance WHERE member_id = ?1 AND session_date IN (SELECT session_date FROM attendance WHERE member_id = ?2)",
    )
    .bind(from)
    .bind(to)
    .execute(&mut *tx)
    .await?;

    sqlx::query("UPDATE attendance SET member_id = ?1 WHERE member_id = ?2")
        .bind(to)
        .bind(from)
        .execute(&mut *tx)
        .await?;

    sqlx::query("DELETE FROM member WHERE id = ?")
        .bind(from)
        .execute(&mut *tx)
        .await?;

    tx.commit().await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::repository::{attendance, test_pool};

    fn member_create(name: &str, status: MemberStatus) -> MemberCreate {
        MemberCreate {
            display_name: name.to_string(),
            email: None,
            phone: None,
            status,
            source: MemberSource::OnboardingForm,
        }
    }

    #[tokio::test]
    async fn test_create_assigns_id_and_timestamps() {
        let pool = test_pool().await;
        let m = create(&pool, member_create("Ada Lovelace", MemberStatus::Active))
            .await
            .unwrap();
        assert!(m.id > 0);
        assert_eq!(m.created_at, m.updated_at);
        assert_eq!(m.name_norm, "ada lovelace");
    }

    #[tokio::test]
    async fn test_search_is_case_and_diacritic_insensitive() {
        let pool = test_pool().await;
        let m = create(&pool, member_create("Ada Lovelace", MemberStatus::Active))
            .await
            .unwrap();
        create(&pool, member_create("Bolanle Ojo", MemberStatus::Active))
            .await
            .unwrap();

        for q in ["ada", "ADÁ"] {
            let found = search(&pool, &normalize_name(q), MemberStatus::Active)
                .await
                .unwrap();
            assert_eq!(found.len(), 1);
            assert_eq!(found[0].member_id, m.id);
            assert_eq!(found[0].display_name, "Ada Lovelace");
        }
    }

    #[tokio::test]
    async fn test_search_treats_like_wildcards_literally() {
        let pool = test_pool().await;
        create(&pool, member_create("Ada Lovelace", MemberStatus::Active))
            .await
            .unwrap();
        create(&pool, member_create("A_a Percent", MemberStatus::Active))
            .await
            .unwrap();

        // "a_a" is not a substring of "ada lovelace"
        let found = search(&pool, "a_a", MemberStatus::Active).await.unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].display_name, "A_a Percent");

        let found = search(&pool, "%", MemberStatus::Active).await.unwrap();
        assert!(found.is_empty());
    }

    #[tokio::test]
    async fn test_search_caps_results() {
        let pool = test_pool().await;
        for i in 0..SEARCH_LIMIT + 1 {
            create(&pool, member_create(&format!("Member {i}"), MemberStatus::Active))
                .await
                .unwrap();
        }
        let found = search(&pool, "member", MemberStatus::Active).await.unwrap();
        assert_eq!(found.len(), SEARCH_LIMIT as usize);
    }

    #[tokio::test]
    async fn test_set_status_and_update_contact() {
        let pool = test_pool().await;
        let m = create(&pool, member_create("Ada Lovelace", MemberStatus::Active))
            .await
            .unwrap();

        set_status(&pool, m.id, MemberStatus::Inactive).await.unwrap();
        update_contact(&pool, m.id, Some("ada@x.com".into()), None)
            .await
            .unwrap();

        let m = find_by_id(&pool, m.id).await.unwrap().unwrap();
        assert_eq!(m.status, MemberStatus::Inactive);
        assert_eq!(m.email.as_deref(), Some("ada@x.com"));
        assert!(m.updated_at >= m.created_at);

        let err = set_status(&pool, 999, MemberStatus::Active).await.unwrap_err();
        assert!(matches!(err, RepoError::NotFound(_)));
        let err = update_contact(&pool, 999, None, None).await.unwrap_err();
        assert!(matches!(err, RepoError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_search_excludes_other_statuses() {
        let pool = test_pool().await;
        create(&pool, member_create("Ada Lovelace", MemberStatus::Provisional))
            .await
            .unwrap();
        let found = search(&pool, "ada", MemberStatus::Active).await.unwrap();
        assert!(found.is_empty());
    }

    #[tokio::test]
    async fn test_merge_moves_attendance_and_retires_member() {
        let pool = test_pool().await;
        let a = create(&pool, member_create("Ada Dup", MemberStatus::Provisional))
            .await
            .unwrap();
        let b = create(&pool, member_create("Ada Lovelace", MemberStatus::Active))
            .await
            .unwrap();
        attendance::check_in(&pool, a.id, "2024-06-01").await.unwrap();
        attendance::check_in(&pool, a.id, "2024-06-08").await.unwrap();
        // Overlapping date: b already checked in on 06-08
        attendance::check_in(&pool, b.id, "2024-06-08").await.unwrap();

        merge(&pool, a.id, b.id).await.unwrap();

        assert!(find_by_id(&pool, a.id).await.unwrap().is_none());
        let rows_a = attendance::find_by_member(&pool, a.id).await.unwrap();
        assert!(rows_a.is_empty());
        let rows_b = attendance::find_by_member(&pool, b.id).await.unwrap();
        let mut dates: Vec<&str> = rows_b.iter().map(|r| r.session_date.as_str()).collect();
        dates.sort_unstable();
        assert_eq!(dates, vec!["2024-06-01", "2024-06-08"]);
    }

    #[tokio::test]
    async fn test_merge_missing_member_fails_and_leaves_state() {
        let pool = test_pool().await;
        let a = create(&pool, member_create("Ada Dup", MemberStatus::Provisional))
            .await
            .unwrap();
        attendance::check_in(&pool, a.id, "2024-06-01").await.unwrap();

        let err = merge(&pool, a.id, 999).await.unwrap_err();
        assert!(matches!(err, RepoError::NotFound(_)));

        // State unchanged: member still present, attendance still on a
        assert!(find_by_id(&pool, a.id).await.unwrap().is_some());
        assert_eq!(attendance::find_by_member(&pool, a.id).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_promote_rewrites_status_source_and_contact() {
        let pool = test_pool().await;
        let m = create(&pool, member_create("Efemena Akpofure", MemberStatus::Provisional))
            .await
            .unwrap();
        promote(&pool, m.id, Some("efe@completed.com".into()), Some("2348098765432".into()))
            .await
            .unwrap();
        let m = find_by_id(&pool, m.id).await.unwrap().unwrap();
        assert_eq!(m.status, MemberStatus::Active);
        assert_eq!(m.source, MemberSource::OnboardingForm);
        assert_eq!(m.email.as_deref(), Some("efe@completed.com"));
    }
}
