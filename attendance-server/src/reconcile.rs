//! 名单核对 — reconciliation against the completed-registration roster
//!
//! Provisional members (self-add / admin-approved) are matched against
//! the export of the formal onboarding form and promoted to active on a
//! hit. Matching is first-hit-wins with no ranking; unmatched members are
//! left untouched, so reruns with an unchanged roster promote nothing.

use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;
use std::path::Path;

use crate::db::repository::{RepoResult, member};
use crate::utils::{AppError, AppResult, normalize_name};
use shared::models::MemberStatus;

/// One completed-registration row. Field aliases accept the raw column
/// headers of a spreadsheet export.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RosterEntry {
    #[serde(alias = "Full Name")]
    pub full_name: String,
    #[serde(alias = "Email")]
    pub email: Option<String>,
    #[serde(alias = "Phone")]
    pub phone: Option<String>,
}

/// Load the roster export (JSON array of [`RosterEntry`]).
pub fn load_roster(path: &Path) -> AppResult<Vec<RosterEntry>> {
    let raw = std::fs::read_to_string(path).map_err(|e| {
        AppError::internal(format!("Cannot read roster file {}: {e}", path.display()))
    })?;
    serde_json::from_str(&raw).map_err(|e| {
        AppError::internal(format!("Cannot parse roster file {}: {e}", path.display()))
    })
}

/// Match every provisional member against the roster and promote hits.
///
/// A member matches an entry on normalized-name equality (exact, not
/// substring) or case-insensitive email equality. The first matching
/// entry wins. Promotion rewrites status/source and overwrites contact
/// from the roster, so a promoted member never matches as provisional
/// again — reconciliation is safe to re-run.
pub async fn reconcile(pool: &SqlitePool, roster: &[RosterEntry]) -> RepoResult<u32> {
    let provisional = member::find_by_status(pool, MemberStatus::Provisional).await?;

    let mut promoted = 0u32;
    for m in &provisional {
        let hit = roster.iter().find(|entry| {
            normalize_name(&entry.full_name) == m.name_norm || emails_match(entry, m)
        });
        if let Some(entry) = hit {
            member::promote(pool, m.id, entry.email.clone(), entry.phone.clone()).await?;
            promoted += 1;
            tracing::info!(member_id = m.id, name = %m.display_name, "Promoted provisional member");
        }
    }
    Ok(promoted)
}

fn emails_match(entry: &RosterEntry, m: &shared::models::Member) -> bool {
    match (&entry.email, &m.email) {
        (Some(a), Some(b)) => a.eq_ignore_ascii_case(b),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::repository::test_pool;
    use shared::models::{MemberCreate, MemberSource};

    async fn seed(pool: &SqlitePool, name: &str, email: Option<&str>, status: MemberStatus) -> i64 {
        member::create(
            pool,
            MemberCreate {
                display_name: name.to_string(),
                email: email.map(String::from),
                phone: None,
                status,
                source: MemberSource::SelfAdd,
            },
        )
        .await
        .unwrap()
        .id
    }

    fn roster() -> Vec<RosterEntry> {
        vec![RosterEntry {
            full_name: "Efemena Akpofure".into(),
            email: Some("efemena.akpofure@completed.com".into()),
            phone: Some("2348098765432".into()),
        }]
    }

    #[tokio::test]
    async fn test_promotes_on_name_match() {
        let pool = test_pool().await;
        let id = seed(&pool, "  efemena   AKPOFURE ", None, MemberStatus::Provisional).await;

        let promoted = reconcile(&pool, &roster()).await.unwrap();
        assert_eq!(promoted, 1);

        let m = member::find_by_id(&pool, id).await.unwrap().unwrap();
        assert_eq!(m.status, MemberStatus::Active);
        assert_eq!(m.source, MemberSource::OnboardingForm);
        assert_eq!(m.email.as_deref(), Some("efemena.akpofure@completed.com"));
        assert_eq!(m.phone.as_deref(), Some("2348098765432"));
    }

    #[tokio::test]
    async fn test_promotes_on_email_match() {
        let pool = test_pool().await;
        let id = seed(
            &pool,
            "E. Akpofure",
            Some("EFEMENA.AKPOFURE@COMPLETED.COM"),
            MemberStatus::Provisional,
        )
        .await;

        let promoted = reconcile(&pool, &roster()).await.unwrap();
        assert_eq!(promoted, 1);
        let m = member::find_by_id(&pool, id).await.unwrap().unwrap();
        assert_eq!(m.status, MemberStatus::Active);
    }

    #[tokio::test]
    async fn test_rerun_promotes_nothing() {
        let pool = test_pool().await;
        seed(&pool, "Efemena Akpofure", None, MemberStatus::Provisional).await;

        assert_eq!(reconcile(&pool, &roster()).await.unwrap(), 1);
        assert_eq!(reconcile(&pool, &roster()).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_unmatched_members_untouched() {
        let pool = test_pool().await;
        let id = seed(&pool, "New Person", Some("n@x.com"), MemberStatus::Provisional).await;

        assert_eq!(reconcile(&pool, &roster()).await.unwrap(), 0);
        let m = member::find_by_id(&pool, id).await.unwrap().unwrap();
        assert_eq!(m.status, MemberStatus::Provisional);
        assert_eq!(m.email.as_deref(), Some("n@x.com"));
    }

    #[tokio::test]
    async fn test_inactive_members_never_scanned() {
        let pool = test_pool().await;
        seed(&pool, "Efemena Akpofure", None, MemberStatus::Inactive).await;
        assert_eq!(reconcile(&pool, &roster()).await.unwrap(), 0);
    }
}
