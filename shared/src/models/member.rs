//! Member Model

use serde::{Deserialize, Serialize};

/// Member lifecycle status (会员状态)
///
/// Only `active` members are searchable / checkable-in through the main
/// flow. `provisional` members were added outside the onboarding form and
/// wait for reconciliation; `inactive` is set out-of-band and is excluded
/// from search, check-in and reconciliation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[cfg_attr(feature = "db", derive(sqlx::Type))]
#[cfg_attr(feature = "db", sqlx(rename_all = "snake_case"))]
pub enum MemberStatus {
    Active,
    Inactive,
    Provisional,
}

/// How a member record entered the directory. Never changes after
/// creation, except that reconciliation rewrites `self_add` /
/// `admin_approved` to `onboarding_form` on promotion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[cfg_attr(feature = "db", derive(sqlx::Type))]
#[cfg_attr(feature = "db", sqlx(rename_all = "snake_case"))]
pub enum MemberSource {
    OnboardingForm,
    SelfAdd,
    AdminApproved,
}

/// Member entity (会员)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Member {
    pub id: i64,
    pub display_name: String,
    /// Normalized name, kept in sync with `display_name` for matching.
    /// Never shown to users.
    #[serde(skip)]
    pub name_norm: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub status: MemberStatus,
    pub source: MemberSource,
    pub created_at: i64,
    pub updated_at: i64,
}

/// Create member payload (repository-level)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MemberCreate {
    pub display_name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub status: MemberStatus,
    pub source: MemberSource,
}

/// Slim projection for search results and report buckets
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct MemberSummary {
    pub member_id: i64,
    pub display_name: String,
}
