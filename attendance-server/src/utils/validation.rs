//! Input validation helpers
//!
//! Centralized text length constants and validation functions.
//! SQLite TEXT has no built-in length enforcement, so handlers validate
//! before writing.

use chrono::NaiveDate;

use crate::utils::AppError;

// ── Text length limits ──────────────────────────────────────────────

/// Member / requested names
pub const MAX_NAME_LEN: usize = 200;

/// Phone numbers and other short identifiers
pub const MAX_SHORT_TEXT_LEN: usize = 100;

/// Email addresses (RFC 5321)
pub const MAX_EMAIL_LEN: usize = 254;

// ── Validation helpers (handlers) ───────────────────────────────────

/// Validate that a required string is non-empty and within the length limit.
pub fn validate_required_text(value: &str, field: &str, max_len: usize) -> Result<(), AppError> {
    if value.trim().is_empty() {
        return Err(AppError::validation(format!("{field} must not be empty")));
    }
    if value.len() > max_len {
        return Err(AppError::validation(format!(
            "{field} is too long ({} chars, max {max_len})",
            value.len()
        )));
    }
    Ok(())
}

/// Validate that an optional string, if present, is within the length limit.
pub fn validate_optional_text(
    value: &Option<String>,
    field: &str,
    max_len: usize,
) -> Result<(), AppError> {
    if let Some(v) = value
        && v.len() > max_len
    {
        return Err(AppError::validation(format!(
            "{field} is too long ({} chars, max {max_len})",
            v.len()
        )));
    }
    Ok(())
}

/// Validate that at least one contact channel is present.
///
/// Caller contract for self-add and approved requests: the directory
/// itself does not reject contact-less members (bulk onboarding imports
/// legitimately omit them).
pub fn validate_has_contact(
    email: &Option<String>,
    phone: &Option<String>,
) -> Result<(), AppError> {
    let has_email = email.as_deref().is_some_and(|v| !v.trim().is_empty());
    let has_phone = phone.as_deref().is_some_and(|v| !v.trim().is_empty());
    if !has_email && !has_phone {
        return Err(AppError::validation(
            "Either email or phone must be provided",
        ));
    }
    Ok(())
}

/// 解析场次日期字符串 (YYYY-MM-DD)
pub fn parse_session_date(date: &str) -> Result<NaiveDate, AppError> {
    NaiveDate::parse_from_str(date, "%Y-%m-%d")
        .map_err(|_| AppError::validation(format!("Invalid session date: {date}")))
}
