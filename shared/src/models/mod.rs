//! Data models
//!
//! Shared between attendance-server and frontend (via API).
//! DB row types use `#[cfg_attr(feature = "db", derive(sqlx::FromRow))]`.
//! All IDs are `i64` (SQLite INTEGER PRIMARY KEY), timestamps are Unix millis.

pub mod attendance;
pub mod member;
pub mod request;
pub mod session;

// Re-exports
pub use attendance::*;
pub use member::*;
pub use request::*;
pub use session::*;
