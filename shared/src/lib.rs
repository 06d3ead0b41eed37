//! Shared types for the attendance service
//!
//! Domain models and utility types used by the server and exposed
//! through the HTTP API.

pub mod models;
pub mod util;

// Re-exports
pub use serde::{Deserialize, Serialize};
