//! 工具模块 - 通用工具函数和类型
//!
//! # 内容
//!
//! - [`AppError`] / [`AppResponse`] - 应用错误类型和错误响应结构
//! - [`normalize_name`] - 姓名规范化 (匹配用)
//! - 日志、校验等工具

pub mod error;
pub mod logger;
pub mod normalize;
pub mod result;
pub mod validation;

pub use error::{AppError, AppResponse};
pub use normalize::normalize_name;
pub use result::AppResult;
