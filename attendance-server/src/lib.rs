//! Attendance Server - 周例会签到与会员管理服务
//!
//! # 架构概述
//!
//! - **场次日程** (`schedule`): 每周六场次日期解析 (含当日截止规则)
//! - **会员目录** (`db/repository/member`): 身份、状态、合并
//! - **签到台账** (`db/repository/attendance`): (场次, 会员) 幂等签到
//! - **名单核对** (`reconcile`): provisional 会员转正
//! - **HTTP API** (`api`): RESTful API 接口
//!
//! # 模块结构
//!
//! ```text
//! attendance-server/src/
//! ├── core/          # 配置、状态、服务器
//! ├── api/           # HTTP 路由和处理器
//! ├── db/            # 数据库层 (SQLite + 仓储)
//! ├── schedule.rs    # 场次日期计算
//! ├── reconcile.rs   # 报名表核对
//! └── utils/         # 错误、日志、校验、规范化
//! ```

pub mod api;
pub mod core;
pub mod db;
pub mod reconcile;
pub mod schedule;
pub mod utils;

// Re-export 公共类型
pub use crate::core::{Config, Server, ServerState};
pub use schedule::SessionSchedule;
pub use utils::{AppError, AppResult};

// Re-export logger functions
pub use utils::logger::init_logger_with_file;
