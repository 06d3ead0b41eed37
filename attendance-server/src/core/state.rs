use sqlx::SqlitePool;

use crate::core::Config;
use crate::db::DbService;
use crate::schedule::SessionSchedule;

/// 服务器状态 - 注入到所有 handler 的共享引用
///
/// | 字段 | 说明 |
/// |------|------|
/// | config | 配置项 (不可变) |
/// | db | SQLite 连接池服务 |
/// | schedule | 场次日程解析器 (纯函数) |
#[derive(Clone)]
pub struct ServerState {
    pub config: Config,
    pub db: DbService,
    pub schedule: SessionSchedule,
}

impl ServerState {
    /// Initialize all services from config
    pub async fn initialize(config: &Config) -> Result<Self, crate::utils::AppError> {
        let db = DbService::new(&config.database_path).await?;
        Ok(Self::with_db(config.clone(), db))
    }

    /// Assemble state around an existing database service (tests inject
    /// a temporary database here)
    pub fn with_db(config: Config, db: DbService) -> Self {
        let schedule = SessionSchedule::new(config.session_timezone, config.session_cutoff);
        Self {
            config,
            db,
            schedule,
        }
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.db.pool
    }
}
