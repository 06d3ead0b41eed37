//! API 路由模块
//!
//! # 结构
//!
//! - [`health`] - 健康检查
//! - [`sessions`] - 场次日期 (当前/历史)
//! - [`members`] - 会员搜索、自助登记、合并、名单核对
//! - [`attendance`] - 签到
//! - [`requests`] - 代人申请与审批
//! - [`admin`] - 管理面板聚合视图与 CSV 导出

pub mod admin;
pub mod attendance;
pub mod health;
pub mod members;
pub mod requests;
pub mod sessions;

use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::core::ServerState;

/// Assemble the full application router (also used by integration tests)
pub fn router(state: ServerState) -> Router {
    Router::new()
        .merge(health::router())
        .merge(sessions::router())
        .merge(members::router())
        .merge(attendance::router())
        .merge(requests::router())
        .merge(admin::router())
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
