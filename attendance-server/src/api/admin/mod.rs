//! Admin API 模块

mod handler;

use axum::{Router, routing::get};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/admin", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/attendance/{date}", get(handler::report))
        .route("/attendance/{date}/export.csv", get(handler::export_csv))
}
