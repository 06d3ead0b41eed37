//! Member API 模块

mod handler;

use axum::{
    Router,
    routing::{get, post},
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/members", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/", get(handler::list))
        .route("/search", get(handler::search))
        .route("/self-add", post(handler::self_add))
        .route("/merge", post(handler::merge))
        .route("/reconcile", post(handler::reconcile))
}
