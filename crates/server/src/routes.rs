pub mod items;

use std::sync::Arc;

use axum::{
    http::StatusCode,
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use tower_http::{
    catch_panic::CatchPanicLayer,
    trace::{TraceLayer, DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse, DefaultOnFailure},
};
use tracing::Level;

use common::types::{Health, Message};
use service::item::{ItemStore, MemoryItemStore};

use crate::errors::{handle_panic, ROUTE_NOT_FOUND};

/// Shared handler state. The store is owned here and handed to every handler.
#[derive(Clone)]
pub struct AppState {
    pub items: Arc<dyn ItemStore>,
}

impl AppState {
    pub fn new(items: Arc<dyn ItemStore>) -> Self {
        Self { items }
    }

    /// Fresh empty store with the id counter at 1.
    pub fn in_memory() -> Self {
        Self::new(MemoryItemStore::new())
    }
}

pub async fn health() -> Json<Health> {
    Json(Health { status: "ok" })
}

async fn route_not_found() -> impl IntoResponse {
    (StatusCode::NOT_FOUND, Json(Message::new(ROUTE_NOT_FOUND)))
}

/// Build the full application router: item CRUD, health probe, fallback.
pub fn build_router(state: AppState) -> Router {
    let collection = get(items::list_items).post(items::create_item);
    let member = get(items::get_item)
        .put(items::update_item)
        .delete(items::delete_item);

    // 与非严格路由一致：带尾部斜杠的路径同样可用
    let item_routes = Router::new()
        .route("/items", collection.clone())
        .route("/items/", collection)
        .route("/items/:id", member.clone())
        .route("/items/:id/", member);

    Router::new()
        .route("/health", get(health))
        .merge(item_routes)
        .fallback(route_not_found)
        .with_state(state)
        .layer(CatchPanicLayer::custom(handle_panic))
        .layer(
            TraceLayer::new_for_http()
                // 每次请求创建 span，包含方法和路径等，日志级别为 INFO
                .make_span_with(
                    DefaultMakeSpan::new()
                        .level(Level::INFO)
                        .include_headers(false),
                )
                .on_request(
                    DefaultOnRequest::new()
                        .level(Level::INFO),
                )
                // 响应返回时打点，包含状态码与耗时
                .on_response(
                    DefaultOnResponse::new()
                        .level(Level::INFO)
                        .include_headers(false),
                )
                // 失败（5xx 等）时以 ERROR 记录
                .on_failure(
                    DefaultOnFailure::new()
                        .level(Level::ERROR),
                )
        )
}
