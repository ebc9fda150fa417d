use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use tracing::info;

use service::item::{parse_id, Item};

use crate::errors::ApiError;
use crate::extract::JsonObject;
use crate::routes::AppState;

/// 列出全部条目（按创建顺序）
pub async fn list_items(State(state): State<AppState>) -> Json<Vec<Item>> {
    Json(state.items.list().await)
}

/// 创建条目，id 由服务端分配
pub async fn create_item(
    State(state): State<AppState>,
    JsonObject(fields): JsonObject,
) -> Result<(StatusCode, Json<Item>), ApiError> {
    let item = state.items.create(fields).await?;
    info!(id = ?item.id(), "item_created");
    Ok((StatusCode::CREATED, Json(item)))
}

pub async fn get_item(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> Result<Json<Item>, ApiError> {
    let id = parse_id(&raw_id).ok_or(ApiError::NotFound)?;
    state.items.get(id).await.map(Json).ok_or(ApiError::NotFound)
}

/// 合并更新：请求体中的字段覆盖已有字段（包括 id）
pub async fn update_item(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
    JsonObject(patch): JsonObject,
) -> Result<Json<Item>, ApiError> {
    let id = parse_id(&raw_id).ok_or(ApiError::NotFound)?;
    let item = state.items.update(id, patch).await?;
    info!(id, "item_updated");
    Ok(Json(item))
}

pub async fn delete_item(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let id = parse_id(&raw_id).ok_or(ApiError::NotFound)?;
    if state.items.delete(id).await? {
        info!(id, "item_deleted");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(ApiError::NotFound)
    }
}
