//! # アイテムハンドラ
//!
//! Todo アイテムの CRUD API を提供する。
//!
//! ## エンドポイント
//!
//! - `GET /items` - 全アイテム一覧
//! - `GET /items/{id}` - アイテム詳細
//! - `POST /items` - アイテム作成
//! - `PUT /items/{id}` - アイテムを完了にする
//! - `PUT /items` - 未完了の全アイテムを完了にする
//! - `DELETE /items/{id}` - アイテム削除
//! - `DELETE /items` - 全アイテム削除
//!
//! 単一アイテムの更新・削除は影響行数 0 を 404 として扱う。
//! 一括更新は 0 件でも 200 を返す。

use std::sync::Arc;

use axum::{
    Json,
    body::Bytes,
    extract::{
        Path,
        State,
        rejection::{BytesRejection, PathRejection},
    },
};
use serde::{Deserialize, Serialize};
use todolist_domain::item::{Item, ItemId};
use todolist_infra::repository::ItemRepository;

use crate::error::ApiError;

/// アイテム API の共有状態
pub struct ItemState {
    pub repository: Arc<dyn ItemRepository>,
}

// --- リクエスト/レスポンス型 ---

/// アイテム DTO
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemDto {
    pub id:          i64,
    pub description: String,
    pub status:      bool,
}

impl From<Item> for ItemDto {
    fn from(item: Item) -> Self {
        Self {
            id:          item.id().as_i64(),
            description: item.description().to_string(),
            status:      item.status(),
        }
    }
}

/// アイテム作成リクエスト
#[derive(Debug, Deserialize)]
pub struct CreateItemRequest {
    pub description: String,
}

/// 書き込み系操作のレスポンス
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemMessageResponse {
    pub id:      i64,
    pub message: String,
}

impl ItemMessageResponse {
    fn new(id: ItemId, message: &str) -> Json<Self> {
        Json(Self {
            id:      id.as_i64(),
            message: message.to_string(),
        })
    }
}

/// パスパラメータの ID を取り出す
fn item_id(path: Result<Path<i64>, PathRejection>) -> Result<ItemId, ApiError> {
    let Path(id) = path.map_err(|rejection| ApiError::BadRequest(rejection.body_text()))?;
    Ok(ItemId::new(id))
}

/// 作成リクエストのボディを JSON として解釈する
fn parse_create_request(
    body: Result<Bytes, BytesRejection>,
) -> Result<CreateItemRequest, ApiError> {
    let bytes = body.map_err(|rejection| ApiError::BadRequest(rejection.body_text()))?;
    serde_json::from_slice(&bytes).map_err(|e| ApiError::BadRequest(e.to_string()))
}

/// 影響行数 0 を NotFound として扱う
fn require_affected(affected: u64) -> Result<(), ApiError> {
    if affected == 0 {
        return Err(ApiError::NotFound);
    }
    Ok(())
}

// --- ハンドラ ---

/// GET /items
///
/// 全アイテムを返す。0 件なら空配列。
pub async fn list_items(
    State(state): State<Arc<ItemState>>,
) -> Result<Json<Vec<ItemDto>>, ApiError> {
    let items = state.repository.find_all().await?;

    Ok(Json(items.into_iter().map(ItemDto::from).collect()))
}

/// GET /items/{id}
///
/// ## レスポンス
///
/// - `200 OK`: アイテム
/// - `400 Bad Request`: ID が整数でない
/// - `404 Not Found`: アイテムが見つからない
pub async fn get_item(
    State(state): State<Arc<ItemState>>,
    path: Result<Path<i64>, PathRejection>,
) -> Result<Json<ItemDto>, ApiError> {
    let id = item_id(path)?;

    let item = state.repository.find_by_id(id).await?;

    Ok(Json(item.into()))
}

/// POST /items
///
/// リクエストボディ `{"description": "..."}` からアイテムを作成する。
/// `Content-Type` は見ずにボディを JSON として解釈する。
///
/// ## レスポンス
///
/// - `200 OK`: `{"id": <採番された ID>, "message": "Item created successfully"}`
/// - `400 Bad Request`: ボディが JSON として不正、または `description` がない
pub async fn create_item(
    State(state): State<Arc<ItemState>>,
    body: Result<Bytes, BytesRejection>,
) -> Result<Json<ItemMessageResponse>, ApiError> {
    let req = parse_create_request(body)?;

    let id = state.repository.insert(&req.description).await?;
    tracing::info!(%id, "アイテムを作成しました");

    Ok(ItemMessageResponse::new(id, "Item created successfully"))
}

/// PUT /items/{id}
///
/// アイテムを完了にする。完了済みでも 200 を返す。
///
/// ## レスポンス
///
/// - `200 OK`: `{"id": <ID>, "message": "Item updated successfully."}`
/// - `400 Bad Request`: ID が整数でない
/// - `404 Not Found`: アイテムが見つからない
pub async fn complete_item(
    State(state): State<Arc<ItemState>>,
    path: Result<Path<i64>, PathRejection>,
) -> Result<Json<ItemMessageResponse>, ApiError> {
    let id = item_id(path)?;

    let updated = state.repository.mark_done(id).await?;
    require_affected(updated)?;

    Ok(ItemMessageResponse::new(id, "Item updated successfully."))
}

/// PUT /items
///
/// 未完了の全アイテムを完了にし、変更件数を含むメッセージ文字列を返す。
/// 変更件数が 0 でも 200。
pub async fn complete_all_items(
    State(state): State<Arc<ItemState>>,
) -> Result<Json<String>, ApiError> {
    let updated = state.repository.mark_all_done().await?;

    Ok(Json(format!(
        "Items updated successfully. Total rows/record affected {updated}"
    )))
}

/// DELETE /items/{id}
///
/// ## レスポンス
///
/// - `200 OK`: `{"id": <ID>, "message": "Item deleted successfully."}`
/// - `400 Bad Request`: ID が整数でない
/// - `404 Not Found`: アイテムが見つからない（削除済みを含む）
pub async fn delete_item(
    State(state): State<Arc<ItemState>>,
    path: Result<Path<i64>, PathRejection>,
) -> Result<Json<ItemMessageResponse>, ApiError> {
    let id = item_id(path)?;

    let deleted = state.repository.delete(id).await?;
    require_affected(deleted)?;
    tracing::info!(%id, "アイテムを削除しました");

    Ok(ItemMessageResponse::new(id, "Item deleted successfully."))
}

/// DELETE /items
///
/// 全アイテムを削除する。元に戻せない。
pub async fn delete_all_items(
    State(state): State<Arc<ItemState>>,
) -> Result<Json<ItemMessageResponse>, ApiError> {
    state.repository.delete_all().await?;
    tracing::info!("全アイテムを削除しました");

    Ok(ItemMessageResponse::new(
        ItemId::new(1),
        "All Items deleted successfully.",
    ))
}
