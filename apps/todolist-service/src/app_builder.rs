//! # アプリケーション構築
//!
//! ルーター構築とミドルウェアの適用を担当する。
//! `main.rs` はインフラ初期化とサーバー起動に集中する。
//!
//! ## ルーティング
//!
//! | メソッド | パス | ハンドラ |
//! |----------|------|----------|
//! | GET | `/items` | [`list_items`] |
//! | GET | `/items/{id}` | [`get_item`] |
//! | POST | `/items` | [`create_item`] |
//! | PUT | `/items/{id}` | [`complete_item`] |
//! | PUT | `/items` | [`complete_all_items`] |
//! | DELETE | `/items/{id}` | [`delete_item`] |
//! | DELETE | `/items` | [`delete_all_items`] |
//!
//! 上記以外のパスは 404、既知のパスへの未対応メソッドは 405（axum のデフォルト）。

use std::sync::Arc;

use axum::{
    Router,
    body::Body,
    http::{HeaderValue, Method, header, header::InvalidHeaderValue},
    routing::get,
};
use todolist_shared::observability::make_request_span;
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    trace::TraceLayer,
};

use crate::handler::{
    ItemState,
    complete_all_items,
    complete_item,
    create_item,
    delete_all_items,
    delete_item,
    get_item,
    list_items,
};

/// アイテム API のルーターを構築する
pub fn build_router(state: Arc<ItemState>) -> Router {
    Router::new()
        .route(
            "/items",
            get(list_items)
                .post(create_item)
                .put(complete_all_items)
                .delete(delete_all_items),
        )
        .route(
            "/items/{id}",
            get(get_item).put(complete_item).delete(delete_item),
        )
        .with_state(state)
}

/// ミドルウェアを含むアプリケーション全体を構築する
///
/// `cors_allow_origin` が指定された場合のみ CORS レイヤーを付与する。
pub fn build_app(
    state: Arc<ItemState>,
    cors_allow_origin: Option<&str>,
) -> Result<Router, InvalidHeaderValue> {
    let app = build_router(state)
        .layer(TraceLayer::new_for_http().make_span_with(make_request_span::<Body>));

    match cors_allow_origin {
        Some(origin) => Ok(app.layer(cors_layer(origin)?)),
        None => Ok(app),
    }
}

/// CORS レイヤーを作成する（`*` は全オリジン許可）
fn cors_layer(origin: &str) -> Result<CorsLayer, InvalidHeaderValue> {
    let allow_origin = if origin == "*" {
        AllowOrigin::any()
    } else {
        AllowOrigin::exact(HeaderValue::from_str(origin)?)
    };

    Ok(CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([header::CONTENT_TYPE]))
}
