//! # HTTP リクエストハンドラ
//!
//! axum のルートに対応するハンドラ関数を定義する。
//!
//! - 各ハンドラはサブモジュールに配置
//! - 親モジュール（この `handler.rs`）で re-export し、フラットな API を提供
//! - ハンドラは薄く保ち、永続化はリポジトリに委譲

pub mod item;

pub use item::{
    ItemState,
    complete_all_items,
    complete_item,
    create_item,
    delete_all_items,
    delete_item,
    get_item,
    list_items,
};
