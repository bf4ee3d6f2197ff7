//! # Todo アイテム
//!
//! Todo リストが扱う唯一のエンティティ。説明文と完了フラグを持つ。
//!
//! ## ライフサイクル
//!
//! 1. 説明文のみを指定して作成される（ID は DB が採番、`status` は `false`）
//! 2. 何度でも参照される
//! 3. 完了操作で `status` が `true` になる（`false` に戻す操作はない）
//! 4. ID 指定の削除、または全件削除で消える
//!
//! ## 設計判断
//!
//! `ItemId` は DB の `BIGSERIAL` をそのまま表す `i64` の Newtype である。
//! パスパラメータの整数パース以外のバリデーションは行わないため、
//! 負数や 0 もそのまま `ItemId` になる（該当行がなければ 404 になるだけ）。

use derive_more::Display;
use serde::{Deserialize, Serialize};

/// Todo アイテムの一意識別子
///
/// DB で採番され、作成後は変わらない。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Display)]
#[serde(transparent)]
#[display("{_0}")]
pub struct ItemId(i64);

impl ItemId {
    /// 既存の整数値から ID を作成する
    pub fn new(value: i64) -> Self {
        Self(value)
    }

    /// 内部の整数値を取得する
    pub fn as_i64(&self) -> i64 {
        self.0
    }
}

/// Todo アイテムエンティティ
///
/// # 不変条件
///
/// - `id` はシステム内で一意
/// - `description` は作成後に変更されない
/// - `status` は `false` → `true` の一方向にのみ遷移する
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Item {
    id:          ItemId,
    description: String,
    status:      bool,
}

impl Item {
    /// データベースからアイテムを復元する
    pub fn from_db(id: ItemId, description: String, status: bool) -> Self {
        Self {
            id,
            description,
            status,
        }
    }

    /// 採番直後の未完了アイテムを作成する
    pub fn created(id: ItemId, description: impl Into<String>) -> Self {
        Self {
            id,
            description: description.into(),
            status: false,
        }
    }

    /// 完了状態に遷移したアイテムを返す
    ///
    /// すでに完了済みでもそのまま `true` を返す（冪等）。
    pub fn completed(self) -> Self {
        Self {
            status: true,
            ..self
        }
    }

    pub fn id(&self) -> ItemId {
        self.id
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    /// 完了フラグ
    pub fn status(&self) -> bool {
        self.status
    }
}
