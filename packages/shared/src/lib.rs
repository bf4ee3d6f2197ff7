//! # TodoList 共有ユーティリティ
//!
//! ビジネスロジックを含まない横断的なユーティリティを配置する。
//!
//! - [`observability`] - トレーシング初期化とリクエストスパン

pub mod observability;
