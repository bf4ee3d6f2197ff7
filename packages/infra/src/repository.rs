//! # リポジトリ実装
//!
//! - **データベース抽象化**: sqlx を使用し、PostgreSQL 固有の処理をカプセル化
//! - **テスタビリティ**: トレイト経由でモック可能な設計

pub mod item_repository;

pub use item_repository::{ItemRepository, PostgresItemRepository};
