//! # TodoList ドメイン層
//!
//! Todo リストの中核となるドメインモデルを定義する。
//!
//! ## 設計方針
//!
//! - **エンティティ**: 一意の識別子を持つオブジェクト（[`item::Item`]）
//! - **値オブジェクト**: 識別子の Newtype（[`item::ItemId`]）
//!
//! ## 依存関係の方向
//!
//! ```text
//! service → infra → domain
//! ```
//!
//! ドメイン層はインフラ層（DB、HTTP）には一切依存しない。
//!
//! ## モジュール構成
//!
//! - [`item`] - Todo アイテムとその識別子
//!
//! ## 使用例
//!
//! ```rust
//! use todolist_domain::item::{Item, ItemId};
//!
//! let item = Item::from_db(ItemId::new(1), "buy milk".to_string(), false);
//! assert!(!item.status());
//! ```

pub mod item;
