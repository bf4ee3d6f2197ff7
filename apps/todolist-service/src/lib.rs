//! # TodoList Service ライブラリ
//!
//! Todo アイテムの REST API を構成するハンドラとルーターを公開する。
//! バイナリ（`main.rs`）と統合テストの両方から利用する。
//!
//! ## モジュール構成
//!
//! - [`app_builder`] - ルーター構築
//! - [`config`] - 環境変数からの設定読み込み
//! - [`error`] - API エラーと HTTP レスポンスへの変換
//! - [`handler`] - HTTP リクエストハンドラ

pub mod app_builder;
pub mod config;
pub mod error;
pub mod handler;
