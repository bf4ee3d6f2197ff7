//! テスト共通フィクスチャ
//!
//! DB を使用する統合テストで共通利用する接続・スキーマ作成ヘルパー。
//! Rust の統合テスト規約に従い `tests/common/mod.rs` に配置。
//!
//! 各テストは専用のスキーマを作り、`search_path` をそのスキーマに向けた
//! 接続プールを使う。テスト同士が同じ `items` テーブルを共有しない。

// 各テストファイルが独立したクレートとしてコンパイルされるため、
// 使用しない関数に dead_code 警告が出る。モジュール全体で抑制する。
#![allow(dead_code)]

use sqlx::{Executor as _, PgPool, postgres::PgPoolOptions};

/// items テーブルの DDL
pub const CREATE_ITEMS_TABLE: &str = r#"
    CREATE TABLE items (
        id          BIGSERIAL PRIMARY KEY,
        description TEXT    NOT NULL DEFAULT '',
        status      BOOLEAN NOT NULL DEFAULT FALSE
    )
"#;

/// テスト用の DATABASE_URL
///
/// 未設定なら `None` を返し、呼び出し側のテストはスキップする。
fn database_url() -> Option<String> {
    dotenvy::dotenv().ok();
    match std::env::var("DATABASE_URL") {
        Ok(url) if !url.is_empty() => Some(url),
        _ => {
            eprintln!("DATABASE_URL が未設定のため DB テストをスキップします");
            None
        }
    }
}

/// `todolist_test_<name>` スキーマを作り直し、そこを参照する接続プールを返す
///
/// スキーマは次回の同名テスト開始時に作り直される。
pub async fn connect_isolated(name: &str) -> Option<PgPool> {
    let url = database_url()?;
    let schema = format!("todolist_test_{name}");
    let search_path = format!("SET search_path TO {schema}");

    let pool = PgPoolOptions::new()
        .max_connections(1)
        .after_connect(move |conn, _meta| {
            let search_path = search_path.clone();
            Box::pin(async move {
                conn.execute(search_path.as_str()).await?;
                Ok(())
            })
        })
        .connect(&url)
        .await
        .expect("DB 接続に失敗");

    pool.execute(format!("DROP SCHEMA IF EXISTS {schema} CASCADE").as_str())
        .await
        .expect("スキーマの削除に失敗");
    pool.execute(format!("CREATE SCHEMA {schema}").as_str())
        .await
        .expect("スキーマの作成に失敗");

    Some(pool)
}

/// テスト用スキーマに items テーブルを作成する
pub async fn setup_items_table(pool: &PgPool) {
    sqlx::query(CREATE_ITEMS_TABLE)
        .execute(pool)
        .await
        .expect("items テーブルの作成に失敗");
}
