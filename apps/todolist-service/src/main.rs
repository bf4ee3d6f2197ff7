//! # TodoList Service サーバー
//!
//! Todo アイテムの CRUD を提供する REST API サーバー。
//!
//! ```text
//! HTTP リクエスト → Router → Handler → ItemRepository → PostgreSQL
//! ```
//!
//! ## 環境変数
//!
//! 一覧は [`todolist_service::config`] を参照。最低限 `DATABASE_URL` が必要。
//!
//! ## 起動方法
//!
//! ```bash
//! # 開発環境（.env を読み込む）
//! cargo run -p todolist-service
//!
//! # 本番環境
//! TODO_PORT=8084 DATABASE_URL=postgres://... LOG_FORMAT=json cargo run -p todolist-service --release
//! ```
//!
//! `items` テーブルは事前に作成しておく（スキーマは
//! [`todolist_infra::repository::item_repository`] を参照）。

use std::{net::SocketAddr, sync::Arc};

use anyhow::Context as _;
use todolist_infra::{
    db,
    repository::{ItemRepository, PostgresItemRepository},
};
use todolist_service::{app_builder, config::TodoConfig, handler::ItemState};
use todolist_shared::observability::{TracingConfig, init_tracing};
use tokio::net::TcpListener;

/// TodoList Service サーバーのエントリーポイント
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // .env ファイルを読み込む（存在する場合）
    dotenvy::dotenv().ok();

    // トレーシング初期化
    let tracing_config = TracingConfig::from_env("todolist-service");
    let service_name = tracing_config.service_name.clone();
    init_tracing(tracing_config);
    let _tracing_guard = tracing::info_span!("app", service = %service_name).entered();

    // 設定読み込み
    let config = TodoConfig::from_env().context("設定の読み込みに失敗しました")?;

    tracing::info!(
        "TodoList Service サーバーを起動します: {}:{}",
        config.host,
        config.port
    );

    // データベース接続プールを作成（失敗したら起動を中止する）
    let pool = db::create_pool(&config.database_url, config.pool_settings())
        .await
        .context("データベース接続に失敗しました")?;
    tracing::info!("データベースに接続しました");

    // 依存コンポーネントを初期化
    let repository: Arc<dyn ItemRepository> =
        Arc::new(PostgresItemRepository::new(pool).with_query_timeout(config.query_timeout));
    let state = Arc::new(ItemState { repository });

    // ルーター構築
    let app = app_builder::build_app(state, config.cors_allow_origin.as_deref())
        .context("CORS_ALLOW_ORIGIN の値が不正です")?;

    // サーバー起動
    let addr: SocketAddr = format!("{}:{}", config.host, config.port)
        .parse()
        .context("アドレスのパースに失敗しました")?;

    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("{addr} にバインドできませんでした"))?;
    tracing::info!("TodoList Service サーバーが起動しました: {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("TodoList Service サーバーを停止しました");

    Ok(())
}

/// Ctrl+C または SIGTERM を待つ
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Ctrl+C ハンドラの登録に失敗しました: {}", e);
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("SIGTERM ハンドラの登録に失敗しました: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    tracing::info!("シャットダウンシグナルを受信しました");
}
