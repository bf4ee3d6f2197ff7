//! # インフラ層エラー定義
//!
//! データベースとの通信で発生するエラーを表現する。
//!
//! ## 設計方針
//!
//! - **エラーの変換**: `sqlx::Error` をラップする
//! - **NotFound の明示**: 単一行の取得で該当行がない場合は専用の種別で返し、
//!   接続エラーやクエリエラーと区別できるようにする
//! - **SpanTrace 自動捕捉**: `From` 実装や convenience constructor で
//!   エラー生成時の呼び出し経路を自動記録する
//!
//! ## 構造
//!
//! `std::io::Error` と同じ struct + enum パターンを採用:
//! - [`InfraError`]: エラー種別（[`InfraErrorKind`]）と [`SpanTrace`] を保持するラッパー
//! - [`InfraErrorKind`]: エラーの具体的な種別（Database, NotFound, Timeout）

use std::{fmt, time::Duration};

use derive_more::Display;
use thiserror::Error;
use tracing_error::SpanTrace;

/// インフラ層で発生するエラー
///
/// エラー種別（[`InfraErrorKind`]）と [`SpanTrace`]（呼び出し経路）を保持する。
///
/// ## パターンマッチ
///
/// ```ignore
/// match error.kind() {
///     InfraErrorKind::NotFound { .. } => { /* 404 */ }
///     _ => { /* 500 */ }
/// }
/// ```
#[derive(Display)]
#[display("{kind}")]
pub struct InfraError {
    kind:       InfraErrorKind,
    span_trace: SpanTrace,
}

/// インフラ層エラーの種別
#[derive(Debug, Error)]
pub enum InfraErrorKind {
    /// データベースエラー
    ///
    /// SQL クエリの実行失敗、接続エラー、制約違反など。
    #[error("データベースエラー: {0}")]
    Database(#[source] sqlx::Error),

    /// 該当行なし
    ///
    /// 単一行の取得で 0 行だった場合。
    /// 更新・削除の 0 件は呼び出し側が影響行数から判断するため、この種別は使わない。
    #[error("{entity} が見つかりません(id={id})")]
    NotFound {
        /// エンティティ名（例: "Item"）
        entity: String,
        /// エンティティの ID
        id:     String,
    },

    /// クエリのタイムアウト
    #[error("{operation} が {after:?} 以内に完了しませんでした")]
    Timeout {
        /// 実行していた操作名
        operation: &'static str,
        /// 適用した期限
        after:     Duration,
    },
}

impl InfraError {
    /// エラー種別を取得する
    pub fn kind(&self) -> &InfraErrorKind {
        &self.kind
    }

    /// SpanTrace を取得する
    pub fn span_trace(&self) -> &SpanTrace {
        &self.span_trace
    }

    /// NotFound 種別かどうか
    pub fn is_not_found(&self) -> bool {
        matches!(self.kind, InfraErrorKind::NotFound { .. })
    }

    // ===== Convenience constructors =====

    /// 該当行なしエラーを生成する
    pub fn not_found(entity: impl Into<String>, id: impl ToString) -> Self {
        Self {
            kind:       InfraErrorKind::NotFound {
                entity: entity.into(),
                id:     id.to_string(),
            },
            span_trace: SpanTrace::capture(),
        }
    }

    /// タイムアウトエラーを生成する
    pub fn timeout(operation: &'static str, after: Duration) -> Self {
        Self {
            kind:       InfraErrorKind::Timeout { operation, after },
            span_trace: SpanTrace::capture(),
        }
    }
}

impl fmt::Debug for InfraError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InfraError")
            .field("kind", &self.kind)
            .field("span_trace", &self.span_trace)
            .finish()
    }
}

impl std::error::Error for InfraError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.kind.source()
    }
}

impl From<sqlx::Error> for InfraError {
    fn from(source: sqlx::Error) -> Self {
        Self {
            kind:       InfraErrorKind::Database(source),
            span_trace: SpanTrace::capture(),
        }
    }
}

#[cfg(test)]
mod tests {
    use tracing_subscriber::layer::SubscriberExt as _;

    use super::*;

    /// テスト用に ErrorLayer 付き subscriber を設定する
    fn with_error_layer(f: impl FnOnce()) {
        let subscriber = tracing_subscriber::registry().with(tracing_error::ErrorLayer::default());
        let _guard = tracing::subscriber::set_default(subscriber);
        f();
    }

    #[test]
    fn test_from_sqlx_errorでspan_traceがキャプチャされる() {
        with_error_layer(|| {
            let span = tracing::info_span!("test_repo", item_id = 1);
            let _enter = span.enter();

            let err: InfraError = sqlx::Error::PoolTimedOut.into();

            assert!(matches!(err.kind(), InfraErrorKind::Database(_)));
            let trace_str = format!("{}", err.span_trace());
            assert!(
                trace_str.contains("test_repo"),
                "SpanTrace がスパン名を含むこと: {trace_str}",
            );
        });
    }

    #[test]
    fn test_not_foundはentityとidを保持する() {
        let err = InfraError::not_found("Item", 42);

        assert!(err.is_not_found());
        assert!(matches!(
            err.kind(),
            InfraErrorKind::NotFound { entity, id } if entity == "Item" && id == "42"
        ));
        assert_eq!(format!("{err}"), "Item が見つかりません(id=42)");
    }

    #[test]
    fn test_databaseエラーはnot_foundではない() {
        let err: InfraError = sqlx::Error::RowNotFound.into();
        assert!(!err.is_not_found());
    }

    #[test]
    fn test_timeoutは操作名を含むメッセージになる() {
        let err = InfraError::timeout("find_all", Duration::from_secs(5));

        assert!(!err.is_not_found());
        assert_eq!(format!("{err}"), "find_all が 5s 以内に完了しませんでした");
    }

    #[test]
    fn test_sourceがinfra_error_kindに委譲する() {
        use std::error::Error;

        let err: InfraError = sqlx::Error::PoolClosed.into();
        assert!(err.source().is_some());

        let err = InfraError::not_found("Item", 1);
        assert!(err.source().is_none());
    }
}
