//! # TodoList Service エラー定義
//!
//! ハンドラで発生するエラーと、HTTP レスポンスへの変換を定義する。
//!
//! | エラー | HTTP ステータス | レスポンスボディ |
//! |--------|----------------|------------------|
//! | `BadRequest` | 400 | `{"message":"Bad request"}` |
//! | `NotFound` | 404 | `{"message":"Item not found"}` |
//! | `Database` | 500 | `{"message":"Server error"}` |
//!
//! エラーの詳細はログにのみ出力し、クライアントには固定メッセージだけを返す。

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use todolist_infra::InfraError;

/// エラー時のレスポンスボディ
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

/// TodoList Service で発生するエラー
#[derive(Debug, Error)]
pub enum ApiError {
    /// パスパラメータやリクエストボディを解釈できない
    #[error("不正なリクエスト: {0}")]
    BadRequest(String),

    /// 該当するアイテムがない
    #[error("アイテムが見つかりません")]
    NotFound,

    /// データベースエラー
    #[error("データベースエラー: {0}")]
    Database(InfraError),
}

impl From<InfraError> for ApiError {
    fn from(err: InfraError) -> Self {
        if err.is_not_found() {
            Self::NotFound
        } else {
            Self::Database(err)
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            ApiError::BadRequest(detail) => {
                tracing::debug!("不正なリクエスト: {}", detail);
                (StatusCode::BAD_REQUEST, "Bad request")
            }
            ApiError::NotFound => {
                tracing::debug!("アイテムが見つかりません");
                (StatusCode::NOT_FOUND, "Item not found")
            }
            ApiError::Database(e) => {
                tracing::error!(
                    error = %e,
                    span_trace = %e.span_trace(),
                    "データベースエラー"
                );
                (StatusCode::INTERNAL_SERVER_ERROR, "Server error")
            }
        };

        (
            status,
            Json(MessageResponse {
                message: message.to_string(),
            }),
        )
            .into_response()
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use super::*;

    async fn into_parts(err: ApiError) -> (StatusCode, MessageResponse) {
        let response = err.into_response();
        let status = response.status();
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, serde_json::from_slice(&body).unwrap())
    }

    #[rstest]
    #[case(ApiError::BadRequest("invalid digit".to_string()), StatusCode::BAD_REQUEST, "Bad request")]
    #[case(ApiError::NotFound, StatusCode::NOT_FOUND, "Item not found")]
    #[tokio::test]
    async fn test_クライアントエラーは固定メッセージに変換される(
        #[case] err: ApiError,
        #[case] expected_status: StatusCode,
        #[case] expected_message: &str,
    ) {
        let (status, body) = into_parts(err).await;

        assert_eq!(status, expected_status);
        assert_eq!(body.message, expected_message);
    }

    #[tokio::test]
    async fn test_データベースエラーは詳細を隠して500になる() {
        let err: ApiError =
            InfraError::timeout("find_all", std::time::Duration::from_secs(5)).into();

        let (status, body) = into_parts(err).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body.message, "Server error");
    }

    #[test]
    fn test_not_foundのinfra_errorはnot_foundに変換される() {
        let err: ApiError = InfraError::not_found("Item", 1).into();
        assert!(matches!(err, ApiError::NotFound));
    }

    #[test]
    fn test_timeoutはdatabaseに変換される() {
        let err: ApiError =
            InfraError::timeout("find_all", std::time::Duration::from_secs(5)).into();
        assert!(matches!(err, ApiError::Database(_)));
    }
}
