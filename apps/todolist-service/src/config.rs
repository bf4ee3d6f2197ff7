//! # TodoList Service 設定
//!
//! 環境変数から TodoList Service の設定を読み込む。
//!
//! ## 環境変数一覧
//!
//! | 変数名 | 必須 | デフォルト | 説明 |
//! |--------|------|------------|------|
//! | `TODO_HOST` | No | `0.0.0.0` | バインドアドレス |
//! | `TODO_PORT` | No | `8084` | ポート番号 |
//! | `DATABASE_URL` | **Yes** | - | PostgreSQL 接続 URL（未設定なら `POSTGRES_URL` を参照） |
//! | `DB_MAX_CONNECTIONS` | No | `10` | 接続プールの最大接続数 |
//! | `DB_QUERY_TIMEOUT_SECS` | No | `5` | クエリ 1 回あたりの期限（秒） |
//! | `CORS_ALLOW_ORIGIN` | No | - | 設定すると CORS を有効化する（`*` で全オリジン） |

use std::{env, time::Duration};

use thiserror::Error;
use todolist_infra::db::PoolSettings;

/// 設定読み込みエラー
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// 必須の環境変数が未設定
    #[error("{0} が設定されていません")]
    Missing(&'static str),

    /// 値を解釈できない
    #[error("{key} の値が不正です: {value:?}")]
    Invalid { key: &'static str, value: String },
}

/// TodoList Service サーバーの設定
#[derive(Debug, Clone)]
pub struct TodoConfig {
    /// バインドアドレス
    pub host:              String,
    /// ポート番号
    pub port:              u16,
    /// データベース接続 URL
    pub database_url:      String,
    /// 接続プールの最大接続数
    pub max_connections:   u32,
    /// クエリ 1 回あたりの期限
    pub query_timeout:     Duration,
    /// CORS で許可するオリジン（未設定なら CORS レイヤーを付けない）
    pub cors_allow_origin: Option<String>,
}

impl TodoConfig {
    /// 環境変数から設定を読み込む
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// 任意のキー参照関数から設定を読み込む
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let database_url = lookup("DATABASE_URL")
            .or_else(|| lookup("POSTGRES_URL"))
            .filter(|url| !url.is_empty())
            .ok_or(ConfigError::Missing("DATABASE_URL"))?;

        Ok(Self {
            host: lookup("TODO_HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
            port: parse_or("TODO_PORT", lookup("TODO_PORT"), 8084)?,
            database_url,
            max_connections: parse_or("DB_MAX_CONNECTIONS", lookup("DB_MAX_CONNECTIONS"), 10)?,
            query_timeout: Duration::from_secs(parse_or(
                "DB_QUERY_TIMEOUT_SECS",
                lookup("DB_QUERY_TIMEOUT_SECS"),
                5,
            )?),
            cors_allow_origin: lookup("CORS_ALLOW_ORIGIN").filter(|origin| !origin.is_empty()),
        })
    }

    /// 接続プールの設定値
    pub fn pool_settings(&self) -> PoolSettings {
        PoolSettings {
            max_connections: self.max_connections,
            ..PoolSettings::default()
        }
    }
}

fn parse_or<T: std::str::FromStr>(
    key: &'static str,
    value: Option<String>,
    default: T,
) -> Result<T, ConfigError> {
    match value {
        None => Ok(default),
        Some(value) => value
            .parse()
            .map_err(|_| ConfigError::Invalid { key, value }),
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use pretty_assertions::assert_eq;

    use super::*;

    fn load(vars: &[(&str, &str)]) -> Result<TodoConfig, ConfigError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        TodoConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_database_urlのみでデフォルト値が使われる() {
        let config = load(&[("DATABASE_URL", "postgres://localhost/todo")]).unwrap();

        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.port, 8084);
        assert_eq!(config.database_url, "postgres://localhost/todo");
        assert_eq!(config.max_connections, 10);
        assert_eq!(config.query_timeout, Duration::from_secs(5));
        assert_eq!(config.cors_allow_origin, None);
    }

    #[test]
    fn test_postgres_urlにフォールバックする() {
        let config = load(&[("POSTGRES_URL", "postgres://legacy/todo")]).unwrap();

        assert_eq!(config.database_url, "postgres://legacy/todo");
    }

    #[test]
    fn test_database_urlがpostgres_urlより優先される() {
        let config = load(&[
            ("DATABASE_URL", "postgres://primary/todo"),
            ("POSTGRES_URL", "postgres://legacy/todo"),
        ])
        .unwrap();

        assert_eq!(config.database_url, "postgres://primary/todo");
    }

    #[test]
    fn test_接続urlがなければmissingエラー() {
        assert_eq!(load(&[]).unwrap_err(), ConfigError::Missing("DATABASE_URL"));
    }

    #[test]
    fn test_不正なポート番号はinvalidエラー() {
        let err = load(&[
            ("DATABASE_URL", "postgres://localhost/todo"),
            ("TODO_PORT", "eighty"),
        ])
        .unwrap_err();

        assert_eq!(
            err,
            ConfigError::Invalid {
                key:   "TODO_PORT",
                value: "eighty".to_string(),
            }
        );
    }

    #[test]
    fn test_すべての値を上書きできる() {
        let config = load(&[
            ("DATABASE_URL", "postgres://localhost/todo"),
            ("TODO_HOST", "127.0.0.1"),
            ("TODO_PORT", "3000"),
            ("DB_MAX_CONNECTIONS", "4"),
            ("DB_QUERY_TIMEOUT_SECS", "2"),
            ("CORS_ALLOW_ORIGIN", "http://localhost:5173"),
        ])
        .unwrap();

        assert_eq!(config.host, "127.0.0.1");
        assert_eq!(config.port, 3000);
        assert_eq!(config.pool_settings().max_connections, 4);
        assert_eq!(config.query_timeout, Duration::from_secs(2));
        assert_eq!(config.cors_allow_origin.as_deref(), Some("http://localhost:5173"));
    }
}
