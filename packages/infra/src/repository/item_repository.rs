//! # ItemRepository
//!
//! Todo アイテムの永続化を担当するリポジトリ。
//!
//! ## 設計方針
//!
//! - **単一ステートメント**: すべての操作は 1 つの SQL で完結し、
//!   原子性はストレージエンジンに任せる（明示的なトランザクションは張らない）
//! - **影響行数で存在判定**: 更新・削除は NotFound を返さず影響行数を返す。
//!   0 件をどう扱うかは呼び出し側が決める
//! - **呼び出し単位の期限**: 各クエリに `query_timeout` を適用し、
//!   超過した場合は [`InfraErrorKind::Timeout`](crate::InfraErrorKind::Timeout) を返す
//!
//! ## テーブル
//!
//! ```sql
//! CREATE TABLE items (
//!     id          BIGSERIAL PRIMARY KEY,
//!     description TEXT    NOT NULL DEFAULT '',
//!     status      BOOLEAN NOT NULL DEFAULT FALSE
//! );
//! ```

use std::{future::Future, time::Duration};

use async_trait::async_trait;
use sqlx::{FromRow, PgPool};
use todolist_domain::item::{Item, ItemId};

use crate::error::InfraError;

/// アイテムリポジトリトレイト
///
/// Todo アイテムの CRUD 操作を定義する。
#[async_trait]
pub trait ItemRepository: Send + Sync {
    /// 全アイテムを取得する
    ///
    /// 並び順は保証しない（ストレージの自然順）。0 件なら空の Vec を返す。
    async fn find_all(&self) -> Result<Vec<Item>, InfraError>;

    /// ID でアイテムを取得する
    ///
    /// 該当行がない場合は NotFound エラーを返す。
    async fn find_by_id(&self, id: ItemId) -> Result<Item, InfraError>;

    /// アイテムを挿入し、採番された ID を返す
    ///
    /// `status` は DB のデフォルト値（`false`）になる。
    async fn insert(&self, description: &str) -> Result<ItemId, InfraError>;

    /// 指定アイテムを完了にし、影響行数（0 または 1）を返す
    ///
    /// 現在の状態に関わらず更新するため、完了済みでも 1 を返す。
    async fn mark_done(&self, id: ItemId) -> Result<u64, InfraError>;

    /// 未完了の全アイテムを完了にし、変更した行数を返す
    async fn mark_all_done(&self) -> Result<u64, InfraError>;

    /// 指定アイテムを削除し、影響行数（0 または 1）を返す
    async fn delete(&self, id: ItemId) -> Result<u64, InfraError>;

    /// 全アイテムを削除する（元に戻せない）
    async fn delete_all(&self) -> Result<(), InfraError>;
}

/// `items` テーブルの行
#[derive(Debug, FromRow)]
struct ItemRow {
    id:          i64,
    description: String,
    status:      bool,
}

impl From<ItemRow> for Item {
    fn from(row: ItemRow) -> Self {
        Item::from_db(ItemId::new(row.id), row.description, row.status)
    }
}

/// PostgreSQL 実装の ItemRepository
#[derive(Debug, Clone)]
pub struct PostgresItemRepository {
    pool:          PgPool,
    query_timeout: Duration,
}

impl PostgresItemRepository {
    /// クエリ期限のデフォルト値
    pub const DEFAULT_QUERY_TIMEOUT: Duration = Duration::from_secs(5);

    /// 新しいリポジトリインスタンスを作成
    pub fn new(pool: PgPool) -> Self {
        Self {
            pool,
            query_timeout: Self::DEFAULT_QUERY_TIMEOUT,
        }
    }

    /// クエリ期限を変更する
    pub fn with_query_timeout(self, query_timeout: Duration) -> Self {
        Self {
            query_timeout,
            ..self
        }
    }

    /// 期限付きでクエリを実行する
    async fn with_deadline<T, F>(&self, operation: &'static str, query: F) -> Result<T, InfraError>
    where
        F: Future<Output = Result<T, sqlx::Error>> + Send,
    {
        match tokio::time::timeout(self.query_timeout, query).await {
            Ok(result) => Ok(result?),
            Err(_) => Err(InfraError::timeout(operation, self.query_timeout)),
        }
    }
}

#[async_trait]
impl ItemRepository for PostgresItemRepository {
    #[tracing::instrument(skip_all, level = "debug")]
    async fn find_all(&self) -> Result<Vec<Item>, InfraError> {
        let rows = self
            .with_deadline(
                "find_all",
                sqlx::query_as::<_, ItemRow>("SELECT id, description, status FROM items")
                    .fetch_all(&self.pool),
            )
            .await?;

        Ok(rows.into_iter().map(Item::from).collect())
    }

    #[tracing::instrument(skip_all, level = "debug", fields(%id))]
    async fn find_by_id(&self, id: ItemId) -> Result<Item, InfraError> {
        let row = self
            .with_deadline(
                "find_by_id",
                sqlx::query_as::<_, ItemRow>(
                    "SELECT id, description, status FROM items WHERE id = $1",
                )
                .bind(id.as_i64())
                .fetch_optional(&self.pool),
            )
            .await?;

        let Some(row) = row else {
            return Err(InfraError::not_found("Item", id));
        };

        Ok(row.into())
    }

    #[tracing::instrument(skip_all, level = "debug")]
    async fn insert(&self, description: &str) -> Result<ItemId, InfraError> {
        let (id,): (i64,) = self
            .with_deadline(
                "insert",
                sqlx::query_as("INSERT INTO items (description) VALUES ($1) RETURNING id")
                    .bind(description)
                    .fetch_one(&self.pool),
            )
            .await?;

        Ok(ItemId::new(id))
    }

    #[tracing::instrument(skip_all, level = "debug", fields(%id))]
    async fn mark_done(&self, id: ItemId) -> Result<u64, InfraError> {
        let result = self
            .with_deadline(
                "mark_done",
                sqlx::query("UPDATE items SET status = TRUE WHERE id = $1")
                    .bind(id.as_i64())
                    .execute(&self.pool),
            )
            .await?;

        Ok(result.rows_affected())
    }

    #[tracing::instrument(skip_all, level = "debug")]
    async fn mark_all_done(&self) -> Result<u64, InfraError> {
        let result = self
            .with_deadline(
                "mark_all_done",
                sqlx::query("UPDATE items SET status = TRUE WHERE status = FALSE")
                    .execute(&self.pool),
            )
            .await?;

        Ok(result.rows_affected())
    }

    #[tracing::instrument(skip_all, level = "debug", fields(%id))]
    async fn delete(&self, id: ItemId) -> Result<u64, InfraError> {
        let result = self
            .with_deadline(
                "delete",
                sqlx::query("DELETE FROM items WHERE id = $1")
                    .bind(id.as_i64())
                    .execute(&self.pool),
            )
            .await?;

        Ok(result.rows_affected())
    }

    #[tracing::instrument(skip_all, level = "debug")]
    async fn delete_all(&self) -> Result<(), InfraError> {
        // TRUNCATE は採番シーケンスをリセットしない
        self.with_deadline("delete_all", sqlx::query("TRUNCATE items").execute(&self.pool))
            .await?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{PoolSettings, pool_options};

    fn lazy_pool() -> PgPool {
        pool_options(PoolSettings::default())
            .connect_lazy("postgres://localhost/todolist")
            .unwrap()
    }

    fn assert_send_sync<T: Send + Sync>() {}

    #[test]
    fn test_item_repository_traitはsendとsyncを実装している() {
        assert_send_sync::<Box<dyn ItemRepository>>();
    }

    #[tokio::test]
    async fn test_newはデフォルトのクエリ期限を使う() {
        let sut = PostgresItemRepository::new(lazy_pool());
        assert_eq!(sut.query_timeout, PostgresItemRepository::DEFAULT_QUERY_TIMEOUT);
    }

    #[tokio::test]
    async fn test_期限を超えたクエリはtimeoutエラーになる() {
        let sut = PostgresItemRepository::new(lazy_pool())
            .with_query_timeout(Duration::from_millis(10));

        let result: Result<(), InfraError> = sut
            .with_deadline("slow", async {
                tokio::time::sleep(Duration::from_secs(1)).await;
                Ok(())
            })
            .await;

        let err = result.unwrap_err();
        assert!(matches!(
            err.kind(),
            crate::InfraErrorKind::Timeout { operation: "slow", .. }
        ));
    }

    #[tokio::test]
    async fn test_期限内のクエリエラーはdatabaseエラーになる() {
        let sut = PostgresItemRepository::new(lazy_pool());

        let result: Result<(), InfraError> = sut
            .with_deadline("broken", async { Err(sqlx::Error::PoolClosed) })
            .await;

        assert!(matches!(
            result.unwrap_err().kind(),
            crate::InfraErrorKind::Database(_)
        ));
    }
}
