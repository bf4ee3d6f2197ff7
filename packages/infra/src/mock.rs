//! # テスト用モックリポジトリ
//!
//! ハンドラテストで使用するインメモリの ItemRepository。
//! `test-utils` feature を有効にすることで、他クレートからも利用可能。
//!
//! ```toml
//! [dev-dependencies]
//! todolist-infra = { workspace = true, features = ["test-utils"] }
//! ```
//!
//! PostgreSQL 実装と同じ振る舞いをする:
//! - ID は 1 から連番で採番し、全件削除でもリセットしない
//! - 更新・削除は影響行数を返す

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use todolist_domain::item::{Item, ItemId};

use crate::{error::InfraError, repository::ItemRepository};

#[derive(Debug, Default)]
struct MockState {
    items:   Vec<Item>,
    last_id: i64,
    failing: bool,
}

impl MockState {
    fn check_available(&self) -> Result<(), InfraError> {
        if self.failing {
            return Err(sqlx::Error::PoolTimedOut.into());
        }
        Ok(())
    }
}

// ===== MockItemRepository =====

#[derive(Clone, Default)]
pub struct MockItemRepository {
    state: Arc<Mutex<MockState>>,
}

impl MockItemRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// 事前データを投入し、採番した ID を返す
    pub fn add_item(&self, description: &str) -> ItemId {
        let mut state = self.state.lock().unwrap();
        state.last_id += 1;
        let id = ItemId::new(state.last_id);
        state.items.push(Item::created(id, description));
        id
    }

    /// 現在保持しているアイテムのスナップショット
    pub fn items(&self) -> Vec<Item> {
        self.state.lock().unwrap().items.clone()
    }

    /// `true` にすると以降の全操作がデータベースエラーを返す
    pub fn set_failing(&self, failing: bool) {
        self.state.lock().unwrap().failing = failing;
    }
}

#[async_trait]
impl ItemRepository for MockItemRepository {
    async fn find_all(&self) -> Result<Vec<Item>, InfraError> {
        let state = self.state.lock().unwrap();
        state.check_available()?;
        Ok(state.items.clone())
    }

    async fn find_by_id(&self, id: ItemId) -> Result<Item, InfraError> {
        let state = self.state.lock().unwrap();
        state.check_available()?;
        state
            .items
            .iter()
            .find(|item| item.id() == id)
            .cloned()
            .ok_or_else(|| InfraError::not_found("Item", id))
    }

    async fn insert(&self, description: &str) -> Result<ItemId, InfraError> {
        let mut state = self.state.lock().unwrap();
        state.check_available()?;
        state.last_id += 1;
        let id = ItemId::new(state.last_id);
        state.items.push(Item::created(id, description));
        Ok(id)
    }

    async fn mark_done(&self, id: ItemId) -> Result<u64, InfraError> {
        let mut state = self.state.lock().unwrap();
        state.check_available()?;
        let Some(pos) = state.items.iter().position(|item| item.id() == id) else {
            return Ok(0);
        };
        let item = state.items[pos].clone();
        state.items[pos] = item.completed();
        Ok(1)
    }

    async fn mark_all_done(&self) -> Result<u64, InfraError> {
        let mut state = self.state.lock().unwrap();
        state.check_available()?;
        let mut changed = 0;
        for item in state.items.iter_mut().filter(|item| !item.status()) {
            *item = item.clone().completed();
            changed += 1;
        }
        Ok(changed)
    }

    async fn delete(&self, id: ItemId) -> Result<u64, InfraError> {
        let mut state = self.state.lock().unwrap();
        state.check_available()?;
        let before = state.items.len();
        state.items.retain(|item| item.id() != id);
        Ok((before - state.items.len()) as u64)
    }

    async fn delete_all(&self) -> Result<(), InfraError> {
        let mut state = self.state.lock().unwrap();
        state.check_available()?;
        state.items.clear();
        Ok(())
    }
}
