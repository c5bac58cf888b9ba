//! # テスト用モックリポジトリ
//!
//! ハンドラテストで使用するインメモリモックリポジトリ。
//! `test-utils` feature を有効にすることで、他クレートからも利用可能。
//!
//! ```toml
//! [dev-dependencies]
//! todo-infra = { workspace = true, features = ["test-utils"] }
//! ```

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::Utc;
use todo_domain::todo::{CompletionChange, NewTodo, Todo, TodoId, TodoRecord};

use crate::{error::InfraError, repository::TodoRepository};

// ===== MockTodoRepository =====

#[derive(Default)]
struct MockTodoStore {
    todos:   Vec<Todo>,
    last_id: i32,
}

/// インメモリの TodoRepository
///
/// ID は 1 から順に採番する。`failing()` で作成すると全操作がエラーを返す。
#[derive(Clone, Default)]
pub struct MockTodoRepository {
    store:   Arc<Mutex<MockTodoStore>>,
    failure: Option<String>,
}

impl MockTodoRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// すべての操作が指定メッセージの `InfraError` を返すモックを作成する
    pub fn failing(message: impl Into<String>) -> Self {
        Self {
            store:   Arc::default(),
            failure: Some(message.into()),
        }
    }

    /// 現在保持している Todo のスナップショットを返す
    pub fn todos(&self) -> Vec<Todo> {
        self.store.lock().unwrap().todos.clone()
    }

    fn check_failure(&self) -> Result<(), InfraError> {
        match &self.failure {
            Some(message) => Err(InfraError::unexpected(message.clone())),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl TodoRepository for MockTodoRepository {
    async fn find_all(&self) -> Result<Vec<Todo>, InfraError> {
        self.check_failure()?;
        Ok(self.todos())
    }

    async fn insert(&self, new_todo: &NewTodo) -> Result<Todo, InfraError> {
        self.check_failure()?;
        let mut store = self.store.lock().unwrap();
        store.last_id += 1;
        let now = Utc::now();
        let todo = Todo::from_db(TodoRecord {
            id:         TodoId::from_i32(store.last_id),
            body:       new_todo.body.clone(),
            completed:  new_todo.completed,
            created_at: now,
            updated_at: now,
        });
        store.todos.push(todo.clone());
        Ok(todo)
    }

    async fn update_completion(
        &self,
        id: TodoId,
        change: CompletionChange,
    ) -> Result<Option<Todo>, InfraError> {
        self.check_failure()?;
        let mut store = self.store.lock().unwrap();
        let Some(slot) = store.todos.iter_mut().find(|t| t.id() == id) else {
            return Ok(None);
        };
        let updated = slot.clone().with_completion(change, Utc::now());
        *slot = updated.clone();
        Ok(Some(updated))
    }

    async fn delete(&self, id: TodoId) -> Result<bool, InfraError> {
        self.check_failure()?;
        let mut store = self.store.lock().unwrap();
        let before = store.todos.len();
        store.todos.retain(|t| t.id() != id);
        Ok(store.todos.len() < before)
    }
}
