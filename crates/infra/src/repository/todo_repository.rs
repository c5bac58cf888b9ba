//! # TodoRepository
//!
//! Todo の永続化を担当するリポジトリ。
//!
//! ## 設計方針
//!
//! - **ストアによる採番**: ID とタイムスタンプは `todos` テーブルのデフォルト値で決まる
//! - **単一ステートメント**: 更新・削除は存在確認と書き込みを 1 つの SQL で行い、
//!   `RETURNING` / `rows_affected` で対象行の有無を判定する
//! - **ロックなし**: 同一 ID への同時更新は後勝ち

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use todo_domain::todo::{CompletionChange, NewTodo, Todo, TodoBody, TodoId, TodoRecord};

use crate::error::InfraError;

/// Todo リポジトリトレイト
#[async_trait]
pub trait TodoRepository: Send + Sync {
    /// すべての Todo を ID 昇順で取得する
    async fn find_all(&self) -> Result<Vec<Todo>, InfraError>;

    /// Todo を挿入し、採番された ID とタイムスタンプを含む行を返す
    async fn insert(&self, new_todo: &NewTodo) -> Result<Todo, InfraError>;

    /// 完了フラグを変更する
    ///
    /// 対象の行が存在しない場合は `None` を返す。
    async fn update_completion(
        &self,
        id: TodoId,
        change: CompletionChange,
    ) -> Result<Option<Todo>, InfraError>;

    /// Todo を削除する
    ///
    /// 行を削除した場合は `true`、対象の行が存在しない場合は `false` を返す。
    async fn delete(&self, id: TodoId) -> Result<bool, InfraError>;
}

/// DB の todos テーブルの行を表す中間構造体
#[derive(sqlx::FromRow)]
struct TodoRow {
    id:         i32,
    body:       String,
    completed:  bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<TodoRow> for Todo {
    fn from(row: TodoRow) -> Self {
        Todo::from_db(TodoRecord {
            id:         TodoId::from_i32(row.id),
            body:       TodoBody::from_db(row.body),
            completed:  row.completed,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

/// PostgreSQL 実装の TodoRepository
#[derive(Debug, Clone)]
pub struct PostgresTodoRepository {
    pool: PgPool,
}

impl PostgresTodoRepository {
    /// 新しいリポジトリインスタンスを作成
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TodoRepository for PostgresTodoRepository {
    #[tracing::instrument(skip_all, level = "debug")]
    async fn find_all(&self) -> Result<Vec<Todo>, InfraError> {
        let rows = sqlx::query_as::<_, TodoRow>(
            r#"
            SELECT id, body, completed, created_at, updated_at
            FROM todos
            ORDER BY id ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(Todo::from).collect())
    }

    #[tracing::instrument(skip_all, level = "debug", fields(completed = new_todo.completed))]
    async fn insert(&self, new_todo: &NewTodo) -> Result<Todo, InfraError> {
        let row = sqlx::query_as::<_, TodoRow>(
            r#"
            INSERT INTO todos (body, completed)
            VALUES ($1, $2)
            RETURNING id, body, completed, created_at, updated_at
            "#,
        )
        .bind(new_todo.body.as_str())
        .bind(new_todo.completed)
        .fetch_one(&self.pool)
        .await?;

        Ok(Todo::from(row))
    }

    #[tracing::instrument(skip_all, level = "debug", fields(id = %id, change = ?change))]
    async fn update_completion(
        &self,
        id: TodoId,
        change: CompletionChange,
    ) -> Result<Option<Todo>, InfraError> {
        // $2 が NULL の場合は現在値を反転する
        let row = sqlx::query_as::<_, TodoRow>(
            r#"
            UPDATE todos
            SET completed = COALESCE($2, NOT completed),
                updated_at = GREATEST(NOW(), created_at)
            WHERE id = $1
            RETURNING id, body, completed, created_at, updated_at
            "#,
        )
        .bind(id.as_i32())
        .bind(change.explicit_value())
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(Todo::from))
    }

    #[tracing::instrument(skip_all, level = "debug", fields(id = %id))]
    async fn delete(&self, id: TodoId) -> Result<bool, InfraError> {
        let result = sqlx::query(
            r#"
            DELETE FROM todos
            WHERE id = $1
            "#,
        )
        .bind(id.as_i32())
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use super::*;

    #[test]
    fn test_トレイトはsendとsyncを実装している() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<PostgresTodoRepository>();
        assert_send_sync::<Box<dyn TodoRepository>>();
    }

    #[rstest]
    #[case("牛乳を買う")]
    #[case("  前後に空白  ")]
    #[case("")]
    #[case(&"a".repeat(1001))]
    fn test_保存済みの本文はそのまま復元される(#[case] stored: &str) {
        let created_at = Utc::now();
        let row = TodoRow {
            id: 7,
            body: stored.to_string(),
            completed: true,
            created_at,
            updated_at: created_at,
        };

        let todo = Todo::from(row);

        assert_eq!(todo.id(), TodoId::from_i32(7));
        assert_eq!(todo.body().as_str(), stored);
        assert!(todo.completed());
        assert_eq!(todo.created_at(), created_at);
    }
}
