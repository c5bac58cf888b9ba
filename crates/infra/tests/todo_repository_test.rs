//! TodoRepository 統合テスト
//!
//! データベースを使用したテスト。sqlx::test マクロを使用して、
//! テストごとに専用のデータベースを作成しマイグレーションを適用する。
//!
//! 実行方法:
//! ```bash
//! DATABASE_URL=postgres://... cargo test -p todo-infra --test todo_repository_test
//! ```

use pretty_assertions::assert_eq;
use sqlx::PgPool;
use todo_domain::todo::{CompletionChange, NewTodo, TodoBody, TodoId};
use todo_infra::repository::{PostgresTodoRepository, TodoRepository};

fn new_todo(body: &str, completed: bool) -> NewTodo {
    NewTodo {
        body: TodoBody::new(body).unwrap(),
        completed,
    }
}

/// テーブル内の行数を直接数える
async fn count_rows(pool: &PgPool) -> i64 {
    let row: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM todos")
        .fetch_one(pool)
        .await
        .unwrap();
    row.0
}

// ===== insert テスト =====

#[sqlx::test(migrations = "../../migrations")]
async fn test_insertで採番されたidとタイムスタンプが返る(pool: PgPool) {
    let sut = PostgresTodoRepository::new(pool);

    let todo = sut.insert(&new_todo("牛乳を買う", false)).await.unwrap();

    assert!(todo.id().as_i32() > 0);
    assert_eq!(todo.body().as_str(), "牛乳を買う");
    assert!(!todo.completed());
    assert!(todo.updated_at() >= todo.created_at());
}

#[sqlx::test(migrations = "../../migrations")]
async fn test_insertで完了フラグを指定できる(pool: PgPool) {
    let sut = PostgresTodoRepository::new(pool);

    let todo = sut.insert(&new_todo("完了済み", true)).await.unwrap();

    assert!(todo.completed());
}

#[sqlx::test(migrations = "../../migrations")]
async fn test_insertした本文は空白も長さもそのまま保存される(pool: PgPool) {
    let sut = PostgresTodoRepository::new(pool);
    let body = format!("  {}  ", "a".repeat(1001));

    let inserted = sut.insert(&new_todo(&body, false)).await.unwrap();
    let found = sut.find_all().await.unwrap();

    assert_eq!(inserted.body().as_str(), body);
    assert_eq!(found[0].body().as_str(), body);
}

// ===== find_all テスト =====

#[sqlx::test(migrations = "../../migrations")]
async fn test_find_allは空のテーブルで空のリストを返す(pool: PgPool) {
    let sut = PostgresTodoRepository::new(pool);

    let todos = sut.find_all().await.unwrap();

    assert!(todos.is_empty());
}

#[sqlx::test(migrations = "../../migrations")]
async fn test_find_allは作成したすべてのtodoをid順で返す(pool: PgPool) {
    let sut = PostgresTodoRepository::new(pool);
    let first = sut.insert(&new_todo("1 件目", false)).await.unwrap();
    let second = sut.insert(&new_todo("2 件目", false)).await.unwrap();
    let third = sut.insert(&new_todo("3 件目", true)).await.unwrap();

    let todos = sut.find_all().await.unwrap();

    let ids: Vec<TodoId> = todos.iter().map(|t| t.id()).collect();
    assert_eq!(ids, vec![first.id(), second.id(), third.id()]);
}

#[sqlx::test(migrations = "../../migrations")]
async fn test_find_allは直接書き込まれた空の本文も読み出せる(pool: PgPool) {
    sqlx::query("INSERT INTO todos (body) VALUES (''), ('   ')")
        .execute(&pool)
        .await
        .unwrap();
    let sut = PostgresTodoRepository::new(pool);

    let todos = sut.find_all().await.unwrap();

    let bodies: Vec<&str> = todos.iter().map(|t| t.body().as_str()).collect();
    assert_eq!(bodies, vec!["", "   "]);
}

// ===== update_completion テスト =====

#[sqlx::test(migrations = "../../migrations")]
async fn test_update_completionのtoggleで完了フラグが反転する(pool: PgPool) {
    let sut = PostgresTodoRepository::new(pool);
    let todo = sut.insert(&new_todo("反転", false)).await.unwrap();

    let toggled = sut
        .update_completion(todo.id(), CompletionChange::Toggle)
        .await
        .unwrap()
        .unwrap();
    assert!(toggled.completed());
    assert!(toggled.updated_at() >= todo.updated_at());

    let toggled_back = sut
        .update_completion(todo.id(), CompletionChange::Toggle)
        .await
        .unwrap()
        .unwrap();
    assert!(!toggled_back.completed());
}

#[sqlx::test(migrations = "../../migrations")]
async fn test_update_completionのsetで指定値に設定される(pool: PgPool) {
    let sut = PostgresTodoRepository::new(pool);
    let todo = sut.insert(&new_todo("設定", true)).await.unwrap();

    let updated = sut
        .update_completion(todo.id(), CompletionChange::Set(true))
        .await
        .unwrap()
        .unwrap();
    assert!(updated.completed());

    let updated = sut
        .update_completion(todo.id(), CompletionChange::Set(false))
        .await
        .unwrap()
        .unwrap();
    assert!(!updated.completed());
    assert_eq!(updated.body().as_str(), "設定");
    assert_eq!(updated.created_at(), todo.created_at());
}

#[sqlx::test(migrations = "../../migrations")]
async fn test_update_completionで存在しないidはnoneを返す(pool: PgPool) {
    let sut = PostgresTodoRepository::new(pool);

    let result = sut
        .update_completion(TodoId::from_i32(999_999), CompletionChange::Toggle)
        .await
        .unwrap();

    assert!(result.is_none());
}

// ===== delete テスト =====

#[sqlx::test(migrations = "../../migrations")]
async fn test_deleteで行が削除され再削除はfalseを返す(pool: PgPool) {
    let sut = PostgresTodoRepository::new(pool.clone());
    let keep = sut.insert(&new_todo("残す", false)).await.unwrap();
    let target = sut.insert(&new_todo("消す", false)).await.unwrap();

    assert!(sut.delete(target.id()).await.unwrap());

    let ids: Vec<TodoId> = sut.find_all().await.unwrap().iter().map(|t| t.id()).collect();
    assert_eq!(ids, vec![keep.id()]);
    assert_eq!(count_rows(&pool).await, 1);

    assert!(!sut.delete(target.id()).await.unwrap());
}

#[sqlx::test(migrations = "../../migrations")]
async fn test_deleteで存在しないidはfalseを返す(pool: PgPool) {
    let sut = PostgresTodoRepository::new(pool);

    let deleted = sut.delete(TodoId::from_i32(999_999)).await.unwrap();

    assert!(!deleted);
}
