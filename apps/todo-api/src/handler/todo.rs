//! # Todo ハンドラ
//!
//! Todo の CRUD API を提供する。
//!
//! ## エンドポイント
//!
//! - `GET /api/todos` - Todo 一覧（ID 昇順）
//! - `POST /api/todos` - Todo 作成
//! - `PATCH /api/todos/{id}` - 完了フラグの変更（ボディなしで反転）
//! - `DELETE /api/todos/{id}` - Todo 削除

use std::sync::Arc;

use axum::{
    Json,
    body::Bytes,
    extract::{Path, State, rejection::JsonRejection},
    http::StatusCode,
    response::IntoResponse,
};
use chrono::SecondsFormat;
use serde::{Deserialize, Serialize};
use todo_domain::todo::{CompletionChange, NewTodo, Todo, TodoBody, TodoId};
use todo_infra::repository::TodoRepository;
use todo_shared::MessageResponse;

use crate::error::TodoApiError;

/// Todo API の共有状態
pub struct TodoState {
    pub todo_repository: Arc<dyn TodoRepository>,
}

// --- リクエスト/レスポンス型 ---

/// Todo DTO
#[derive(Debug, Serialize, Deserialize)]
pub struct TodoDto {
    pub id:         i32,
    pub body:       String,
    pub completed:  bool,
    pub created_at: String,
    pub updated_at: String,
}

impl From<Todo> for TodoDto {
    fn from(todo: Todo) -> Self {
        Self {
            id:         todo.id().as_i32(),
            body:       todo.body().as_str().to_string(),
            completed:  todo.completed(),
            created_at: todo
                .created_at()
                .to_rfc3339_opts(SecondsFormat::AutoSi, true),
            updated_at: todo
                .updated_at()
                .to_rfc3339_opts(SecondsFormat::AutoSi, true),
        }
    }
}

/// Todo 作成リクエスト
///
/// `body` が欠けている場合は空文字列として扱い、検証で弾く。
#[derive(Debug, Deserialize)]
pub struct CreateTodoRequest {
    #[serde(default)]
    pub body:      String,
    #[serde(default)]
    pub completed: bool,
}

/// Todo 更新リクエスト
#[derive(Debug, Default, Deserialize)]
pub struct UpdateTodoRequest {
    pub completed: Option<bool>,
}

impl UpdateTodoRequest {
    /// リクエストボディをパースする
    ///
    /// 空（空白のみを含む）のボディは「指定なし」として扱う。
    fn from_body(body: &[u8]) -> Result<Self, TodoApiError> {
        if body.iter().all(u8::is_ascii_whitespace) {
            return Ok(Self::default());
        }
        serde_json::from_slice(body)
            .map_err(|e| TodoApiError::bad_request("Invalid request body", e.to_string()))
    }

    fn completion_change(&self) -> CompletionChange {
        match self.completed {
            Some(completed) => CompletionChange::Set(completed),
            None => CompletionChange::Toggle,
        }
    }
}

/// パスパラメータの ID をパースする
fn parse_todo_id(raw: &str) -> Result<TodoId, TodoApiError> {
    raw.parse::<TodoId>()
        .map_err(|e| TodoApiError::bad_request("Invalid ID format", e.to_string()))
}

// --- ハンドラ ---

/// GET /api/todos
#[tracing::instrument(skip_all)]
pub async fn list_todos(
    State(state): State<Arc<TodoState>>,
) -> Result<impl IntoResponse, TodoApiError> {
    let todos = state
        .todo_repository
        .find_all()
        .await
        .map_err(TodoApiError::database("Failed to fetch todos"))?;

    let items: Vec<TodoDto> = todos.into_iter().map(TodoDto::from).collect();
    Ok((StatusCode::OK, Json(items)))
}

/// POST /api/todos
///
/// 作成した Todo を 201 で返す。`completed` の省略時は `false`。
#[tracing::instrument(skip_all)]
pub async fn create_todo(
    State(state): State<Arc<TodoState>>,
    payload: Result<Json<CreateTodoRequest>, JsonRejection>,
) -> Result<impl IntoResponse, TodoApiError> {
    let Json(req) =
        payload.map_err(|e| TodoApiError::bad_request("Invalid request body", e.body_text()))?;

    let new_todo = NewTodo {
        body:      TodoBody::new(req.body)?,
        completed: req.completed,
    };

    let todo = state
        .todo_repository
        .insert(&new_todo)
        .await
        .map_err(TodoApiError::database("Failed to create todo"))?;

    tracing::info!(id = %todo.id(), "Todo を作成しました");
    Ok((StatusCode::CREATED, Json(TodoDto::from(todo))))
}

/// PATCH /api/todos/{id}
///
/// `{"completed": bool}` で完了フラグを設定する。
/// ボディが空、または `completed` が省略された場合は現在の値を反転する。
#[tracing::instrument(skip_all, fields(id = %id))]
pub async fn update_todo(
    State(state): State<Arc<TodoState>>,
    Path(id): Path<String>,
    body: Bytes,
) -> Result<impl IntoResponse, TodoApiError> {
    let id = parse_todo_id(&id)?;
    let change = UpdateTodoRequest::from_body(&body)?.completion_change();

    let todo = state
        .todo_repository
        .update_completion(id, change)
        .await
        .map_err(TodoApiError::database("Failed to update todo"))?
        .ok_or_else(TodoApiError::todo_not_found)?;

    Ok((StatusCode::OK, Json(TodoDto::from(todo))))
}

/// DELETE /api/todos/{id}
#[tracing::instrument(skip_all, fields(id = %id))]
pub async fn delete_todo(
    State(state): State<Arc<TodoState>>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, TodoApiError> {
    let id = parse_todo_id(&id)?;

    let deleted = state
        .todo_repository
        .delete(id)
        .await
        .map_err(TodoApiError::database("Failed to delete todo"))?;

    if !deleted {
        return Err(TodoApiError::todo_not_found());
    }

    tracing::info!(id = %id, "Todo を削除しました");
    Ok((
        StatusCode::OK,
        Json(MessageResponse::new("Todo deleted successfully")),
    ))
}
