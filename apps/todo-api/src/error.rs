//! # Todo API エラー定義
//!
//! Todo API 固有のエラーと、HTTP レスポンスへの変換を定義する。
//!
//! レスポンスボディは [`todo_shared::ErrorResponse`]（`{"error", "details"?}`）。

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;
use todo_domain::DomainError;
use todo_infra::InfraError;
use todo_shared::ErrorResponse;

/// Todo API で発生するエラー
#[derive(Debug, Error)]
pub enum TodoApiError {
    /// 不正なリクエスト
    #[error("不正なリクエスト: {message}")]
    BadRequest {
        message: String,
        details: Option<String>,
    },

    /// リソースが見つからない
    #[error("リソースが見つかりません: {0}")]
    NotFound(String),

    /// データベースエラー
    ///
    /// `message` はクライアントに返す操作単位のメッセージ。
    #[error("{message}: {source}")]
    Database {
        message: String,
        #[source]
        source:  InfraError,
    },
}

impl TodoApiError {
    /// 詳細付きの 400 エラー
    pub fn bad_request(message: impl Into<String>, details: impl Into<String>) -> Self {
        Self::BadRequest {
            message: message.into(),
            details: Some(details.into()),
        }
    }

    /// Todo が存在しない場合の 404 エラー
    pub fn todo_not_found() -> Self {
        Self::NotFound("Todo not found".to_string())
    }

    /// `InfraError` を操作単位のメッセージで包む
    ///
    /// ```ignore
    /// repository.find_all().await.map_err(TodoApiError::database("Failed to fetch todos"))?;
    /// ```
    pub fn database(message: &'static str) -> impl FnOnce(InfraError) -> Self {
        move |source| Self::Database {
            message: message.to_string(),
            source,
        }
    }
}

impl From<DomainError> for TodoApiError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::Validation(message) => Self::BadRequest {
                message,
                details: None,
            },
        }
    }
}

impl IntoResponse for TodoApiError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            TodoApiError::BadRequest { message, details } => (
                StatusCode::BAD_REQUEST,
                ErrorResponse {
                    error: message,
                    details,
                },
            ),
            TodoApiError::NotFound(message) => (StatusCode::NOT_FOUND, ErrorResponse::new(message)),
            TodoApiError::Database { message, source } => {
                tracing::error!(
                    error = %source,
                    span_trace = %source.span_trace(),
                    "{}",
                    message
                );
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorResponse::with_details(message, source.cause()),
                )
            }
        };

        (status, Json(body)).into_response()
    }
}
