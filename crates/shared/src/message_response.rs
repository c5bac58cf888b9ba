//! # メッセージレスポンス
//!
//! 削除成功など、返すリソースがない操作の確認メッセージ `{ "message": ... }`。

use serde::{Deserialize, Serialize};

/// 確認メッセージのレスポンス
///
/// ```
/// use todo_shared::MessageResponse;
///
/// let response = MessageResponse::new("Todo deleted successfully");
/// assert_eq!(response.message, "Todo deleted successfully");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}
