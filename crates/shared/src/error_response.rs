//! # エラーレスポンス
//!
//! API のエラーレスポンス構造体を提供する。
//!
//! ## 形式
//!
//! ```json
//! { "error": "Failed to fetch todos", "details": "pool timed out while waiting for an open connection" }
//! ```
//!
//! `details` は原因が分かる場合のみ出力する。

use serde::{Deserialize, Serialize};

/// エラーレスポンス
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// エラーの概要
    pub error:   String,
    /// 下位エラーのメッセージ
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ErrorResponse {
    /// 概要のみのエラーレスポンスを作成する
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error:   error.into(),
            details: None,
        }
    }

    /// 原因付きのエラーレスポンスを作成する
    pub fn with_details(error: impl Into<String>, details: impl Into<String>) -> Self {
        Self {
            error:   error.into(),
            details: Some(details.into()),
        }
    }
}
