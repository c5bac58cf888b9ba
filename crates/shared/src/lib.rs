//! # Todo 共有ユーティリティ
//!
//! API レスポンス型とトレーシング初期化など、ビジネスロジックを含まない
//! 共通ユーティリティを提供する。
//!
//! ## 設計方針
//!
//! - axum に依存しない純粋なデータ構造のみを配置
//! - `IntoResponse` 変換は各アプリケーションの責務

pub mod error_response;
pub mod health;
pub mod message_response;
pub mod observability;

pub use error_response::ErrorResponse;
pub use health::{CheckStatus, HealthResponse, ReadinessChecks, ReadinessResponse, ReadinessStatus};
pub use message_response::MessageResponse;
