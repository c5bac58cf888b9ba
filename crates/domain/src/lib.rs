//! # Todo ドメイン層
//!
//! Todo アプリケーションのドメインモデルを定義する。
//!
//! ## 設計方針
//!
//! - **エンティティ**: 一意の識別子を持つオブジェクト（[`todo::Todo`]）
//! - **値オブジェクト**: 識別子を持たない不変オブジェクト（[`todo::TodoBody`]）
//! - **ドメインエラー**: ビジネスルール違反を表現するエラー型
//!
//! ## 依存関係の方向
//!
//! ```text
//! api → infra → domain
//! ```
//!
//! ドメイン層はインフラ層（DB、外部サービス）には一切依存しない。
//!
//! ## モジュール構成
//!
//! - [`error`] - ドメイン層で発生するエラーの定義
//! - [`todo`] - Todo エンティティと値オブジェクト
//!
//! ## 使用例
//!
//! ```rust
//! use todo_domain::{DomainError, todo::TodoBody};
//!
//! let body = TodoBody::new("牛乳を買う").unwrap();
//! assert_eq!(body.as_str(), "牛乳を買う");
//!
//! let error = TodoBody::new("").unwrap_err();
//! assert!(matches!(error, DomainError::Validation(_)));
//! ```

pub mod error;
pub mod todo;

pub use error::DomainError;
