//! # Todo
//!
//! Todo エンティティと、それを構成する値オブジェクトを定義する。
//!
//! ## ライフサイクル
//!
//! - **作成**: [`NewTodo`] をストアに渡し、ID とタイムスタンプはストアが採番する
//! - **更新**: 完了フラグのみ変更可能（[`CompletionChange`]）。本文は変更しない
//! - **削除**: ID 指定で物理削除
//!
//! ## 不変条件
//!
//! - ID は作成後に変化しない
//! - `updated_at >= created_at`

use std::{num::ParseIntError, str::FromStr};

use chrono::{DateTime, Utc};
use derive_more::Display;
use serde::{Deserialize, Serialize};

use crate::DomainError;

/// Todo ID
///
/// ストア側（`SERIAL` 列）で採番される整数 ID。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display)]
#[display("{_0}")]
#[serde(transparent)]
pub struct TodoId(i32);

impl TodoId {
    /// 既存の整数値から ID を作成する
    pub fn from_i32(value: i32) -> Self {
        Self(value)
    }

    /// 内部の整数値を取得する
    pub fn as_i32(&self) -> i32 {
        self.0
    }
}

/// パスパラメータなどの文字列から ID をパースする
///
/// ```rust
/// use todo_domain::todo::TodoId;
///
/// let id: TodoId = "42".parse().unwrap();
/// assert_eq!(id.as_i32(), 42);
/// assert!("abc".parse::<TodoId>().is_err());
/// ```
impl FromStr for TodoId {
    type Err = ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse::<i32>().map(Self)
    }
}

/// Todo 本文
///
/// 受け取った文字列をそのまま保持する。空白のみの本文は拒否するが、前後の空白は除去しない。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TodoBody(String);

impl TodoBody {
    /// Todo 本文を作成する
    ///
    /// # Errors
    ///
    /// 空文字列（空白のみを含む）の場合
    pub fn new(value: impl Into<String>) -> Result<Self, DomainError> {
        let value = value.into();

        if value.trim().is_empty() {
            return Err(DomainError::Validation("Body is required".to_string()));
        }

        Ok(Self(value))
    }

    /// DB に保存済みの値から復元する
    ///
    /// 保存済みの行は検証せずに受け入れる。
    pub fn from_db(value: String) -> Self {
        Self(value)
    }

    /// 文字列参照を取得する
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// 所有権を持つ文字列に変換する
    pub fn into_string(self) -> String {
        self.0
    }
}

/// 完了フラグの変更内容
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompletionChange {
    /// 現在の値を反転する
    Toggle,
    /// 指定した値に設定する
    Set(bool),
}

impl CompletionChange {
    /// 現在の完了フラグに変更を適用した結果を返す
    pub fn apply(self, current: bool) -> bool {
        match self {
            Self::Toggle => !current,
            Self::Set(completed) => completed,
        }
    }

    /// 明示的に指定された値を返す（`Toggle` の場合は `None`）
    pub fn explicit_value(self) -> Option<bool> {
        match self {
            Self::Toggle => None,
            Self::Set(completed) => Some(completed),
        }
    }
}

/// Todo の新規作成パラメータ
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTodo {
    pub body:      TodoBody,
    pub completed: bool,
}

/// Todo の DB 復元パラメータ
pub struct TodoRecord {
    pub id:         TodoId,
    pub body:       TodoBody,
    pub completed:  bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Todo エンティティ
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Todo {
    id:         TodoId,
    body:       TodoBody,
    completed:  bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl Todo {
    /// 既存のデータから復元する
    pub fn from_db(record: TodoRecord) -> Self {
        Self {
            id:         record.id,
            body:       record.body,
            completed:  record.completed,
            created_at: record.created_at,
            updated_at: record.updated_at,
        }
    }

    /// 完了フラグを変更した新しいインスタンスを返す
    ///
    /// `updated_at` は `created_at` より前にならないよう補正する。
    pub fn with_completion(self, change: CompletionChange, now: DateTime<Utc>) -> Self {
        Self {
            completed: change.apply(self.completed),
            updated_at: now.max(self.created_at),
            ..self
        }
    }

    // Getter メソッド

    pub fn id(&self) -> TodoId {
        self.id
    }

    pub fn body(&self) -> &TodoBody {
        &self.body
    }

    pub fn completed(&self) -> bool {
        self.completed
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }
}
