//! # Todo API 設定
//!
//! 環境変数から Todo API サーバーの設定を読み込む。
//!
//! ## 環境変数
//!
//! | 変数名 | 必須 | 説明 |
//! |--------|------|------|
//! | `DATABASE_URL` | **Yes** | PostgreSQL 接続 URL |
//! | `HOST` | No | バインドアドレス（デフォルト: `0.0.0.0`） |
//! | `PORT` | No | ポート番号（デフォルト: `5000`） |
//! | `ENV` | No | `production` で静的ファイル配信を有効化し `.env` を読まない |
//! | `STATIC_DIR` | No | 静的ファイルのディレクトリ（デフォルト: `./client/dist`） |

use std::{
    env,
    path::{Path, PathBuf},
};

use thiserror::Error;

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 5000;
const DEFAULT_STATIC_DIR: &str = "./client/dist";

/// 設定読み込みのエラー
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// 必須の環境変数が未設定
    #[error("{0} environment variable is not set")]
    Missing(&'static str),

    /// ポート番号として解釈できない
    #[error("PORT must be a valid port number: {0:?}")]
    InvalidPort(String),
}

/// 実行環境
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Environment {
    #[default]
    Development,
    Production,
}

impl Environment {
    /// `ENV` の値から実行環境を判定する
    ///
    /// `"production"` 以外はすべて開発環境として扱う。
    pub fn parse(value: Option<&str>) -> Self {
        match value {
            Some("production") => Self::Production,
            _ => Self::Development,
        }
    }

    /// 環境変数 `ENV` から実行環境を判定する
    pub fn from_env() -> Self {
        Self::parse(env::var("ENV").ok().as_deref())
    }

    pub fn is_production(self) -> bool {
        self == Self::Production
    }
}

/// `.env` の読み込み結果を判定する
///
/// ファイルが存在しない場合のみ `Ok(None)` とし、読み込み・パースの失敗はエラーとして返す。
pub fn dotenv_outcome(
    result: Result<PathBuf, dotenvy::Error>,
) -> Result<Option<PathBuf>, dotenvy::Error> {
    match result {
        Ok(path) => Ok(Some(path)),
        Err(e) if e.not_found() => Ok(None),
        Err(e) => Err(e),
    }
}

/// カレントディレクトリから親方向に `.env` を探して読み込む
pub fn load_dotenv() -> Result<Option<PathBuf>, dotenvy::Error> {
    dotenv_outcome(dotenvy::dotenv())
}

/// Todo API サーバーの設定
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TodoApiConfig {
    /// バインドアドレス
    pub host:         String,
    /// ポート番号
    pub port:         u16,
    /// データベース接続 URL
    pub database_url: String,
    /// 実行環境
    pub environment:  Environment,
    /// 本番環境で配信する静的ファイルのディレクトリ
    pub static_dir:   PathBuf,
}

impl TodoApiConfig {
    /// 環境変数から設定を読み込む
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// 任意のキー検索関数から設定を読み込む
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let database_url = lookup("DATABASE_URL")
            .filter(|url| !url.is_empty())
            .ok_or(ConfigError::Missing("DATABASE_URL"))?;

        let port = match lookup("PORT").filter(|p| !p.is_empty()) {
            Some(raw) => raw.parse().map_err(|_| ConfigError::InvalidPort(raw))?,
            None => DEFAULT_PORT,
        };

        Ok(Self {
            host: lookup("HOST").unwrap_or_else(|| DEFAULT_HOST.to_string()),
            port,
            database_url,
            environment: Environment::parse(lookup("ENV").as_deref()),
            static_dir: lookup("STATIC_DIR")
                .map_or_else(|| PathBuf::from(DEFAULT_STATIC_DIR), PathBuf::from),
        })
    }

    /// 静的ファイル配信のディレクトリ（本番環境のみ）
    pub fn static_dir(&self) -> Option<&Path> {
        self.environment
            .is_production()
            .then_some(self.static_dir.as_path())
    }
}
