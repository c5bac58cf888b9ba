//! # トレーシング初期化
//!
//! `tracing-subscriber` の設定をサービス間で揃える。
//!
//! - `RUST_LOG` が未設定なら、サービス名の先頭部分（`todo-api` → `todo`）を
//!   クレート名の接頭辞とみなし、自クレート群のみ debug で出力する
//! - `LOG_FORMAT=json` で 1 行 1 イベントの JSON 出力に切り替える
//! - `ErrorLayer` を登録し、`InfraError` が捕捉した SpanTrace を解決可能にする

/// ログ出力形式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// 1 行 1 イベントの JSON
    Json,
    /// 開発用の人間向け出力
    #[default]
    Pretty,
}

impl LogFormat {
    /// `LOG_FORMAT` の値から出力形式を決める
    ///
    /// 未設定は `Pretty`。未知の値も `Pretty` とし、subscriber 初期化前なので stderr に警告を出す。
    pub fn from_value(value: Option<&str>) -> Self {
        match value {
            Some("json") => Self::Json,
            Some("pretty") | None => Self::Pretty,
            Some(other) => {
                eprintln!("WARNING: LOG_FORMAT={other:?} は未対応のため pretty で出力します");
                Self::Pretty
            }
        }
    }

    /// 環境変数 `LOG_FORMAT` から読み取る
    pub fn from_env() -> Self {
        Self::from_value(std::env::var("LOG_FORMAT").ok().as_deref())
    }
}

/// `RUST_LOG` 未設定時のフィルタ
///
/// ```
/// use todo_shared::observability::default_filter;
///
/// assert_eq!(default_filter("todo-api"), "info,todo=debug");
/// ```
pub fn default_filter(service_name: &str) -> String {
    let crate_prefix = service_name
        .split(['-', '_'])
        .next()
        .filter(|prefix| !prefix.is_empty())
        .unwrap_or(service_name);
    format!("info,{crate_prefix}=debug")
}

/// グローバル subscriber を登録する
///
/// プロセス起動時に一度だけ呼び出す。
#[cfg(feature = "observability")]
pub fn init_tracing(service_name: &str, log_format: LogFormat) {
    use tracing_subscriber::{EnvFilter, Layer as _, layer::SubscriberExt, util::SubscriberInitExt};

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_filter(service_name)));

    let fmt_layer = match log_format {
        LogFormat::Pretty => tracing_subscriber::fmt::layer().boxed(),
        LogFormat::Json => tracing_subscriber::fmt::layer()
            .json()
            .flatten_event(true)
            .with_current_span(true)
            .with_span_list(false)
            .boxed(),
    };

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .with(tracing_error::ErrorLayer::default())
        .init();
}
