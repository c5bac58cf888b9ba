//! # Todo API サーバー
//!
//! Todo リストの CRUD を提供する HTTP API サーバー。
//!
//! ## 役割
//!
//! - **API**: `/api/todos` で Todo の一覧・作成・完了フラグ変更・削除を提供
//! - **データ永続化**: PostgreSQL の `todos` テーブルに保存
//! - **フロントエンド配信**: 本番環境（`ENV=production`）ではビルド済みの静的ファイルを配信
//!
//! 環境変数は [`todo_api::config`] を参照。
//!
//! ## 起動方法
//!
//! ```bash
//! # 開発環境（.env を読み込む）
//! cargo run -p todo-api
//!
//! # 本番環境
//! ENV=production DATABASE_URL=postgres://... cargo run -p todo-api --release
//! ```
//!
//! スキーマは `migrations/` を事前に適用しておく（サーバーはマイグレーションを実行しない）。

use std::sync::Arc;

use anyhow::Context as _;
use todo_api::{
    app_builder::build_router,
    config::{Environment, TodoApiConfig, load_dotenv},
    handler::{ReadinessState, TodoState},
};
use todo_infra::{db, repository::PostgresTodoRepository};
use todo_shared::observability::{LogFormat, init_tracing};
use tokio::net::TcpListener;

const SERVICE_NAME: &str = "todo-api";

/// Todo API サーバーのエントリーポイント
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 本番環境以外では .env ファイルを読み込む（存在しない場合のみ無視）
    let dotenv = if Environment::from_env().is_production() {
        Ok(None)
    } else {
        load_dotenv()
    };

    // トレーシング初期化
    init_tracing(SERVICE_NAME, LogFormat::from_env());
    let _tracing_guard = tracing::info_span!("app", service = SERVICE_NAME).entered();

    match dotenv {
        Ok(Some(path)) => tracing::info!(path = %path.display(), ".env を読み込みました"),
        Ok(None) => {}
        Err(e) => {
            tracing::error!(error = %e, ".env の読み込みに失敗しました");
            return Err(e).context(".env の読み込みに失敗しました");
        }
    }

    // 設定読み込み
    let config = TodoApiConfig::from_env().context("設定の読み込みに失敗しました")?;

    tracing::info!(
        "Todo API サーバーを起動します: {}:{} ({:?})",
        config.host,
        config.port,
        config.environment
    );

    // データベース接続プールを作成
    let pool = db::create_pool(&config.database_url)
        .await
        .context("データベース接続に失敗しました")?;
    tracing::info!("データベースに接続しました");

    // 依存コンポーネントを初期化
    let todo_state = Arc::new(TodoState {
        todo_repository: Arc::new(PostgresTodoRepository::new(pool.clone())),
    });
    let readiness_state = Arc::new(ReadinessState { pool });

    let app = build_router(todo_state, readiness_state, config.static_dir());

    // サーバー起動
    let listener = TcpListener::bind((config.host.as_str(), config.port))
        .await
        .with_context(|| format!("{}:{} へのバインドに失敗しました", config.host, config.port))?;
    tracing::info!("Todo API サーバーが起動しました: {}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Todo API サーバーを停止しました");
    Ok(())
}

/// Ctrl+C または SIGTERM を待つ
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Ctrl+C ハンドラの登録に失敗しました");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "SIGTERM ハンドラの登録に失敗しました");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    tracing::info!("シャットダウンシグナルを受信しました");
}
