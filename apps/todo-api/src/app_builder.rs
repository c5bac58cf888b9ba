//! # Todo API アプリケーション構築
//!
//! State を受け取り、ルーター・ミドルウェア・静的ファイル配信を組み立てる。
//! `main.rs` はインフラ初期化とサーバー起動に集中する。

use std::{path::Path, sync::Arc};

use axum::{
    Router,
    http::{Method, header},
    routing::{get, patch},
};
use tower::ServiceBuilder;
use tower_http::{
    cors::{Any, CorsLayer},
    services::ServeDir,
    trace::TraceLayer,
};

use crate::handler::{
    ReadinessState,
    TodoState,
    create_todo,
    delete_todo,
    health_check,
    list_todos,
    readiness_check,
    update_todo,
};

/// Todo API のルート
pub fn todo_routes(todo_state: Arc<TodoState>) -> Router {
    Router::new()
        .route("/api/todos", get(list_todos).post(create_todo))
        .route("/api/todos/{id}", patch(update_todo).delete(delete_todo))
        .with_state(todo_state)
}

/// CORS 設定
///
/// 任意のオリジンを許可する。
pub fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::PATCH, Method::DELETE])
        .allow_headers([header::ORIGIN, header::CONTENT_TYPE, header::ACCEPT])
        .expose_headers([header::CONTENT_LENGTH, header::ACCESS_CONTROL_ALLOW_ORIGIN])
}

/// ルーターを構築する
///
/// `static_dir` を指定した場合、どのルートにも一致しないリクエストを
/// そのディレクトリの静的ファイルで応答する（本番環境のフロントエンド配信）。
pub fn build_router(
    todo_state: Arc<TodoState>,
    readiness_state: Arc<ReadinessState>,
    static_dir: Option<&Path>,
) -> Router {
    let router = Router::new()
        .route("/health", get(health_check))
        .route("/health/ready", get(readiness_check))
        .with_state(readiness_state)
        .merge(todo_routes(todo_state));

    let router = match static_dir {
        Some(dir) => {
            tracing::info!(dir = %dir.display(), "静的ファイル配信を有効にします");
            router.fallback_service(ServeDir::new(dir))
        }
        None => router,
    };

    router.layer(
        ServiceBuilder::new()
            .layer(TraceLayer::new_for_http())
            .layer(cors_layer()),
    )
}
