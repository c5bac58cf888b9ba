//! # Todo API ライブラリ
//!
//! ルーター構築・ハンドラ・設定を公開する。
//! `main.rs` はインフラ初期化とサーバー起動に集中する。

pub mod app_builder;
pub mod config;
pub mod error;
pub mod handler;
