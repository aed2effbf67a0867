//! # Todo API サーバー
//!
//! Todo リソースの CRUD を JSON over HTTP で提供する API サーバーのライブラリ部分。
//!
//! ## アーキテクチャ
//!
//! ```text
//! HTTP リクエスト
//!   → router（パス → ハンドラ）
//!   → handler（デコード・検証）
//!   → TodoRepository（SQL）
//!   → PostgreSQL
//! ```
//!
//! ## モジュール構成
//!
//! - [`config`] - アプリケーション設定（環境変数からの読み込み）
//! - [`error`] - API エラー定義と HTTP レスポンスへの変換
//! - [`handler`] - HTTP リクエストハンドラ
//! - [`router`] - ルーター構築
//!
//! ## 依存関係
//!
//! - `todo_domain`: Todo エンティティと値オブジェクト
//! - `todo_infra`: 接続プールとリポジトリ
//! - `todo_shared`: レスポンス型とトレーシング初期化
//!
//! ## 使用例
//!
//! ```rust,ignore
//! use std::sync::Arc;
//!
//! use todo_api::router::build_router;
//! use todo_infra::repository::PostgresTodoRepository;
//!
//! let app = build_router(Arc::new(PostgresTodoRepository::new(pool)));
//! ```

pub mod config;
pub mod error;
pub mod handler;
pub mod router;
