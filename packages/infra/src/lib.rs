//! # Todo インフラ層
//!
//! PostgreSQL との接続・通信を担当するインフラストラクチャ層。
//!
//! ## 設計方針
//!
//! リポジトリトレイトとその具体的な実装を提供する。ストアの詳細
//! （SQL、接続プール、行のマッピング）をカプセル化し、API 層を
//! ストアの変更から保護する。
//!
//! ## 依存関係
//!
//! ```text
//! todo-api → infra → domain
//! ```
//!
//! ## モジュール構成
//!
//! - [`db`] - PostgreSQL 接続プールとスキーマ管理
//! - [`error`] - インフラ層エラー定義
//! - [`repository`] - リポジトリトレイトと実装
//! - `mock` - インメモリのテスト用リポジトリ（`test-utils` feature）
//!
//! ## 使用例
//!
//! ```rust,ignore
//! use todo_infra::{db, repository::PostgresTodoRepository};
//!
//! async fn setup(options: sqlx::postgres::PgConnectOptions) -> Result<(), Box<dyn std::error::Error>> {
//!     let pool = db::create_pool(options, &db::PoolSettings::default()).await?;
//!     db::ping(&pool).await?;
//!     db::ensure_schema(&pool).await?;
//!
//!     let repository = PostgresTodoRepository::new(pool);
//!     Ok(())
//! }
//! ```

pub mod db;
pub mod error;
pub mod repository;

#[cfg(any(test, feature = "test-utils"))]
pub mod mock;

pub use error::{InfraError, InfraErrorKind};
