//! # リポジトリ実装
//!
//! リポジトリトレイトとその PostgreSQL 実装を提供する。
//!
//! ## 設計方針
//!
//! - **トレイト経由の依存**: ハンドラは `Arc<dyn TodoRepository>` だけを知る
//! - **データベース抽象化**: sqlx を使用し、PostgreSQL 固有の処理をカプセル化
//! - **テスタビリティ**: インメモリ実装（`mock::MockTodoRepository`）に差し替え可能

pub mod todo_repository;

pub use todo_repository::{PostgresTodoRepository, TodoRepository};
