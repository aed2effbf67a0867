//! # PostgreSQL データベース接続管理
//!
//! 接続プールの作成、疎通確認、テーブルの作成を行う。
//!
//! ## 設計方針
//!
//! - **接続プール**: 起動時に一度だけ作成し、リポジトリにコンストラクタで渡す。
//!   プロセス全体のグローバル変数としては保持しない
//! - **タイムアウト**: 接続取得（`acquire_timeout`）と SQL 実行
//!   （`statement_timeout`）の双方に上限を設け、無期限にブロックしない
//! - **スキーマ**: マイグレーションは持たず、起動時に
//!   `CREATE TABLE IF NOT EXISTS` を一度だけ実行する（冪等）
//!
//! ## 起動シーケンス
//!
//! ```text
//! create_pool → ping → ensure_schema → サーバー起動
//! ```
//!
//! いずれかが失敗した場合、プロセスはリクエストの受け付けを開始してはならない。

use std::time::Duration;

use sqlx::{
   PgPool,
   postgres::{PgConnectOptions, PgPoolOptions},
};

use crate::error::InfraError;

/// `todos` テーブルの DDL
///
/// `updated_at` は PostgreSQL に `ON UPDATE` 句がないため、
/// UPDATE 文側で `updated_at = NOW()` を設定して更新する。
pub const CREATE_TODOS_TABLE: &str = r#"
   CREATE TABLE IF NOT EXISTS todos (
      id          BIGSERIAL PRIMARY KEY,
      title       VARCHAR(255) NOT NULL,
      description TEXT,
      completed   BOOLEAN NOT NULL DEFAULT FALSE,
      created_at  TIMESTAMPTZ NOT NULL DEFAULT NOW(),
      updated_at  TIMESTAMPTZ NOT NULL DEFAULT NOW()
   )
"#;

/// 接続プールの設定値
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PoolSettings {
   /// 最大接続数
   pub max_connections: u32,
   /// 接続取得および SQL 実行のタイムアウト
   pub timeout:         Duration,
}

impl Default for PoolSettings {
   fn default() -> Self {
      Self {
         max_connections: 10,
         timeout:         Duration::from_secs(5),
      }
   }
}

/// PostgreSQL 接続プールを作成する
///
/// 各接続には `statement_timeout` を設定し、1 文の実行時間を
/// `settings.timeout` で打ち切る。
///
/// # エラー
///
/// 接続 URL の誤り、認証失敗、ホスト到達不能などで
/// `InfraErrorKind::Database` を返す。
pub async fn create_pool(
   options: PgConnectOptions,
   settings: &PoolSettings,
) -> Result<PgPool, InfraError> {
   let statement_timeout_ms = settings.timeout.as_millis().to_string();
   let options = options.options([("statement_timeout", statement_timeout_ms)]);

   PgPoolOptions::new()
      .max_connections(settings.max_connections)
      .acquire_timeout(settings.timeout)
      .connect_with(options)
      .await
      .map_err(|e| InfraError::database("open database", e))
}

/// データベースとの疎通を確認する
pub async fn ping(pool: &PgPool) -> Result<(), InfraError> {
   sqlx::query("SELECT 1")
      .execute(pool)
      .await
      .map_err(|e| InfraError::database("ping database", e))?;

   Ok(())
}

/// `todos` テーブルが存在しなければ作成する
///
/// 何度呼び出しても結果は変わらない。
pub async fn ensure_schema(pool: &PgPool) -> Result<(), InfraError> {
   sqlx::query(CREATE_TODOS_TABLE)
      .execute(pool)
      .await
      .map_err(|e| InfraError::database("create todos table", e))?;

   tracing::info!("todos テーブルを作成しました（既存の場合はスキップ）");
   Ok(())
}
