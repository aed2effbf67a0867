//! # インフラ層エラー定義
//!
//! データベースとの通信で発生するエラーを表現する。
//!
//! ## 構造
//!
//! `std::io::Error` と同じ struct + enum パターンを採用:
//! - [`InfraError`]: エラー種別（[`InfraErrorKind`]）と [`SpanTrace`] を保持するラッパー
//! - [`InfraErrorKind`]: エラーの具体的な種別（NotFound, Database）
//!
//! 「該当行なし」は専用の種別で表現する。API 層はメッセージ文字列ではなく
//! 種別で 404 / 500 を振り分ける。

use std::fmt;

use derive_more::Display;
use thiserror::Error;
use todo_domain::todo::TodoId;
use tracing_error::SpanTrace;

/// インフラ層で発生するエラー
///
/// エラー種別（[`InfraErrorKind`]）と [`SpanTrace`]（呼び出し経路）を保持する。
/// convenience constructor でエラーを生成すると、
/// その時点のスパン情報が自動的にキャプチャされる。
/// `sqlx::Error` は必ず操作名を添えて [`InfraError::database`] で包む。
///
/// ## パターンマッチ
///
/// ```ignore
/// match error.kind() {
///     InfraErrorKind::NotFound { id } => { /* 404 */ }
///     InfraErrorKind::Database { .. } => { /* 500 */ }
/// }
/// ```
#[derive(Display)]
#[display("{kind}")]
pub struct InfraError {
   kind:       InfraErrorKind,
   span_trace: SpanTrace,
}

/// インフラ層エラーの種別
#[derive(Debug, Error)]
pub enum InfraErrorKind {
   /// 指定した ID の行が存在しない
   #[error("todo not found: id={id}")]
   NotFound {
      /// 検索に使用した ID
      id: TodoId,
   },

   /// データベースエラー
   ///
   /// 接続断、制約違反、タイムアウト、SQL の誤りなど。
   /// `operation` は失敗した操作（例: `"create todo"`）。
   #[error("failed to {operation}: {source}")]
   Database {
      operation: &'static str,
      #[source]
      source:    sqlx::Error,
   },
}

// ===== InfraError のメソッド =====

impl InfraError {
   /// エラー種別を取得する
   pub fn kind(&self) -> &InfraErrorKind {
      &self.kind
   }

   /// SpanTrace を取得する
   pub fn span_trace(&self) -> &SpanTrace {
      &self.span_trace
   }

   /// 該当行なしのエラーか
   pub fn is_not_found(&self) -> bool {
      matches!(self.kind, InfraErrorKind::NotFound { .. })
   }

   // ===== Convenience constructors =====

   /// 該当行なしエラーを生成する
   pub fn not_found(id: TodoId) -> Self {
      Self {
         kind:       InfraErrorKind::NotFound { id },
         span_trace: SpanTrace::capture(),
      }
   }

   /// 操作名付きのデータベースエラーを生成する
   pub fn database(operation: &'static str, source: sqlx::Error) -> Self {
      Self {
         kind:       InfraErrorKind::Database { operation, source },
         span_trace: SpanTrace::capture(),
      }
   }
}

// ===== トレイト実装 =====

impl fmt::Debug for InfraError {
   fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
      f.debug_struct("InfraError")
         .field("kind", &self.kind)
         .field("span_trace", &self.span_trace)
         .finish()
   }
}

impl std::error::Error for InfraError {
   fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
      self.kind.source()
   }
}
