//! # API エラーハンドリング
//!
//! HTTP API のエラー定義と、axum レスポンスへの変換を行う。
//!
//! ## 設計方針
//!
//! - **`{"error": "..."}` 形式**: すべてのエラーレスポンスは
//!   [`ErrorResponse`] の 1 フィールドのみを持つ
//! - **種別による分類**: 404 / 500 の振り分けは [`InfraErrorKind`] で行い、
//!   エラーメッセージの文字列は判定に使わない
//! - **IntoResponse 実装**: ハンドラは `Result<_, ApiError>` を返すだけでよい
//!
//! ## エラーの階層
//!
//! ```text
//! DomainError ──┐
//!               ├─▶ ApiError ──IntoResponse──▶ StatusCode + {"error": ...}
//! InfraError  ──┘
//! ```

use axum::{
   Json,
   http::StatusCode,
   response::{IntoResponse, Response},
};
use thiserror::Error;
use todo_domain::DomainError;
use todo_infra::{InfraError, InfraErrorKind};
use todo_shared::ErrorResponse;

/// API 層で発生するエラー
#[derive(Debug, Error)]
pub enum ApiError {
   /// バリデーションエラー（400 Bad Request）
   ///
   /// メッセージはそのままレスポンスの `error` に入る。
   #[error("{0}")]
   Validation(String),

   /// 対象の Todo が存在しない（404 Not Found）
   #[error("todo not found")]
   NotFound,

   /// ストアでの失敗（500 Internal Server Error）
   #[error("{0}")]
   Persistence(InfraError),
}

impl ApiError {
   /// レスポンスの HTTP ステータス
   pub fn status(&self) -> StatusCode {
      match self {
         ApiError::Validation(_) => StatusCode::BAD_REQUEST,
         ApiError::NotFound => StatusCode::NOT_FOUND,
         ApiError::Persistence(_) => StatusCode::INTERNAL_SERVER_ERROR,
      }
   }
}

impl From<InfraError> for ApiError {
   fn from(err: InfraError) -> Self {
      match err.kind() {
         InfraErrorKind::NotFound { .. } => ApiError::NotFound,
         InfraErrorKind::Database { .. } => ApiError::Persistence(err),
      }
   }
}

impl From<DomainError> for ApiError {
   fn from(err: DomainError) -> Self {
      match err {
         DomainError::Validation(message) => ApiError::Validation(message),
      }
   }
}

impl IntoResponse for ApiError {
   fn into_response(self) -> Response {
      let status = self.status();
      let body = match self {
         ApiError::Validation(message) => ErrorResponse::new(message),
         ApiError::NotFound => ErrorResponse::not_found(),
         ApiError::Persistence(err) => {
            tracing::error!(
               error = %err,
               span_trace = %err.span_trace(),
               "データベースエラー"
            );
            ErrorResponse::new(err.to_string())
         }
      };

      (status, Json(body)).into_response()
   }
}
