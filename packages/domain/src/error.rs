//! # ドメイン層エラー定義
//!
//! 入力値の検証失敗など、ドメイン固有の例外状態を表現するエラー型。
//!
//! ## エラーの種類と HTTP ステータスの対応
//!
//! | エラー種別 | HTTP ステータス | 用途 |
//! |-----------|----------------|------|
//! | `Validation` | 400 Bad Request | 入力値の検証失敗 |
//!
//! 「存在しない」はストアに問い合わせて初めて判明するため、
//! インフラ層の `InfraErrorKind::NotFound` で表現する。

use thiserror::Error;

/// ドメイン層で発生するエラー
///
/// API 層でこのエラーを受け取り、400 レスポンスに変換する。
/// メッセージはそのままクライアントに返される。
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomainError {
   /// バリデーションエラー
   ///
   /// 必須フィールドの未入力、ID の形式不正など。
   #[error("{0}")]
   Validation(String),
}
