//! # エラーレスポンス
//!
//! 全エンドポイント共通のエラーレスポンス `{ "error": "<message>" }` を提供する。
//!
//! 成功レスポンスはエンティティ（または一覧）をそのまま返し、エンベロープで包まない。
//! エラーだけがこの形式を取る非対称性は既存クライアントとの互換性のために維持する。

use serde::{Deserialize, Serialize};

/// 不正なリクエストボディ
pub const INVALID_PAYLOAD_MESSAGE: &str = "Invalid request payload";

/// リソースが存在しない
pub const NOT_FOUND_MESSAGE: &str = "Todo not found";

/// エラーレスポンス
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
   pub error: String,
}

impl ErrorResponse {
   pub fn new(error: impl Into<String>) -> Self {
      Self {
         error: error.into(),
      }
   }

   /// 404 Not Found
   pub fn not_found() -> Self {
      Self::new(NOT_FOUND_MESSAGE)
   }
}

#[cfg(test)]
mod tests {
   use pretty_assertions::assert_eq;

   use super::*;

   #[test]
   fn test_jsonシリアライズでerrorフィールドのみを持つ() {
      let error = ErrorResponse::new("Title is required");
      let json = serde_json::to_value(&error).unwrap();

      assert_eq!(json, serde_json::json!({ "error": "Title is required" }));
   }

   #[test]
   fn test_not_found_が固定メッセージを返す() {
      assert_eq!(ErrorResponse::not_found().error, "Todo not found");
   }

   #[test]
   fn test_jsonデシリアライズが正しく動作する() {
      let error: ErrorResponse = serde_json::from_str(r#"{"error": "boom"}"#).unwrap();
      assert_eq!(error, ErrorResponse::new("boom"));
   }
}
