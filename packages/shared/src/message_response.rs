//! # メッセージレスポンス
//!
//! 返すエンティティがない成功レスポンス（削除など）の `{ "message": "..." }` 形式。

use serde::{Deserialize, Serialize};

/// 確認メッセージのみを返すレスポンス
///
/// ## 使用例
///
/// ```
/// use todo_shared::MessageResponse;
///
/// let response = MessageResponse::new("Todo deleted successfully");
/// assert_eq!(response.message, "Todo deleted successfully");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageResponse {
   pub message: String,
}

impl MessageResponse {
   pub fn new(message: impl Into<String>) -> Self {
      Self {
         message: message.into(),
      }
   }
}
