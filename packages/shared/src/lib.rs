//! # Todo 共有ユーティリティ
//!
//! API 層とインフラ層の双方から使われる共通ユーティリティを提供する。
//!
//! ## 設計方針
//!
//! - ビジネスロジックを含まない純粋なユーティリティのみを配置
//! - axum には依存しない（`IntoResponse` 変換は API 層の責務）
//! - ログ初期化は `observability` feature の背後に置く

pub mod error_response;
pub mod health;
pub mod message_response;
pub mod observability;

pub use error_response::ErrorResponse;
pub use health::HealthResponse;
pub use message_response::MessageResponse;
